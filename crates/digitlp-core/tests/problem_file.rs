use digitlp_core::{SolveError, brute_force_solve};
use digitlp_core::domain::problem::{Objective, Point, ProblemError, ProductMixProblem, SearchBounds};
use digitlp_core::infra::problem_io::{
    ProblemIoError, load_problem, parse_problem, save_report, save_solution_json,
};
use tempfile::tempdir;

const DEMO_PROBLEM: &str = include_str!("../../../demos/product_mix.toml");

#[test]
fn test_demo_file_matches_default_problem() {
    let problem = parse_problem(DEMO_PROBLEM).unwrap();
    assert_eq!(problem, ProductMixProblem::default());
}

#[test]
fn test_load_problem_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("problem.toml");
    std::fs::write(&path, DEMO_PROBLEM).unwrap();

    let problem = load_problem(&path).unwrap();
    let solution = brute_force_solve(&problem).unwrap();
    assert_eq!(solution.optimal, Point::new(8, 3));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = load_problem(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ProblemIoError::Io(_))));
}

#[test]
fn test_load_rejects_duplicate_constraints() {
    let text = format!(
        "{}\n[[constraints]]\nname = \"min_b\"\nb = 1\nrelation = \">=\"\nrhs = 4\n",
        DEMO_PROBLEM
    );
    assert!(matches!(
        parse_problem(&text),
        Err(ProblemIoError::Invalid(_))
    ));
}

#[test]
fn test_save_report_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("RESULTS.md");

    save_report(&path, "# Results\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Results\n");
}

#[test]
fn test_save_solution_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("solution.json");
    let solution = brute_force_solve(&ProductMixProblem::default()).unwrap();

    save_solution_json(&path, &solution).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["optimal"]["a"], 8);
    assert_eq!(value["optimal"]["b"], 3);
    assert_eq!(value["max_revenue"], 36);
    assert_eq!(value["num_feasible"], 25);
}

#[test]
fn test_parse_rejects_objective_that_would_overflow() {
    let text = r#"
        [objective]
        a = 4611686018427387904
        b = 1

        [search]
        a = [0, 3]
        b = [0, 1]
    "#;
    assert!(matches!(
        parse_problem(text),
        Err(ProblemIoError::Invalid(ProblemError::Overflow(_)))
    ));
}

#[test]
fn test_solver_refuses_overflowing_problem() {
    let problem = ProductMixProblem {
        name: "wide".to_string(),
        objective: Objective { a: 1 << 62, b: 1 },
        search: SearchBounds {
            a: [0, 3],
            b: [0, 1],
        },
        constraints: Vec::new(),
    };
    assert_eq!(
        brute_force_solve(&problem),
        Err(SolveError::Problem(ProblemError::Overflow(
            "objective".to_string()
        )))
    );
}
