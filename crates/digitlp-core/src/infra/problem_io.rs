//! Problem file and result output I/O
//!
//! Problems are TOML documents:
//!
//! ```toml
//! name = "Product mix"
//!
//! [objective]
//! a = 3
//! b = 4
//!
//! [search]
//! a = [0, 15]
//! b = [3, 15]
//!
//! [[constraints]]
//! name = "transportation"
//! a = 1
//! b = 2
//! relation = "<="
//! rhs = 14
//! ```

use crate::app::solver::Solution;
use crate::constants::REPORT_FILE_NAME;
use crate::domain::problem::{ProblemError, ProductMixProblem};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problem and result I/O errors
#[derive(Debug, Error)]
pub enum ProblemIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid problem file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid problem: {0}")]
    Invalid(#[from] ProblemError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    Ok(())
}

/// Get the report file path
///
/// Format: `{dir}/RESULTS.md`
pub fn get_report_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(REPORT_FILE_NAME)
}

/// Parse and validate a problem from TOML text
pub fn parse_problem(text: &str) -> Result<ProductMixProblem, ProblemIoError> {
    let problem: ProductMixProblem = toml::from_str(text)?;
    problem.validate()?;
    Ok(problem)
}

/// Load and validate a problem file
pub fn load_problem(path: impl AsRef<Path>) -> Result<ProductMixProblem, ProblemIoError> {
    let text = fs::read_to_string(path.as_ref())?;
    let problem = parse_problem(&text)?;
    info!(
        "Loaded problem '{}' with {} constraint(s) from {}",
        problem.name,
        problem.constraints.len(),
        path.as_ref().display()
    );
    Ok(problem)
}

/// Write a rendered Markdown report
pub fn save_report(path: impl AsRef<Path>, markdown: &str) -> Result<(), ProblemIoError> {
    ensure_parent_dir(path.as_ref())?;
    fs::write(path.as_ref(), markdown)?;
    Ok(())
}

/// Write a solution as pretty-printed JSON
pub fn save_solution_json(
    path: impl AsRef<Path>,
    solution: &Solution,
) -> Result<(), ProblemIoError> {
    ensure_parent_dir(path.as_ref())?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, solution)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::problem::Relation;

    #[test]
    fn test_get_report_path() {
        assert_eq!(
            get_report_path("out"),
            PathBuf::from("out").join("RESULTS.md")
        );
    }

    #[test]
    fn test_parse_relation_aliases() {
        let text = r#"
            [objective]
            a = 1
            b = 1

            [search]
            a = [0, 4]
            b = [0, 4]

            [[constraints]]
            name = "sum"
            a = 1
            b = 1
            relation = "le"
            rhs = 3

            [[constraints]]
            name = "b_floor"
            b = 1
            relation = ">="
            rhs = 1
        "#;
        let problem = parse_problem(text).unwrap();
        assert_eq!(problem.name, "Product mix");
        assert_eq!(problem.constraints[1].a, 0);
        assert_eq!(problem.constraints[1].label(), "B ≥ 1");
    }

    #[test]
    fn test_parse_every_relation_spelling() {
        let spellings = [
            ("le", Relation::Le),
            ("<=", Relation::Le),
            ("lt", Relation::Lt),
            ("<", Relation::Lt),
            ("ge", Relation::Ge),
            (">=", Relation::Ge),
            ("gt", Relation::Gt),
            (">", Relation::Gt),
            ("eq", Relation::Eq),
            ("=", Relation::Eq),
            ("==", Relation::Eq),
        ];

        let mut text = String::from(
            "[objective]\na = 1\nb = 1\n[search]\na = [0, 4]\nb = [0, 4]\n",
        );
        for (i, (spelling, _)) in spellings.iter().enumerate() {
            text.push_str(&format!(
                "[[constraints]]\nname = \"c{}\"\na = 1\nrelation = \"{}\"\nrhs = 2\n",
                i, spelling
            ));
        }

        let problem = parse_problem(&text).unwrap();
        let parsed: Vec<Relation> = problem.constraints.iter().map(|c| c.relation).collect();
        let expected: Vec<Relation> = spellings.iter().map(|&(_, r)| r).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_rejects_unknown_relation() {
        let text = r#"
            [objective]
            a = 1
            b = 1
            [search]
            a = [0, 4]
            b = [0, 4]
            [[constraints]]
            name = "bad"
            a = 1
            relation = "=>"
            rhs = 3
        "#;
        assert!(matches!(parse_problem(text), Err(ProblemIoError::Parse(_))));
    }
}
