//! Markdown results report
//!
//! A report is a title plus a list of sections; each section holds
//! paragraphs, lists, pipe tables, code blocks and image references.
//! Rendering produces GitHub-flavoured Markdown.

use crate::app::analysis::analyze_student_id;
use crate::app::sensitivity::{SensitivityReport, sensitivity_analysis};
use crate::app::solver::{Solution, SolveError, brute_force_solve_parallel};
use crate::constants::{FEASIBLE_REGION_IMAGE, MAX_LISTED_POINTS};
use crate::domain::digits::{DigitAnalysis, DigitError};
use crate::domain::problem::{Point, ProductMixProblem};
use crate::domain::student_id::{
    StudentIdError, extract_digits, reverse_student_id, reverse_student_id_from_index,
};
use crate::domain::verification::verify_constraints;
use std::fmt::{self, Display, Write};
use thiserror::Error;

/// Largest span (per axis) drawn by [`render_feasible_grid`]
const MAX_GRID_SPAN: i64 = 60;

/// Report generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error(transparent)]
    StudentId(#[from] StudentIdError),
    #[error(transparent)]
    Digits(#[from] DigitError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Pipe table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, extra cells are dropped
    pub fn add_row<D: Display>(&mut self, cells: impl IntoIterator<Item = D>) {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|c| c.to_string())
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        push_row(&mut out, &self.headers);
        push_row(&mut out, &vec!["---".to_string(); self.headers.len()]);
        for row in &self.rows {
            push_row(&mut out, row);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

/// Backslash-escape Markdown punctuation in free text
pub fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Code span whose fence is longer than any backtick run in `text`
pub fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let text = text.replace('\n', " ");
    if text.starts_with('`') || text.ends_with('`') {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}

/// Content block inside a section
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    List(Vec<String>),
    Table(MarkdownTable),
    Code(String),
    Image { alt: String, path: String },
}

impl Block {
    fn render(&self) -> String {
        match self {
            Self::Paragraph(text) => format!("{}\n", text),
            Self::List(items) => items.iter().map(|i| format!("- {}\n", i)).collect(),
            Self::Table(table) => table.render(),
            Self::Code(text) => format!("```text\n{}\n```\n", text.trim_end()),
            Self::Image { alt, path } => format!("![{}]({})\n", alt, path),
        }
    }
}

/// Report section with a level-2 heading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSection {
    title: String,
    blocks: Vec<Block>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.add_block(Block::Paragraph(text.into()));
    }

    pub fn add_heading(&mut self, text: &str) {
        self.add_block(Block::Paragraph(format!("### {}", text)));
    }

    pub fn add_table(&mut self, table: MarkdownTable) {
        self.add_block(Block::Table(table));
    }

    fn render(&self) -> String {
        let mut out = format!("## {}\n", self.title);
        for block in &self.blocks {
            out.push('\n');
            out.push_str(&block.render());
        }
        out
    }
}

/// Complete report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Render as Markdown
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n", self.title);
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.render());
        }
        out
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn format_list<T: Display>(items: &[T]) -> String {
    let inner: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

fn format_chars(chars: &[char]) -> String {
    let inner: Vec<String> = chars.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", inner.join(", "))
}

/// Text plot of the search box
///
/// B decreases down the rows and A increases across the columns. `*` marks
/// the optimum, `o` a feasible point and `.` everything else. Returns `None`
/// when either axis spans more than 60 values.
pub fn render_feasible_grid(problem: &ProductMixProblem, solution: &Solution) -> Option<String> {
    let a_range = problem.search.a_range();
    let b_range = problem.search.b_range();
    if a_range.is_empty()
        || b_range.is_empty()
        || a_range.end - a_range.start > MAX_GRID_SPAN
        || b_range.end - b_range.start > MAX_GRID_SPAN
    {
        return None;
    }

    let cell_width = [a_range.start, a_range.end - 1]
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    let label_width = [b_range.start, b_range.end - 1]
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    let _ = writeln!(out, "{:>label_width$}", "B");
    for b in b_range.clone().rev() {
        let _ = write!(out, "{:>label_width$} |", b);
        for a in a_range.clone() {
            let point = Point::new(a, b);
            let mark = if point == solution.optimal {
                '*'
            } else if solution.is_feasible(point) {
                'o'
            } else {
                '.'
            };
            let _ = write!(out, " {:>cell_width$}", mark);
        }
        out.push('\n');
    }

    let axis_len = (cell_width + 1) * a_range.clone().count() + 1;
    let _ = writeln!(out, "{:>label_width$} +{}", "", "-".repeat(axis_len));
    let _ = write!(out, "{:>label_width$}  ", "");
    for a in a_range {
        let _ = write!(out, " {:>cell_width$}", a);
    }
    out.push_str("  A\n");

    Some(out)
}

fn string_operations_section(
    student_id: &str,
    reverse_indices: &[usize],
) -> Result<ReportSection, ReportError> {
    let mut section = ReportSection::new("String Operations");
    section.add_paragraph(format!("Student ID: {}", code_span(student_id)));

    let mut table = MarkdownTable::new(["Operation", "Result"]);
    table.add_row([
        "Reversed characters".to_string(),
        format_chars(&reverse_student_id(student_id)?),
    ]);
    for &index in reverse_indices {
        table.add_row([
            format!("Reversed from index {}", index),
            reverse_student_id_from_index(student_id, index)?,
        ]);
    }
    table.add_row([
        "Extracted digits".to_string(),
        format_list(&extract_digits(student_id)),
    ]);
    section.add_table(table);

    Ok(section)
}

fn array_algorithms_section(analysis: &DigitAnalysis) -> ReportSection {
    let mut section = ReportSection::new("Array Algorithms");

    let mut summary = MarkdownTable::new(["Metric", "Value"]);
    summary.add_row(["Digits".to_string(), format_list(&analysis.digits)]);
    summary.add_row(["Maximum".to_string(), analysis.maximum.to_string()]);
    summary.add_row(["Maximum index".to_string(), analysis.max_index.to_string()]);
    summary.add_row([
        "Second maximum".to_string(),
        analysis
            .second_maximum
            .map_or_else(|| "none".to_string(), |v| v.to_string()),
    ]);
    summary.add_row([
        "Distinct digits".to_string(),
        format_list(&analysis.distinct_digits),
    ]);
    summary.add_row(["Distinct count".to_string(), analysis.distinct_count.to_string()]);
    summary.add_row([
        "Smaller counts".to_string(),
        format_list(&analysis.smaller_counts),
    ]);
    section.add_table(summary);

    section.add_heading("Position Analysis");
    let mut positions = MarkdownTable::new(["Position", "Digit", "Smaller numbers"]);
    for (i, (digit, count)) in analysis
        .digits
        .iter()
        .zip(&analysis.smaller_counts)
        .enumerate()
    {
        positions.add_row([i.to_string(), digit.to_string(), count.to_string()]);
    }
    section.add_table(positions);

    section
}

fn linear_programming_section(
    problem: &ProductMixProblem,
    solution: &Solution,
    sensitivity: &SensitivityReport,
) -> ReportSection {
    let mut section = ReportSection::new("Linear Programming");

    section.add_paragraph(format!(
        "{}: maximize {} subject to:",
        escape_inline(&problem.name),
        problem.objective
    ));
    section.add_block(Block::List(
        problem
            .constraints
            .iter()
            .map(|c| format!("{} ({})", code_span(&c.label()), escape_inline(&c.name)))
            .collect(),
    ));
    section.add_paragraph(format!(
        "Integer search over A in [{}, {}) and B in [{}, {}).",
        problem.search.a[0], problem.search.a[1], problem.search.b[0], problem.search.b[1]
    ));

    section.add_heading("Feasible Solutions");
    let mut feasible = MarkdownTable::new(["Point (A, B)", "Revenue"]);
    for fp in solution.feasible_points.iter().take(MAX_LISTED_POINTS) {
        feasible.add_row([fp.point.to_string(), fp.value.to_string()]);
    }
    let hidden = solution.num_feasible.saturating_sub(MAX_LISTED_POINTS);
    if hidden > 0 {
        feasible.add_row([format!("… {} more", hidden), String::new()]);
    }
    section.add_table(feasible);

    section.add_heading("Optimal Solution");
    let mut optimal = MarkdownTable::new(["Quantity", "Value"]);
    optimal.add_row(["Product A units".to_string(), solution.optimal.a.to_string()]);
    optimal.add_row(["Product B units".to_string(), solution.optimal.b.to_string()]);
    optimal.add_row(["Maximum revenue".to_string(), solution.max_revenue.to_string()]);
    optimal.add_row(["Feasible solutions".to_string(), solution.num_feasible.to_string()]);
    section.add_table(optimal);

    section.add_heading("Constraint Verification");
    let mut checks = MarkdownTable::new(["Constraint", "Expression", "Status", "Slack"]);
    for check in verify_constraints(problem, solution.optimal) {
        checks.add_row([
            check.constraint.clone(),
            check.expression.clone(),
            check.status(),
            check.slack.to_string(),
        ]);
    }
    section.add_table(checks);

    section.add_heading("Sensitivity Analysis");
    let mut slacks = MarkdownTable::new(["Constraint", "Slack"]);
    for (name, slack) in &sensitivity.slacks {
        slacks.add_row([name.clone(), slack.to_string()]);
    }
    section.add_table(slacks);
    if let Some(what_if) = &sensitivity.what_if {
        let mut text = format!(
            "What-if: changing {} from {} to {} moves the optimum to {} with revenue {} (change {:+}).",
            code_span(&what_if.constraint),
            what_if.original_rhs,
            what_if.new_rhs,
            what_if.new_optimal,
            what_if.new_revenue,
            what_if.revenue_change
        );
        if let Some(price) = what_if.shadow_price_estimate {
            let _ = write!(text, " Estimated shadow price: {:.2} per unit.", price);
        }
        section.add_paragraph(text);
    }

    section.add_heading("Feasible Region");
    if let Some(grid) = render_feasible_grid(problem, solution) {
        section.add_block(Block::Code(grid));
    }
    section.add_block(Block::Image {
        alt: "Feasible region".to_string(),
        path: FEASIBLE_REGION_IMAGE.to_string(),
    });

    section
}

fn glossary_section() -> ReportSection {
    let mut section = ReportSection::new("Glossary");
    section.add_block(Block::List(vec![
        "**3MT**: Three Minute Thesis, a presentation-scoring context.".to_string(),
        "**Binding constraint**: an inequality satisfied with equality at the optimum."
            .to_string(),
        "**Feasible region**: the set of points satisfying all constraints.".to_string(),
    ]));
    section
}

/// Build the full results report
///
/// # Arguments
/// * `student_id` - ID for the string and array sections
/// * `reverse_indices` - Start indices for partial reversal
/// * `problem` - Product-mix problem to solve
/// * `what_if` - Optional (constraint name, new right-hand side) scenario
pub fn build_report(
    student_id: &str,
    reverse_indices: &[usize],
    problem: &ProductMixProblem,
    what_if: Option<(&str, i64)>,
) -> Result<Report, ReportError> {
    let analysis = analyze_student_id(student_id)?;
    let solution = brute_force_solve_parallel(problem)?;
    let sensitivity = sensitivity_analysis(problem, &solution, what_if)?;

    let mut report = Report::new("Student ID Analysis and Product-Mix Optimization");
    report.add_section(string_operations_section(student_id, reverse_indices)?);
    report.add_section(array_algorithms_section(&analysis));
    report.add_section(linear_programming_section(problem, &solution, &sensitivity));
    report.add_section(glossary_section());

    Ok(report)
}
