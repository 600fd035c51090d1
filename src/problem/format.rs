use super::messages::generate_problem_message;
use owo_colors::OwoColorize;
use robotdata::{
    formatting::Render,
    language::{Diagnostic, LoadingError, Position, Severity},
};
use std::path::Path;

fn label(severity: Severity) -> String {
    match severity {
        Severity::Error => "error"
            .bright_red()
            .to_string(),
        Severity::Warning => "warning"
            .bright_yellow()
            .to_string(),
        Severity::Info => "info"
            .bright_blue()
            .to_string(),
    }
}

/// Format a diagnostic with full details including source code context
pub fn full_diagnostic<'i>(
    diagnostic: &Diagnostic,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, details) = generate_problem_message(&diagnostic.problem, renderer);
    let (code, j) = locate(source, &diagnostic.position);
    let line = diagnostic
        .position
        .line;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
        "#,
        label(diagnostic.severity),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a diagnostic with concise single-line output
pub fn concise_diagnostic<'i>(
    diagnostic: &Diagnostic,
    filename: &'i Path,
    source: &'i str,
    renderer: &impl Render,
) -> String {
    let (problem, _) = generate_problem_message(&diagnostic.problem, renderer);
    let (_, j) = locate(source, &diagnostic.position);
    let line = diagnostic
        .position
        .line;
    let column = j + 1;

    format!(
        "{}: {}:{}:{} {}",
        label(diagnostic.severity),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .to_string()
            .bold()
    )
}

/// The text of the line a position is on, and the position's column counted
/// in characters. Positions count bytes; what is shown to people counts
/// characters.
fn locate<'i>(source: &'i str, position: &Position) -> (&'i str, usize) {
    let offset = clamp(source, position.offset);
    let start = clamp(source, offset.saturating_sub(position.column));

    let rest = &source[start..];
    let end = rest
        .find(['\r', '\n'])
        .unwrap_or(rest.len());
    let column = source[start..offset]
        .chars()
        .count();

    (&rest[..end], column)
}

fn clamp(content: &str, offset: usize) -> usize {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
