use std::path::Path;

use fun_lang_core::parser::{self, ParseError};
use fun_lang_interpreter::error::EvaluationError;
use fun_lang_interpreter::evaluator;
use fun_lang_interpreter::scope::Scope;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("{}", render_parse_errors(.0))]
    Parse(Vec<ParseError>),
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),
}

pub fn render_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|error| format!("parse error: {}", error))
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_source(path: &Path) -> Result<String, RunError> {
    std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Parses `source` and evaluates it against `scope`, returning the value of a
/// top-level `return` if one ran.
pub fn execute(source: &str, scope: &Scope) -> Result<Option<i64>, RunError> {
    let program = parser::parse(source).map_err(RunError::Parse)?;
    tracing::debug!(statements = program.body.statements.len(), "parsed");
    Ok(evaluator::eval_program(&program, scope)?)
}

pub fn execute_file(path: &Path) -> Result<(), RunError> {
    let source = read_source(path)?;
    tracing::debug!(path = %path.display(), "running");
    execute(&source, &Scope::with_stdout())?;
    Ok(())
}

pub fn print_ast(path: &Path) -> Result<(), RunError> {
    let program = parser::parse(&read_source(path)?).map_err(RunError::Parse)?;
    print!("{}", program);
    Ok(())
}
