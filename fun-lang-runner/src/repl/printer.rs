use fun_lang_core::parser::ParseError;
use fun_lang_interpreter::error::EvaluationError;

use crate::runner::render_parse_errors;

pub fn print_result(result: Result<Option<i64>, EvaluationError>) {
    match result {
        Ok(Some(value)) => println!("returned {}", value),
        Ok(None) => {}
        Err(err) => eprintln!("Error evaluating:\n{}", err),
    }
}

pub fn print_parse_errors(errors: &[ParseError]) {
    eprintln!("{}", render_parse_errors(errors));
}
