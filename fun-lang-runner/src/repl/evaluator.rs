use fun_lang_core::ast::Program;
use fun_lang_interpreter::error::EvaluationError;
use fun_lang_interpreter::evaluator;
use fun_lang_interpreter::scope::Scope;

/// Keeps one root scope alive for the whole REPL session so declarations from
/// earlier inputs stay visible.
pub struct Session {
    scope: Scope,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            scope: Scope::with_stdout(),
        }
    }

    #[cfg(test)]
    fn with_scope(scope: Scope) -> Self {
        Self { scope }
    }

    pub fn evaluate(&self, program: &Program) -> Result<Option<i64>, EvaluationError> {
        evaluator::exec_statements(&program.body, &self.scope)
    }
}
