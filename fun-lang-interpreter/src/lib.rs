pub mod builtins;
pub mod error;
pub mod evaluator;
pub mod scope;
