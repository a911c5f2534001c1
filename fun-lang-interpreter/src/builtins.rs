use std::io::Write;

use crate::error::EvaluationError;
use crate::scope::Scope;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin {
    Println,
}

/// Built-ins are only consulted after user functions, so a user declaration
/// with the same name always wins.
pub fn map_builtins(name: &str) -> Option<Builtin> {
    match name {
        "println" => Some(Builtin::Println),
        _ => None,
    }
}

impl Builtin {
    pub fn call(self, scope: &Scope, arguments: &[i64]) -> Result<i64, EvaluationError> {
        match self {
            Builtin::Println => {
                tracing::trace!(?arguments, "println");
                scope
                    .print_line(arguments)
                    .map_err(|err| EvaluationError::Output(err.to_string().into()))?;
                Ok(0)
            }
        }
    }
}

/// Writes every value followed by a single space, then a newline.
pub fn write_line(output: &mut dyn Write, values: &[i64]) -> std::io::Result<()> {
    let mut line = String::new();
    for value in values {
        line.push_str(&value.to_string());
        line.push(' ');
    }
    line.push('\n');
    output.write_all(line.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_line(values: &[i64]) -> String {
        let mut output = Vec::new();
        write_line(&mut output, values).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_line() {
        let tests: Vec<(&[i64], &str)> = vec![
            (&[], "\n"),
            (&[5], "5 \n"),
            (&[1, 2, 3], "1 2 3 \n"),
            (&[-4, 0, i64::MAX], "-4 0 9223372036854775807 \n"),
        ];

        for (values, expected) in tests {
            assert_eq!(format_line(values), expected);
        }
    }

    #[test]
    fn test_map_builtins() {
        assert_eq!(map_builtins("println"), Some(Builtin::Println));
        assert_eq!(map_builtins("print"), None);
        assert_eq!(map_builtins("Println"), None);
    }
}
