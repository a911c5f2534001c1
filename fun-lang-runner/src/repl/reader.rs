use fun_lang_core::ast::Program;
use fun_lang_core::parser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use super::printer;

const PROMPT: &str = ">> ";
const CONTINUATION_PROMPT: &str = ".. ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(Program),
}

pub struct Reader {
    rl: Editor<(), DefaultHistory>,
}

/// Braces opened but not yet closed, ignoring anything after `//`.
fn open_braces(source: &str) -> isize {
    source
        .lines()
        .map(|line| line.split("//").next().unwrap_or_default())
        .flat_map(str::chars)
        .map(|ch| match ch {
            '{' => 1,
            '}' => -1,
            _ => 0,
        })
        .sum()
}

impl Reader {
    pub fn new(rl: Editor<(), DefaultHistory>) -> Self {
        Self { rl }
    }

    /// Reads one input, continuing on further lines while a `{` is still open.
    pub fn read(&mut self) -> ReadOutput {
        let mut source = String::new();

        loop {
            let prompt = if source.is_empty() {
                PROMPT
            } else {
                CONTINUATION_PROMPT
            };
            let line = match self.rl.readline(prompt) {
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    return ReadOutput::Clear; // Clear line
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    return ReadOutput::Exit;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    return ReadOutput::Exit;
                }
                Ok(line) => line,
            };
            if let Err(err) = self.rl.add_history_entry(&line) {
                tracing::warn!(%err, "could not record history entry");
            }

            source.push_str(&line);
            source.push('\n');
            if open_braces(&source) <= 0 {
                break;
            }
        }

        match parser::parse(&source) {
            Ok(value) => ReadOutput::Value(value),
            Err(errors) => {
                printer::print_parse_errors(&errors);
                ReadOutput::Clear
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::open_braces;

    #[test]
    fn test_open_braces() {
        let tests = vec![
            ("println(1)", 0),
            ("fun f() {", 1),
            ("fun f() {\n  if (1) {", 2),
            ("fun f() {\n}", 0),
            ("while (1) { // {{{", 1),
            ("}", -1),
        ];

        for (input, expected) in tests {
            assert_eq!(open_braces(input), expected, "{input}");
        }
    }
}
