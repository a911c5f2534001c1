mod evaluator;
mod printer;
mod reader;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use evaluator::Session;
use reader::{ReadOutput, Reader};

pub fn start(show_ast: bool) -> Result<(), ReadlineError> {
    let mut reader = Reader::new(DefaultEditor::new()?);
    let session = Session::new();

    loop {
        match reader.read() {
            ReadOutput::Exit => break,
            ReadOutput::Clear => continue,
            ReadOutput::Value(program) => {
                if show_ast {
                    print!("{}", program);
                }
                printer::print_result(session.evaluate(&program));
            }
        }
    }
    Ok(())
}
