use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use monkey_core::lexer;
use monkey_core::parser;
use monkey_interpreter::environment;
use monkey_interpreter::evaluator;

const PROMPT: &str = ">> ";

pub fn start() -> Result<(), ReadlineError> {
    // One environment for the whole session, so bindings survive across lines
    let mut environment = environment::Environment::new();

    let mut rl = DefaultEditor::new()?;
    let mut content: String;

    loop {
        let readline = rl.readline(PROMPT);

        match readline {
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                continue; // Clear line
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                content = line;
            }
        }

        let tokenizer = lexer::Tokenizer::new(&content);
        let (program, errors) = parser::Parser::new(tokenizer).parse_program();

        if !errors.is_empty() {
            for error in &errors {
                println!("parse error: {}", error);
            }
            continue;
        }

        let object = evaluator::eval_program(&program, &mut environment);
        println!("{}", object);
    }
    Ok(())
}
