use monkey_core::lexer;
use monkey_core::parser;
use monkey_interpreter::environment;
use monkey_interpreter::evaluator;

pub fn execute(source: &str) {
    let tokenizer = lexer::Tokenizer::new(source);
    let mut parser = parser::Parser::new(tokenizer);
    let (program, errors) = parser.parse_program();

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("parse error: {}", error);
        }
        std::process::exit(1);
    }

    let mut environment = environment::Environment::new();
    let object = evaluator::eval_program(&program, &mut environment);
    println!("{}", object);
}
