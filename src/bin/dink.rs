use dink::compiler;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let command = compiler::Command::new();

    match command.run(env::args()) {
        Ok(compilation) => {
            print!("{}", compilation.output);
            if !compilation.succeeded() {
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("fatal error: {}", err);
            process::exit(2);
        }
    };
}
