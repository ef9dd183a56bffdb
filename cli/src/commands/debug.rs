//! The `debug` command - inspect each stage of the pipeline.

use std::process::ExitCode;

use sel::{Error, Expression};
use sel_core::lexer::tokenize;

use crate::cli::{DebugArgs, DebugCommand, DebugInputArgs};
use crate::common::{error::render, input::read_expression};

/// Run the debug command.
pub fn run(args: DebugArgs, no_color: bool) -> ExitCode {
    let result = match args.command {
        DebugCommand::Tokens(input) => run_tokens(input),
        DebugCommand::Ast(input) => run_ast(input),
        DebugCommand::Bytecode(input) => run_bytecode(input),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(DebugError::Input(e)) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Err(DebugError::Sel(e)) => {
            render(&e, no_color);
            ExitCode::FAILURE
        }
    }
}

enum DebugError {
    Input(String),
    Sel(Error),
}

impl From<Error> for DebugError {
    fn from(e: Error) -> Self {
        DebugError::Sel(e)
    }
}

fn read(args: &DebugInputArgs) -> Result<String, DebugError> {
    read_expression(&args.expression).map_err(DebugError::Input)
}

fn run_tokens(args: DebugInputArgs) -> Result<(), DebugError> {
    let source = read(&args)?;
    let tokens = tokenize(&source).map_err(Error::from)?;

    println!("=== Tokens ===");
    for token in &tokens {
        println!("{:>4}  {:<6} {}", token.offset(), token.kind.label(), token);
    }
    Ok(())
}

fn run_ast(args: DebugInputArgs) -> Result<(), DebugError> {
    let expr = Expression::new(read(&args)?);
    let ast = expr.ast()?;

    println!("=== Parsed AST ===");
    println!("{ast}");
    println!();
    println!("{ast:#?}");
    Ok(())
}

fn run_bytecode(args: DebugInputArgs) -> Result<(), DebugError> {
    let expr = Expression::new(read(&args)?);
    let code = expr.code()?;

    println!("=== Bytecode ===");
    println!("{code}");
    println!();
    println!("max stack size: {}", code.max_stack_size);
    Ok(())
}
