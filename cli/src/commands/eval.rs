//! The `eval` command - evaluate an expression.

use std::process::ExitCode;

use sel::{Bindings, Error, EvalMode, Expression, Value};
use tracing::debug;

use crate::cli::{EvalArgs, Runtime};
use crate::common::{bindings::build_environment, error::render, input::read_expression};

/// Run the eval command.
pub fn run(args: EvalArgs, no_color: bool) -> ExitCode {
    let input = match read_expression(&args.expression) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env = match build_environment(&args.bindings) {
        Ok(env) => env,
        Err(e) => {
            render(&e, no_color);
            return ExitCode::FAILURE;
        }
    };

    interpret_input(&env, &input, args.runtime, no_color)
}

/// Interpret a single expression and print the result.
pub fn interpret_input(env: &Bindings, input: &str, runtime: Runtime, no_color: bool) -> ExitCode {
    let render_err = |e: &Error| render(e, no_color);

    let expr = Expression::new(input);

    // Surface syntax errors once, before picking a runtime.
    if let Err(e) = expr.ast() {
        render_err(&e);
        return ExitCode::FAILURE;
    }

    match runtime {
        Runtime::Evaluator => {
            output_single_result(expr.evaluate(env, EvalMode::TreeWalk), &render_err)
        }
        Runtime::Vm => output_single_result(expr.evaluate(env, EvalMode::Bytecode), &render_err),
        Runtime::Both => {
            let eval_result = expr.evaluate(env, EvalMode::TreeWalk);
            let vm_result = expr.evaluate(env, EvalMode::Bytecode);
            debug!(?eval_result, ?vm_result, "Evaluated with both runtimes");
            output_both_results(eval_result, vm_result, &render_err)
        }
    }
}

/// Output a single runtime result.
fn output_single_result(result: Result<Value, Error>, render_err: &impl Fn(&Error)) -> ExitCode {
    match result {
        Ok(value) => {
            println!("{}", value.repr());
            ExitCode::SUCCESS
        }
        Err(e) => {
            render_err(&e);
            ExitCode::FAILURE
        }
    }
}

/// Output results when running both evaluator and VM, checking for mismatches.
fn output_both_results(
    eval_res: Result<Value, Error>,
    vm_res: Result<Value, Error>,
    render_err: &impl Fn(&Error),
) -> ExitCode {
    match (eval_res, vm_res) {
        (Ok(eval_val), Ok(vm_val)) => {
            // Compared by repr so that NaN matches itself.
            if eval_val.repr() == vm_val.repr() {
                println!("{}", eval_val.repr());
                ExitCode::SUCCESS
            } else {
                eprintln!("MISMATCH!");
                eprintln!("  Evaluator: {}", eval_val.repr());
                eprintln!("  VM:        {}", vm_val.repr());
                ExitCode::FAILURE
            }
        }
        (Err(e), Ok(vm_val)) => {
            eprintln!("MISMATCH!");
            eprintln!("  Evaluator: error");
            render_err(&e);
            eprintln!("  VM:        {}", vm_val.repr());
            ExitCode::FAILURE
        }
        (Ok(eval_val), Err(e)) => {
            eprintln!("MISMATCH!");
            eprintln!("  Evaluator: {}", eval_val.repr());
            eprintln!("  VM:        error");
            render_err(&e);
            ExitCode::FAILURE
        }
        (Err(eval_e), Err(vm_e)) => {
            if eval_e == vm_e {
                render_err(&eval_e);
            } else {
                eprintln!("MISMATCH (both errors but different)!");
                eprintln!("  Evaluator:");
                render_err(&eval_e);
                eprintln!("  VM:");
                render_err(&vm_e);
            }
            ExitCode::FAILURE
        }
    }
}
