//! `--bind NAME=EXPR` handling.

use sel::{Bindings, EnvironmentBuilder, EvalMode, Expression, Value};
use tracing::debug;

use super::CliResult;

/// Clap value parser for `NAME=EXPR`.
pub fn parse_binding(arg: &str) -> Result<(String, String), String> {
    let (name, expr) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=EXPR, got '{arg}'"))?;
    let name = name.trim();
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if !valid {
        return Err(format!("'{name}' is not a valid name"));
    }
    Ok((name.to_string(), expr.to_string()))
}

/// Evaluates each bound expression against the prelude and collects the
/// results. Binding the same name twice is an error.
pub fn build_environment(bindings: &[(String, String)]) -> CliResult<Bindings> {
    let mut builder = EnvironmentBuilder::new();
    for (name, source) in bindings {
        let value: Value = Expression::new(source.as_str()).evaluate(&(), EvalMode::default())?;
        debug!(name = name.as_str(), value = %value.repr(), "bound");
        builder = builder.bind(name.as_str(), value);
    }
    builder.build()
}
