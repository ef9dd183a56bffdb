//! Error rendering using ariadne
//!
//! Syntax errors are drawn against the source with one label per run of
//! offending characters. Other errors carry no position and render as a
//! single line.

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;
use std::ops::Range;

use crate::{Error, SyntaxError};

/// Character set for rendering error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Use Unicode characters for rich visual output.
    #[default]
    Unicode,
    /// Use ASCII-only characters for compatibility.
    Ascii,
}

/// Configuration for error rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The filename to display in error messages.
    /// Defaults to "<input>" if not provided.
    pub filename: Option<&'a str>,
    /// The character set to use for rendering.
    pub charset: CharSet,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        RenderConfig::default()
    }
}

impl RenderConfig<'_> {
    const fn default() -> Self {
        Self {
            color: true,
            filename: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Render an error to stderr using the default config.
///
/// # Example
/// ```no_run
/// use sel::{EvalMode, Expression, render_error};
///
/// if let Err(e) = Expression::new("1 +").evaluate(&(), EvalMode::default()) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to(error, &mut std::io::stderr(), &RenderConfig::default()).ok();
}

/// Render an error to a writer with the given configuration.
///
/// # Example
/// ```
/// use sel::{EvalMode, Expression, RenderConfig, render_error_to};
///
/// let err = Expression::new("(1 + 2").evaluate(&(), EvalMode::default()).unwrap_err();
/// let mut buf = Vec::new();
/// let config = RenderConfig { color: false, ..Default::default() };
/// render_error_to(&err, &mut buf, &config).unwrap();
/// let output = String::from_utf8_lossy(&buf);
/// assert!(output.contains("Expected ')' was not found"));
/// ```
pub fn render_error_to(
    error: &Error,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    let filename = config.filename.unwrap_or("<input>");

    match error {
        Error::Syntax(err) => render_syntax_error(err, writer, config, filename),
        Error::Runtime(err) => writeln!(writer, "Error: {err}"),
        Error::Compile(err) => writeln!(writer, "Compile error: {err}"),
        Error::DuplicateBinding(_) => writeln!(writer, "Error: {error}"),
    }
}

/// Clamps `range` to the source so end-of-input positions stay drawable.
fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    start..range.end.min(len).max(start)
}

fn render_syntax_error(
    err: &SyntaxError,
    writer: &mut dyn Write,
    config: &RenderConfig,
    filename: &str,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let ariadne_charset = match config.charset {
        CharSet::Unicode => ariadne::CharSet::Unicode,
        CharSet::Ascii => ariadne::CharSet::Ascii,
    };
    let ariadne_config = ariadne::Config::default()
        .with_color(config.color)
        .with_char_set(ariadne_charset);

    let len = err.source().chars().count();
    let ranges: Vec<Range<usize>> = err
        .ranges()
        .into_iter()
        .map(|range| clamp(range, len))
        .collect();
    let primary = ranges.first().cloned().unwrap_or(0..0);

    let mut report = Report::build(ReportKind::Error, (filename, primary))
        .with_message(err.message())
        .with_config(ariadne_config);

    for range in ranges {
        let color = colors.next();
        report = report.with_label(
            Label::new((filename, range))
                .with_message(err.message())
                .with_color(color),
        );
    }

    report
        .finish()
        .write((filename, Source::from(err.source())), &mut *writer)
}
