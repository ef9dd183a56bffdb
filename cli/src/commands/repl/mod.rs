//! The `repl` command - interactive REPL.

use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    FileBackedHistory, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, ValidationResult, default_emacs_keybindings,
};
use sel::Bindings;
use sel_core::lexer::{Operator, TokenKind, tokenize};
use sel_core::stdlib::prelude;

use crate::cli::ReplArgs;
use crate::common::CliResult;

use super::eval::interpret_input;

const UNTERMINATED_STRING: &str = "Unexpected EOF while parsing";

/// A `reedline` validator that keeps reading lines while the input is
/// obviously unfinished.
///
/// Input is incomplete while a string literal is unterminated or while an
/// opening `(` or `[` has no matching close. Anything else, including input
/// with a syntax error, is `Complete` and gets evaluated (and reported).
///
/// # Examples of Incomplete Input
///
/// - `'unterminated`
/// - `f(1,`
/// - `items[1:`
///
/// # Manual Newlines
///
/// To split a complete expression across multiple lines for readability,
/// users can press `Alt + Enter` to insert a newline manually.
struct SelValidator;

impl reedline::Validator for SelValidator {
    fn validate(&self, input: &str) -> ValidationResult {
        if is_incomplete(input) {
            ValidationResult::Incomplete
        } else {
            ValidationResult::Complete
        }
    }
}

/// Whether `input` still has an open string literal or bracket.
pub fn is_incomplete(input: &str) -> bool {
    match tokenize(input) {
        Ok(tokens) => {
            let mut depth: i64 = 0;
            for token in &tokens {
                match token.kind {
                    TokenKind::Operator(Operator::LParen | Operator::LBracket) => depth += 1,
                    TokenKind::Operator(Operator::RParen | Operator::RBracket) => depth -= 1,
                    _ => {}
                }
            }
            depth > 0
        }
        Err(e) => e.message() == UNTERMINATED_STRING,
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let names: Vec<String> = prelude().iter().map(|(name, _)| name.to_string()).collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_']);
        completions.insert(names);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);
    let edit_mode = Box::new(Emacs::new(keybindings));

    let mut line_editor = Reedline::create()
        .with_validator(Box::new(SelValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    match FileBackedHistory::new(1000) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => eprintln!("Warning: Could not initialize history: {e}"),
    }

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("sel".into()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Run the REPL command.
pub fn run(args: ReplArgs, no_color: bool) -> CliResult<()> {
    let env = Bindings::default();
    let (mut line_editor, prompt) = setup_reedline();

    println!("Sel REPL. Ctrl+D to exit; Ctrl+C to abort entry");

    loop {
        let sig = match line_editor.read_line(&prompt) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Reedline error: {e}");
                return Ok(());
            }
        };

        match sig {
            Signal::Success(buffer) if buffer.trim().is_empty() => continue,
            Signal::Success(buffer) => {
                // Errors are already rendered; the session goes on.
                let _ = interpret_input(&env, &buffer, args.runtime, no_color);
            }
            Signal::CtrlD => {
                println!("\nGoodbye!");
                return Ok(());
            }
            Signal::CtrlC => {
                continue;
            }
        }
    }
}
