use crate::commands::dispatcher::CommandDispatcher;
use crate::core::error::JarvisError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::MemHistory;
use rustyline::validate::{self, ValidationResult, Validator};
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};
use std::borrow::Cow;

/// Completes `/commands` and the local keywords.
pub struct JarvisCompleter {
    command_registry: CommandDispatcher,
    keywords: Vec<&'static str>,
}

impl JarvisCompleter {
    pub fn new(command_registry: CommandDispatcher, keywords: Vec<&'static str>) -> Self {
        Self {
            command_registry,
            keywords,
        }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let typed = &line[..pos];

        if let Some(command_part) = typed.strip_prefix('/') {
            let matches = self
                .command_registry
                .get_command_names()
                .into_iter()
                .filter(|cmd| cmd.starts_with(command_part))
                .map(|cmd| Pair {
                    display: format!("/{}", cmd),
                    replacement: cmd,
                })
                .collect();
            return (1, matches);
        }

        if typed.contains(char::is_whitespace) || typed.is_empty() {
            return (pos, Vec::new());
        }

        let lowered = typed.to_lowercase();
        let matches = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(&lowered))
            .map(|kw| Pair {
                display: kw.to_string(),
                replacement: kw.to_string(),
            })
            .collect();
        (0, matches)
    }
}

impl Completer for JarvisCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

/// Helper struct that combines all rustyline components
pub struct JarvisHelper {
    completer: JarvisCompleter,
    highlighter: MatchingBracketHighlighter,
    hinter: HistoryHinter,
}

impl JarvisHelper {
    pub fn new(command_registry: CommandDispatcher, keywords: Vec<&'static str>) -> Self {
        Self {
            completer: JarvisCompleter::new(command_registry, keywords),
            highlighter: MatchingBracketHighlighter::new(),
            hinter: HistoryHinter {},
        }
    }
}

impl Helper for JarvisHelper {}

impl Completer for JarvisHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for JarvisHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for JarvisHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(style(hint).dim().to_string())
    }
}

/// Every utterance is a single line, whatever brackets it contains.
fn validate_line(_input: &str) -> ValidationResult {
    ValidationResult::Valid(None)
}

impl Validator for JarvisHelper {
    fn validate(
        &self,
        ctx: &mut validate::ValidationContext,
    ) -> rustyline::Result<ValidationResult> {
        Ok(validate_line(ctx.input()))
    }
}

pub type JarvisEditor = Editor<JarvisHelper, MemHistory>;

/// Creates a line editor. History stays in memory for the session only.
pub fn create_editor(
    command_registry: CommandDispatcher,
    keywords: Vec<&'static str>,
) -> Result<JarvisEditor, JarvisError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_history(config, MemHistory::new())
        .map_err(|e| JarvisError::Input(format!("Failed to create line editor: {}", e)))?;

    editor.set_helper(Some(JarvisHelper::new(command_registry, keywords)));
    Ok(editor)
}

/// Reads a line; `None` means the user asked to leave (Ctrl+C / Ctrl+D).
pub fn read_input(editor: &mut JarvisEditor) -> Result<Option<String>, JarvisError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        "you> ".to_string()
    } else {
        style("you> ").bold().cyan().to_string()
    };

    match editor.readline(&prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Goodbye.");
            Ok(None)
        }
        Err(err) => Err(JarvisError::Input(format!("Input error: {}", err))),
    }
}
