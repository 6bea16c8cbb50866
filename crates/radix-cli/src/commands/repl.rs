//! The interactive menu.
//!
//! Everything here renders and dispatches; the session logic lives in
//! `ConverterSession`.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use radix_application::ConverterSession;
use radix_core::batch::BatchOutcome;
use radix_core::config::RadixConfig;
use radix_core::conversion::ConversionRecord;
use radix_core::user::User;
use radix_infrastructure::{DataLayout, FileExporter, TomlUserRepository};

use super::quiz::{self, QuizExit};

pub(crate) type MenuEditor = Editor<MenuHelper, DefaultHistory>;

const MENU: [(&str, &str); 9] = [
    ("1", "Convert a number"),
    ("2", "Session statistics"),
    ("3", "History statistics"),
    ("4", "Undo last conversion"),
    ("5", "Run a batch file"),
    ("6", "Export session"),
    ("7", "Export history"),
    ("8", "Take a quiz"),
    ("9", "End session"),
];

/// Hints the menu label after a choice is typed.
pub(crate) struct MenuHelper;

impl Helper for MenuHelper {}

impl Completer for MenuHelper {
    type Candidate = String;
}

impl Hinter for MenuHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos != line.len() {
            return None;
        }
        MENU.iter()
            .find(|(key, _)| *key == line.trim())
            .map(|(_, label)| format!("  {}", label))
    }
}

impl Highlighter for MenuHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if hint.is_empty() {
            Borrowed(hint)
        } else {
            Owned(hint.bright_black().to_string())
        }
    }
}

impl Validator for MenuHelper {}

/// What one prompt produced.
pub(crate) enum Input {
    Line(String),
    /// Ctrl-C: abandon the current operation.
    Cancelled,
    /// Ctrl-D: leave the program.
    Eof,
}

pub(crate) fn read(rl: &mut MenuEditor, prompt: &str) -> Result<Input> {
    match rl.readline(prompt) {
        Ok(line) => {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                let _ = rl.add_history_entry(trimmed);
            }
            Ok(Input::Line(trimmed.to_string()))
        }
        Err(ReadlineError::Interrupted) => Ok(Input::Cancelled),
        Err(ReadlineError::Eof) => Ok(Input::Eof),
        Err(err) => Err(err.into()),
    }
}

/// Reads a base until it parses as an integer. `None` on cancel or EOF.
fn read_base(rl: &mut MenuEditor, prompt: &str) -> Result<Option<u32>> {
    loop {
        match read(rl, prompt)? {
            Input::Line(text) => match text.parse() {
                Ok(base) => return Ok(Some(base)),
                Err(_) => println!("{}", format!("'{}' is not an integer base", text).red()),
            },
            Input::Cancelled | Input::Eof => return Ok(None),
        }
    }
}

fn print_record(record: &ConversionRecord) {
    match (record.result(), record.error_message()) {
        (Some(result), _) => println!("{}", format!("Result: {}", result).bright_green()),
        (None, Some(error)) => println!("{}", format!("Error: {}", error).red()),
        (None, None) => {}
    }
}

fn print_menu() {
    println!();
    for (key, label) in MENU {
        println!("  {} {}", format!("{}.", key).bright_cyan(), label);
    }
}

/// Prompts until a username is accepted.
fn login(
    rl: &mut MenuEditor,
    repo: &TomlUserRepository,
    preset: Option<&str>,
) -> Result<Option<User>> {
    if let Some(name) = preset {
        return Ok(Some(ConverterSession::open_or_create(repo, name)?));
    }

    loop {
        match read(rl, "Username: ")? {
            Input::Line(name) => match ConverterSession::open_or_create(repo, &name) {
                Ok(user) => return Ok(Some(user)),
                Err(err) if err.is_validation() => println!("{}", err.to_string().red()),
                Err(err) => return Err(err.into()),
            },
            Input::Cancelled => println!("{}", "CTRL-C detected. Press CTRL-D to exit.".yellow()),
            Input::Eof => return Ok(None),
        }
    }
}

fn convert(rl: &mut MenuEditor, session: &mut ConverterSession) -> Result<()> {
    let Input::Line(value) = read(rl, "Value: ")? else {
        return Ok(());
    };
    let Some(source) = read_base(rl, "Source base: ")? else {
        return Ok(());
    };
    let Some(target) = read_base(rl, "Target base: ")? else {
        return Ok(());
    };

    print_record(&session.convert(&value, source, target));
    Ok(())
}

fn run_batch(rl: &mut MenuEditor, session: &mut ConverterSession) -> Result<()> {
    let Input::Line(path) = read(rl, "Batch file: ")? else {
        return Ok(());
    };

    let report = match session.run_batch(Path::new(&path)) {
        Ok(report) => report,
        Err(err) => {
            println!("{}", err.to_string().red());
            return Ok(());
        }
    };

    for entry in &report.entries {
        let prefix = format!("line {}:", entry.line_number).bright_black();
        match &entry.outcome {
            BatchOutcome::Recorded(record) => match record.result() {
                Some(result) => {
                    println!("{} {} -> {}", prefix, record.input_value(), result.bright_green())
                }
                None => println!(
                    "{} {} -> {}",
                    prefix,
                    record.input_value(),
                    record.error_message().unwrap_or_default().red()
                ),
            },
            BatchOutcome::Rejected(err) => println!("{} {}", prefix, err.to_string().yellow()),
        }
    }
    println!(
        "{}",
        format!("{} recorded, {} rejected", report.recorded(), report.rejected()).bright_black()
    );
    Ok(())
}

fn print_history(session: &ConverterSession) {
    let report = session.history_report();
    if report.is_empty() {
        println!("{}", "No history yet.".bright_black());
        return;
    }
    for day in report {
        print!("{}", day);
        println!();
    }
}

fn print_export(result: radix_core::error::Result<PathBuf>) {
    match result {
        Ok(path) => println!("{}", format!("Exported to {}", path.display()).bright_green()),
        Err(err) => println!("{}", err.to_string().red()),
    }
}

/// Flushes the session. On failure the ledger is kept and the menu resumes.
fn end_session(session: &mut ConverterSession) -> bool {
    match session.end(Local::now().date_naive()) {
        Ok(summary) => {
            println!("{}", "Session summary".bright_magenta().bold());
            print!("{}", summary);
            println!("{}", "Goodbye!".bright_green());
            true
        }
        Err(err) => {
            println!("{}", format!("Failed to save session: {}", err).red());
            false
        }
    }
}

/// CTRL-D always leaves the program, even when the flush fails.
fn end_on_eof(session: &mut ConverterSession) {
    println!("{}", "CTRL-D detected. Ending session...".bright_green());
    if !end_session(session) {
        tracing::warn!("Exited with {} unsaved record(s)", session.ledger().len());
    }
}

/// Runs the menu loop until the session ends.
pub fn run(config: RadixConfig, layout: &DataLayout, preset_user: Option<&str>) -> Result<()> {
    let mut rl: MenuEditor = Editor::new()?;
    rl.set_helper(Some(MenuHelper));

    println!("{}", "=== RADIX ===".bright_magenta().bold());
    println!("{}", "Number base conversion workbench. CTRL-D ends the session.".bright_black());

    let repo = Arc::new(TomlUserRepository::new(layout.users_dir()));
    let Some(user) = login(&mut rl, &repo, preset_user)? else {
        return Ok(());
    };
    println!("{}", format!("Welcome, {}!", user.username).bright_green());

    let mut session = ConverterSession::start(
        user,
        config,
        repo,
        FileExporter::new(layout.export_dir()),
    );

    loop {
        print_menu();
        let choice = match read(&mut rl, ">> ")? {
            Input::Line(choice) => choice,
            Input::Cancelled => {
                println!("{}", "CTRL-C detected. Choose 9 or press CTRL-D to end the session.".yellow());
                continue;
            }
            Input::Eof => {
                end_on_eof(&mut session);
                break;
            }
        };

        match choice.as_str() {
            "1" => convert(&mut rl, &mut session)?,
            "2" => print!("{}", session.session_summary()),
            "3" => print_history(&session),
            "4" => {
                if session.undo() {
                    println!("{}", "Last conversion removed.".bright_green());
                } else {
                    println!("{}", "Nothing to undo.".yellow());
                }
            }
            "5" => run_batch(&mut rl, &mut session)?,
            "6" => print_export(session.export_session()),
            "7" => print_export(session.export_history()),
            "8" => {
                if quiz::run(&mut rl, &session)? == QuizExit::EndSession {
                    end_on_eof(&mut session);
                    break;
                }
            }
            "9" => {
                if end_session(&mut session) {
                    break;
                }
            }
            "" => {}
            other => println!("{}", format!("Unknown option '{}'", other).bright_black()),
        }
    }

    Ok(())
}
