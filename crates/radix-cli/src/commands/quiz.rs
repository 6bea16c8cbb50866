//! Quiz mode: answers are scored but never recorded.

use anyhow::Result;
use colored::Colorize;

use radix_application::ConverterSession;

use super::repl::{Input, MenuEditor, read};

/// Where the menu goes once the quiz is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizExit {
    /// All questions answered, or CTRL-C.
    Menu,
    /// CTRL-D: the whole session ends, as it does at the menu prompt.
    EndSession,
}

/// Splits a prompt result into an answer or the reason the quiz stops.
fn answer_or_exit(input: Input) -> std::result::Result<String, QuizExit> {
    match input {
        Input::Line(answer) => Ok(answer),
        Input::Cancelled => Err(QuizExit::Menu),
        Input::Eof => Err(QuizExit::EndSession),
    }
}

pub fn run(rl: &mut MenuEditor, session: &ConverterSession) -> Result<QuizExit> {
    let mut quiz = session.new_quiz(&mut rand::thread_rng());
    let total = quiz.len();

    println!(
        "{}",
        format!("Quiz: {} question(s). CTRL-C stops early, CTRL-D ends the session.", total).bright_magenta()
    );

    let mut exit = QuizExit::Menu;
    while let Some(question) = quiz.current() {
        println!(
            "Convert {} from base {} to base {}",
            question.value.bright_cyan(),
            question.source_base,
            question.target_base
        );

        let answer = match answer_or_exit(read(rl, "Answer: ")?) {
            Ok(answer) => answer,
            Err(reason) => {
                println!("{}", "Quiz stopped.".yellow());
                exit = reason;
                break;
            }
        };

        if let Some(feedback) = quiz.submit(&answer) {
            if feedback.correct {
                println!("{}", "Correct!".bright_green());
            } else {
                println!("{}", format!("Incorrect. The answer is {}", feedback.expected).red());
            }
        }
    }

    println!("{}", format!("Score: {}/{}", quiz.score(), total).bright_magenta());
    Ok(exit)
}
