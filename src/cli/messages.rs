//! General message formatting functions for prettifying the CLI.
//!
//! - highlight an argument inside a message (ferrum red, not bold)
//! - format a system message with its source tag
//! - format the JSON answer of a data command

use colored::Colorize;

use crate::cli::colors::{FERRUM_RED, SHEET_GREEN};
use crate::output::TextOutput;

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the ferrum red
    //! color to make it obvious.

    format!("{}", argument.color(FERRUM_RED))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Write a system message on the command line, properly
    //! formatted, according to the command line theme.
    //!
    //! Takes in a source name (like 'system') and the message as a
    //! formatted text; output of [`format!`].

    let source_formatted = format!("{:6}", source_name.color(FERRUM_RED).bold());

    format!("[{}] {}", source_formatted, message)
}

pub fn answer(output: &TextOutput) -> String {
    //! An answer as it is shown in the REPL: content type tag, then the
    //! payload.

    format!(
        "({}) {}",
        output.mime_type.as_str().italic(),
        output.content.color(SHEET_GREEN)
    )
}
