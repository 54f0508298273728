//! The only point of truth for all information that is related to the
//! current user session. A session holds what belongs to the command line
//! user rather than to the data: command history, the sheet currently in
//! use, the key column records are addressed by, and where the workbook is
//! saved.
//!
//! Sheets themselves live in the shared [`Workbook`]. The session only keeps
//! a handle to it, so every command locks the workbook for exactly the span
//! of one table operation.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
    time::SystemTime,
};

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::persistence::Workbook;

struct CommandHistory {
    command: String,
    command_time: SystemTime,
}

impl CommandHistory {
    pub fn command_time_string(&self) -> String {
        let datetime: DateTime<Local> = self.command_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Display for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.command_time_string(), self.command)
    }
}

pub struct Session {
    command_history: Vec<CommandHistory>,
    start_time: SystemTime,
    active_sheet: String,
    key_column: String,
    workbook_path: Option<PathBuf>,
    workbook: Arc<RwLock<Workbook>>,
}

impl Session {
    pub fn client(workbook: &Arc<RwLock<Workbook>>, config: &Config) -> Session {
        //! Returns a new client session, positioned on the configured sheet.

        Session {
            command_history: vec![],
            start_time: SystemTime::now(),
            active_sheet: config.sheet.clone(),
            key_column: config.key_column.clone(),
            workbook_path: config.workbook_path.clone(),
            workbook: Arc::clone(workbook),
        }
    }

    pub fn workbook(&self) -> Arc<RwLock<Workbook>> {
        Arc::clone(&self.workbook)
    }

    pub fn active_sheet(&self) -> &str {
        &self.active_sheet
    }

    pub fn use_sheet(&mut self, sheet_name: &str) -> Result<(), String> {
        //! Switch the sheet future commands run against.

        let exists = self
            .workbook
            .read()
            .map_err(|e| e.to_string())?
            .exists(sheet_name);

        if !exists {
            return Err(format!("err: does not exist: sheet '{}'", sheet_name));
        }

        self.active_sheet = sheet_name.to_string();
        Ok(())
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn set_key_column(&mut self, key_column: &str) {
        self.key_column = key_column.to_string();
    }

    pub fn workbook_path(&self) -> Option<&Path> {
        self.workbook_path.as_deref()
    }

    pub fn add_to_command_history(&mut self, command: &str) {
        //! Record a command. Blank lines are not commands and are ignored.

        let command = command.trim();
        if command.is_empty() {
            return;
        }

        self.command_history.push(CommandHistory {
            command: command.to_string(),
            command_time: SystemTime::now(),
        });
    }

    pub fn start_time_string(&self) -> String {
        //! Convert the [`SystemTime`] object into a string representation
        //! to be more readable.

        let datetime: DateTime<Local> = self.start_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn show_command_history(&self, n_prev: Option<usize>) {
        //! Show the list of previously invoked commands.
        //! Use `n_prev` to limit the number of commands you see.

        let limit = n_prev.unwrap_or(self.command_history.len());

        for (index, command) in self.command_history.iter().rev().enumerate() {
            if index < limit {
                println!("{:3} | {}", index, command);
            }
        }
    }

    pub fn get_last_command(&self, nth_back: usize) -> Option<&str> {
        //! Gets the `nth_back`th last command from the history.

        if nth_back == 0 {
            return None;
        }

        self.command_history
            .iter()
            .nth_back(nth_back - 1)
            .map(|cmd| cmd.command.as_str())
    }
}
