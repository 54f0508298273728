//! This module where all the commands are executed.
//!
//! ferrum_sheets command line syntax:
//!
//! - ferrum_sheets --help | Command Line Help
//! - ferrum_sheets client | Run the REPL.
//! - ferrum_sheets exec --command "<command>" | Run one command.
//!
//! Inside the REPL, the following commands run against the active sheet:
//!
//! - get <id>
//! - list [limit] [skip] [all]
//! - find <term>
//! - create <json>
//! - update <id> <json>
//! - delete <id>
//! - delete-all
//! - count
//!
//! and these manage the workbook and the session:
//!
//! - sheets, use <sheet>, new-sheet <name> <col,col,...>, drop-sheet <name>
//! - key <column>, save

use std::fmt::Display;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::output::{self, TextOutput};
use crate::persistence::Workbook;
use crate::sessions::session::Session;

use super::parsers::Command;

/// The executor that runs a parsed [`Command`].
///
/// It locks the session and the workbook only for as long as the command
/// needs them, so a command is one table operation from start to finish.
pub struct CommandExecutor {
    command: Command,
    session: Arc<RwLock<Session>>,
}

/// What a command leaves behind for the terminal: the JSON answer of a data
/// command, or a line of text for the session/workbook commands.
pub struct CommandResult {
    pub output: Option<TextOutput>,
    pub message: Option<String>,
}

impl CommandResult {
    fn output(output: TextOutput) -> CommandResult {
        CommandResult {
            output: Some(output),
            message: None,
        }
    }

    fn message(message: String) -> CommandResult {
        CommandResult {
            output: None,
            message: Some(message),
        }
    }
}

impl Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(output) = &self.output {
            write!(f, "{}", output)?;
        }
        if let Some(message) = &self.message {
            write!(f, "{}", message)?;
        }
        Ok(())
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, String> {
    lock.read().map_err(|e| format!("err: lock poisoned: {}", e))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, String> {
    lock.write().map_err(|e| format!("err: lock poisoned: {}", e))
}

impl CommandExecutor {
    pub fn new(command: Command, session: &Arc<RwLock<Session>>) -> CommandExecutor {
        CommandExecutor {
            command,
            session: Arc::clone(session),
        }
    }

    pub fn execute(self) -> Result<CommandResult, String> {
        let (sheet, key_column, workbook) = {
            let session = read(&self.session)?;
            (
                session.active_sheet().to_string(),
                session.key_column().to_string(),
                session.workbook(),
            )
        };

        match self.command {
            Command::Get { id } => {
                let workbook = read(&workbook)?;
                let store = workbook.sheet(&sheet).map_err(|e| e.to_string())?;
                data(output::get(store, &id, &key_column))
            }
            Command::List {
                limit,
                skip,
                include_hidden,
            } => {
                let workbook = read(&workbook)?;
                let store = workbook.sheet(&sheet).map_err(|e| e.to_string())?;
                data(output::list(
                    store,
                    limit.as_deref(),
                    skip.as_deref(),
                    include_hidden,
                ))
            }
            Command::Find { term } => {
                let workbook = read(&workbook)?;
                let store = workbook.sheet(&sheet).map_err(|e| e.to_string())?;
                data(output::find(store, &term))
            }
            Command::Count => {
                let workbook = read(&workbook)?;
                let store = workbook.sheet(&sheet).map_err(|e| e.to_string())?;
                data(output::count(store))
            }
            Command::Create { row } => {
                let mut workbook = write(&workbook)?;
                let store = workbook.sheet_mut(&sheet).map_err(|e| e.to_string())?;
                data(output::create(store, row, &key_column))
            }
            Command::Update { id, row } => {
                let mut workbook = write(&workbook)?;
                let store = workbook.sheet_mut(&sheet).map_err(|e| e.to_string())?;
                data(output::update(store, &id, &row, &key_column))
            }
            Command::Delete { id } => {
                let mut workbook = write(&workbook)?;
                let store = workbook.sheet_mut(&sheet).map_err(|e| e.to_string())?;
                data(output::remove(store, &id, &key_column))
            }
            Command::DeleteAll => {
                let mut workbook = write(&workbook)?;
                let store = workbook.sheet_mut(&sheet).map_err(|e| e.to_string())?;
                data(output::remove_all(store))
            }
            Command::Sheets => {
                let workbook = read(&workbook)?;
                let names: Vec<String> = workbook
                    .sheet_names()
                    .into_iter()
                    .map(|name| {
                        if name == sheet {
                            format!("* {}", name)
                        } else {
                            format!("  {}", name)
                        }
                    })
                    .collect();
                Ok(CommandResult::message(names.join("\n")))
            }
            Command::Use { sheet } => {
                write(&self.session)?.use_sheet(&sheet)?;
                Ok(CommandResult::message(format!("Using sheet '{}'.", sheet)))
            }
            Command::NewSheet { sheet, columns } => {
                write(&workbook)?
                    .create_sheet(&sheet, &columns, false)
                    .map_err(|e| e.to_string())?;
                Ok(CommandResult::message(format!(
                    "Sheet '{}' created with {} column(s).",
                    sheet,
                    columns.len()
                )))
            }
            Command::DropSheet { sheet } => match write(&workbook)?.drop_sheet(&sheet) {
                Some(_) => Ok(CommandResult::message(format!("Sheet '{}' dropped.", sheet))),
                None => Err(format!("err: does not exist: sheet '{}'", sheet)),
            },
            Command::Key { column } => {
                write(&self.session)?.set_key_column(&column);
                Ok(CommandResult::message(format!(
                    "Records are now addressed by '{}'.",
                    column
                )))
            }
            Command::Save => {
                let path = read(&self.session)?
                    .workbook_path()
                    .map(|path| path.to_path_buf())
                    .ok_or_else(|| "err: no workbook path; start with --workbook".to_string())?;
                let workbook = read(&workbook)?;
                save(&workbook, &path)?;
                Ok(CommandResult::message(format!(
                    "Workbook saved to '{}'.",
                    path.display()
                )))
            }
        }
    }
}

fn data(
    output: Result<TextOutput, crate::persistence::StoreError>,
) -> Result<CommandResult, String> {
    output
        .map(CommandResult::output)
        .map_err(|e| format!("err: store: {}", e))
}

fn save(workbook: &Workbook, path: &std::path::Path) -> Result<(), String> {
    workbook.save(path).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use super::CommandExecutor;
    use crate::cli::parsers::CommandParser;
    use crate::config::Config;
    use crate::persistence::Workbook;
    use crate::sessions::session::Session;

    fn session() -> Arc<RwLock<Session>> {
        let mut workbook = Workbook::new();
        workbook
            .create_sheet(
                "sheet1",
                &["id".to_string(), "name".to_string(), "_note".to_string()],
                false,
            )
            .unwrap();
        let workbook = Arc::new(RwLock::new(workbook));
        Arc::new(RwLock::new(Session::client(&workbook, &Config::default())))
    }

    fn run(session: &Arc<RwLock<Session>>, line: &str) -> String {
        let command = CommandParser::parse(line).unwrap();
        CommandExecutor::new(command, session)
            .execute()
            .unwrap()
            .to_string()
    }

    #[test]
    fn data_commands_answer_with_json() {
        let session = session();

        assert_eq!(
            run(&session, r#"create {"id": 1, "name": "Jansen", "_note": "x"}"#),
            r#"{"id":"1","name":"Jansen","_note":"x"}"#
        );
        assert_eq!(
            run(&session, r#"create {"id": "1"}"#),
            r#"{"error":"duplicate"}"#
        );
        assert_eq!(run(&session, "list"), r#"[{"id":"1","name":"Jansen"}]"#);
        assert_eq!(
            run(&session, "list 0 0 all"),
            r#"[{"id":"1","name":"Jansen","_note":"x"}]"#
        );
        assert_eq!(run(&session, "count"), r#"{"count":1}"#);
        assert_eq!(run(&session, "delete 9"), r#"{"error":"not found"}"#);
        assert_eq!(run(&session, "delete 1"), r#"{"result":"ok"}"#);
        assert_eq!(run(&session, "count"), r#"{"count":0}"#);
    }

    #[test]
    fn commands_on_a_missing_sheet_fail_cleanly() {
        let session = session();
        run(&session, "new-sheet orders id,total");
        run(&session, "use orders");
        run(&session, "drop-sheet orders");

        let command = CommandParser::parse("count").unwrap();
        assert!(CommandExecutor::new(command, &session).execute().is_err());
    }

    #[test]
    fn key_switches_the_lookup_column() {
        let session = session();
        run(&session, r#"create {"id": "1", "name": "Jansen"}"#);
        run(&session, "key name");

        assert_eq!(
            run(&session, "get Jansen"),
            r#"{"id":"1","name":"Jansen","_note":""}"#
        );
    }

    #[test]
    fn save_needs_a_workbook_path() {
        let session = session();
        let command = CommandParser::parse("save").unwrap();

        assert!(CommandExecutor::new(command, &session).execute().is_err());
    }

    #[test]
    fn save_writes_the_workbook_to_its_path() {
        let path = std::env::temp_dir().join(format!(
            "ferrum_sheets_save_command_{}.json",
            std::process::id()
        ));
        let mut workbook = Workbook::new();
        workbook
            .create_sheet("sheet1", &["id".to_string(), "name".to_string()], false)
            .unwrap();
        let config = Config {
            workbook_path: Some(path.clone()),
            ..Config::default()
        };
        let session = Arc::new(RwLock::new(Session::client(
            &Arc::new(RwLock::new(workbook)),
            &config,
        )));

        run(&session, r#"create {"id": "1", "name": "Jansen"}"#);
        run(&session, "save");

        let loaded = Workbook::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.sheet_names(), ["sheet1"]);
        assert_eq!(loaded.sheet("sheet1").unwrap().cell(2, 2), "Jansen");
    }
}
