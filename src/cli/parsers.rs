//! The place where the CLI and the REPL command parsers are defined.
//!
//! When the functionality becomes extensive, they will
//! each have their own files.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::persistence::Row;

#[derive(Parser)]
#[command(name = "ferrum_sheets")]
#[command(about = "A spreadsheet-backed row store", long_about = None)]
pub struct CliParser {
    // Either run a REPL or a single command.
    #[arg(required = true)]
    pub mode: Option<CliMode>,

    /// JSON workbook to load, and to write on `save`.
    #[arg(long)]
    pub workbook: Option<PathBuf>,

    /// Column records are addressed by.
    #[arg(long)]
    pub key: Option<String>,

    /// Sheet to start on.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Command to run in exec mode, e.g. `--command "get 3"`.
    #[arg(long, short)]
    pub command: Option<String>,
}

#[derive(Clone, ValueEnum)]
pub enum CliMode {
    // Start a REPL client instance (no-remote).
    Client,

    // Run one command and print its answer.
    Exec,
}

impl CliParser {
    pub fn apply(&self, config: &mut Config) {
        //! Let command line flags override the environment.

        if let Some(path) = &self.workbook {
            config.workbook_path = Some(path.clone());
        }
        if let Some(key) = &self.key {
            config.key_column = key.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet = sheet.clone();
        }
    }
}

/// One REPL command, parsed and ready to run against the active sheet.
#[derive(Debug, PartialEq)]
pub enum Command {
    Get {
        id: String,
    },
    List {
        limit: Option<String>,
        skip: Option<String>,
        include_hidden: bool,
    },
    Find {
        term: String,
    },
    Create {
        row: Row,
    },
    Update {
        id: String,
        row: Row,
    },
    Delete {
        id: String,
    },
    DeleteAll,
    Count,
    Sheets,
    Use {
        sheet: String,
    },
    NewSheet {
        sheet: String,
        columns: Vec<String>,
    },
    DropSheet {
        sheet: String,
    },
    Key {
        column: String,
    },
    Save,
}

/// Turns a line typed at the prompt into a [`Command`].
pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Result<Command, String> {
        //! Parse a single command line.
        //!
        //! The first word picks the command; whatever follows is its argument
        //! text. JSON arguments are coerced into rows with [`Row::from_json`].

        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "get" => Ok(Command::Get {
                id: required(rest, "get <id>")?,
            }),
            "list" => Ok(Self::parse_list(rest)),
            "find" => Ok(Command::Find {
                term: required(rest, "find <term>")?,
            }),
            "create" => Ok(Command::Create {
                row: parse_row(required(rest, "create <json>")?.as_str())?,
            }),
            "update" => {
                let (id, json) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("update <id> <json>"))?;
                Ok(Command::Update {
                    id: id.to_string(),
                    row: parse_row(json.trim())?,
                })
            }
            "delete" => Ok(Command::Delete {
                id: required(rest, "delete <id>")?,
            }),
            "delete-all" => Ok(Command::DeleteAll),
            "count" => Ok(Command::Count),
            "sheets" => Ok(Command::Sheets),
            "use" => Ok(Command::Use {
                sheet: required(rest, "use <sheet>")?,
            }),
            "new-sheet" => {
                let (sheet, columns) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("new-sheet <name> <col,col,...>"))?;
                Ok(Command::NewSheet {
                    sheet: sheet.to_string(),
                    columns: columns
                        .split(',')
                        .map(|column| column.trim().to_string())
                        .collect(),
                })
            }
            "drop-sheet" => Ok(Command::DropSheet {
                sheet: required(rest, "drop-sheet <name>")?,
            }),
            "key" => Ok(Command::Key {
                column: required(rest, "key <column>")?,
            }),
            "save" => Ok(Command::Save),
            "" => Err("err: empty command".to_string()),
            other => Err(format!("err: unknown command '{}'", other)),
        }
    }

    fn parse_list(rest: &str) -> Command {
        //! `list [limit] [skip] [all]`. The numbers stay raw text; coercion
        //! happens in the table layer so bad input still lists.

        let mut include_hidden = false;
        let mut numbers = Vec::new();

        for token in rest.split_whitespace() {
            if token.eq_ignore_ascii_case("all") {
                include_hidden = true;
            } else {
                numbers.push(token.to_string());
            }
        }

        let mut numbers = numbers.into_iter();
        Command::List {
            limit: numbers.next(),
            skip: numbers.next(),
            include_hidden,
        }
    }
}

fn usage(syntax: &str) -> String {
    format!("err: usage: {}", syntax)
}

fn required(rest: &str, syntax: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(usage(syntax))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_row(json: &str) -> Result<Row, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("err: invalid json: {}", e))?;
    Row::from_json(value)
}
