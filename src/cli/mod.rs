use std::{
    io::{self, Write},
    sync::{Arc, RwLock},
};

use colored::Colorize;
use log::error;

use crate::{
    cli::{
        colors::FERRUM_RED,
        messages::{answer, highlight_argument, system_message},
        parsers::CommandParser,
    },
    config::Config,
    persistence::{Workbook, WorkbookError},
    sessions::session::Session,
};

mod colors;
mod commands;
mod messages;
pub mod parsers;
mod splash_screen;

pub use commands::{CommandExecutor, CommandResult};
pub use parsers::{CliMode, CliParser, Command};

const DEFAULT_LAST_COMMAND_DELIMITER: &str = "!";

const FERRUM_SHEETS_COMMANDS_LIST: [(&str, &str); 18] = [
    ("get", "get <id>; the row whose key matches"),
    ("list", "list [limit] [skip] [all]; rows in sheet order"),
    ("find", "find <term>; rows with a cell containing the term"),
    ("create", "create <json>; append a row, id generated if missing"),
    ("update", "update <id> <json>; merge fields into a row"),
    ("delete", "delete <id>; remove a row"),
    ("delete-all", "remove every row, keep the header"),
    ("count", "number of rows in the sheet"),
    ("sheets", "list the sheets of the workbook"),
    ("use", "use <sheet>; switch the active sheet"),
    ("new-sheet", "new-sheet <name> <col,col,...>; add a sheet"),
    ("drop-sheet", "drop-sheet <name>; remove a sheet"),
    ("key", "key <column>; address rows by another column"),
    ("save", "write the workbook to its file"),
    ("!", "execute the last command, add more to go further back"),
    ("help", "list all available commands"),
    ("history", "list command history for this session"),
    (
        "corrode",
        "iron corrodes and so does this session when you exit",
    ),
];

fn open_workbook(config: &Config) -> Result<Workbook, WorkbookError> {
    //! Load the configured workbook, and make sure the starting sheet exists.

    let mut workbook = match &config.workbook_path {
        Some(path) => Workbook::load_or_default(path)?,
        None => Workbook::new(),
    };

    if !workbook.exists(&config.sheet) {
        workbook.create_sheet(&config.sheet, &[config.key_column.clone()], true)?;
    }

    Ok(workbook)
}

fn open_session(config: &Config) -> Result<Arc<RwLock<Session>>, WorkbookError> {
    let workbook = Arc::new(RwLock::new(open_workbook(config)?));
    Ok(Arc::new(RwLock::new(Session::client(&workbook, config))))
}

pub fn run_client(config: &Config) {
    splash_screen::splash_screen();

    let session = match open_session(config) {
        Ok(session) => session,
        Err(e) => {
            error!("could not open workbook: {}", e);
            println!("{}", system_message("system", e.to_string()));
            return;
        }
    };

    println!(
        "{}",
        system_message(
            "info",
            format!(
                "Workbook opened on sheet '{}', keyed by '{}'.",
                highlight_argument(&config.sheet),
                highlight_argument(&config.key_column),
            )
        )
    );

    start_repl(session);
}

pub fn run_once(config: &Config, line: &str) -> Result<CommandResult, String> {
    //! Run a single command against the configured workbook.
    //!
    //! Changes are written back when a workbook file is configured, so exec
    //! mode behaves like a REPL session that ends with `save`.

    let session = open_session(config).map_err(|e| e.to_string())?;
    let command = CommandParser::parse(line)?;
    let mutates = matches!(
        command,
        Command::Create { .. }
            | Command::Update { .. }
            | Command::Delete { .. }
            | Command::DeleteAll
            | Command::NewSheet { .. }
            | Command::DropSheet { .. }
    );

    let result = CommandExecutor::new(command, &session).execute()?;

    if mutates {
        if let Some(path) = &config.workbook_path {
            let session = session.read().map_err(|e| e.to_string())?;
            let workbook = session.workbook();
            let workbook = workbook.read().map_err(|e| e.to_string())?;
            workbook.save(path).map_err(|e| e.to_string())?;
        }
    }

    Ok(result)
}

pub fn show_help() {
    println!(
        "{}",
        system_message(
            "info",
            format!(
                "Data commands answer in {}.",
                highlight_argument("json")
            )
        )
    );

    println!();
    println!("{:12} {}", "COMMAND".color(FERRUM_RED), "DETAILS");
    for (command, details) in FERRUM_SHEETS_COMMANDS_LIST {
        println!("{:12} {}", command.color(FERRUM_RED), details)
    }
}

fn render(result: &CommandResult) -> String {
    match (&result.output, &result.message) {
        (Some(output), _) => answer(output),
        (None, Some(message)) => system_message("ferrum", message.clone()),
        (None, None) => String::new(),
    }
}

fn prompt(session: &Arc<RwLock<Session>>) -> String {
    session
        .read()
        .map(|session| session.active_sheet().to_string())
        .unwrap_or_default()
}

fn start_repl(client_session: Arc<RwLock<Session>>) {
    println!(
        "{}",
        system_message(
            "system",
            format!(
                "Use '{}' to quit and '{}' to know all commands available.",
                highlight_argument("corrode"),
                highlight_argument("help"),
            ),
        )
    );

    if let Ok(session) = client_session.read() {
        println!(
            "{}",
            system_message(
                "system",
                format!(
                    "New session initiated at '{}'.",
                    highlight_argument(&session.start_time_string())
                ),
            )
        );
    }

    loop {
        println!();
        print!("{:6} > ", prompt(&client_session).color(FERRUM_RED).bold());
        if io::stdout().flush().is_err() {
            break;
        }

        let mut buffer = String::new();
        match io::stdin().read_line(&mut buffer) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        if buffer.starts_with(DEFAULT_LAST_COMMAND_DELIMITER) {
            let last = buffer.matches(DEFAULT_LAST_COMMAND_DELIMITER).count();
            let last_command = client_session
                .read()
                .ok()
                .and_then(|session| session.get_last_command(last).map(str::to_string));

            match last_command {
                Some(command) => buffer = command,
                None => {
                    println!(
                        "{}",
                        system_message(
                            "system",
                            format!(
                                "No command {} steps back.",
                                highlight_argument(&last.to_string())
                            ),
                        )
                    );
                    continue;
                }
            }
        }

        if buffer.trim().is_empty() {
            continue;
        }

        if let Ok(mut session) = client_session.write() {
            session.add_to_command_history(buffer.trim());
        }

        match buffer.trim() {
            "history" => {
                if let Ok(session) = client_session.read() {
                    session.show_command_history(None);
                }
            }
            "help" => show_help(),
            "exit" => println!("did you mean '{}'?", "corrode".color(FERRUM_RED)),
            "corrode" => break,
            line => match CommandParser::parse(line) {
                Ok(command) => match CommandExecutor::new(command, &client_session).execute() {
                    Ok(result) => println!("{}", render(&result)),
                    Err(message) => {
                        error!("command failed: {}", message);
                        println!("{}", system_message("ferrum", message));
                    }
                },
                Err(message) => println!("{}", system_message("parser", message)),
            },
        }
    }

    println!("Goodbye!")
}
