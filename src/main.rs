use clap::Parser;
use ferrum_sheets::cli::{self, CliMode, CliParser};
use ferrum_sheets::config::Config;
use log::error;

fn main() {
    let args = CliParser::parse();

    let mut config = Config::load();
    args.apply(&mut config);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match args.mode {
        Some(CliMode::Client) => cli::run_client(&config),
        Some(CliMode::Exec) => {
            let Some(line) = args.command.as_deref() else {
                eprintln!("exec mode needs --command \"<command>\"");
                std::process::exit(2);
            };

            match cli::run_once(&config, line) {
                Ok(result) => println!("{}", result),
                Err(message) => {
                    error!("{}", message);
                    eprintln!("{}", message);
                    std::process::exit(1);
                }
            }
        }
        None => cli::show_help(),
    }
}
