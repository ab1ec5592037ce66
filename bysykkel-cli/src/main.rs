//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use bysykkel_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = bysykkel_cli::run() {
        if let CliError::ArgumentParsing(parse_err) = &err {
            parse_err.exit();
        }
        eprintln!("bysykkel: {err}");
        std::process::exit(1);
    }
}
