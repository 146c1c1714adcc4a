use clap::Parser;
use memo::cli::commands::Cli;
use memo::cli::handlers;
use memo::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    let config = match config_io::load_config(cli.config.as_deref(), cli.memo_file()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The TUI owns the terminal, so it logs to a file
    let target = if cli.is_tui() {
        logging::tui_target(&config.log)
    } else {
        logging::LogTarget::Stderr
    };
    if let Err(e) = logging::init(&config.log, &target) {
        eprintln!("warning: {}", e);
    }

    if let Err(e) = handlers::dispatch(cli, &config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
