use anyhow::Result;
use clap::Parser;
use log::error;

mod cli;
mod cmd_get;
mod cmd_page;
mod cmd_serve;
mod cmd_status;

fn main() {
    let cli = cli::Cli::parse();

    let log_file = match &cli.cmd {
        cli::Cmd::Serve { log_file, .. } => log_file.clone(),
        _ => None,
    };
    if let Err(e) = PlayerDB::logging::init_logger(log_file.as_deref()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    match cli.cmd {
        cli::Cmd::Serve { data, addr, workers, log_file } =>
            cmd_serve::exec(data, addr, workers, log_file),

        cli::Cmd::Get { data, key, json } =>
            cmd_get::exec(data, key, json),

        cli::Cmd::Page { data, page, limit, json } =>
            cmd_page::exec(data, page, limit, json),

        cli::Cmd::Status { data, json } =>
            cmd_status::exec(data, json),
    }
}
