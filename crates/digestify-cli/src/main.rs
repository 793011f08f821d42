//! Digestify - sign and verify HMAC trailers on files and pipes

use std::process::ExitCode;

use clap::Parser;

use digestify_cli::{
    execute, init_logging, prompt::prompt_secret_key, resolve_config, usage_status, Cli, Status,
};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors must not collide with the verification exit codes
            return usage_status(&e).map_or(ExitCode::SUCCESS, ExitCode::from);
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("digestify: {:#}", e);
            Status::Failed.into()
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Status> {
    let config = resolve_config(cli)?;
    let key = prompt_secret_key()?;
    execute(cli, &config, &key)
}
