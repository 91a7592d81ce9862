#![warn(clippy::pedantic)]

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cli::CliArgs;
use shell::Shell;
use tokio::runtime;

mod app;
mod cli;
mod collage;
mod commands;
mod shell;
mod utilities;

/// How long a decode stuck on an unreadable file may hold up the exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    utilities::logchamp::init();

    let args = CliArgs::parse();
    let runtime = match runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("starting the runtime failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let exit_code = runtime.block_on(run(args));
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    log::logger().flush();

    exit_code
}

async fn run(args: CliArgs) -> ExitCode {
    let state = Arc::new(args.app_state());

    if let Some(folder) = &args.folder
        && !args.interactive
    {
        return cli::run_once(&state, folder).await;
    }

    if let Some(folder) = &args.folder
        && let Err(err) = state.open_folder(folder).await
    {
        log::error!("{err}");
    }

    let mut shell = Shell::new(state);

    shell.add_command(Box::new(commands::open::Open));
    shell.add_command(Box::new(commands::mode::SetMode));
    shell.add_command(Box::new(commands::generate::Generate));
    shell.add_command(Box::new(commands::wait::Wait));
    shell.add_command(Box::new(commands::download::Download));
    shell.add_command(Box::new(commands::status::Status));
    shell.add_command(Box::new(commands::help::Help));
    shell.add_command(Box::new(commands::quit::Quit));

    shell.run().await;

    ExitCode::SUCCESS
}
