use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use tokio::signal;
use tokio::sync::mpsc;

use crate::app::{AppState, AppStatus};
use crate::utilities::command_context::CommandContext;
use crate::utilities::command_dispatcher;
use crate::utilities::command_manager::{CommandManager, CommandRef};
use crate::utilities::parsed_command::ParsedCommand;

pub struct Shell {
    state: Arc<AppState>,
    command_manager: CommandManager,
}

impl Shell {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, command_manager: CommandManager::default() }
    }

    pub fn add_command(&mut self, command: CommandRef) {
        self.command_manager.add_command(command);
    }

    /// Reads commands from stdin until `quit`, end of input or Ctrl+C, then waits for running
    /// renders before returning.
    pub async fn run(self) {
        *self.state.status.lock().unwrap() = AppStatus::Running;
        let context =
            CommandContext { state: self.state, command_manager: Arc::new(self.command_manager) };
        let mut lines = spawn_stdin_reader();

        context.reply("A4 collage generator. type help for the list of commands.");

        loop {
            print!("> ");
            io::stdout().flush().ok();

            let line = tokio::select! {
                line = lines.recv() => line,
                _ = signal::ctrl_c() => {
                    println!();
                    log::warn!("Ctrl+C received");
                    None
                }
            };

            let Some(line) = line else {
                *context.state.status.lock().unwrap() = AppStatus::WaitingToClose;
                break;
            };

            on_line(&context, &line).await;

            if *context.state.status.lock().unwrap() == AppStatus::WaitingToClose {
                break;
            }
        }

        close(&context.state).await;
    }
}

async fn on_line(context: &CommandContext, line: &str) {
    let Some(parsed_command) = ParsedCommand::parse(line) else {
        return;
    };

    let Some(command) = context.command_manager.get_command(&parsed_command.name) else {
        context.reply(format!("unknown command {:?}, try help.", parsed_command.name));
        return;
    };

    command_dispatcher::dispatch_command(command, parsed_command.arguments, context).await;
}

async fn close(state: &AppState) {
    let task_count = state.running_task_count();
    if task_count > 0 {
        log::info!("waiting for {task_count} task(s) to finish…");
    }

    state.wait_idle().await;
    *state.status.lock().unwrap() = AppStatus::Closed;
}

/// Blocking stdin reads live on their own thread so they never hold up the runtime's shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };

            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}
