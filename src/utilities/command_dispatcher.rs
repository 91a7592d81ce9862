use std::sync::Arc;

use super::command_context::CommandContext;
use super::command_manager::CommandInstance;
use crate::commands::CommandError;

pub async fn dispatch_command(
    command: Arc<CommandInstance>,
    arguments: String,
    context: &CommandContext,
) {
    log::info!("running {command} {arguments:?}");

    if let Err(err) = command.command.execute(context, arguments).await {
        report_command_error(&command, context, &err);
    }
}

fn report_command_error(command: &CommandInstance, context: &CommandContext, error: &CommandError) {
    match error {
        CommandError::ArgumentConversion(_) | CommandError::Session(_) => {
            log::info!("{command} refused: {error}");
        }
        CommandError::Folder(_) | CommandError::Download(_) => {
            log::error!("{command} failed: {error}");
        }
    }

    context.reply(format!("{command}: {error}"));
}
