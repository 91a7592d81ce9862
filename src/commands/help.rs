use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::utilities::command_context::CommandContext;

pub struct Help;

#[async_trait]
impl CommandTrait for Help {
    fn command_names(&self) -> &[&str] {
        &["help", "?"]
    }

    async fn execute(&self, ctx: &CommandContext, _: String) -> CommandResult {
        let commands = ctx
            .command_manager
            .public_command_list()
            .into_iter()
            .map(|(names, description)| format!("  {:<24} {description}", names.join(", ")))
            .collect::<Vec<_>>();

        ctx.reply(format!("available commands:\n{}", commands.join("\n")));

        Ok(())
    }
}
