use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::app::AppStatus;
use crate::utilities::command_context::CommandContext;

pub struct Quit;

#[async_trait]
impl CommandTrait for Quit {
    fn command_names(&self) -> &[&str] {
        &["quit", "exit"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("leave once running renders are done")
    }

    async fn execute(&self, ctx: &CommandContext, _: String) -> CommandResult {
        *ctx.state.status.lock().unwrap() = AppStatus::WaitingToClose;

        Ok(())
    }
}
