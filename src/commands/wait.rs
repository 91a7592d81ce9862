use std::time::Instant;

use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::utilities::command_context::CommandContext;
use crate::utilities::text_utils;

pub struct Wait;

#[async_trait]
impl CommandTrait for Wait {
    fn command_names(&self) -> &[&str] {
        &["wait"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("block until the pages finished rendering")
    }

    async fn execute(&self, ctx: &CommandContext, _: String) -> CommandResult {
        let start = Instant::now();
        ctx.state.wait_idle().await;
        let status = ctx.state.session.lock().unwrap().status();
        ctx.reply(format!(
            "collage is {status} (waited {}).",
            text_utils::format_duration(start.elapsed().as_secs())
        ));

        Ok(())
    }
}
