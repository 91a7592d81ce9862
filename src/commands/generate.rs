use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::utilities::command_context::CommandContext;
use crate::utilities::text_utils;

pub struct Generate;

#[async_trait]
impl CommandTrait for Generate {
    fn command_names(&self) -> &[&str] {
        &["generate", "start"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("lay the imported images out on A4 pages")
    }

    async fn execute(&self, ctx: &CommandContext, _: String) -> CommandResult {
        let page_count = ctx.state.generate()?;
        ctx.reply(format!("drawing {}…", text_utils::plural(page_count, "page", "pages")));

        Ok(())
    }
}
