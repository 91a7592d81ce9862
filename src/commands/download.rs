use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::utilities::command_context::CommandContext;
use crate::utilities::text_utils;

pub struct Download;

#[async_trait]
impl CommandTrait for Download {
    fn command_names(&self) -> &[&str] {
        &["download", "export"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("save every page as a JPEG inside one zip archive")
    }

    async fn execute(&self, ctx: &CommandContext, _: String) -> CommandResult {
        let page_count = ctx.state.download().await?;
        ctx.reply(format!(
            "exported {} to {}.",
            text_utils::plural(page_count, "page", "pages"),
            ctx.state.archive_name()
        ));

        Ok(())
    }
}
