use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::collage::session::RenderStatus;
use crate::utilities::command_context::CommandContext;
use crate::utilities::convert_argument::{ConvertArgument, PathGreedy};
use crate::utilities::text_utils;

pub struct Open;

#[async_trait]
impl CommandTrait for Open {
    fn command_names(&self) -> &[&str] {
        &["open", "import"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("import every image below a folder")
    }

    async fn execute(&self, ctx: &CommandContext, arguments: String) -> CommandResult {
        let PathGreedy(path) = PathGreedy::convert(&arguments)?.0;

        let count = ctx.state.open_folder(&path).await?;
        ctx.reply(format!("{} imported.", text_utils::plural(count, "image", "images")));

        let status = ctx.state.session.lock().unwrap().status();
        match status {
            RenderStatus::NotStarted if count > 0 => ctx.reply("use generate to lay them out."),
            RenderStatus::Rendering => ctx.reply("redrawing the collage…"),
            _ => (),
        }

        Ok(())
    }
}
