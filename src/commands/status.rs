use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::utilities::command_context::CommandContext;
use crate::utilities::text_utils;

pub struct Status;

#[async_trait]
impl CommandTrait for Status {
    fn command_names(&self) -> &[&str] {
        &["status"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("show the imported images, the mode and the render state")
    }

    async fn execute(&self, ctx: &CommandContext, _: String) -> CommandResult {
        let (image_count, mode, page_count, status) = {
            let session = ctx.state.session.lock().unwrap();
            let inputs = session.inputs();
            (inputs.images.len(), inputs.mode, session.page_count(), session.status())
        };

        ctx.reply(format!(
            "{}, mode {mode}, {}, {status}.",
            text_utils::plural(image_count, "image", "images"),
            text_utils::plural(page_count, "page", "pages")
        ));

        Ok(())
    }
}
