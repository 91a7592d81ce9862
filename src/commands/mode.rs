use async_trait::async_trait;

use super::{CommandResult, CommandTrait};
use crate::collage::Mode;
use crate::utilities::command_context::CommandContext;
use crate::utilities::convert_argument::ConvertArgument;

pub struct SetMode;

#[async_trait]
impl CommandTrait for SetMode {
    fn command_names(&self) -> &[&str] {
        &["mode", "layout"]
    }

    fn description(&self) -> Option<&'static str> {
        Some("show or switch the grid: four (2×2) or nine (3×3 cards)")
    }

    async fn execute(&self, ctx: &CommandContext, arguments: String) -> CommandResult {
        let Some(mode) = Option::<Mode>::convert(&arguments)?.0 else {
            let mode = ctx.state.session.lock().unwrap().inputs().mode;
            ctx.reply(format!("current mode: {mode}"));
            return Ok(());
        };

        if ctx.state.set_mode(mode) {
            ctx.reply(format!("mode set to {mode}, redrawing the collage…"));
        } else {
            ctx.reply(format!("mode set to {mode}."));
        }

        Ok(())
    }
}
