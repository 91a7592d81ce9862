use std::fmt::Display;
use std::sync::Arc;

use super::command_manager::CommandManager;
use crate::app::AppState;

pub struct CommandContext {
    pub state: Arc<AppState>,
    pub command_manager: Arc<CommandManager>,
}

impl CommandContext {
    #[expect(clippy::unused_self)]
    pub fn reply<T: Display>(&self, text: T) {
        println!("{text}");
    }
}
