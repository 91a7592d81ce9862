use std::fmt;
use std::sync::Arc;

use crate::commands::CommandTrait;

pub type CommandRef = Box<dyn CommandTrait + Send + Sync>;

pub struct CommandInstance {
    pub command: CommandRef,
}

impl fmt::Display for CommandInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command.command_names().first().copied().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct CommandManager {
    commands: Vec<Arc<CommandInstance>>,
}

impl CommandManager {
    pub fn add_command(&mut self, command: CommandRef) {
        self.commands.push(Arc::new(CommandInstance { command }));
    }

    pub fn get_command(&self, name: &str) -> Option<Arc<CommandInstance>> {
        self.commands.iter().find(|c| c.command.command_names().contains(&name)).cloned()
    }

    /// `(names, description)` of every command that has a description
    pub fn public_command_list(&self) -> Vec<(&[&str], &'static str)> {
        self.commands
            .iter()
            .filter_map(|c| c.command.description().map(|d| (c.command.command_names(), d)))
            .collect()
    }
}
