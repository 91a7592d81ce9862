pub mod command_context;
pub mod command_dispatcher;
pub mod command_manager;
pub mod convert_argument;
pub mod folder_reader;
pub mod image_utils;
pub mod logchamp;
pub mod parsed_command;
pub mod persistence;
pub mod text_utils;

#[cfg(test)]
pub mod test_fixtures;
