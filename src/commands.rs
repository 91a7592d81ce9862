use std::fmt;

use async_trait::async_trait;

use crate::app::DownloadError;
use crate::collage::session::SessionError;
use crate::utilities::command_context::CommandContext;
use crate::utilities::convert_argument::ConversionError;
use crate::utilities::folder_reader::FolderError;

pub mod download;
pub mod generate;
pub mod help;
pub mod mode;
pub mod open;
pub mod quit;
pub mod status;
pub mod wait;

pub type CommandResult = Result<(), CommandError>;

#[async_trait]
pub trait CommandTrait {
    fn command_names(&self) -> &[&str];

    fn description(&self) -> Option<&'static str> {
        None
    }

    async fn execute(&self, ctx: &CommandContext, arguments: String) -> CommandResult;
}

#[derive(Debug)]
pub enum CommandError {
    ArgumentConversion(ConversionError),
    Folder(FolderError),
    Session(SessionError),
    Download(DownloadError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentConversion(err) => write!(f, "{err}"),
            Self::Folder(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Download(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ConversionError> for CommandError {
    fn from(value: ConversionError) -> Self {
        Self::ArgumentConversion(value)
    }
}

impl From<FolderError> for CommandError {
    fn from(value: FolderError) -> Self {
        Self::Folder(value)
    }
}

impl From<SessionError> for CommandError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<DownloadError> for CommandError {
    fn from(value: DownloadError) -> Self {
        match value {
            DownloadError::Session(err) => Self::Session(err),
            err @ DownloadError::Export(_) => Self::Download(err),
        }
    }
}
