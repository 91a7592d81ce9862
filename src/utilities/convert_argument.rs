use std::fmt;
use std::path::PathBuf;

use crate::collage::Mode;

#[derive(Debug, PartialEq, Eq)]
pub enum ConversionError {
    MissingArgument,
    BadArgument(&'static str),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument => write!(f, "missing command argument"),
            Self::BadArgument(reason) => write!(f, "bad command argument: {reason}"),
        }
    }
}

impl std::error::Error for ConversionError {}

pub trait ConvertArgument: Sized {
    fn convert(arguments: &str) -> Result<(Self, &str), ConversionError>;
}

impl ConvertArgument for String {
    fn convert(arguments: &str) -> Result<(Self, &str), ConversionError> {
        let mut arguments = arguments.trim_start().chars();
        let argument =
            arguments.by_ref().take_while(|char| !char.is_ascii_whitespace()).collect::<String>();

        if argument.is_empty() {
            Err(ConversionError::MissingArgument)?;
        }

        Ok((argument, arguments.as_str()))
    }
}

impl<T: ConvertArgument> ConvertArgument for Option<T> {
    fn convert(arguments: &str) -> Result<(Self, &str), ConversionError> {
        match T::convert(arguments) {
            Ok((argument, rest)) => Ok((Some(argument), rest)),
            Err(ConversionError::MissingArgument) => Ok((None, arguments)),
            Err(err) => Err(err),
        }
    }
}

impl ConvertArgument for Mode {
    fn convert(arguments: &str) -> Result<(Self, &str), ConversionError> {
        let (argument, rest) = String::convert(arguments)?;
        let mode =
            argument.parse().map_err(|_| ConversionError::BadArgument("expected four or nine"))?;

        Ok((mode, rest))
    }
}

/// The rest of the arguments as a path, optionally wrapped in quotes.
pub struct PathGreedy(pub PathBuf);

impl ConvertArgument for PathGreedy {
    fn convert(arguments: &str) -> Result<(Self, &str), ConversionError> {
        let argument = arguments.trim();
        let argument = ['"', '\'']
            .into_iter()
            .find_map(|quote| argument.strip_prefix(quote)?.strip_suffix(quote))
            .unwrap_or(argument);

        if argument.is_empty() {
            Err(ConversionError::MissingArgument)?;
        }

        Ok((Self(argument.into()), ""))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_string_converter() {
        assert_eq!(String::convert(""), Err(ConversionError::MissingArgument));
        assert_eq!(String::convert("  four extra"), Ok(("four".into(), "extra")));
    }

    #[test]
    fn test_mode_converter() {
        assert_eq!(Mode::convert(" nine"), Ok((Mode::Nine, "")));
        assert_eq!(Mode::convert("2x2 rest"), Ok((Mode::Four, "rest")));
        assert_eq!(Mode::convert(""), Err(ConversionError::MissingArgument));
        let Err(ConversionError::BadArgument(_)) = Mode::convert("sixteen") else {
            panic!("expected BadArgument error");
        };

        assert_eq!(Option::<Mode>::convert(""), Ok((None, "")));
        assert_eq!(Option::<Mode>::convert("four"), Ok((Some(Mode::Four), "")));
        assert!(Option::<Mode>::convert("five").is_err());
    }

    #[test]
    fn test_path_converter() {
        let (PathGreedy(path), rest) = PathGreedy::convert(" ~/My Pictures ").unwrap();
        assert_eq!(path, PathBuf::from("~/My Pictures"));
        assert_eq!(rest, "");

        let (PathGreedy(path), _) = PathGreedy::convert("\"/tmp/with space\"").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/with space"));

        let (PathGreedy(path), _) = PathGreedy::convert("'photos'").unwrap();
        assert_eq!(path, PathBuf::from("photos"));

        assert!(matches!(PathGreedy::convert("  "), Err(ConversionError::MissingArgument)));
        assert!(matches!(PathGreedy::convert("\"\""), Err(ConversionError::MissingArgument)));
    }
}
