#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub arguments: String,
}

impl ParsedCommand {
    /// Splits an input line into a lowercase command name and the rest. A leading `/` is
    /// accepted and ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);

        let (name, arguments) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        if name.is_empty() {
            return None;
        }

        Some(Self { name: name.to_lowercase(), arguments: arguments.trim_ascii_start().into() })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ParsedCommand::parse(""), None);
        assert_eq!(ParsedCommand::parse("   "), None);
        assert_eq!(ParsedCommand::parse("/"), None);

        assert_eq!(
            ParsedCommand::parse("generate"),
            Some(ParsedCommand { name: "generate".into(), arguments: String::new() })
        );
        assert_eq!(
            ParsedCommand::parse("  /Mode   NINE "),
            Some(ParsedCommand { name: "mode".into(), arguments: "NINE".into() })
        );
        assert_eq!(
            ParsedCommand::parse("open ~/My Pictures/2024"),
            Some(ParsedCommand { name: "open".into(), arguments: "~/My Pictures/2024".into() })
        );
    }
}
