use crate::models::ColorScheme;
use crate::selection::FilterEvent;

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(FilterEvent),
    Latest,
    Nav { host: String, pathname: String },
    Theme(Option<ColorScheme>),
    Contact(String),
    Profile,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, rest) = match line.trim_start().split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim(), ""),
    };

    match verb {
        // The query is kept verbatim so that leading spaces still reach the filter.
        "search" => Ok(Command::Filter(FilterEvent::QueryChanged(rest.to_string()))),
        "click" => rest
            .trim()
            .parse::<usize>()
            .map(|index| Command::Filter(FilterEvent::WedgeClicked(index)))
            .map_err(|_| format!("click expects a wedge index, got {:?}", rest.trim())),
        "clear" => Ok(Command::Filter(FilterEvent::Cleared)),
        "latest" => Ok(Command::Latest),
        "nav" => {
            let mut parts = rest.split_whitespace();
            let host = parts.next().ok_or_else(|| "nav expects <host> [path]".to_string())?;
            let pathname = parts.next().unwrap_or("/");
            Ok(Command::Nav {
                host: host.to_string(),
                pathname: pathname.to_string(),
            })
        }
        "theme" if rest.trim().is_empty() => Ok(Command::Theme(None)),
        "theme" => ColorScheme::parse(rest)
            .map(|scheme| Command::Theme(Some(scheme)))
            .ok_or_else(|| format!("unknown color scheme {:?}", rest.trim())),
        "contact" => Ok(Command::Contact(rest.to_string())),
        "profile" => Ok(Command::Profile),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};
    use crate::models::ColorScheme;
    use crate::selection::FilterEvent;

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_command("search Pie Chart"),
            Ok(Command::Filter(FilterEvent::QueryChanged("Pie Chart".to_string())))
        );
        assert_eq!(
            parse_command("search"),
            Ok(Command::Filter(FilterEvent::QueryChanged(String::new())))
        );
        assert_eq!(parse_command("click 2\n"), Ok(Command::Filter(FilterEvent::WedgeClicked(2))));
        assert_eq!(parse_command("clear"), Ok(Command::Filter(FilterEvent::Cleared)));
        assert!(parse_command("click two").is_err());
    }

    #[test]
    fn parses_site_commands() {
        assert_eq!(
            parse_command("nav localhost:8000 /projects/"),
            Ok(Command::Nav {
                host: "localhost:8000".to_string(),
                pathname: "/projects/".to_string(),
            })
        );
        assert_eq!(parse_command("theme light dark"), Ok(Command::Theme(Some(ColorScheme::Automatic))));
        assert_eq!(parse_command("theme"), Ok(Command::Theme(None)));
        assert!(parse_command("theme neon").is_err());
        assert_eq!(
            parse_command("contact subject=Hi&body=Hello there"),
            Ok(Command::Contact("subject=Hi&body=Hello there".to_string()))
        );
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("dance").is_err());
        assert!(parse_command("   ").is_err());
    }
}
