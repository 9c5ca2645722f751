//! Command - Console Input Parsing
//!
//! One line of user input maps to one `Command`.

use crate::error::{Error, Result};

/// Commands accepted by the console front-end
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    /// Landing → Login
    Open,
    /// Login → Landing
    Cancel,
    Login { username: String, password: String },
    Logout,
    /// Redraw the fleet list and the selected truck
    List,
    Select(String),
    Show,
    Search(String),
    Summary,
    /// Dump the selected truck as JSON
    Json,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(invalid("empty command"));
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "open" => Command::Open,
            "cancel" | "back" => Command::Cancel,
            "login" => {
                let (Some(username), Some(password)) = (parts.next(), parts.next()) else {
                    return Err(invalid("usage: login <username> <password>"));
                };
                Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "list" | "ls" => Command::List,
            "select" => {
                let Some(id) = parts.next() else {
                    return Err(invalid("usage: select <truck-id>"));
                };
                Command::Select(id.to_ascii_uppercase())
            }
            "show" => Command::Show,
            "search" => Command::Search(parts.collect::<Vec<_>>().join(" ")),
            "summary" => Command::Summary,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(invalid(format!("unknown command `{other}`, try `help`"))),
        };
        Ok(command)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Open => f.write_str("Open"),
            Command::Cancel => f.write_str("Cancel"),
            Command::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Command::Logout => f.write_str("Logout"),
            Command::List => f.write_str("List"),
            Command::Select(id) => f.debug_tuple("Select").field(id).finish(),
            Command::Show => f.write_str("Show"),
            Command::Search(query) => f.debug_tuple("Search").field(query).finish(),
            Command::Summary => f.write_str("Summary"),
            Command::Json => f.write_str("Json"),
            Command::Help => f.write_str("Help"),
            Command::Quit => f.write_str("Quit"),
        }
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Invalid {
        message: message.into(),
    }
}

pub const HELP: &str = "\
Commands:
  open                         go to Fleet Login
  cancel                       back to the landing screen
  login <username> <password>  sign in
  logout                       sign out
  list                         fleet list and selected truck
  select <truck-id>            select a truck, e.g. `select TRK-103`
  show                         selected truck only
  search <text>                filter by id, name, driver or location
  summary                      fleet-wide summary
  json                         selected truck as JSON
  help                         this text
  quit                         exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("open").expect("open"), Command::Open);
        assert_eq!(Command::parse("  LOGOUT ").expect("logout"), Command::Logout);
        assert_eq!(Command::parse("exit").expect("exit"), Command::Quit);
        assert_eq!(Command::parse("summary").expect("summary"), Command::Summary);
    }

    #[test]
    fn test_parse_login_keeps_credentials_verbatim() {
        assert_eq!(
            Command::parse("login Admin Secret").expect("login"),
            Command::Login {
                username: "Admin".to_string(),
                password: "Secret".to_string(),
            }
        );
        assert!(Command::parse("login admin").is_err());

        let shown = format!("{:?}", Command::parse("login admin hunter2").expect("login"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_parse_select_and_search() {
        assert_eq!(
            Command::parse("select trk-103").expect("select"),
            Command::Select("TRK-103".to_string())
        );
        assert!(Command::parse("select").is_err());
        assert_eq!(
            Command::parse("search route 66").expect("search"),
            Command::Search("route 66".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert!(matches!(Command::parse("fly"), Err(Error::Invalid { .. })));
        assert!(Command::parse("   ").is_err());
    }
}
