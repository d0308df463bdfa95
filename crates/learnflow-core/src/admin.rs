//! Admin command parsing and authorization.

use std::path::PathBuf;

/// Admin commands embedded in chat content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    /// `/scan` — list and review files under a path.
    Scan,
    /// `/debug` — same scan with a diagnosis-oriented report.
    Debug,
}

impl AdminCommand {
    /// Command token including the leading slash.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminCommand::Scan => "/scan",
            AdminCommand::Debug => "/debug",
        }
    }
}

/// Parse an admin command from a chat message.
///
/// The remainder of the message after the command token is the scan path;
/// absent remainder means the configured default root.
pub fn parse_command(content: &str) -> Option<(AdminCommand, Option<PathBuf>)> {
    let trimmed = content.trim();
    let (token, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (trimmed, ""),
    };
    let command = match token {
        "/scan" => AdminCommand::Scan,
        "/debug" => AdminCommand::Debug,
        _ => return None,
    };
    let path = if rest.is_empty() {
        None
    } else {
        Some(PathBuf::from(rest))
    };
    Some((command, path))
}

/// Authorization hook checked before any admin command runs.
pub trait AdminAuthorizer: Send + Sync {
    /// True when the identity may run the command.
    fn authorize(&self, identity: &str, command: AdminCommand) -> bool;
}

/// Allow-list authorizer. An empty list leaves commands open, matching the
/// platform's historical default deployment.
#[derive(Debug, Clone, Default)]
pub struct AllowListAuthorizer {
    allowed: Vec<String>,
}

impl AllowListAuthorizer {
    /// Create an authorizer over an identity allow-list.
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl AdminAuthorizer for AllowListAuthorizer {
    fn authorize(&self, identity: &str, _command: AdminCommand) -> bool {
        self.allowed.is_empty() || self.allowed.iter().any(|entry| entry == identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_scan_with_path() {
        let (command, path) = parse_command("/scan src/handlers").expect("command");
        assert_eq!(command, AdminCommand::Scan);
        assert_eq!(path, Some(PathBuf::from("src/handlers")));
    }

    #[test]
    fn parses_debug_without_path() {
        let (command, path) = parse_command("  /debug  ").expect("command");
        assert_eq!(command, AdminCommand::Debug);
        assert_eq!(path, None);
    }

    #[test]
    fn keeps_spaces_inside_paths() {
        let (_, path) = parse_command("/scan my project/src").expect("command");
        assert_eq!(path, Some(PathBuf::from("my project/src")));
    }

    #[test]
    fn ordinary_chat_is_not_a_command() {
        assert_eq!(parse_command("please /scan this"), None);
        assert_eq!(parse_command("/scanner docs"), None);
        assert_eq!(parse_command("hello"), None);
    }

    #[test]
    fn empty_allow_list_leaves_commands_open() {
        let authorizer = AllowListAuthorizer::default();
        assert!(authorizer.authorize("anyone", AdminCommand::Scan));
    }

    #[test]
    fn allow_list_gates_identities() {
        let authorizer = AllowListAuthorizer::new(vec!["ops".to_string()]);
        assert!(authorizer.authorize("ops", AdminCommand::Debug));
        assert!(!authorizer.authorize("student-7", AdminCommand::Scan));
    }
}
