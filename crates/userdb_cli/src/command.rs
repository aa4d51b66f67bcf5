//! Menu tokens accepted by the interactive loop.

/// One action selected from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ViewAll,
    Create,
    Update,
    Delete,
    Search,
    Filter,
    Exit,
}

pub const MENU_PROMPT: &str = "What do you want to do?
    - vau - view all users
    - cu - create user
    - uu - update user
    - du - delete user
    - su - search users by name or email
    - fu - filter users
    - ex - exit
";

impl MenuCommand {
    /// Parses a menu token, ignoring case and surrounding whitespace.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "vau" => Some(Self::ViewAll),
            "cu" => Some(Self::Create),
            "uu" => Some(Self::Update),
            "du" => Some(Self::Delete),
            "su" => Some(Self::Search),
            "fu" => Some(Self::Filter),
            "ex" => Some(Self::Exit),
            _ => None,
        }
    }
}
