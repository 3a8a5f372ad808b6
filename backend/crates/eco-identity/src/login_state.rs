/// Login policy states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Still accepting attempts; holds the number already used
    Attempting(u32),
    /// Credentials accepted - terminal
    Authenticated,
    /// Attempts exhausted - terminal, no further attempts are made
    Locked,
}

impl LoginState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }
}

impl std::fmt::Display for LoginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attempting(used) => write!(f, "attempting ({} used)", used),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Locked => write!(f, "locked"),
        }
    }
}
