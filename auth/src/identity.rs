use std::fmt;

/// The minimal claim carried inside a verified session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: i64,
}

impl Identity {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.user_id.fmt(f)
    }
}
