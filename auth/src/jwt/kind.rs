use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discriminates the two token families carried in the `kind` claim.
///
/// An access token is never accepted where a refresh token is expected,
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_as_lowercase() {
        assert_eq!(
            serde_json::to_value(TokenKind::Access).unwrap(),
            serde_json::json!("access")
        );
        assert_eq!(
            serde_json::from_value::<TokenKind>(serde_json::json!("refresh")).unwrap(),
            TokenKind::Refresh
        );
    }
}
