//! User profile types.
//!
//! Users are owned by the backend; this core reads them only to display
//! profile information.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// A user as reported by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend-assigned user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Profile image URL, if one is set.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl User {
    /// First letter of the display name, uppercased.
    ///
    /// Used as the avatar placeholder when no profile image is set.
    #[must_use]
    pub fn monogram(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_image() {
        let user: User = serde_json::from_str(r#"{"id": 3, "name": "Ana"}"#).unwrap();
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.image_url, None);
    }

    #[test]
    fn test_monogram() {
        let user: User = serde_json::from_str(r#"{"id": 3, "name": "ana"}"#).unwrap();
        assert_eq!(user.monogram(), Some('A'));
    }

    #[test]
    fn test_monogram_empty_name() {
        let user: User = serde_json::from_str(r#"{"id": 3, "name": "  "}"#).unwrap();
        assert_eq!(user.monogram(), None);
    }
}
