//! Session types.
//!
//! The authenticated context associated with one logged-in user: the opaque
//! token plus profile fields denormalized from the backend's user record for
//! fast display.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// One logged-in user's session.
///
/// All six fields are persisted under the fixed keys in [`keys`] and are
/// written and cleared as a single unit; no caller ever observes a record
/// with only part of the key set present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque token authorizing all backend calls. Validity is verified
    /// only by the backend.
    pub token: String,
    /// ID of the logged-in user.
    pub user_id: UserId,
    /// Role label, owned by the backend's vocabulary.
    pub user_role: String,
    /// Display name.
    pub user_name: String,
    /// Email address.
    pub user_email: String,
    /// Profile image URL, if one is set.
    pub user_image: Option<String>,
}

impl Session {
    /// True iff the session carries a non-empty token.
    ///
    /// Token presence is the sole authorization gate for order operations.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

/// Fixed keys of the persisted session record.
pub mod keys {
    /// Key for the opaque session token.
    pub const TOKEN: &str = "token";

    /// Key for the logged-in user's ID.
    pub const USER_ID: &str = "userId";

    /// Key for the logged-in user's role.
    pub const USER_ROLE: &str = "userRole";

    /// Key for the logged-in user's display name.
    pub const USER_NAME: &str = "userName";

    /// Key for the logged-in user's email address.
    pub const USER_EMAIL: &str = "userEmail";

    /// Key for the logged-in user's profile image URL.
    pub const USER_IMAGE: &str = "userImage";

    /// Every key of the record, in write order.
    pub const ALL: [&str; 6] = [TOKEN, USER_ID, USER_ROLE, USER_NAME, USER_EMAIL, USER_IMAGE];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user_id: UserId::new(4),
            user_role: "staff".to_string(),
            user_name: "Ana".to_string(),
            user_email: "ana@example.com".to_string(),
            user_image: None,
        }
    }

    #[test]
    fn test_serializes_under_the_fixed_key_set() {
        let value = serde_json::to_value(session()).unwrap();
        let object = value.as_object().unwrap();

        let mut found: Vec<&str> = object.keys().map(String::as_str).collect();
        found.sort_unstable();
        let mut expected = keys::ALL.to_vec();
        expected.sort_unstable();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_is_authenticated() {
        assert!(session().is_authenticated());

        let mut anonymous = session();
        anonymous.token = String::new();
        assert!(!anonymous.is_authenticated());

        anonymous.token = "   ".to_string();
        assert!(!anonymous.is_authenticated());
    }

    #[test]
    fn test_roundtrip() {
        let session = session();
        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }
}
