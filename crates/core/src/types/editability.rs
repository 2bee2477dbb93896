//! Order edit eligibility.

use serde::{Deserialize, Serialize};

/// Whether an order's fields may still be mutated.
///
/// The backend owns the transition from `Editable` to `Locked` (for example
/// once fulfillment begins); this core only observes it. The eligibility
/// answer is authoritative per edit attempt and must not be cached across an
/// editing session.
///
/// Defaults to `Locked`: under uncertainty an order is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Editability {
    Editable,
    #[default]
    Locked,
}

impl Editability {
    /// Interpret the backend's boolean eligibility answer.
    #[must_use]
    pub const fn from_flag(editable: bool) -> Self {
        if editable { Self::Editable } else { Self::Locked }
    }

    /// True iff an update may be issued.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Editable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_locked() {
        assert_eq!(Editability::default(), Editability::Locked);
        assert!(!Editability::default().can_edit());
    }

    #[test]
    fn test_from_flag() {
        assert!(Editability::from_flag(true).can_edit());
        assert!(!Editability::from_flag(false).can_edit());
    }
}
