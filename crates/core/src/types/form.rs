//! Order form validation and numeric coercion.
//!
//! The form holds the ten order fields exactly as entered on screen, all as
//! raw text. Validation checks the fixed required-field set; numeric
//! coercion runs only after validation succeeds and is a pure transformation
//! applied once per submission.

use crate::types::order::{Order, OrderPayload};

/// Wire names of the required order fields, in declaration order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "model",
    "pieceCount",
    "size",
    "karatage",
    "color",
    "orderName",
];

/// Raw order fields as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub model: String,
    pub piece_count: String,
    pub size: String,
    pub karatage: String,
    pub color: String,
    pub initial: String,
    pub order_name: String,
    pub stone: String,
    pub length: String,
    pub notes: String,
}

/// Required order fields are missing.
///
/// Surfaced to the immediate caller so the user can correct the input;
/// never auto-retried, and no write may be issued while it stands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    /// Wire names of the missing fields, in declaration order.
    pub missing: Vec<&'static str>,
}

impl OrderForm {
    fn required(&self) -> [(&'static str, &str); 6] {
        [
            ("model", &self.model),
            ("pieceCount", &self.piece_count),
            ("size", &self.size),
            ("karatage", &self.karatage),
            ("color", &self.color),
            ("orderName", &self.order_name),
        ]
    }

    /// Wire names of required fields that are empty or whitespace-only.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.required()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Validate the required field set and coerce the numeric fields.
    ///
    /// `pieceCount` coerces to an integer and `initial`/`length` to floats,
    /// each falling back to 0 when unparseable. Text fields pass through
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing exactly the missing required
    /// field names. No payload is produced and the caller must not issue a
    /// write.
    pub fn validate(&self) -> Result<OrderPayload, ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(OrderPayload {
            model: self.model.clone(),
            piece_count: parse_count(&self.piece_count),
            size: self.size.clone(),
            karatage: self.karatage.clone(),
            color: self.color.clone(),
            initial: parse_measure(&self.initial),
            order_name: self.order_name.clone(),
            stone: self.stone.clone(),
            length: parse_measure(&self.length),
            notes: self.notes.clone(),
        })
    }
}

/// Prefill an edit form from a stored order.
impl From<&Order> for OrderForm {
    fn from(order: &Order) -> Self {
        Self {
            model: order.model.clone(),
            piece_count: order.piece_count.to_string(),
            size: order.size.clone(),
            karatage: order.karatage.clone(),
            color: order.color.clone(),
            initial: order.initial.to_string(),
            order_name: order.order_name.clone(),
            stone: order.stone.clone(),
            length: order.length.to_string(),
            notes: order.notes.clone(),
        }
    }
}

fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_measure(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::OrderId;

    fn complete_form() -> OrderForm {
        OrderForm {
            model: "Ring-A".to_string(),
            piece_count: "3".to_string(),
            size: "7".to_string(),
            karatage: "14k".to_string(),
            color: "gold".to_string(),
            order_name: "Order1".to_string(),
            ..OrderForm::default()
        }
    }

    #[test]
    fn test_empty_form_lists_all_required_fields() {
        let err = OrderForm::default().validate().unwrap_err();
        assert_eq!(err.missing, REQUIRED_FIELDS.to_vec());
    }

    #[test]
    fn test_missing_fields_listed_exactly() {
        let mut form = complete_form();
        form.piece_count = String::new();
        form.order_name = "   ".to_string();

        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, vec!["pieceCount", "orderName"]);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut form = complete_form();
        form.model = "\t \n".to_string();

        assert_eq!(form.missing_required(), vec!["model"]);
    }

    #[test]
    fn test_complete_form_validates() {
        assert!(complete_form().missing_required().is_empty());
        assert!(complete_form().validate().is_ok());
    }

    #[test]
    fn test_optional_fields_never_required() {
        // A form with only the six required fields set is valid.
        let form = complete_form();
        assert!(form.initial.is_empty() && form.stone.is_empty());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_numeric_coercion() {
        let mut form = complete_form();
        form.piece_count = "12".to_string();
        form.length = "3.5".to_string();

        let payload = form.validate().unwrap();
        assert_eq!(payload.piece_count, 12);
        assert!((payload.initial - 0.0).abs() < f64::EPSILON);
        assert!((payload.length - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unparseable_numbers_coerce_to_zero() {
        let mut form = complete_form();
        form.piece_count = "a dozen".to_string();
        form.initial = "n/a".to_string();

        let payload = form.validate().unwrap();
        assert_eq!(payload.piece_count, 0);
        assert!((payload.initial - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prefill_from_order() {
        let order = Order {
            id: OrderId::new(5),
            model: "Chain-B".to_string(),
            piece_count: 2,
            size: "20".to_string(),
            karatage: "10k".to_string(),
            color: "rose".to_string(),
            order_name: "Gift".to_string(),
            initial: 0.0,
            stone: String::new(),
            length: 3.5,
            notes: "rush".to_string(),
        };

        let form = OrderForm::from(&order);
        assert_eq!(form.piece_count, "2");
        assert_eq!(form.initial, "0");
        assert_eq!(form.length, "3.5");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_error_message_lists_names() {
        let err = ValidationError {
            missing: vec!["model", "color"],
        };
        assert_eq!(err.to_string(), "missing required fields: model, color");
    }
}
