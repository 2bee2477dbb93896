//! Order data model.
//!
//! An order is a customer's jewelry production request. The backend assigns
//! the ID on creation and owns it from then on; this core only creates and
//! updates the remaining fields.

use serde::{Deserialize, Serialize};

use crate::types::id::OrderId;

/// An order as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend-assigned identifier, immutable.
    pub id: OrderId,
    /// Jewelry model reference.
    pub model: String,
    /// Number of pieces to produce.
    pub piece_count: u32,
    /// Ring/chain size.
    pub size: String,
    /// Gold karatage (e.g. "14k").
    pub karatage: String,
    /// Metal color.
    pub color: String,
    /// Customer-facing order name.
    pub order_name: String,
    /// Engraved initial measurement; 0 when not requested.
    #[serde(default)]
    pub initial: f64,
    /// Stone description, if any.
    #[serde(default)]
    pub stone: String,
    /// Length in centimeters; 0 when not applicable.
    #[serde(default)]
    pub length: f64,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// The coerced field set sent to the backend on create and update.
///
/// Produced only by [`OrderForm::validate`](crate::OrderForm::validate), so a
/// payload always carries the full required field set with numeric fields
/// already coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub model: String,
    pub piece_count: u32,
    pub size: String,
    pub karatage: String,
    pub color: String,
    pub initial: f64,
    pub order_name: String,
    pub stone: String,
    pub length: f64,
    pub notes: String,
}
