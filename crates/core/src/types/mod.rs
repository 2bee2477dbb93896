//! Core types for Fonelli.
//!
//! This module provides type-safe wrappers for the order intake domain.

pub mod editability;
pub mod form;
pub mod id;
pub mod order;
pub mod session;
pub mod user;

pub use editability::Editability;
pub use form::{OrderForm, REQUIRED_FIELDS, ValidationError};
pub use id::*;
pub use order::{Order, OrderPayload};
pub use session::{Session, keys};
pub use user::User;
