//! Fonelli Core - Shared types library.
//!
//! This crate provides the common types used across the Fonelli order intake
//! components:
//! - `client` - Session lifecycle and order API access
//! - the UI shell that embeds them
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the order/user/session data model, and the
//!   order-form validator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
