//! Fonelli order intake client.
//!
//! The non-visual core of the Fonelli storefront app: session lifecycle,
//! order-form submission, and edit-permission enforcement over the HTTP
//! backend. The UI shell owns screens and navigation; it calls
//! [`SessionManager`] to establish and tear down sessions and
//! [`OrderClient`] for order data.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use fonelli_client::{ClientConfig, Credentials, OrderClient, SessionManager};
//! use fonelli_core::OrderForm;
//!
//! let config = ClientConfig::from_env()?;
//! let sessions = Arc::new(SessionManager::from_config(&config));
//! let orders = OrderClient::new(&config, Arc::clone(&sessions));
//!
//! sessions.login(&Credentials::new("ana@example.com", "secret")).await?;
//!
//! let form = OrderForm { model: "Ring-A".into(), ..OrderForm::default() };
//! let order = orders.create_order(&form).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod orders;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use orders::{OrderClient, OrderError};
pub use session::store::{FileSessionStore, MemorySessionStore, SessionStore, StorageError};
pub use session::{AuthError, Credentials, SessionManager};
