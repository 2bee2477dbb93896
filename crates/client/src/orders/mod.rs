//! Order API client.
//!
//! The façade over the backend's order endpoints. It consults the form
//! validator before any write and the backend's edit-eligibility oracle
//! before permitting an update, and it translates backend responses into
//! the client's error types.
//!
//! Every mutating call is attempted at most once per user action; retrying
//! is the caller's decision, because a blind retry of a create risks a
//! duplicate order.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use fonelli_core::{Editability, Order, OrderForm, OrderId, User, ValidationError};

use crate::config::ClientConfig;
use crate::session::SessionManager;
use crate::session::store::StorageError;

/// Errors from order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Required fields missing; resolved locally, before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The order is locked; the caller should leave the edit flow.
    #[error("order can no longer be edited")]
    PermissionDenied,

    /// The session token was rejected. The session has been cleared; the
    /// user must log in again.
    #[error("session is no longer valid")]
    Unauthorized,

    /// No such order on the backend; the caller holds a stale reference.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The backend's own validation rejected the submitted fields.
    #[error("order rejected by server: {0}")]
    Rejected(String),

    /// Network or timeout failure; the caller may retry.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local session persistence fault.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// A write for the same submission is already in flight.
    #[error("a write for this order is already in flight")]
    WriteInFlight,

    /// Any other non-success response.
    #[error("unexpected response status {0}")]
    Api(StatusCode),
}

/// One logical submission, for the in-flight write guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PendingWrite {
    NewOrder,
    Order(OrderId),
}

/// Client for the order intake backend.
///
/// Cheap to clone; clones share the HTTP connection pool, the session
/// manager, and the in-flight write guard.
#[derive(Clone)]
pub struct OrderClient {
    inner: Arc<OrderClientInner>,
}

struct OrderClientInner {
    http: reqwest::Client,
    base: String,
    sessions: Arc<SessionManager>,
    pending: Mutex<HashSet<PendingWrite>>,
}

impl OrderClient {
    /// Create a client sharing the given session manager.
    #[must_use]
    pub fn new(config: &ClientConfig, sessions: Arc<SessionManager>) -> Self {
        Self {
            inner: Arc::new(OrderClientInner {
                http: reqwest::Client::new(),
                base: config.endpoint_base(),
                sessions,
                pending: Mutex::new(HashSet::new()),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session plumbing
    // ─────────────────────────────────────────────────────────────────────

    fn token(&self) -> Result<Option<String>, OrderError> {
        Ok(self.inner.sessions.token()?)
    }

    /// Token presence is the sole authorization gate: with no active
    /// session, no request is issued at all.
    fn require_token(&self) -> Result<String, OrderError> {
        self.token()?.ok_or(OrderError::Unauthorized)
    }

    /// Clear the session after the backend rejected the token, so the user
    /// is not left "logged in" while every call fails.
    fn force_logout(&self) -> Result<(), OrderError> {
        tracing::warn!("session token rejected by backend, clearing session");
        self.inner.sessions.logout()?;
        Ok(())
    }

    /// Translate a response into a typed result.
    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        order: Option<OrderId>,
    ) -> Result<T, OrderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.force_logout()?;
            return Err(OrderError::Unauthorized);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(OrderError::PermissionDenied);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(order.map_or(OrderError::Api(status), OrderError::NotFound));
        }
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let message = response.text().await.unwrap_or_default();
            return Err(OrderError::Rejected(message));
        }

        Err(OrderError::Api(status))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read operations
    // ─────────────────────────────────────────────────────────────────────

    /// The logged-in user's profile, or `None` when no session is active.
    ///
    /// With no session this returns without touching the network, so the
    /// profile header can render its logged-out state cheaply.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` (after clearing the session) if the backend
    /// rejects the token, or `Transport` on network failure.
    pub async fn current_user(&self) -> Result<Option<User>, OrderError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };

        let response = self
            .inner
            .http
            .get(format!("{}/users/me", self.inner.base))
            .bearer_auth(&token)
            .send()
            .await?;

        let user = self.read_json(response, None).await?;
        Ok(Some(user))
    }

    /// Fetch one order by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the backend reports no such order and
    /// `Unauthorized` if the session token is rejected.
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        let token = self.require_token()?;
        tracing::debug!(%id, "fetching order");

        let response = self
            .inner
            .http
            .get(format!("{}/orders/{id}", self.inner.base))
            .bearer_auth(&token)
            .send()
            .await?;

        self.read_json(response, Some(id)).await
    }

    /// Ask the backend whether the order is still editable.
    ///
    /// The answer is authoritative per edit attempt and never cached:
    /// eligibility can change between screen load and submit. When the
    /// check itself fails the caller must treat permission as denied, not
    /// granted.
    ///
    /// # Errors
    ///
    /// Returns `Transport` when the check could not be completed; the
    /// caller is informed rather than silently granted permission.
    pub async fn can_edit_order(&self, id: OrderId) -> Result<bool, OrderError> {
        let token = self.require_token()?;

        let response = self
            .inner
            .http
            .get(format!("{}/orders/{id}/editable", self.inner.base))
            .bearer_auth(&token)
            .send()
            .await?;

        let editable: bool = self.read_json(response, Some(id)).await?;
        Ok(Editability::from_flag(editable).can_edit())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Write operations
    // ─────────────────────────────────────────────────────────────────────

    /// Update an order from a filled-in edit form.
    ///
    /// Validates and coerces the form locally, then re-checks edit
    /// eligibility before the write goes out: a locked order fails fast
    /// with `PermissionDenied` and no field mutation is sent.
    ///
    /// # Errors
    ///
    /// Returns `Validation` before any network call when required fields
    /// are missing, `PermissionDenied` when the order is locked (or the
    /// backend answers 403), `Rejected` when server-side validation turns
    /// the fields down, `NotFound`/`Unauthorized`/`Transport` as usual, and
    /// `WriteInFlight` when an update for the same order is already
    /// pending.
    pub async fn update_order(&self, id: OrderId, form: &OrderForm) -> Result<Order, OrderError> {
        let payload = form.validate()?;
        let token = self.require_token()?;

        // Eligibility is re-checked at submit time; a failed check means no
        // write is issued.
        if !self.can_edit_order(id).await? {
            tracing::warn!(%id, "edit denied, order is locked");
            return Err(OrderError::PermissionDenied);
        }

        let _guard = self.begin_write(PendingWrite::Order(id))?;
        tracing::debug!(%id, "updating order");

        let response = self
            .inner
            .http
            .put(format!("{}/orders/{id}", self.inner.base))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;

        self.read_json(response, Some(id)).await
    }

    /// Create an order from a filled-in form.
    ///
    /// Creation needs no eligibility check: it is always allowed for an
    /// authenticated session.
    ///
    /// # Errors
    ///
    /// Returns `Validation` before any network call when required fields
    /// are missing, `WriteInFlight` when a create is already pending, and
    /// `Rejected`/`Unauthorized`/`Transport` per the backend's answer.
    pub async fn create_order(&self, form: &OrderForm) -> Result<Order, OrderError> {
        let payload = form.validate()?;
        let token = self.require_token()?;

        let _guard = self.begin_write(PendingWrite::NewOrder)?;
        tracing::debug!(order_name = %payload.order_name, "creating order");

        let response = self
            .inner
            .http
            .post(format!("{}/orders", self.inner.base))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;

        self.read_json(response, None).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // In-flight write guard
    // ─────────────────────────────────────────────────────────────────────

    /// Register a pending write, rejecting a second concurrent write for
    /// the same submission. The UI disables the submit affordance while a
    /// write is pending, but that guard is advisory; this one is not.
    fn begin_write(&self, key: PendingWrite) -> Result<WriteGuard<'_>, OrderError> {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !pending.insert(key) {
            return Err(OrderError::WriteInFlight);
        }
        drop(pending);

        Ok(WriteGuard {
            pending: &self.inner.pending,
            key,
        })
    }
}

/// Releases the pending-write slot when the submission resolves, fails, or
/// is abandoned by the caller.
struct WriteGuard<'a> {
    pending: &'a Mutex<HashSet<PendingWrite>>,
    key: PendingWrite,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
