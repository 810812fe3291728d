//! Server-reconciled cart state.
//!
//! The server cart is the source of truth. Every successful mutation is
//! followed by a full refetch, and only that refetch ever replaces the local
//! lines, so the store always reflects a cart state the server actually held
//! (stock clamping, expired lines, and price changes included). A failed
//! mutation leaves the lines exactly as the last successful fetch produced
//! them.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument, warn};

use easy_gadget_core::{CartLineId, Price, ProductId};

use crate::api::ApiError;
use crate::services::CartService;
use crate::session::SessionStore;
use crate::types::{Cart, CartItem};

/// Local mirror of the server cart.
///
/// Cheap to clone; clones share state. All reads are snapshots taken at call
/// time, no lock is held across a network round trip.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    service: CartService,
    session: SessionStore,
    items: RwLock<Vec<CartItem>>,
}

impl CartStore {
    pub(crate) fn new(service: CartService, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                service,
                session,
                items: RwLock::new(Vec::new()),
            }),
        }
    }

    fn read_items(&self) -> RwLockReadGuard<'_, Vec<CartItem>> {
        self.inner.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_items(&self) -> RwLockWriteGuard<'_, Vec<CartItem>> {
        self.inner.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the cart lines as of the last successful fetch.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.read_items().clone()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.read_items().iter().map(|item| item.quantity).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.read_items().iter().map(CartItem::line_total).sum()
    }

    /// Snapshot of the whole cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        Cart { items: self.items() }
    }

    fn replace(&self, cart: Cart) {
        *self.write_items() = cart.items;
    }

    /// Refetch the server cart and replace the local lines with it.
    ///
    /// Without a session this resets to empty and succeeds. A failed fetch
    /// also resets to empty, so no stale lines outlive a broken session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the server rejects the fetch.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ApiError> {
        if !self.inner.session.is_authenticated() {
            self.replace(Cart::default());
            return Ok(());
        }
        match self.inner.service.fetch().await {
            Ok(cart) => {
                debug!(lines = cart.items.len(), "cart refreshed");
                self.replace(cart);
                Ok(())
            }
            Err(error) => {
                self.replace(Cart::default());
                Err(error)
            }
        }
    }

    /// Add a product to the cart, then reconcile with the server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRequired`] without touching the network when
    /// no session exists, or [`ApiError::Status`] when the server rejects
    /// the add; local lines are unchanged in the failure cases.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        if !self.inner.session.is_authenticated() {
            return Err(ApiError::AuthRequired);
        }
        self.inner.service.add(product_id, quantity).await?;
        self.refresh().await
    }

    /// Remove a cart line, then reconcile with the server.
    ///
    /// An unknown line ID is a no-op: the line is already gone from the
    /// server's point of view, so there is nothing to mutate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the server rejects the removal.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn remove_from_cart(&self, line_id: &CartLineId) -> Result<(), ApiError> {
        let Some(product_id) = self.product_for_line(line_id) else {
            warn!(%line_id, "remove requested for unknown cart line");
            return Ok(());
        };
        self.inner.service.remove_item(&product_id).await?;
        self.refresh().await
    }

    /// Set a line's quantity, then reconcile with the server. A quantity of
    /// zero removes the line instead.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the server rejects the update.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn update_quantity(
        &self,
        line_id: &CartLineId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        if quantity == 0 {
            return self.remove_from_cart(line_id).await;
        }
        let Some(product_id) = self.product_for_line(line_id) else {
            warn!(%line_id, "update requested for unknown cart line");
            return Ok(());
        };
        self.inner.service.update_item(&product_id, quantity).await?;
        self.refresh().await
    }

    /// Empty the cart in one atomic server operation, then reconcile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the server rejects the clear; local
    /// lines are unchanged on failure.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.inner.service.clear().await?;
        self.refresh().await
    }

    /// The server addresses cart mutations by product ID, so line IDs are
    /// resolved against the local snapshot.
    fn product_for_line(&self, line_id: &CartLineId) -> Option<ProductId> {
        self.read_items()
            .iter()
            .find(|item| &item.line_id == line_id)
            .map(|item| item.product_id.clone())
    }
}
