//! Raw cart endpoints.
//!
//! The server owns the cart. These calls return whatever cart document the
//! server sends back, but [`crate::cart::CartStore`] discards those bodies
//! and refetches the full cart after every mutation; the fetch is the only
//! response that ever becomes local state.

use serde::Serialize;
use tracing::instrument;

use easy_gadget_core::ProductId;

use crate::api::conversions::convert_cart;
use crate::api::wire::{WireCart, WireMessage};
use crate::api::{ApiClient, ApiError, Auth};
use crate::types::Cart;

/// Typed wrapper over the `/cart` endpoints.
#[derive(Clone)]
pub struct CartService {
    api: ApiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest<'a> {
    product_id: &'a str,
    quantity: u32,
}

#[derive(Serialize)]
struct UpdateItemRequest {
    quantity: u32,
}

impl CartService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the full server cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when no valid token is attached.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Cart, ApiError> {
        let cart: WireCart = self.api.get("/cart", Auth::Required).await?;
        Ok(convert_cart(cart))
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the product is unknown or out of stock.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: &ProductId, quantity: u32) -> Result<Cart, ApiError> {
        let cart: WireCart = self
            .api
            .post(
                "/cart",
                &AddItemRequest {
                    product_id: product_id.as_str(),
                    quantity,
                },
                Auth::Required,
            )
            .await?;
        Ok(convert_cart(cart))
    }

    /// Set the quantity of a cart line, addressed by its product ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the product is not in the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let cart: WireCart = self
            .api
            .put(
                &format!("/cart/item/{product_id}"),
                &UpdateItemRequest { quantity },
                Auth::Required,
            )
            .await?;
        Ok(convert_cart(cart))
    }

    /// Remove a cart line, addressed by its product ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the product is not in the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_item(&self, product_id: &ProductId) -> Result<Cart, ApiError> {
        let cart: WireCart = self
            .api
            .delete(&format!("/cart/item/{product_id}"), Auth::Required)
            .await?;
        Ok(convert_cart(cart))
    }

    /// Empty the cart in one server-side operation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the server rejects the request; the
    /// cart is then untouched, never partially cleared.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        let _: WireMessage = self.api.delete("/cart", Auth::Required).await?;
        Ok(())
    }
}
