//! Order and payment endpoints.

use serde::Serialize;
use tracing::instrument;

use easy_gadget_core::{OrderId, OrderStatus};

use crate::api::conversions::convert_order;
use crate::api::wire::WireOrder;
use crate::api::{ApiClient, ApiError, Auth};
use crate::types::{CreateOrder, Order, PaymentVerification};

/// Typed wrapper over the `/orders` and `/payments` endpoints.
#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

#[derive(Serialize)]
struct StatusUpdateRequest {
    status: OrderStatus,
}

#[derive(Serialize)]
struct VerifyPaymentRequest<'a> {
    reference: &'a str,
}

impl OrderService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the order payload is rejected.
    #[instrument(skip(self, order))]
    pub async fn create(&self, order: &CreateOrder) -> Result<Order, ApiError> {
        let created: WireOrder = self.api.post("/orders", order, Auth::Required).await?;
        Ok(convert_order(created))
    }

    /// Orders belonging to the current user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let orders: Vec<WireOrder> = self.api.get("/orders/my-orders", Auth::Required).await?;
        Ok(orders.into_iter().map(convert_order).collect())
    }

    /// All orders, optionally filtered by status (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401/403 for non-admin callers.
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        let query: Vec<(&str, String)> = status
            .map(|status| ("status", status.to_string()))
            .into_iter()
            .collect();
        let orders: Vec<WireOrder> = self
            .api
            .get_with_query("/orders", &query, Auth::Required)
            .await?;
        Ok(orders.into_iter().map(convert_order).collect())
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown order.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        let order: WireOrder = self
            .api
            .get(&format!("/orders/{id}"), Auth::Required)
            .await?;
        Ok(convert_order(order))
    }

    /// Move an order to a new lifecycle status (admin).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the transition is rejected.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let order: WireOrder = self
            .api
            .put(
                &format!("/orders/{id}/status"),
                &StatusUpdateRequest { status },
                Auth::Required,
            )
            .await?;
        Ok(convert_order(order))
    }

    /// Verify a checkout payment reference with the payment provider.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for an unknown or failed reference.
    #[instrument(skip(self))]
    pub async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, ApiError> {
        self.api
            .post(
                "/payments/verify",
                &VerifyPaymentRequest { reference },
                Auth::Required,
            )
            .await
    }
}
