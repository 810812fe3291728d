//! The top-level client handle.

use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::services::{
    AdminService, AuthService, CartService, NotificationService, OrderService, ProductService,
    SettingsService, UploadService,
};
use crate::session::SessionStore;
use crate::types::User;

/// A handle to the EasyGadget backend.
///
/// Owns the HTTP client, the session store, and one service per resource
/// group. Cheap to clone; clones share the session, the cart state, and the
/// catalog cache. Constructing a client restores any persisted session, so
/// a prior login survives process restarts.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    session: SessionStore,
    auth: AuthService,
    products: ProductService,
    cart: CartStore,
    orders: OrderService,
    notifications: NotificationService,
    settings: SettingsService,
    uploads: UploadService,
    admin: AdminService,
}

impl Client {
    /// Build a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let session = SessionStore::open(&config.session_file);
        let api = ApiClient::new(&config, session.clone())?;
        debug!(base_url = %config.base_url, "client initialized");

        Ok(Self {
            inner: Arc::new(ClientInner {
                auth: AuthService::new(api.clone()),
                products: ProductService::new(api.clone()),
                cart: CartStore::new(CartService::new(api.clone()), session.clone()),
                orders: OrderService::new(api.clone()),
                notifications: NotificationService::new(api.clone()),
                settings: SettingsService::new(api.clone()),
                uploads: UploadService::new(api.clone()),
                admin: AdminService::new(api),
                config,
                session,
            }),
        })
    }

    /// Build a client from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when the environment is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The persisted session (token + cached user).
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Authentication and session lifecycle.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Catalog reads and admin catalog mutations.
    #[must_use]
    pub fn products(&self) -> &ProductService {
        &self.inner.products
    }

    /// The server-reconciled cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Orders and payment verification.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// User notifications.
    #[must_use]
    pub fn notifications(&self) -> &NotificationService {
        &self.inner.notifications
    }

    /// Account settings.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }

    /// Media uploads.
    #[must_use]
    pub fn uploads(&self) -> &UploadService {
        &self.inner.uploads
    }

    /// Admin panel endpoints.
    #[must_use]
    pub fn admin(&self) -> &AdminService {
        &self.inner.admin
    }

    /// The cached user from the last auth response, if logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.session.current_user()
    }
}
