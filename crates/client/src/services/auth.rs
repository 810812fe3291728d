//! Authentication endpoints and session lifecycle.

use serde::Serialize;
use tracing::{info, instrument, warn};

use easy_gadget_core::Email;

use crate::api::conversions::convert_user;
use crate::api::wire::{WireAuthResponse, WireMessage};
use crate::api::{ApiClient, ApiError, Auth};
use crate::types::{Registration, User};

/// Login, registration, and password-reset flows.
///
/// Any endpoint that returns a token + user pair persists the session before
/// returning, so a later process restart picks the login back up.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    password: &'a str,
}

impl AuthService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in with email and password.
    ///
    /// On success the returned token and user are persisted to the session
    /// store, and every subsequent authenticated request carries the token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the server's own message on invalid
    /// credentials, or [`ApiError::Session`] if the session cannot be saved.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<User, ApiError> {
        let response: WireAuthResponse = self
            .api
            .post(
                "/auth/login",
                &LoginRequest {
                    email: email.as_str(),
                    password,
                },
                Auth::None,
            )
            .await?;

        let user = convert_user(response.user);
        self.api.session().save(&response.token, &user)?;
        info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    /// Complete an OTP challenge. Persists the session like [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a rejected or expired code.
    #[instrument(skip(self, otp), fields(email = %email))]
    pub async fn verify_otp(&self, email: &Email, otp: &str) -> Result<User, ApiError> {
        let response: WireAuthResponse = self
            .api
            .post(
                "/auth/verify-otp",
                &OtpRequest {
                    email: email.as_str(),
                    otp,
                },
                Auth::None,
            )
            .await?;

        let user = convert_user(response.user);
        self.api.session().save(&response.token, &user)?;
        info!(user_id = %user.id, "logged in via otp");
        Ok(user)
    }

    /// Create an account. Does not log in; the server may require a
    /// follow-up OTP verification first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the email is already taken or the
    /// payload is rejected.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<String, ApiError> {
        let response: WireMessage = self
            .api
            .post("/auth/register", registration, Auth::None)
            .await?;
        Ok(response.message)
    }

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the server rejects the request.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn forgot_password(&self, email: &Email) -> Result<String, ApiError> {
        let response: WireMessage = self
            .api
            .post(
                "/auth/forgot-password",
                &ForgotPasswordRequest {
                    email: email.as_str(),
                },
                Auth::None,
            )
            .await?;
        Ok(response.message)
    }

    /// Set a new password using a reset token from the email flow.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on an invalid or expired reset token.
    #[instrument(skip(self, token, password))]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<String, ApiError> {
        let response: WireMessage = self
            .api
            .post(
                &format!("/auth/reset-password/{token}"),
                &ResetPasswordRequest { password },
                Auth::None,
            )
            .await?;
        Ok(response.message)
    }

    /// Log out.
    ///
    /// The server call is best-effort: the local session is cleared whether
    /// or not the server acknowledges, so logout always succeeds locally.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if self.api.session().is_authenticated() {
            let result: Result<serde_json::Value, ApiError> = self
                .api
                .post("/auth/logout", &serde_json::json!({}), Auth::Required)
                .await;
            if let Err(error) = result {
                warn!(%error, "server logout failed, clearing local session anyway");
            }
        }
        self.api.session().clear();
        info!("logged out");
    }

    /// The cached user from the last auth response, if logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.api.session().current_user()
    }

    /// Whether a session token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }
}
