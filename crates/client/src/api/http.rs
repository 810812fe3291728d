//! HTTP plumbing for the EasyGadget API.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::session::{self, SessionStore};

use super::ApiError;

/// Whether an endpoint expects a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Public endpoint; no Authorization header.
    None,
    /// Authenticated endpoint; attach `Authorization: Bearer <token>` when a
    /// token is present. The request is still sent without one - the backend
    /// is the authority on rejecting it.
    Required,
}

/// Low-level client for the EasyGadget REST API.
///
/// Cheap to clone; all clones share one `reqwest` connection pool and one
/// session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest` client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                session,
            }),
        })
    }

    /// The session store this client injects tokens from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx response, or a
    /// malformed response body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ApiError> {
        let request = self.inner.http.get(self.url(path));
        self.send(request, auth).await
    }

    /// GET a JSON resource with query parameters.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: Auth,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.get(self.url(path)).query(query);
        self.send(request, auth).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.post(self.url(path)).json(body);
        self.send(request, auth).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.put(self.url(path)).json(body);
        self.send(request, auth).await
    }

    /// PATCH with no body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn patch<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ApiError> {
        let request = self.inner.http.patch(self.url(path));
        self.send(request, auth).await
    }

    /// DELETE a resource.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T, ApiError> {
        let request = self.inner.http.delete(self.url(path));
        self.send(request, auth).await
    }

    /// POST a multipart form.
    ///
    /// No explicit content type: `reqwest` sets the multipart boundary. The
    /// bearer token is attached when one is present, mirroring the JSON path.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.post(self.url(path)).multipart(form);
        self.send(request, Auth::Required).await
    }

    /// PUT a multipart form (product updates).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get`].
    pub async fn upload_put<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.put(self.url(path)).multipart(form);
        self.send(request, Auth::Required).await
    }

    /// Attach auth, send, and shape the response. One attempt per call.
    async fn send<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
        auth: Auth,
    ) -> Result<T, ApiError> {
        if auth == Auth::Required
            && let Some(token) = self.inner.session.token()
        {
            request = request.header(reqwest::header::AUTHORIZATION, session::bearer_value(&token));
        }

        let response = request.send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_message(&body);
            debug!(status = %status, message = %message, "API returned non-success status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Pull the server's `message` field out of an error body, falling back to a
/// generic message when the body is not the expected JSON shape.
fn extract_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| "Request failed".to_string(), |e| e.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_json_body() {
        assert_eq!(
            extract_message("{\"message\":\"Invalid credentials\"}"),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_extract_message_fallback_on_non_json() {
        assert_eq!(extract_message("<html>502 Bad Gateway</html>"), "Request failed");
        assert_eq!(extract_message(""), "Request failed");
    }

    #[test]
    fn test_extract_message_fallback_on_missing_field() {
        assert_eq!(extract_message("{\"error\":\"nope\"}"), "Request failed");
    }
}
