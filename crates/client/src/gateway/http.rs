//! HTTP client for the storefront REST API.

use std::sync::Arc;

use async_trait::async_trait;
use bookstore_core::api::{
    BookResponse, BooksResponse, CategoriesResponse, ErrorBody, ErrorCode, LoginRequest,
    LoginResponse, MessageResponse, OrderResponse, RegisterRequest, UserMessage, UserResponse,
};
use bookstore_core::{Book, BookId, CatalogQuery, Identity, OrderId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::{AuthGateway, Authenticated};
use crate::error::{AuthError, ClientError};
use crate::session::Marker;

/// Client for a running storefront.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    base: Url,
}

impl StorefrontClient {
    /// Create a client for the storefront at `base`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                base,
            }),
        }
    }

    /// The storefront this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// List the catalog, filtered and sorted server-side.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn books(&self, query: &CatalogQuery) -> Result<Vec<Book>, ClientError> {
        let mut url = self.url("api/books")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = query.search.as_deref().filter(|q| !q.is_empty()) {
                pairs.append_pair("q", q);
            }
            if let Some(category) = query.category.as_deref() {
                pairs.append_pair("category", category);
            }
            pairs.append_pair("sort", query.sort.as_str());
        }

        let response = self.inner.client.get(url).send().await?;
        let body: BooksResponse = Self::parse(response).await?;
        Ok(body.books)
    }

    /// Fetch one book.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the book does not exist.
    #[instrument(skip(self))]
    pub async fn book(&self, id: BookId) -> Result<Book, ClientError> {
        let url = self.url(&format!("api/books/{id}"))?;
        let response = self.inner.client.get(url).send().await?;
        let body: BookResponse = Self::parse(response).await?;
        Ok(body.book)
    }

    /// Category names for the filter control, `All` first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        let url = self.url("api/books/categories")?;
        let response = self.inner.client.get(url).send().await?;
        let body: CategoriesResponse = Self::parse(response).await?;
        Ok(body.categories)
    }

    /// Fetch an order and its tracking progress.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the order does not exist and
    /// `AuthError::SessionRequired` if the storefront wants a marker.
    #[instrument(skip(self, marker))]
    pub async fn order(&self, id: OrderId, marker: &Marker) -> Result<OrderResponse, ClientError> {
        let url = self.url(&format!("api/orders/{id}"))?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(marker.expose())
            .send()
            .await?;
        Self::parse(response).await
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.inner
            .base
            .join(path)
            .map_err(|e| ClientError::Validation(format!("invalid storefront url: {e}")))
    }

    /// Decode a success body, or convert the error body into a
    /// [`ClientError`].
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorBody>(&text).unwrap_or_else(|_| ErrorBody {
            message: text.chars().take(200).collect(),
            code: None,
        });
        tracing::debug!(status = %status, code = ?body.code, "storefront returned an error");

        Err(Self::classify(status, body))
    }

    fn classify(status: StatusCode, body: ErrorBody) -> ClientError {
        match (status, body.code) {
            (_, Some(ErrorCode::InvalidCredentials)) => AuthError::InvalidCredentials.into(),
            (_, Some(ErrorCode::EmailTaken)) => AuthError::EmailTaken.into(),
            (_, Some(ErrorCode::MissingFields)) => AuthError::MissingFields.into(),
            (StatusCode::UNAUTHORIZED, Some(ErrorCode::AuthenticationRequired) | None) => {
                AuthError::SessionRequired.into()
            }
            (StatusCode::NOT_FOUND, _) => ClientError::NotFound(body.message),
            (StatusCode::BAD_REQUEST, _) => ClientError::Validation(body.message),
            _ => ClientError::Unexpected {
                status: status.as_u16(),
                message: body.message,
            },
        }
    }
}

#[async_trait]
impl AuthGateway for StorefrontClient {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<Authenticated, ClientError> {
        let url = self.url("api/auth/login")?;
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response = self.inner.client.post(url).json(&request).send().await?;
        let body: LoginResponse = Self::parse(response).await?;

        Ok(Authenticated {
            identity: body.user,
            marker: Marker::new(body.token),
        })
    }

    #[instrument(skip(self, password))]
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError> {
        let url = self.url("api/auth/register")?;
        let request = RegisterRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let response = self.inner.client.post(url).json(&request).send().await?;
        let body: UserMessage = Self::parse(response).await?;
        Ok(body.user)
    }

    #[instrument(skip_all)]
    async fn logout(&self, marker: Option<&Marker>) -> Result<(), ClientError> {
        let url = self.url("api/auth/logout")?;
        let mut request = self.inner.client.post(url);
        if let Some(marker) = marker.filter(|m| !m.is_empty()) {
            request = request.bearer_auth(marker.expose());
        }
        let _: MessageResponse = Self::parse(request.send().await?).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn current_user(&self, marker: &Marker) -> Result<Identity, ClientError> {
        if marker.is_empty() {
            return Err(AuthError::SessionRequired.into());
        }
        let url = self.url("api/auth/user")?;
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(marker.expose())
            .send()
            .await?;
        let body: UserResponse = Self::parse(response).await?;
        Ok(body.user)
    }
}
