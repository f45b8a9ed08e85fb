//! Axum framework integration for Lamina.
//!
//! This crate wires the Lamina JSON:API toolkit into the
//! [Axum](https://github.com/tokio-rs/axum) web framework.
//!
//! # Features
//!
//! - **Layer**: attach a shared schema [`Registry`] to every request
//! - **Extractors**: pull the registry, query multimap, and request URL
//!   out of handlers without manual plumbing
//! - **Responses**: render compound and error documents with the
//!   `application/vnd.api+json` media type
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use lamina_axum::{JsonApi, LaminaLayer, QueryMultimap, SchemaRegistry};
//! use lamina_document::serialize_one;
//! use lamina_schema::IncludeConfig;
//!
//! async fn show_account(
//!     SchemaRegistry(registry): SchemaRegistry,
//!     query: QueryMultimap,
//! ) -> JsonApi<lamina_document::CompoundDocument> {
//!     let account = fetch_account().await;
//!     let include = query.include_request(&IncludeConfig::whitelist(["owner"]));
//!     let doc = serialize_one(&registry, "account", &account, include.resolved()).unwrap();
//!     JsonApi(doc)
//! }
//!
//! let app: Router = Router::new()
//!     .route("/accounts/{id}", get(show_account))
//!     .layer(LaminaLayer::new(registry));
//! ```

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    extract::FromRequestParts,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tower::{Layer, Service};
use tracing::{debug, info};

use lamina_document::ErrorDocument;
use lamina_query::{IncludeRequest, PageRequest};
use lamina_schema::{IncludeConfig, PageConfig, Registry};

/// The JSON:API media type.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Errors that can occur during Lamina-Axum integration.
#[derive(Error, Debug)]
pub enum LaminaAxumError {
    /// No schema registry was attached to the request.
    #[error("schema registry missing from request extensions; add LaminaLayer to the router")]
    MissingRegistry,

    /// A document failed to serialize to JSON.
    #[error("document serialization failed: {0}")]
    Serialization(String),
}

impl IntoResponse for LaminaAxumError {
    fn into_response(self) -> Response {
        let status = match &self {
            LaminaAxumError::MissingRegistry => StatusCode::INTERNAL_SERVER_ERROR,
            LaminaAxumError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Result type for Lamina-Axum operations.
pub type Result<T> = std::result::Result<T, LaminaAxumError>;

/// Tower layer that attaches a shared schema registry to every request.
///
/// # Example
///
/// ```rust,ignore
/// use axum::Router;
/// use lamina_axum::LaminaLayer;
///
/// let app = Router::new().layer(LaminaLayer::new(registry));
/// ```
#[derive(Clone)]
pub struct LaminaLayer {
    registry: Arc<Registry>,
}

impl LaminaLayer {
    /// Create a layer around a built registry.
    pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
        let registry = registry.into();
        info!(types = registry.len(), "LaminaLayer created");
        Self { registry }
    }

    /// Get the underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl<S> Layer<S> for LaminaLayer {
    type Service = LaminaMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LaminaMiddleware {
            inner,
            registry: self.registry.clone(),
        }
    }
}

/// Tower middleware service for Lamina.
#[derive(Clone)]
pub struct LaminaMiddleware<S> {
    inner: S,
    registry: Arc<Registry>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for LaminaMiddleware<S>
where
    S: Service<Request<ReqBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        debug!("LaminaMiddleware attaching schema registry");
        request.extensions_mut().insert(self.registry.clone());
        self.inner.call(request)
    }
}

/// Extractor for the schema registry attached by [`LaminaLayer`].
#[derive(Debug, Clone)]
pub struct SchemaRegistry(pub Arc<Registry>);

impl<S> FromRequestParts<S> for SchemaRegistry
where
    S: Send + Sync,
{
    type Rejection = LaminaAxumError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<Registry>>()
            .cloned()
            .map(SchemaRegistry)
            .ok_or(LaminaAxumError::MissingRegistry)
    }
}

/// Extractor for the request's query parameters as an ordered multimap.
///
/// Repeated keys are preserved, which is what include resolution and page
/// parsing expect.
#[derive(Debug, Clone, Default)]
pub struct QueryMultimap(pub Vec<(String, String)>);

impl QueryMultimap {
    /// Borrow the parameters as `(&str, &str)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + Clone {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve the include request against a type's include configuration.
    pub fn include_request(&self, config: &IncludeConfig) -> IncludeRequest {
        IncludeRequest::from_params(self.pairs(), config)
    }

    /// Parse the page request against a type's pagination configuration.
    pub fn page_request(&self, config: &PageConfig) -> PageRequest {
        PageRequest::from_params(self.pairs(), config)
    }
}

impl<S> FromRequestParts<S> for QueryMultimap
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let pairs = parts
            .uri
            .query()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(QueryMultimap(pairs))
    }
}

/// Extractor for the current request URL, for pagination link building.
///
/// The scheme and host come from the request target when absolute, and
/// fall back to the `Host` header otherwise.
#[derive(Debug, Clone)]
pub struct RequestUrl(pub String);

impl<S> FromRequestParts<S> for RequestUrl
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if parts.uri.scheme().is_some() {
            return Ok(RequestUrl(parts.uri.to_string()));
        }

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        Ok(RequestUrl(format!("http://{host}{path_and_query}")))
    }
}

/// Response wrapper rendering any serializable document as JSON:API.
///
/// Responds with `200 OK` and the `application/vnd.api+json` media type.
#[derive(Debug, Clone)]
pub struct JsonApi<T>(pub T);

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, MEDIA_TYPE)],
                body,
            )
                .into_response(),
            Err(e) => LaminaAxumError::Serialization(e.to_string()).into_response(),
        }
    }
}

/// Response wrapper for validation-error documents.
///
/// Responds with `422 Unprocessable Entity` and the JSON:API media type.
#[derive(Debug, Clone)]
pub struct JsonApiErrors(pub ErrorDocument);

impl IntoResponse for JsonApiErrors {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                [(header::CONTENT_TYPE, MEDIA_TYPE)],
                body,
            )
                .into_response(),
            Err(e) => LaminaAxumError::Serialization(e.to_string()).into_response(),
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        JsonApi,
        JsonApiErrors,
        LaminaAxumError,
        LaminaLayer,
        LaminaMiddleware,
        QueryMultimap,
        RequestUrl,
        Result,
        SchemaRegistry,
    };
    pub use lamina_document::prelude::*;
    pub use lamina_query::prelude::*;
}
