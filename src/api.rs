use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    dto::cart::{CartItemRequest, CartSummaryResponse, PayResponse, QuantityUpdateRequest},
    error::{CartError, CartResult},
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The four cart calls the page issues.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `POST /api/cart`
    async fn add_item(&self, item: &CartItemRequest) -> CartResult<CartSummaryResponse>;

    /// `PUT /api/cart/{product_id}`
    async fn update_quantity(
        &self,
        product_id: &str,
        body: &QuantityUpdateRequest,
    ) -> CartResult<CartSummaryResponse>;

    /// `DELETE /api/cart/{product_id}`
    async fn remove_item(&self, product_id: &str) -> CartResult<CartSummaryResponse>;

    /// `GET /api/pay`. The JSON body is decoded whatever the HTTP status.
    async fn pay(&self) -> CartResult<PayResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpCartApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCartApi {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`; the `/api/...` paths are appended.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> CartResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CartError::Config(err.to_string()))?;
        Ok(Self::with_client(&config.base_url, client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        tracing::trace!(request_id = %request_id, method = %method, url = %url, "cart request");
        let builder = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        (builder, request_id)
    }
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn add_item(&self, item: &CartItemRequest) -> CartResult<CartSummaryResponse> {
        let (request, request_id) = self.request(Method::POST, "/api/cart");
        let response = request.json(item).send().await?;
        handle_response(response, &request_id).await
    }

    async fn update_quantity(
        &self,
        product_id: &str,
        body: &QuantityUpdateRequest,
    ) -> CartResult<CartSummaryResponse> {
        let (request, request_id) =
            self.request(Method::PUT, &format!("/api/cart/{product_id}"));
        let response = request.json(body).send().await?;
        handle_response(response, &request_id).await
    }

    async fn remove_item(&self, product_id: &str) -> CartResult<CartSummaryResponse> {
        let (request, request_id) =
            self.request(Method::DELETE, &format!("/api/cart/{product_id}"));
        let response = request.send().await?;
        handle_response(response, &request_id).await
    }

    async fn pay(&self) -> CartResult<PayResponse> {
        let (request, request_id) = self.request(Method::GET, "/api/pay");
        let response = request.send().await?;
        decode_body(response, &request_id).await
    }
}

/// Decodes a 2xx JSON body, turning any other status into [`CartError::Status`].
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    request_id: &str,
) -> CartResult<T> {
    let status = response.status();
    let body = response.text().await?;

    tracing::trace!(request_id = %request_id, status = %status, "cart response");

    if !status.is_success() {
        return Err(CartError::Status { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Decodes the JSON body without looking at the HTTP status.
pub(crate) async fn decode_body<T: DeserializeOwned>(
    response: reqwest::Response,
    request_id: &str,
) -> CartResult<T> {
    let status = response.status();
    let body = response.text().await?;

    tracing::trace!(request_id = %request_id, status = %status, "cart response");

    Ok(serde_json::from_str(&body)?)
}
