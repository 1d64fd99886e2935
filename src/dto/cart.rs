use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemRequest {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Body of `PUT /api/cart/{product_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdateRequest {
    pub quantity: i64,
}

/// Aggregate totals returned by every mutating cart call.
///
/// The add endpoint is only read for `total_quantity`, so a missing amount decodes as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartSummaryResponse {
    pub total_quantity: i64,
    #[serde(default)]
    pub total_amount: f64,
}

/// Body of `GET /api/pay`. Success is signalled in-band by `status == 200`;
/// a missing or non-numeric status is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayResponse {
    #[serde(default)]
    pub status: Option<Value>,
}

impl PayResponse {
    pub const OK: u16 = 200;

    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(Value::from(status)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status
            .as_ref()
            .and_then(Value::as_f64)
            .is_some_and(|status| status == f64::from(Self::OK))
    }
}
