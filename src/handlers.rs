use std::sync::Arc;

use serde_json::Value;

use crate::{
    api::CartApi,
    config::{ClientConfig, Messages},
    dto::cart::{CartItemRequest, CartSummaryResponse, QuantityUpdateRequest},
    error::CartResult,
    format::{format_amount, format_quantity},
    page::{CartView, Confirm, Navigator, QuantityControl},
};

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The user dismissed the prompt; no request was sent.
    Declined,
    Removed {
        summary: CartSummaryResponse,
        /// `false` when the page had no row for the product.
        row_hidden: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayOutcome {
    Declined,
    /// Server reported status 200 and the page was reloaded.
    Completed,
    /// Server answered with another in-band status, or none; the error alert was shown.
    Failed { status: Option<Value> },
}

#[derive(Clone)]
pub struct CartHandlers {
    api: Arc<dyn CartApi>,
    view: Arc<dyn CartView>,
    confirm: Arc<dyn Confirm>,
    navigator: Arc<dyn Navigator>,
    messages: Messages,
}

impl CartHandlers {
    pub fn new(
        api: Arc<dyn CartApi>,
        view: Arc<dyn CartView>,
        confirm: Arc<dyn Confirm>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            view,
            confirm,
            navigator,
            messages: Messages::default(),
        }
    }

    /// Takes prompt texts from `config`.
    pub fn with_config(mut self, config: &ClientConfig) -> Self {
        self.messages = config.messages.clone();
        self
    }

    /// Adds one unit of a product and refreshes the counters.
    ///
    /// Errors are returned untouched; the page is left as it was.
    pub async fn add_to_cart(
        &self,
        id: &str,
        name: &str,
        price: f64,
    ) -> CartResult<CartSummaryResponse> {
        let item = CartItemRequest {
            id: id.to_string(),
            name: name.to_string(),
            price,
        };

        let summary = self.api.add_item(&item).await?;
        tracing::debug!(
            product_id = %id,
            total_quantity = summary.total_quantity,
            "item added to cart"
        );

        self.view.render_quantity(&format_quantity(summary.total_quantity));
        Ok(summary)
    }

    /// Sends the control's quantity for `product_id` and refreshes counters and amounts.
    pub async fn update_cart<Q>(&self, product_id: &str, control: &Q) -> CartResult<CartSummaryResponse>
    where
        Q: QuantityControl + ?Sized,
    {
        let body = QuantityUpdateRequest {
            quantity: control.value(),
        };

        match self.api.update_quantity(product_id, &body).await {
            Ok(summary) => {
                self.render_summary(&summary);
                Ok(summary)
            }
            Err(err) => {
                tracing::warn!(product_id = %product_id, error = %err, "cart update failed");
                Err(err)
            }
        }
    }

    /// Removes `product_id` after confirmation, refreshes totals and hides its row.
    pub async fn delete_cart(&self, product_id: &str) -> CartResult<DeleteOutcome> {
        if !self.confirm.confirm(&self.messages.confirm_delete) {
            return Ok(DeleteOutcome::Declined);
        }

        let summary = match self.api.remove_item(product_id).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(product_id = %product_id, error = %err, "cart delete failed");
                return Err(err);
            }
        };

        self.render_summary(&summary);

        let row_hidden = self.view.hide_row(product_id);
        if !row_hidden {
            tracing::debug!(product_id = %product_id, "no cart row to hide");
        }

        Ok(DeleteOutcome::Removed {
            summary,
            row_hidden,
        })
    }

    /// Checks out after confirmation. The in-band `status` decides between reload and alert.
    pub async fn pay(&self) -> CartResult<PayOutcome> {
        if !self.confirm.confirm(&self.messages.confirm_pay) {
            return Ok(PayOutcome::Declined);
        }

        let response = self.api.pay().await?;
        if response.is_success() {
            self.navigator.reload();
            Ok(PayOutcome::Completed)
        } else {
            tracing::info!(status = ?response.status, "checkout rejected");
            self.navigator.alert(&self.messages.pay_error);
            Ok(PayOutcome::Failed {
                status: response.status,
            })
        }
    }

    fn render_summary(&self, summary: &CartSummaryResponse) {
        self.view.render_quantity(&format_quantity(summary.total_quantity));
        self.view.render_amount(&format_amount(summary.total_amount));
    }
}
