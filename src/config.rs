use std::{env, path::PathBuf, time::Duration};

use crate::error::{CartError, CartResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_COUNTER_CLASS: &str = "cart-counter";
pub const DEFAULT_AMOUNT_CLASS: &str = "cart-amount";
pub const DEFAULT_ROW_PREFIX: &str = "cart";

/// Class names and id prefix the page templates use for cart markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub counter_class: String,
    pub amount_class: String,
    pub row_prefix: String,
}

impl Markers {
    /// Element id of the row showing `product_id`.
    pub fn row_id(&self, product_id: &str) -> String {
        format!("{}{}", self.row_prefix, product_id)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            counter_class: DEFAULT_COUNTER_CLASS.to_string(),
            amount_class: DEFAULT_AMOUNT_CLASS.to_string(),
            row_prefix: DEFAULT_ROW_PREFIX.to_string(),
        }
    }
}

/// User-facing prompt texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub confirm_delete: String,
    pub confirm_pay: String,
    pub pay_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            confirm_delete: "Bạn chắc chắn xóa không?".to_string(),
            confirm_pay: "Bạn chắc chắn thanh toán không?".to_string(),
            pay_error: "Hệ thống đang bị lỗi!".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub markers: Markers,
    pub messages: Messages,
    pub page_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            markers: Markers::default(),
            messages: Messages::default(),
            page_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> CartResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> CartResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str, fallback: String| lookup(key).unwrap_or(fallback);

        let timeout = match lookup("CART_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    CartError::Config(format!("CART_HTTP_TIMEOUT_SECS must be whole seconds, got {raw:?}"))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: var("CART_API_BASE_URL", defaults.base_url),
            timeout,
            markers: Markers {
                counter_class: var("CART_COUNTER_CLASS", defaults.markers.counter_class),
                amount_class: var("CART_AMOUNT_CLASS", defaults.markers.amount_class),
                row_prefix: var("CART_ROW_PREFIX", defaults.markers.row_prefix),
            },
            messages: Messages {
                confirm_delete: var("CART_CONFIRM_DELETE", defaults.messages.confirm_delete),
                confirm_pay: var("CART_CONFIRM_PAY", defaults.messages.confirm_pay),
                pay_error: var("CART_PAY_ERROR", defaults.messages.pay_error),
            },
            page_file: lookup("CART_PAGE_FILE").map(PathBuf::from),
        })
    }
}
