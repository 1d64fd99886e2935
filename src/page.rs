/// Writes cart totals into the page.
pub trait CartView: Send + Sync {
    /// Sets the text of every counter marker.
    fn render_quantity(&self, text: &str);

    /// Sets the text of every amount marker.
    fn render_amount(&self, text: &str);

    /// Hides the row showing `product_id`. Returns `false` when the page has no such row.
    fn hide_row(&self, product_id: &str) -> bool;
}

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Page-level navigation used after checkout.
pub trait Navigator: Send + Sync {
    fn reload(&self);

    fn alert(&self, message: &str);
}

/// An input holding the requested quantity for one cart row.
pub trait QuantityControl {
    fn value(&self) -> i64;
}

impl QuantityControl for i64 {
    fn value(&self) -> i64 {
        *self
    }
}

impl QuantityControl for i32 {
    fn value(&self) -> i64 {
        i64::from(*self)
    }
}

impl QuantityControl for u32 {
    fn value(&self) -> i64 {
        i64::from(*self)
    }
}

/// Answers every prompt with the same choice.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
