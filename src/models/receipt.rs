use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::item::LineItem;

/// Result of applying the discount policy to a cart total.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub total: Decimal,
    pub discount: Decimal,
    pub discounted_total: Decimal,
}

impl CheckoutSummary {
    pub fn has_discount(&self) -> bool {
        self.discount > Decimal::ZERO
    }
}

/// A settled checkout: what was bought, what was paid, what goes back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub items: Vec<LineItem>,
    #[serde(flatten)]
    pub summary: CheckoutSummary,
    pub tendered: Decimal,
    pub change: Decimal,
}
