use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    models::receipt::{CheckoutSummary, Receipt},
    services::cart::Cart,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Insufficient payment: {tendered} tendered, {required} required")]
    InsufficientTender { tendered: Decimal, required: Decimal },
}

/// Threshold discount: totals at or above `threshold` get `rate` off.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPolicy {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            threshold: dec!(20000),
            rate: dec!(0.20),
        }
    }
}

/// Stateless discount and change calculation.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckoutCalculator {
    policy: DiscountPolicy,
}

impl CheckoutCalculator {
    pub fn new(policy: DiscountPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    /// Apply the discount policy to `total`. No rounding happens here.
    pub fn compute(&self, total: Decimal) -> CheckoutSummary {
        let discount = if total >= self.policy.threshold {
            total * self.policy.rate
        } else {
            Decimal::ZERO
        };

        let summary = CheckoutSummary {
            total,
            discount,
            discounted_total: total - discount,
        };
        debug!("Computed checkout summary: {:?}", summary);
        summary
    }

    pub fn is_tender_valid(&self, discounted_total: Decimal, tendered: Decimal) -> bool {
        tendered >= discounted_total
    }

    /// Change owed for `tendered`, or an error when the tender does not cover
    /// the discounted total.
    pub fn change(
        &self,
        discounted_total: Decimal,
        tendered: Decimal,
    ) -> Result<Decimal, CheckoutError> {
        if !self.is_tender_valid(discounted_total, tendered) {
            return Err(CheckoutError::InsufficientTender {
                tendered,
                required: discounted_total,
            });
        }
        Ok(tendered - discounted_total)
    }

    /// Settle the cart against `tendered`.
    ///
    /// On success the cart is cleared and the receipt returned. On error the
    /// cart is left as it was.
    pub fn settle(
        &self,
        cart: &mut Cart,
        tendered: Decimal,
    ) -> Result<Receipt, CheckoutError> {
        if cart.is_empty() {
            warn!("Checkout attempted on an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let summary = self.compute(cart.total());
        let change = self.change(summary.discounted_total, tendered).map_err(|e| {
            warn!("Checkout rejected: {}", e);
            e
        })?;

        let receipt = Receipt {
            items: cart.items().to_vec(),
            summary,
            tendered,
            change,
        };
        cart.clear();

        info!(
            "Checkout settled: {} items, paid {}, change {}",
            receipt.items.len(),
            receipt.tendered,
            receipt.change
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::LineItem;

    #[test]
    fn test_below_threshold_has_no_discount() {
        let calculator = CheckoutCalculator::default();
        let summary = calculator.compute(dec!(19999.99));

        assert_eq!(summary.discount, Decimal::ZERO);
        assert_eq!(summary.discounted_total, dec!(19999.99));
        assert!(!summary.has_discount());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let calculator = CheckoutCalculator::default();
        let summary = calculator.compute(dec!(20000));

        assert_eq!(summary.discount, dec!(4000));
        assert_eq!(summary.discounted_total, dec!(16000));
        assert!(summary.has_discount());
    }

    #[test]
    fn test_zero_total() {
        let summary = CheckoutCalculator::default().compute(Decimal::ZERO);
        assert_eq!(summary.discount, Decimal::ZERO);
        assert_eq!(summary.discounted_total, Decimal::ZERO);
    }

    #[test]
    fn test_discount_is_not_rounded() {
        let summary = CheckoutCalculator::default().compute(dec!(20000.03));
        assert_eq!(summary.discount, dec!(4000.006));
        assert_eq!(summary.discounted_total, dec!(16000.024));
    }

    #[test]
    fn test_custom_policy() {
        let calculator = CheckoutCalculator::new(DiscountPolicy {
            threshold: dec!(100),
            rate: dec!(0.5),
        });
        assert_eq!(calculator.compute(dec!(99)).discount, Decimal::ZERO);
        assert_eq!(calculator.compute(dec!(100)).discounted_total, dec!(50));
    }

    #[test]
    fn test_change_and_tender_validity() {
        let calculator = CheckoutCalculator::default();

        assert!(calculator.is_tender_valid(dec!(16000), dec!(20000)));
        assert!(calculator.is_tender_valid(dec!(16000), dec!(16000)));
        assert!(!calculator.is_tender_valid(dec!(16000), dec!(15999)));

        assert_eq!(calculator.change(dec!(16000), dec!(20000)), Ok(dec!(4000)));
        assert_eq!(
            calculator.change(dec!(16000), dec!(15999)),
            Err(CheckoutError::InsufficientTender {
                tendered: dec!(15999),
                required: dec!(16000),
            })
        );
    }

    #[test]
    fn test_settle_empty_cart() {
        let mut cart = Cart::new();
        let result = CheckoutCalculator::default().settle(&mut cart, dec!(100));
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn test_settle_insufficient_tender_keeps_cart() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("Rice", dec!(15000), 1));

        let result = CheckoutCalculator::default().settle(&mut cart, dec!(14999));
        assert!(matches!(result, Err(CheckoutError::InsufficientTender { .. })));
        assert_eq!(cart.size(), 1);
        assert_eq!(cart.total(), dec!(15000));
    }

    #[test]
    fn test_settle_clears_cart() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("Rice", dec!(15000), 1));
        cart.add(LineItem::new("Oil", dec!(10000), 1));

        let receipt = CheckoutCalculator::default()
            .settle(&mut cart, dec!(20000))
            .unwrap();

        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.summary.total, dec!(25000));
        assert_eq!(receipt.summary.discount, dec!(5000));
        assert_eq!(receipt.summary.discounted_total, dec!(20000));
        assert_eq!(receipt.change, Decimal::ZERO);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }
}
