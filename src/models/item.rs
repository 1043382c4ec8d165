use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{parse_name, MAX_PRICE_SCALE};

/// One product entry in the cart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

// request dto
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    pub unit_price: Decimal,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    parse_name(name)
        .map(|_| ())
        .map_err(|_| ValidationError::new("Name is required"))
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Price must be greater than zero, got {price}")]
    InvalidPrice { price: Decimal },

    #[error("Price {price} has more than {max_scale} decimal places")]
    PriceTooPrecise { price: Decimal, max_scale: u32 },
}

impl AddItemRequest {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Validate the request and turn it into a line item ready for the cart.
    pub fn into_line_item(self) -> Result<LineItem, ItemError> {
        self.validate()?;

        if self.unit_price <= Decimal::ZERO {
            return Err(ItemError::InvalidPrice {
                price: self.unit_price,
            });
        }

        if self.unit_price.normalize().scale() > MAX_PRICE_SCALE {
            return Err(ItemError::PriceTooPrecise {
                price: self.unit_price,
                max_scale: MAX_PRICE_SCALE,
            });
        }

        Ok(LineItem::new(
            self.name.trim(),
            self.unit_price.normalize(),
            self.quantity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn subtotal_multiplies_price_by_quantity() {
        let item = LineItem::new("Rice", dec!(15000), 3);
        assert_eq!(item.subtotal(), dec!(45000));
    }

    #[test]
    fn request_trims_name() {
        let item = AddItemRequest::new("  Oil ", dec!(10000), 1)
            .into_line_item()
            .unwrap();
        assert_eq!(item.name, "Oil");
    }

    #[test]
    fn request_rejects_blank_name() {
        let result = AddItemRequest::new("   ", dec!(10000), 1).into_line_item();
        assert!(matches!(result, Err(ItemError::ValidationError(_))));
    }

    #[test]
    fn request_rejects_zero_quantity() {
        let result = AddItemRequest::new("Oil", dec!(10000), 0).into_line_item();
        assert!(matches!(result, Err(ItemError::ValidationError(_))));
    }

    #[test]
    fn request_rejects_non_positive_price() {
        let result = AddItemRequest::new("Oil", dec!(0), 1).into_line_item();
        assert!(matches!(result, Err(ItemError::InvalidPrice { .. })));

        let result = AddItemRequest::new("Oil", dec!(-5), 1).into_line_item();
        assert!(matches!(result, Err(ItemError::InvalidPrice { .. })));
    }

    #[test]
    fn request_rejects_too_many_decimal_places() {
        let result = AddItemRequest::new("Oil", dec!(0.00001), 1).into_line_item();
        assert!(matches!(result, Err(ItemError::PriceTooPrecise { .. })));

        let item = AddItemRequest::new("Oil", dec!(0.0001), 1).into_line_item();
        assert!(item.is_ok());
    }
}
