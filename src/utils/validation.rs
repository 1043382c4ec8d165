//! Input validation predicates used by the interactive prompts and the
//! batch `checkout` command. Each returns a user-facing message on failure.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    models::item::{AddItemRequest, LineItem},
    services::checkout::CheckoutCalculator,
};

/// Upper bound for a single unit price, keeps subtotal arithmetic in range.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000000);

/// Prices carry at most this many decimal places. Together with
/// `MAX_UNIT_PRICE` every subtotal and cart total stays within 28 digits,
/// so the running total is never rounded.
pub const MAX_PRICE_SCALE: u32 = 4;

fn parse_amount(input: &str) -> Result<Decimal, String> {
    let input = input.trim();
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| format!("'{}' is not a valid amount", input))
}

pub fn parse_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    if name.is_empty() {
        return Err("Product name must not be empty".to_string());
    }
    Ok(name.to_string())
}

pub fn parse_price(input: &str) -> Result<Decimal, String> {
    let price = parse_amount(input)?;
    if price <= Decimal::ZERO {
        return Err("Price must be greater than zero".to_string());
    }
    if price > MAX_UNIT_PRICE {
        return Err(format!("Price must not exceed {}", MAX_UNIT_PRICE));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(format!(
            "Price must have at most {} decimal places",
            MAX_PRICE_SCALE
        ));
    }
    Ok(price.normalize())
}

pub fn parse_quantity(input: &str) -> Result<u32, String> {
    match input.trim().parse::<u32>() {
        Ok(0) => Err("Quantity must be at least 1".to_string()),
        Ok(quantity) => Ok(quantity),
        Err(_) => Err(format!("'{}' is not a valid quantity", input.trim())),
    }
}

/// Parse a 1-based display position for a cart of `size` items.
pub fn parse_position(input: &str, size: usize) -> Result<usize, String> {
    let out_of_range = || format!("Enter a number between 1 and {}", size);

    let position = input.trim().parse::<usize>().map_err(|_| out_of_range())?;
    if position < 1 || position > size {
        return Err(out_of_range());
    }
    Ok(position)
}

pub fn parse_tender(
    input: &str,
    discounted_total: Decimal,
    calculator: &CheckoutCalculator,
) -> Result<Decimal, String> {
    let tendered = parse_amount(input)?;
    if !calculator.is_tender_valid(discounted_total, tendered) {
        return Err("Not enough money, enter a sufficient amount".to_string());
    }
    Ok(tendered)
}

/// Parse `NAME:PRICE:QTY`. The name may itself contain colons.
pub fn parse_item_spec(input: &str) -> Result<LineItem, String> {
    let mut parts = input.rsplitn(3, ':');
    let (Some(quantity), Some(price), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("'{}' must look like NAME:PRICE:QTY", input));
    };

    AddItemRequest::new(name, parse_price(price)?, parse_quantity(quantity)?)
        .into_line_item()
        .map_err(|e| e.to_string())
}
