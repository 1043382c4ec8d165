use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::item::LineItem;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid position {position}: expected a number between 1 and {size}")]
    InvalidIndex { position: usize, size: usize },
}

/// Ordered collection of line items with a cached running total.
///
/// Items keep their insertion order. The running total is adjusted on every
/// mutation and always equals the sum of the item subtotals.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    running_total: Decimal,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the end of the cart.
    ///
    /// The item is expected to be validated already.
    pub fn add(&mut self, item: LineItem) {
        let subtotal = item.subtotal();
        info!(
            "Adding '{}' x{} to cart (subtotal {})",
            item.name, item.quantity, subtotal
        );

        self.running_total += subtotal;
        self.items.push(item);

        debug!(
            "Cart now holds {} items, total {}",
            self.items.len(),
            self.running_total
        );
    }

    /// Remove the item shown at the 1-based display `position`.
    ///
    /// Later items shift down by one. The cart is left untouched on error.
    pub fn remove_at(&mut self, position: usize) -> Result<LineItem, CartError> {
        if self.items.is_empty() {
            warn!("Refusing to remove position {} from an empty cart", position);
            return Err(CartError::EmptyCart);
        }

        if position < 1 || position > self.items.len() {
            warn!(
                "Refusing to remove position {} from a cart of {} items",
                position,
                self.items.len()
            );
            return Err(CartError::InvalidIndex {
                position,
                size: self.items.len(),
            });
        }

        let removed = self.items.remove(position - 1);
        self.running_total -= removed.subtotal();

        info!("Removed '{}' from cart position {}", removed.name, position);
        debug!(
            "Cart now holds {} items, total {}",
            self.items.len(),
            self.running_total
        );
        Ok(removed)
    }

    /// Item at the 0-based `index`, if any.
    pub fn item_at(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.running_total
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Drop every item and reset the total to zero.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            info!("Clearing {} items from cart", self.items.len());
        }
        self.items.clear();
        self.running_total = Decimal::ZERO;
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
