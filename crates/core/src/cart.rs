//! Shopping cart

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single product entry in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line refers to.
    pub product: Uuid,

    /// How many of the product the customer wants. Always at least one;
    /// a line whose quantity would drop to zero is removed instead.
    pub quantity: u32,
}

/// An ordered collection of cart lines, at most one per product.
///
/// The cart is a plain value type: it performs no I/O and knows nothing
/// about prices. Persistence and synchronization live in the service layer,
/// which serializes the whole cart as a single JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `product` to the cart.
    ///
    /// Merges into the existing line for the product when there is one,
    /// otherwise appends a new line. Adding zero is a no-op.
    pub fn add_item(&mut self, product: Uuid, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product == product) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Set the quantity of the line for `product`.
    ///
    /// A quantity of zero removes the line. Unknown products are a no-op,
    /// so repeated removals are harmless.
    pub fn set_quantity(&mut self, product: Uuid, quantity: u32) {
        if quantity == 0 {
            self.lines.retain(|line| line.product != product);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.product == product) {
            line.quantity = quantity;
        }
    }

    /// Remove every line. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines of the cart, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The quantity of `product` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product: Uuid) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product == product)
            .map(|line| line.quantity)
    }

    /// The number of distinct product lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
