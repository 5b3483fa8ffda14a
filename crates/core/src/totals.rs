//! Order total calculation

use thiserror::Error;

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalError {
    /// A single line total exceeds the minor-unit range.
    #[error("line total overflows (quantity {quantity}, unit price {unit_price})")]
    LineOverflow {
        /// Quantity on the offending line.
        quantity: u32,
        /// Unit price on the offending line, in minor units.
        unit_price: u64,
    },

    /// The sum of line totals plus delivery fee exceeds the minor-unit range.
    #[error("order total overflows")]
    OrderOverflow,
}

/// Calculate a line total: `quantity × unit_price`, in minor units.
///
/// # Errors
///
/// Returns [`TotalError::LineOverflow`] if the product exceeds `u64`.
pub fn line_total(quantity: u32, unit_price: u64) -> Result<u64, TotalError> {
    u64::from(quantity)
        .checked_mul(unit_price)
        .ok_or(TotalError::LineOverflow {
            quantity,
            unit_price,
        })
}

/// Calculate an order total: the sum of the given line totals plus the
/// delivery fee, in minor units.
///
/// The sum is always recomputed fresh over all lines; callers never maintain
/// it incrementally.
///
/// # Errors
///
/// Returns [`TotalError::OrderOverflow`] if the sum exceeds `u64`.
pub fn order_total(
    line_totals: impl IntoIterator<Item = u64>,
    delivery_fee: u64,
) -> Result<u64, TotalError> {
    line_totals
        .into_iter()
        .try_fold(delivery_fee, u64::checked_add)
        .ok_or(TotalError::OrderOverflow)
}
