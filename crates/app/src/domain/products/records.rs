//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// The catalog is the price authority: order submission captures
/// `price` at the moment the order is placed.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    /// Price in minor units.
    pub price: u64,
    /// Sales unit, e.g. `"each"`, `"kg"`, `"bunch"`.
    pub unit: String,
    pub category: String,
    /// Recorded stock level. Never decremented by order submission.
    pub stock_quantity: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
