//! Product Data

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    /// Price in minor units.
    pub price: u64,
    pub unit: String,
    pub category: String,
    pub stock_quantity: u64,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    /// New price in minor units.
    pub price: u64,
    pub stock_quantity: u64,
}
