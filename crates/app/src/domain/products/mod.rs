//! Products

pub mod errors;
pub mod data;
pub mod records;
mod repository;
pub mod service;

pub use data::{NewProduct, ProductUpdate};
pub use errors::ProductsServiceError;
pub use records::{ProductRecord, ProductUuid};
pub use service::*;

pub(crate) use repository::PgProductsRepository;
