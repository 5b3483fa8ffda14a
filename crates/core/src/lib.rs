//! Pantry
//!
//! Core domain types for the Pantry grocery delivery service: the shopping
//! cart and its mutation rules, the order status lifecycle, and monetary
//! total calculation.
//!
//! All monetary values are integer minor units (pence/cents/öre), so line
//! totals are exact integer products and no fractional rounding arises.

pub mod cart;
pub mod status;
pub mod totals;
