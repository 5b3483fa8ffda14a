//! Order input data.

use crate::domain::{
    customers::CustomerUuid,
    orders::records::{OrderUuid, PaymentMethod},
};

/// Everything order submission needs besides the cart itself.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer: CustomerUuid,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub delivery_instructions: Option<String>,
    /// Delivery fee in minor units. `None` applies the configured default.
    pub delivery_fee: Option<u64>,
}
