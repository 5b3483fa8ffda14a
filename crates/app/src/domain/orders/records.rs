//! Order Records

use std::str::FromStr;

use jiff::Timestamp;
use pantry::status::OrderStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::customers::CustomerUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Order Record
///
/// `total_amount` is always the sum of the line totals plus the delivery
/// fee; any operation that changes a line rewrites it in the same
/// transaction.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    /// Human-facing reference, e.g. `GRO-1042`. Assigned by the database.
    pub order_number: String,
    pub customer_uuid: CustomerUuid,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub delivery_instructions: Option<String>,
    /// Delivery fee in minor units.
    pub delivery_fee: u64,
    /// Grand total in minor units.
    pub total_amount: u64,
    pub status: OrderStatus,
    pub order_date: Timestamp,
    pub estimated_delivery: Timestamp,
    /// Set once, when the order first transitions to delivered.
    pub actual_delivery: Option<Timestamp>,
    pub driver_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub lines: Vec<OrderLineRecord>,
}

/// Order Line Record
#[derive(Debug, Clone)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: uuid::Uuid,
    pub quantity: u32,
    /// Catalog price captured at submission, in minor units.
    pub unit_price: u64,
    /// `quantity * unit_price`, in minor units.
    pub total_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    CashOnDelivery,
    Swish,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::CashOnDelivery => "cash_on_delivery",
            Self::Swish => "swish",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            "swish" => Ok(Self::Swish),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_round_trips_through_str() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::CashOnDelivery,
            PaymentMethod::Swish,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        assert!("barter".parse::<PaymentMethod>().is_err());
    }
}
