//! Order status lifecycle

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The delivery lifecycle of an order.
///
/// Orders move forward one step at a time along
/// `pending → confirmed → preparing → out_for_delivery → delivered`, and can
/// be cancelled from any non-terminal state. `delivered` and `cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet confirmed by the store.
    Pending,
    /// Accepted by the store.
    Confirmed,
    /// Being picked and packed.
    Preparing,
    /// Handed to a driver.
    OutForDelivery,
    /// Delivered to the customer. Terminal.
    Delivered,
    /// Cancelled before delivery. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// The wire/storage name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Check if no further transitions are allowed from this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Check if an order in this status may move to `next`.
    ///
    /// Re-asserting the current status is not a transition; callers treat it
    /// as a no-op rather than asking here.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Preparing)
                | (Self::Preparing, Self::OutForDelivery)
                | (Self::OutForDelivery, Self::Delivered)
        ) || (next == Self::Cancelled && !self.is_terminal())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    use OrderStatus::*;

    #[test]
    fn forward_chain_is_allowed() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
    }

    #[test]
    fn skipping_steps_is_rejected() {
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Confirmed.can_transition_to(OutForDelivery));
    }

    #[test]
    fn moving_backwards_is_rejected() {
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(OutForDelivery));
    }

    #[test]
    fn cancel_allowed_from_any_non_terminal_state() {
        for status in [Pending, Confirmed, Preparing, OutForDelivery] {
            assert!(
                status.can_transition_to(Cancelled),
                "{status} should be cancellable"
            );
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for terminal in [Delivered, Cancelled] {
            for next in [Pending, Confirmed, Preparing, OutForDelivery, Delivered, Cancelled] {
                assert!(
                    !terminal.can_transition_to(next),
                    "{terminal} -> {next} should be rejected"
                );
            }
        }
    }

    #[test]
    fn re_asserting_the_same_status_is_not_a_transition() {
        for status in [Pending, Confirmed, Preparing, OutForDelivery, Delivered, Cancelled] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn display_and_parse_round_trip() -> TestResult {
        for status in [Pending, Confirmed, Preparing, OutForDelivery, Delivered, Cancelled] {
            let parsed: OrderStatus = status.as_str().parse()?;

            assert_eq!(parsed, status);
        }

        Ok(())
    }

    #[test]
    fn parse_unknown_status_errors() {
        let result: Result<OrderStatus, _> = "shipped".parse();

        assert_eq!(result, Err(UnknownStatus("shipped".to_string())));
    }
}
