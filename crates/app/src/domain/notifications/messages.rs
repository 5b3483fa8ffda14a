//! Customer-facing notification copy.

use pantry::status::OrderStatus;

/// Subject and body for a status change on `order_number`.
#[must_use]
pub fn status_message(order_number: &str, status: OrderStatus) -> (String, String) {
    let subject = format!("Order {order_number}: {status}");

    let body = match status {
        OrderStatus::Pending => {
            format!("We've received your order {order_number} and will confirm it shortly.")
        }
        OrderStatus::Confirmed => {
            format!("Your order {order_number} has been confirmed.")
        }
        OrderStatus::Preparing => {
            format!("Your order {order_number} is being prepared.")
        }
        OrderStatus::OutForDelivery => {
            format!("Your order {order_number} is out for delivery.")
        }
        OrderStatus::Delivered => {
            format!("Your order {order_number} has been delivered. Enjoy!")
        }
        OrderStatus::Cancelled => {
            format!("Your order {order_number} has been cancelled.")
        }
    };

    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_carries_the_order_number_and_status() {
        let (subject, _) = status_message("GRO-1042", OrderStatus::OutForDelivery);

        assert_eq!(subject, "Order GRO-1042: out_for_delivery");
    }

    #[test]
    fn every_status_has_a_body_mentioning_the_order() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let (_, body) = status_message("GRO-7", status);

            assert!(body.contains("GRO-7"), "body for {status} lacks order number");
        }
    }
}
