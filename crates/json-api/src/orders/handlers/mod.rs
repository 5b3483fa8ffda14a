//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use pantry::status::OrderStatus;
    use pantry_app::domain::{
        customers::CustomerUuid,
        orders::{OrderRecord, OrderUuid, PaymentMethod},
    };

    pub(super) fn make_order(uuid: OrderUuid, customer: CustomerUuid) -> OrderRecord {
        OrderRecord {
            uuid,
            order_number: "GRO-1042".to_string(),
            customer_uuid: customer,
            delivery_address: "12 Green Lane".to_string(),
            payment_method: PaymentMethod::Card,
            delivery_instructions: None,
            delivery_fee: 49_00,
            total_amount: 61_50,
            status: OrderStatus::Pending,
            order_date: Timestamp::UNIX_EPOCH,
            estimated_delivery: Timestamp::UNIX_EPOCH,
            actual_delivery: None,
            driver_notes: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            lines: Vec::new(),
        }
    }
}
