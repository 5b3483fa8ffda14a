//! Get Order Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::orders::{OrderLineRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The human-facing order reference
    pub order_number: String,

    /// The customer the order belongs to
    pub customer: Uuid,

    /// The current status of the order
    pub status: String,

    /// The delivery address
    pub delivery_address: String,

    /// The payment method
    pub payment_method: String,

    /// The delivery fee in minor units
    pub delivery_fee: u64,

    /// The grand total in minor units
    pub total_amount: u64,

    /// When the order was submitted
    pub order_date: String,

    /// The estimated delivery time
    pub estimated_delivery: String,

    /// The actual delivery time, once delivered
    pub actual_delivery: Option<String>,

    /// The order lines
    pub lines: Vec<OrderLineResponse>,
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The unique identifier of the line
    pub uuid: Uuid,

    /// The product on this line
    pub product: Uuid,

    /// How many units of the product
    pub quantity: u32,

    /// The unit price captured at submission, in minor units
    pub unit_price: u64,

    /// The line total in minor units
    pub total_price: u64,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            product: line.product_uuid,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
        }
    }
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            customer: order.customer_uuid.into_uuid(),
            status: order.status.to_string(),
            delivery_address: order.delivery_address,
            payment_method: order.payment_method.to_string(),
            delivery_fee: order.delivery_fee,
            total_amount: order.total_amount,
            order_date: order.order_date.to_string(),
            estimated_delivery: order.estimated_delivery.to_string(),
            actual_delivery: order.actual_delivery.as_ref().map(ToString::to_string),
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its lines.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
