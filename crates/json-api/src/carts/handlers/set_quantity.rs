//! Set Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{carts::get::CartResponse, extensions::*, state::State};

/// Set Cart Item Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetQuantityRequest {
    /// The product whose line to change
    pub product: Uuid,

    /// The new quantity. Zero removes the line.
    pub quantity: u32,
}

/// Set Cart Item Quantity Handler
///
/// Replaces a line's quantity, removing the line when it hits zero, then
/// persists the cart to both tiers.
#[endpoint(tags("carts"), summary = "Set Cart Item Quantity")]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<SetQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = Some(customer.into_inner().into());
    let request = json.into_inner();

    let mut cart = state.app.carts.load(customer).await;

    cart.set_quantity(request.product, request.quantity);

    state.app.carts.save(customer, &cart).await;

    Ok(Json(cart.into()))
}
