//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry::cart::Cart;

use crate::{extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The items in the cart
    pub items: Vec<CartItemResponse>,
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The product in this cart line
    pub product: Uuid,

    /// How many units of the product
    pub quantity: u32,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemResponse {
                    product: line.product,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the customer's cart, reconciled across both storage tiers.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .load(Some(customer.into_inner().into()))
        .await;

    Ok(Json(cart.into()))
}
