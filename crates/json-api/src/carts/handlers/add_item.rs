//! Add Cart Item Handler

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

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    /// The product to add
    pub product: Uuid,

    /// How many units to add to any existing line for the product
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adds units of a product to the cart, merging with any existing line,
/// then persists the cart to both tiers.
#[endpoint(tags("carts"), summary = "Add Cart Item")]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = Some(customer.into_inner().into());
    let request = json.into_inner();

    let mut cart = state.app.carts.load(customer).await;

    cart.add_item(request.product, request.quantity);

    state.app.carts.save(customer, &cart).await;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry::cart::Cart;
    use pantry_app::domain::{carts::MockCartsService, customers::CustomerUuid};

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("customers/{customer}/cart/items").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_item_merges_and_saves() -> TestResult {
        let customer = CustomerUuid::new();
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_load()
            .once()
            .withf(move |c| *c == Some(customer))
            .return_once(move |_| {
                let mut cart = Cart::new();
                cart.add_item(product, 1);
                cart
            });

        carts
            .expect_save()
            .once()
            .withf(move |c, cart| *c == Some(customer) && cart.quantity_of(product) == Some(3))
            .return_once(|_, _| ());

        let response: CartResponse = TestClient::post(format!(
            "http://example.com/customers/{customer}/cart/items"
        ))
        .json(&json!({ "product": product, "quantity": 2 }))
        .send(&make_service(carts))
        .await
        .take_json()
        .await?;

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_to_empty_cart_creates_a_line() -> TestResult {
        let customer = CustomerUuid::new();
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts.expect_load().once().return_once(|_| Cart::new());

        carts
            .expect_save()
            .once()
            .withf(move |_, cart| cart.quantity_of(product) == Some(4))
            .return_once(|_, _| ());

        let response: CartResponse = TestClient::post(format!(
            "http://example.com/customers/{customer}/cart/items"
        ))
        .json(&json!({ "product": product, "quantity": 4 }))
        .send(&make_service(carts))
        .await
        .take_json()
        .await?;

        assert_eq!(response.items.len(), 1);

        Ok(())
    }
}
