//! Create Order Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::orders::{NewOrder, OrderUuid, PaymentMethod};

use crate::{
    extensions::*, orders::errors::into_status_error, orders::get::OrderResponse, state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Where to deliver the order
    pub delivery_address: String,

    /// Payment method, e.g. `card` or `cash_on_delivery`
    pub payment_method: String,

    /// Free-text instructions for the driver
    pub delivery_instructions: Option<String>,

    /// Delivery fee in minor units; the configured default applies when
    /// omitted
    pub delivery_fee: Option<u64>,
}

/// Create Order Handler
///
/// Submits the customer's current cart as an order. On success the cart
/// is cleared; a cart that fails to clear is logged and left behind
/// without affecting the committed order.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart empty or payload incomplete"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = customer.into_inner().into();
    let request = json.into_inner();

    let payment_method = PaymentMethod::from_str(&request.payment_method)
        .map_err(|_unknown| StatusError::bad_request().brief("Unknown payment method"))?;

    let cart = state.app.carts.load(Some(customer)).await;

    let order = state
        .app
        .orders
        .submit_order(
            NewOrder {
                uuid: OrderUuid::new(),
                customer,
                delivery_address: request.delivery_address,
                payment_method,
                delivery_instructions: request.delivery_instructions,
                delivery_fee: request.delivery_fee,
            },
            &cart,
        )
        .await
        .map_err(into_status_error)?;

    state.app.carts.clear(Some(customer)).await;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry::cart::Cart;
    use pantry_app::domain::{
        carts::MockCartsService,
        customers::CustomerUuid,
        orders::{MockOrdersService, OrdersServiceError},
    };

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{MockServices, mock_service},
    };

    use super::*;

    fn make_service(carts: MockCartsService, orders: MockOrdersService) -> Service {
        mock_service(
            MockServices {
                carts,
                orders,
                ..MockServices::default()
            },
            Router::with_path("customers/{customer}/orders").post(handler),
        )
    }

    fn checkout_body() -> serde_json::Value {
        json!({
            "delivery_address": "12 Green Lane",
            "payment_method": "card",
        })
    }

    #[tokio::test]
    async fn test_create_submits_the_cart_and_clears_it() -> TestResult {
        let customer = CustomerUuid::new();
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();
        let mut orders = MockOrdersService::new();

        carts
            .expect_load()
            .once()
            .withf(move |c| *c == Some(customer))
            .return_once(move |_| {
                let mut cart = Cart::new();
                cart.add_item(product, 2);
                cart
            });

        let order = make_order(OrderUuid::new(), customer);

        orders
            .expect_submit_order()
            .once()
            .withf(move |new, cart| {
                new.customer == customer
                    && new.delivery_address == "12 Green Lane"
                    && new.payment_method == PaymentMethod::Card
                    && cart.quantity_of(product) == Some(2)
            })
            .return_once(move |_, _| Ok(order));

        carts
            .expect_clear()
            .once()
            .withf(move |c| *c == Some(customer))
            .return_once(|_| ());

        let mut res = TestClient::post(format!("http://example.com/customers/{customer}/orders"))
            .json(&checkout_body())
            .send(&make_service(carts, orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: OrderResponse = res.take_json().await?;
        assert_eq!(body.order_number, "GRO-1042");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_422_and_keeps_the_cart() -> TestResult {
        let customer = CustomerUuid::new();

        let mut carts = MockCartsService::new();
        let mut orders = MockOrdersService::new();

        carts.expect_load().once().return_once(|_| Cart::new());

        orders
            .expect_submit_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        carts.expect_clear().never();

        let res = TestClient::post(format!("http://example.com/customers/{customer}/orders"))
            .json(&checkout_body())
            .send(&make_service(carts, orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_payment_method_returns_400() -> TestResult {
        let customer = CustomerUuid::new();

        let carts = MockCartsService::new();
        let orders = MockOrdersService::new();

        let res = TestClient::post(format!("http://example.com/customers/{customer}/orders"))
            .json(&json!({
                "delivery_address": "12 Green Lane",
                "payment_method": "barter",
            }))
            .send(&make_service(carts, orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
