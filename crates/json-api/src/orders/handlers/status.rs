//! Update Order Status Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry::status::OrderStatus;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::get::OrderResponse, state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// Target status, e.g. `confirmed` or `out_for_delivery`
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order to a new status. Writing the status the order already
/// has is accepted without effect; any other invalid transition is
/// rejected.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::CONFLICT, description = "Invalid status transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = OrderStatus::from_str(&json.into_inner().status)
        .map_err(|_unknown| StatusError::bad_request().brief("Unknown order status"))?;

    let order = state
        .app
        .orders
        .set_status(order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::{
        customers::CustomerUuid,
        orders::{MockOrdersService, OrderUuid, OrdersServiceError},
    };

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{MockServices, mock_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        mock_service(
            MockServices {
                orders,
                ..MockServices::default()
            },
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_valid_transition_returns_updated_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        let mut order = make_order(uuid, CustomerUuid::new());
        order.status = OrderStatus::Confirmed;

        orders
            .expect_set_status()
            .once()
            .withf(move |u, status| *u == uuid && *status == OrderStatus::Confirmed)
            .return_once(move |_, _| Ok(order));

        let response: OrderResponse =
            TestClient::put(format!("http://example.com/orders/{uuid}/status"))
                .json(&json!({ "status": "confirmed" }))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(response.status, "confirmed");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_transition_returns_409() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_set_status().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            })
        });

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "delivered" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let uuid = OrderUuid::new();

        let orders = MockOrdersService::new();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "teleported" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
