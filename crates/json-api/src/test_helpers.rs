//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use pantry_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService, orders::MockOrdersService, products::MockProductsService,
    },
};

use crate::state::State;

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_load().never();
    carts.expect_save().never();
    carts.expect_clear().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_submit_order().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_set_status().never();
    orders.expect_update_line_quantity().never();
    orders.expect_remove_line().never();

    orders
}

pub(crate) struct MockServices {
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            products: strict_products_mock(),
            carts: strict_carts_mock(),
            orders: strict_orders_mock(),
        }
    }
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
        }))
    }
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    mock_service(
        MockServices {
            products,
            ..MockServices::default()
        },
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    mock_service(
        MockServices {
            carts,
            ..MockServices::default()
        },
        route,
    )
}

pub(crate) fn mock_service(mocks: MockServices, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}
