//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("Cart is empty")
        }
        OrdersServiceError::MissingDeliveryAddress => {
            StatusError::unprocessable_entity().brief("Delivery address is required")
        }
        OrdersServiceError::UnknownProduct(product) => StatusError::unprocessable_entity()
            .brief(format!("Cart references unknown product {product}")),
        OrdersServiceError::Closed(status) => {
            StatusError::conflict().brief(format!("Order is already {status}"))
        }
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Cannot move order from {from} to {to}"))
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData
        | OrdersServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Total(source) => {
            error!("order total overflow: {source}");

            StatusError::unprocessable_entity().brief("Order total out of range")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::NotFound => StatusError::not_found(),
    }
}
