//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

/// Clear Cart Handler
///
/// Drops the customer's cart from both storage tiers.
#[endpoint(tags("carts"), summary = "Clear Cart")]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carts
        .clear(Some(customer.into_inner().into()))
        .await;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
