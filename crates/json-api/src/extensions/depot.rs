//! Depot extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

/// Pull shared state out of the depot, failing the request when it is
/// missing. Injected state should always be present, so absence is a
/// server fault rather than a client error.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_missing| StatusError::internal_server_error())
    }
}
