//! Customer identity
//!
//! Authentication, sessions and customer profiles belong to the host
//! platform; only an opaque customer identifier crosses into this crate.
//! Anywhere a customer is optional, `None` means an anonymous local-only
//! session.

use crate::uuids::TypedUuid;

/// Marker for customer identifiers.
#[derive(Debug, Clone, Copy)]
pub struct CustomerRef;

/// Customer UUID
pub type CustomerUuid = TypedUuid<CustomerRef>;
