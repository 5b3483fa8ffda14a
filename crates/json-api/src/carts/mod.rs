//! Carts HTTP surface

mod handlers;

pub(crate) use handlers::{add_item, clear, get, set_quantity};
