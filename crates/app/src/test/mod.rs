//! Shared test infrastructure.

mod context;
mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use helpers::{RecordingNotifier, SentNotification};
