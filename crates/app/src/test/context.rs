//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::orders::{OrdersSettings, PgOrdersService},
    domain::products::PgProductsService,
};

use super::{
    db::TestDb,
    helpers::{RecordingNotifier, SentNotification},
};

pub(crate) struct TestContext {
    pub test_db: TestDb,
    pub products: PgProductsService,
    pub orders: PgOrdersService,
    notifier: RecordingNotifier,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let notifier = RecordingNotifier::new();

        Self {
            products: PgProductsService::new(db.clone()),
            orders: PgOrdersService::new(
                db,
                Arc::new(notifier.clone()),
                OrdersSettings::default(),
            ),
            notifier,
            test_db,
        }
    }

    /// A `Db` handle onto the same per-test database.
    pub fn db(&self) -> Db {
        Db::new(self.test_db.pool().clone())
    }

    /// Everything the notifier has delivered so far.
    pub fn sent_notifications(&self) -> Vec<SentNotification> {
        self.notifier.sent()
    }
}
