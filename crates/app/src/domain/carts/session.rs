//! PostgreSQL-backed remote cart session store.

use async_trait::async_trait;
use pantry::cart::Cart;
use sqlx::{query, query_scalar};

use crate::{
    database::Db,
    domain::{
        carts::{errors::CartStoreError, store::CartSessionStore},
        customers::CustomerUuid,
    },
};

const GET_CART_SESSION_SQL: &str = include_str!("sql/get_cart_session.sql");
const UPSERT_CART_SESSION_SQL: &str = include_str!("sql/upsert_cart_session.sql");
const DELETE_CART_SESSION_SQL: &str = include_str!("sql/delete_cart_session.sql");

/// One JSONB row per signed-in customer.
#[derive(Debug, Clone)]
pub struct PgCartSessionStore {
    db: Db,
}

impl PgCartSessionStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartSessionStore for PgCartSessionStore {
    async fn load(&self, customer: CustomerUuid) -> Result<Option<Cart>, CartStoreError> {
        let mut tx = self.db.begin().await?;

        let payload: Option<serde_json::Value> = query_scalar(GET_CART_SESSION_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        payload
            .map(serde_json::from_value)
            .transpose()
            .map_err(CartStoreError::from)
    }

    async fn save(&self, customer: CustomerUuid, cart: &Cart) -> Result<(), CartStoreError> {
        let payload = serde_json::to_value(cart)?;

        let mut tx = self.db.begin().await?;

        query(UPSERT_CART_SESSION_SQL)
            .bind(customer.into_uuid())
            .bind(payload)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, customer: CustomerUuid) -> Result<(), CartStoreError> {
        let mut tx = self.db.begin().await?;

        query(DELETE_CART_SESSION_SQL)
            .bind(customer.into_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
