//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use pantry::{cart::Cart, status::OrderStatus, totals};

use crate::{
    database::Db,
    domain::{
        customers::CustomerUuid,
        notifications::{Notifier, messages::status_message},
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            locks::OrderLocks,
            records::{OrderLineUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::{PgProductsRepository, records::ProductUuid},
    },
};

/// Tunables for order submission.
#[derive(Debug, Clone, Copy)]
pub struct OrdersSettings {
    /// Delivery fee applied when the caller doesn't specify one, in minor
    /// units.
    pub default_delivery_fee: u64,
    /// Offset added to the submission time to produce the estimated
    /// delivery.
    pub estimated_delivery_minutes: u32,
}

impl Default for OrdersSettings {
    fn default() -> Self {
        Self {
            default_delivery_fee: 49_00,
            estimated_delivery_minutes: 30,
        }
    }
}

pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products: PgProductsRepository,
    notifier: Arc<dyn Notifier>,
    locks: OrderLocks,
    settings: OrdersSettings,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>, settings: OrdersSettings) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            notifier,
            locks: OrderLocks::new(),
            settings,
        }
    }

    /// Best-effort notification after the write has committed.
    async fn notify_status(&self, order: &OrderRecord) {
        let (subject, body) = status_message(&order.order_number, order.status);

        if let Err(error) = self
            .notifier
            .notify(order.customer_uuid, &subject, &body)
            .await
        {
            tracing::warn!(
                order = %order.order_number,
                %error,
                "failed to deliver status notification",
            );
        }
    }

    /// Recompute and store the order total from the full set of lines.
    ///
    /// Always a fresh sum, never an increment on the stored value, so a
    /// drifted total self-corrects on the next adjustment.
    async fn recalculate_total(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        uuid: OrderUuid,
        delivery_fee: u64,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let lines = self.repository.get_order_lines(tx, uuid).await?;

        let total = totals::order_total(lines.iter().map(|line| line.total_price), delivery_fee)?;

        let mut order = self.repository.update_order_total(tx, uuid, total).await?;
        order.lines = lines;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn submit_order(
        &self,
        order: NewOrder,
        cart: &Cart,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        if order.delivery_address.trim().is_empty() {
            return Err(OrdersServiceError::MissingDeliveryAddress);
        }

        let delivery_fee = order
            .delivery_fee
            .unwrap_or(self.settings.default_delivery_fee);

        let mut tx = self.db.begin().await?;

        let uuid = order.uuid;

        self.repository
            .create_order(
                &mut tx,
                &order,
                delivery_fee,
                self.settings.estimated_delivery_minutes,
            )
            .await?;

        for item in cart.lines() {
            let product_uuid = ProductUuid::from_uuid(item.product);

            let product = self
                .products
                .get_product(&mut tx, product_uuid)
                .await
                .map_err(|error| match error {
                    sqlx::Error::RowNotFound => OrdersServiceError::UnknownProduct(product_uuid),
                    other => other.into(),
                })?;

            let line_total = totals::line_total(item.quantity, product.price)?;

            self.repository
                .create_order_line(
                    &mut tx,
                    uuid,
                    item.product,
                    item.quantity,
                    product.price,
                    line_total,
                )
                .await?;
        }

        let submitted = self
            .recalculate_total(&mut tx, uuid, delivery_fee)
            .await?;

        tx.commit().await?;

        self.notify_status(&submitted).await;

        Ok(submitted)
    }

    async fn get_order(&self, uuid: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.repository.get_order(&mut tx, uuid).await?;
        order.lines = self.repository.get_order_lines(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx, customer).await?;

        for order in &mut orders {
            order.lines = self.repository.get_order_lines(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn set_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let _guard = self.locks.acquire(uuid).await;

        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, uuid).await?;

        // Writing the status an order already has is accepted silently
        // and sends nothing.
        if current.status == status {
            let mut order = current;
            order.lines = self.repository.get_order_lines(&mut tx, uuid).await?;

            tx.commit().await?;

            return Ok(order);
        }

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let mut order = self
            .repository
            .update_order_status(&mut tx, uuid, status)
            .await?;
        order.lines = self.repository.get_order_lines(&mut tx, uuid).await?;

        tx.commit().await?;

        self.notify_status(&order).await;

        Ok(order)
    }

    async fn update_line_quantity(
        &self,
        uuid: OrderUuid,
        line: OrderLineUuid,
        quantity: u32,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if quantity == 0 {
            return self.remove_line(uuid, line).await;
        }

        let _guard = self.locks.acquire(uuid).await;

        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, uuid).await?;

        if current.status.is_terminal() {
            return Err(OrdersServiceError::Closed(current.status));
        }

        let existing = self.repository.get_order_line(&mut tx, uuid, line).await?;

        let total_price = totals::line_total(quantity, existing.unit_price)?;

        self.repository
            .update_order_line_quantity(&mut tx, uuid, line, quantity, total_price)
            .await?;

        let order = self
            .recalculate_total(&mut tx, uuid, current.delivery_fee)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn remove_line(
        &self,
        uuid: OrderUuid,
        line: OrderLineUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let _guard = self.locks.acquire(uuid).await;

        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, uuid).await?;

        if current.status.is_terminal() {
            return Err(OrdersServiceError::Closed(current.status));
        }

        self.repository.delete_order_line(&mut tx, uuid, line).await?;

        let order = self
            .recalculate_total(&mut tx, uuid, current.delivery_fee)
            .await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn a cart into a persisted order, capturing current catalog
    /// prices. All rows are written in one transaction.
    async fn submit_order(
        &self,
        order: NewOrder,
        cart: &Cart,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order with its lines.
    async fn get_order(&self, uuid: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a customer's orders, most recent first.
    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to `status`, notifying the customer on a change.
    async fn set_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Change a line's quantity and recompute the total. A quantity of
    /// zero removes the line.
    async fn update_line_quantity(
        &self,
        uuid: OrderUuid,
        line: OrderLineUuid,
        quantity: u32,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Remove a line and recompute the total.
    async fn remove_line(
        &self,
        uuid: OrderUuid,
        line: OrderLineUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
