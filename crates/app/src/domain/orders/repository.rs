//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use pantry::status::OrderStatus;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        amounts::{try_get_amount, try_get_quantity},
        customers::CustomerUuid,
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid, PaymentMethod},
        },
    },
    uuids::TypedUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_TOTAL_SQL: &str = include_str!("sql/update_order_total.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const GET_ORDER_LINE_SQL: &str = include_str!("sql/get_order_line.sql");
const UPDATE_ORDER_LINE_QUANTITY_SQL: &str = include_str!("sql/update_order_line_quantity.sql");
const DELETE_ORDER_LINE_SQL: &str = include_str!("sql/delete_order_line.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order row. The database assigns the order number and
    /// the estimated delivery is `now()` plus `estimated_delivery_minutes`.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
        delivery_fee: u64,
        estimated_delivery_minutes: u32,
    ) -> Result<OrderRecord, OrdersServiceError> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer.into_uuid())
            .bind(&order.delivery_address)
            .bind(order.payment_method.as_str())
            .bind(&order.delivery_instructions)
            .bind(i64::try_from(delivery_fee)?)
            .bind(i32::try_from(estimated_delivery_minutes)?)
            .fetch_one(&mut **tx)
            .await
            .map_err(OrdersServiceError::from)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        total_amount: u64,
    ) -> Result<OrderRecord, OrdersServiceError> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_TOTAL_SQL)
            .bind(uuid.into_uuid())
            .bind(i64::try_from(total_amount)?)
            .fetch_one(&mut **tx)
            .await
            .map_err(OrdersServiceError::from)
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(uuid.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: uuid::Uuid,
        quantity: u32,
        unit_price: u64,
        total_price: u64,
    ) -> Result<OrderLineRecord, OrdersServiceError> {
        query_as::<Postgres, OrderLineRecord>(CREATE_ORDER_LINE_SQL)
            .bind(OrderLineUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(product)
            .bind(i64::from(quantity))
            .bind(i64::try_from(unit_price)?)
            .bind(i64::try_from(total_price)?)
            .fetch_one(&mut **tx)
            .await
            .map_err(OrdersServiceError::from)
    }

    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(GET_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: OrderLineUuid,
    ) -> Result<OrderLineRecord, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(GET_ORDER_LINE_SQL)
            .bind(order.into_uuid())
            .bind(line.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_line_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: OrderLineUuid,
        quantity: u32,
        total_price: u64,
    ) -> Result<OrderLineRecord, OrdersServiceError> {
        query_as::<Postgres, OrderLineRecord>(UPDATE_ORDER_LINE_QUANTITY_SQL)
            .bind(order.into_uuid())
            .bind(line.into_uuid())
            .bind(i64::from(quantity))
            .bind(i64::try_from(total_price)?)
            .fetch_one(&mut **tx)
            .await
            .map_err(OrdersServiceError::from)
    }

    pub(crate) async fn delete_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: OrderLineUuid,
    ) -> Result<(), sqlx::Error> {
        let deleted = query(DELETE_ORDER_LINE_SQL)
            .bind(order.into_uuid())
            .bind(line.into_uuid())
            .execute(&mut **tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }
}

fn try_get_status(row: &PgRow) -> Result<OrderStatus, sqlx::Error> {
    let status: String = row.try_get("status")?;

    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

fn try_get_payment_method(row: &PgRow) -> Result<PaymentMethod, sqlx::Error> {
    let method: String = row.try_get("payment_method")?;

    method.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "payment_method".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TypedUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            customer_uuid: TypedUuid::from_uuid(row.try_get("customer_uuid")?),
            delivery_address: row.try_get("delivery_address")?,
            payment_method: try_get_payment_method(row)?,
            delivery_instructions: row.try_get("delivery_instructions")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            total_amount: try_get_amount(row, "total_amount")?,
            status: try_get_status(row)?,
            order_date: row.try_get::<SqlxTimestamp, _>("order_date")?.to_jiff(),
            estimated_delivery: row
                .try_get::<SqlxTimestamp, _>("estimated_delivery")?
                .to_jiff(),
            actual_delivery: row
                .try_get::<Option<SqlxTimestamp>, _>("actual_delivery")?
                .map(SqlxTimestamp::to_jiff),
            driver_notes: row.try_get("driver_notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            lines: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TypedUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: TypedUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: row.try_get("product_uuid")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            total_price: try_get_amount(row, "total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
