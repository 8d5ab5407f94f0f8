//! Orders Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    addresses::records::AddressId,
    orders::{
        data::NewOrder,
        records::{OrderId, OrderRecord, PaymentId},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const FIND_USER_ORDER_SQL: &str = include_str!("../sql/find_user_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("../sql/list_user_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.email)
            .bind(SqlxDate::from(order.order_date))
            .bind(order.total_amount)
            .bind(order.order_status)
            .bind(order.address_id.into_i64())
            .bind(order.payment_id.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        email: &str,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(FIND_USER_ORDER_SQL)
            .bind(order.into_i64())
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(email)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            email: row.try_get("email")?,
            order_date: row.try_get::<SqlxDate, _>("order_date")?.to_jiff(),
            total_amount: row.try_get::<Decimal, _>("total_amount")?,
            order_status: row.try_get("order_status")?,
            address_id: AddressId::from_i64(row.try_get("address_id")?),
            payment_id: PaymentId::from_i64(row.try_get("payment_id")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
