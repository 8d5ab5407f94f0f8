//! Order Items Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{quantity_to_i32, try_get_quantity},
    domain::{
        orders::{
            data::NewOrderItem,
            records::{OrderId, OrderItemId, OrderItemRecord},
        },
        products::records::ProductId,
    },
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert all `items` for `order` in one statement.
    ///
    /// Returned rows follow the order of `items`.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let mut product_ids = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut discounts = Vec::with_capacity(items.len());
        let mut prices = Vec::with_capacity(items.len());

        for item in items {
            product_ids.push(item.product_id.into_i64());
            quantities.push(quantity_to_i32("quantity", item.quantity)?);
            discounts.push(item.discount);
            prices.push(item.ordered_product_price);
        }

        let mut created = query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_i64())
            .bind(product_ids)
            .bind(quantities)
            .bind(discounts)
            .bind(prices)
            .fetch_all(&mut **tx)
            .await?;

        // RETURNING does not promise row order; ids follow insertion order.
        created.sort_by_key(|item| item.id);

        Ok(created)
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderItemId::from_i64(row.try_get("id")?),
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            quantity: try_get_quantity(row, "quantity")?,
            discount: row.try_get::<Decimal, _>("discount")?,
            ordered_product_price: row.try_get::<Decimal, _>("ordered_product_price")?,
        })
    }
}
