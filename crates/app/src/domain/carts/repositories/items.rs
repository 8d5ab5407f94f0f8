//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{quantity_to_i32, try_get_quantity},
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartId, CartItemId, CartItemRecord},
        },
        products::records::ProductId,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const FIND_CART_ITEM_SQL: &str = include_str!("../sql/find_cart_item.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const REMOVE_PRODUCT_FROM_CARTS_SQL: &str = include_str!("../sql/remove_product_from_carts.sql");
const REPRICE_PRODUCT_IN_CARTS_SQL: &str = include_str!("../sql/reprice_product_in_carts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(FIND_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: NewCartItem,
    ) -> Result<CartItemRecord, sqlx::Error> {
        let quantity = quantity_to_i32("quantity", item.quantity)?;

        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(item.product_id.into_i64())
            .bind(quantity)
            .bind(item.discount)
            .bind(item.product_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(DELETE_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete every cart line of `product`, debiting each cart's total.
    ///
    /// Returns the number of carts touched.
    pub(crate) async fn remove_product_from_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_PRODUCT_FROM_CARTS_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Move every cart line of `product` to a new unit price, shifting each
    /// cart's total by the difference.
    ///
    /// Returns the number of carts touched.
    pub(crate) async fn reprice_product_in_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        product_price: Decimal,
        discount: Decimal,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REPRICE_PRODUCT_IN_CARTS_SQL)
            .bind(product.into_i64())
            .bind(product_price)
            .bind(discount)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartItemId::from_i64(row.try_get("id")?),
            cart_id: CartId::from_i64(row.try_get("cart_id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            discount: row.try_get::<Decimal, _>("discount")?,
            product_price: row.try_get::<Decimal, _>("product_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
