//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::records::{CartId, CartRecord},
    products::records::ProductId,
    users::records::UserId,
};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const FIND_CART_BY_EMAIL_SQL: &str = include_str!("../sql/find_cart_by_email.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const LOCK_CART_BY_EMAIL_SQL: &str = include_str!("../sql/lock_cart_by_email.sql");
const LOCK_CARTS_HOLDING_PRODUCT_SQL: &str =
    include_str!("../sql/lock_carts_holding_product.sql");
const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");
const GET_OR_CREATE_CART_SQL: &str = include_str!("../sql/get_or_create_cart.sql");
const ADJUST_CART_TOTAL_SQL: &str = include_str!("../sql/adjust_cart_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(cart.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Like [`Self::find_cart`], holding the cart row lock until the
    /// transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(cart.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Like [`Self::find_cart_by_email`], holding the cart row lock until the
    /// transaction ends.
    pub(crate) async fn lock_cart_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock every cart holding `product`, in cart id order.
    pub(crate) async fn lock_carts_holding_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<CartId>, sqlx::Error> {
        let ids: Vec<i64> = sqlx::query_scalar(LOCK_CARTS_HOLDING_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        Ok(ids.into_iter().map(CartId::from_i64).collect())
    }

    pub(crate) async fn list_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LIST_CARTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Return the user's cart, creating an empty one if they have none yet.
    pub(crate) async fn get_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_OR_CREATE_CART_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Add `amount` (negative to subtract) to the cart's running total.
    pub(crate) async fn adjust_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        amount: Decimal,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADJUST_CART_TOTAL_SQL)
            .bind(cart.into_i64())
            .bind(amount)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            email: row.try_get("email")?,
            total_price: row.try_get::<Decimal, _>("total_price")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
