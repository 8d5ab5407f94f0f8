//! Cart Manager
//!
//! Cart mutations that run inside a transaction owned by the caller. The carts
//! service uses them for its own operations; order placement and product
//! maintenance use them so cart totals stay in step with their line items
//! within the same unit of work.
//!
//! Every path that writes cart items locks the owning cart rows first, before
//! any product or cart item row. Order placement follows the same order, so
//! these paths queue behind a checkout instead of deadlocking with it.

use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use crate::domain::{
    carts::{
        records::{CartId, CartItemRecord, CartRecord},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
    products::{pricing::line_total, records::ProductId},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartManager {
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
}

impl PgCartManager {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
        }
    }

    pub(crate) fn carts(&self) -> &PgCartsRepository {
        &self.carts
    }

    pub(crate) fn items(&self) -> &PgCartItemsRepository {
        &self.items
    }

    /// Fill `cart.items` from storage.
    pub(crate) async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: CartRecord,
    ) -> Result<CartRecord, sqlx::Error> {
        cart.items = self.items.get_cart_items(tx, cart.id).await?;

        Ok(cart)
    }

    /// Lock the cart owned by `email` for the rest of the transaction and load
    /// its line items.
    pub(crate) async fn lock_cart_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        match self.carts.lock_cart_by_email(tx, email).await? {
            Some(cart) => self.with_items(tx, cart).await.map(Some),
            None => Ok(None),
        }
    }

    /// Take `product` out of `cart` and debit its line total.
    ///
    /// Returns the removed line, or `None` when the cart does not hold the
    /// product.
    pub(crate) async fn remove_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product: ProductId,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        if self.carts.lock_cart(tx, cart).await?.is_none() {
            return Ok(None);
        }

        let Some(removed) = self.items.delete_cart_item(tx, cart, product).await? else {
            return Ok(None);
        };

        self.carts
            .adjust_total(tx, cart, -line_total(removed.product_price, removed.quantity))
            .await?;

        Ok(Some(removed))
    }

    /// Lock the carts holding `product` ahead of changing the product row.
    pub(crate) async fn lock_carts_holding(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<CartId>, sqlx::Error> {
        self.carts.lock_carts_holding_product(tx, product).await
    }

    /// Callers lock the affected carts with [`Self::lock_carts_holding`] first.
    pub(crate) async fn remove_product_from_all_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        self.items.remove_product_from_carts(tx, product).await
    }

    pub(crate) async fn reprice_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        special_price: Decimal,
        discount: Decimal,
    ) -> Result<u64, sqlx::Error> {
        self.items
            .reprice_product_in_carts(tx, product, special_price, discount)
            .await
    }
}
