//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            manager::PgCartManager,
            records::{CartId, CartRecord},
        },
        products::{pricing::line_total, records::ProductId, repository::PgProductsRepository},
        users::repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    users: PgUsersRepository,
    products: PgProductsRepository,
    manager: PgCartManager,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            products: PgProductsRepository::new(),
            manager: PgCartManager::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, email: &str) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .manager
            .carts()
            .find_cart_by_email(&mut tx, email)
            .await?
            .ok_or_else(|| CartsServiceError::cart_not_found(email))?;

        let cart = self.manager.with_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn list_carts(&self) -> Result<Vec<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let carts = self.manager.carts().list_carts(&mut tx).await?;

        let mut loaded = Vec::with_capacity(carts.len());

        for cart in carts {
            loaded.push(self.manager.with_items(&mut tx, cart).await?);
        }

        tx.commit().await?;

        Ok(loaded)
    }

    #[tracing::instrument(
        name = "carts.service.add_product",
        skip(self, product),
        fields(product_id = %product, cart_id = tracing::field::Empty),
        err
    )]
    async fn add_product(
        &self,
        email: &str,
        product: ProductId,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .users
            .find_user_by_email(&mut tx, email)
            .await?
            .ok_or_else(|| CartsServiceError::NotFound {
                resource: "User",
                field: "email",
                value: email.to_string(),
            })?;

        let cart = self.manager.carts().get_or_create_cart(&mut tx, user.id).await?;

        tracing::Span::current().record("cart_id", tracing::field::display(cart.id));

        let product = self
            .products
            .find_product(&mut tx, product)
            .await?
            .ok_or_else(|| CartsServiceError::product_not_found(product))?;

        if self
            .manager
            .items()
            .find_cart_item(&mut tx, cart.id, product.id)
            .await?
            .is_some()
        {
            return Err(CartsServiceError::BusinessRule(format!(
                "Product {} already exists in the Cart",
                product.name
            )));
        }

        if product.quantity == 0 {
            return Err(CartsServiceError::BusinessRule(format!(
                "{} is not available",
                product.name
            )));
        }

        if product.quantity < quantity {
            return Err(CartsServiceError::BusinessRule(format!(
                "Please, make an order of the {} less than or equal to the quantity {}.",
                product.name, product.quantity
            )));
        }

        if quantity == 0 {
            return Err(CartsServiceError::BusinessRule(
                "Quantity must be greater than zero".to_string(),
            ));
        }

        self.manager
            .items()
            .create_cart_item(
                &mut tx,
                cart.id,
                NewCartItem {
                    product_id: product.id,
                    quantity,
                    discount: product.discount,
                    product_price: product.special_price,
                },
            )
            .await?;

        self.manager
            .carts()
            .adjust_total(&mut tx, cart.id, line_total(product.special_price, quantity))
            .await?;

        let cart = self
            .manager
            .carts()
            .find_cart(&mut tx, cart.id)
            .await?
            .ok_or_else(|| CartsServiceError::cart_not_found(email))?;

        let cart = self.manager.with_items(&mut tx, cart).await?;

        tx.commit().await?;

        info!(cart_id = %cart.id, total_price = %cart.total_price, "added product to cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_product",
        skip(self, cart, product),
        fields(cart_id = %cart, product_id = %product),
        err
    )]
    async fn remove_product(
        &self,
        cart: CartId,
        product: ProductId,
    ) -> Result<String, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let removed = self
            .manager
            .remove_product(&mut tx, cart, product)
            .await?
            .ok_or_else(|| CartsServiceError::product_not_found(product))?;

        tx.commit().await?;

        info!(cart_id = %cart, product_id = %product, "removed product from cart");

        Ok(format!(
            "Product {} removed from the cart !!!",
            removed.product_name
        ))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the cart owned by `email`, with its items.
    async fn get_cart(&self, email: &str) -> Result<CartRecord, CartsServiceError>;

    /// Retrieve every cart, with items.
    async fn list_carts(&self) -> Result<Vec<CartRecord>, CartsServiceError>;

    /// Add `quantity` units of a product to the user's cart, creating the cart
    /// on first use.
    async fn add_product(
        &self,
        email: &str,
        product: ProductId,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a product from a cart, returning a confirmation message.
    async fn remove_product(
        &self,
        cart: CartId,
        product: ProductId,
    ) -> Result<String, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn add_product_creates_cart_and_snapshots_special_price() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "20.00", "10", 5).await;

        let cart = ctx.carts.add_product("buyer@x.com", dune.id, 2).await?;

        assert_eq!(cart.email, "buyer@x.com");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_price, Decimal::new(3600, 2));

        let item = cart.items.first().ok_or("missing cart item")?;

        assert_eq!(item.product_id, dune.id);
        assert_eq!(item.product_name, "Dune");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.product_price, Decimal::new(1800, 2));
        assert_eq!(item.discount, Decimal::new(10, 0));

        Ok(())
    }

    #[tokio::test]
    async fn add_product_reuses_the_users_cart() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 5).await;
        let emma = ctx.create_product(books.id, "Emma", "9.99", "0", 5).await;

        let first = ctx.carts.add_product("buyer@x.com", dune.id, 2).await?;
        let second = ctx.carts.add_product("buyer@x.com", emma.id, 1).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.total_price, Decimal::new(4998, 2));

        let carts = ctx.carts.list_carts().await?;

        assert_eq!(carts.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_product_twice_is_a_business_rule_violation() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 5).await;

        ctx.carts.add_product("buyer@x.com", dune.id, 1).await?;

        let result = ctx.carts.add_product("buyer@x.com", dune.id, 1).await;

        match result {
            Err(CartsServiceError::BusinessRule(message)) => {
                assert_eq!(message, "Product Dune already exists in the Cart");
            }
            other => panic!("expected BusinessRule, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn add_product_out_of_stock_is_not_available() {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 0).await;

        let result = ctx.carts.add_product("buyer@x.com", dune.id, 1).await;

        assert_eq!(
            result.map_err(|error| error.to_string()).err().as_deref(),
            Some("Dune is not available")
        );
    }

    #[tokio::test]
    async fn add_product_more_than_stock_is_rejected() {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 3).await;

        let result = ctx.carts.add_product("buyer@x.com", dune.id, 4).await;

        assert_eq!(
            result.map_err(|error| error.to_string()).err().as_deref(),
            Some("Please, make an order of the Dune less than or equal to the quantity 3.")
        );
    }

    #[tokio::test]
    async fn add_product_zero_quantity_is_rejected() {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 3).await;

        let result = ctx.carts.add_product("buyer@x.com", dune.id, 0).await;

        assert_eq!(
            result.map_err(|error| error.to_string()).err().as_deref(),
            Some("Quantity must be greater than zero")
        );
    }

    #[tokio::test]
    async fn add_product_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 3).await;

        let result = ctx.carts.add_product("ghost@x.com", dune.id, 1).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::NotFound {
                    resource: "User",
                    field: "email",
                    ..
                })
            ),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_product_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;

        let result = ctx
            .carts
            .add_product("buyer@x.com", ProductId::from_i64(404), 1)
            .await;

        assert_eq!(
            result.map_err(|error| error.to_string()).err().as_deref(),
            Some("Product not found with productId: 404")
        );
    }

    #[tokio::test]
    async fn get_cart_without_cart_returns_not_found() {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;

        let result = ctx.carts.get_cart("buyer@x.com").await;

        assert_eq!(
            result.map_err(|error| error.to_string()).err().as_deref(),
            Some("Cart not found with email: buyer@x.com")
        );
    }

    #[tokio::test]
    async fn remove_product_debits_the_total() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 5).await;
        let emma = ctx.create_product(books.id, "Emma", "9.99", "0", 5).await;

        ctx.carts.add_product("buyer@x.com", dune.id, 2).await?;
        let cart = ctx.carts.add_product("buyer@x.com", emma.id, 1).await?;

        let message = ctx.carts.remove_product(cart.id, dune.id).await?;

        assert_eq!(message, "Product Dune removed from the cart !!!");

        let cart = ctx.carts.get_cart("buyer@x.com").await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_price, Decimal::new(999, 2));

        Ok(())
    }

    #[tokio::test]
    async fn remove_product_not_in_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 5).await;
        let emma = ctx.create_product(books.id, "Emma", "9.99", "0", 5).await;

        let cart = ctx.carts.add_product("buyer@x.com", dune.id, 1).await?;

        let result = ctx.carts.remove_product(cart.id, emma.id).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::NotFound {
                    resource: "Product",
                    ..
                })
            ),
            "expected NotFound, got {result:?}"
        );

        let cart = ctx.carts.get_cart("buyer@x.com").await?;

        assert_eq!(cart.total_price, Decimal::new(1999, 2));

        Ok(())
    }

    #[tokio::test]
    async fn list_carts_loads_every_cart_with_items() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("first", "first@x.com").await;
        ctx.create_user("second", "second@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "19.99", "0", 5).await;
        let emma = ctx.create_product(books.id, "Emma", "9.99", "0", 5).await;

        ctx.carts.add_product("first@x.com", dune.id, 2).await?;
        ctx.carts.add_product("first@x.com", emma.id, 1).await?;
        ctx.carts.add_product("second@x.com", emma.id, 3).await?;

        let carts = ctx.carts.list_carts().await?;

        let summary: Vec<_> = carts
            .iter()
            .map(|cart| {
                let products: Vec<ProductId> =
                    cart.items.iter().map(|item| item.product_id).collect();

                (cart.email.as_str(), products, cart.total_price)
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("first@x.com", vec![dune.id, emma.id], Decimal::new(4997, 2)),
                ("second@x.com", vec![emma.id], Decimal::new(2997, 2)),
            ]
        );

        Ok(())
    }
}
