//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::manager::PgCartManager,
        categories::records::CategoryId,
        products::{
            data::{NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductId, ProductRecord},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    cart_manager: PgCartManager,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            cart_manager: PgCartManager::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(category_id = %category, name = %product.name),
        err
    )]
    async fn create_product(
        &self,
        category: CategoryId,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, category, product)
            .await
            .map_err(|error| match ProductsServiceError::from(error) {
                ProductsServiceError::InvalidReference => ProductsServiceError::NotFound {
                    resource: "Category",
                    field: "categoryId",
                    value: category.to_string(),
                },
                other => other,
            })?;

        tx.commit().await?;

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .repository
            .find_product(&mut tx, product)
            .await?
            .ok_or_else(|| ProductsServiceError::product_not_found(product))?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_products_by_category(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_products(
        &self,
        keyword: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.search_products(&mut tx, keyword).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_id = %product, carts_repriced = tracing::field::Empty),
        err
    )]
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.cart_manager.lock_carts_holding(&mut tx, product).await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?
            .ok_or_else(|| ProductsServiceError::product_not_found(product))?;

        let carts_repriced = self
            .cart_manager
            .reprice_product(&mut tx, product, updated.special_price, updated.discount)
            .await?;

        tracing::Span::current().record("carts_repriced", carts_repriced);

        tx.commit().await?;

        info!(product_id = %product, "updated product");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_id = %product, carts_updated = tracing::field::Empty),
        err
    )]
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.cart_manager.lock_carts_holding(&mut tx, product).await?;

        let carts_updated = self
            .cart_manager
            .remove_product_from_all_carts(&mut tx, product)
            .await?;

        tracing::Span::current().record("carts_updated", carts_updated);

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::product_not_found(product));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a product in a category, deriving its special price.
    async fn create_product(
        &self,
        category: CategoryId,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves the products of one category, cheapest first.
    async fn list_products_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Case-insensitive substring search on product names.
    async fn search_products(&self, keyword: &str)
    -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Updates a product and reprices the cart items that hold it.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Removes a product from every cart, then deletes it.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{domain::carts::CartsService, test::TestContext};

    use super::*;

    fn new_product(name: &str, price: Decimal, discount: Decimal, quantity: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price,
            discount,
            quantity,
        }
    }

    #[tokio::test]
    async fn create_product_derives_special_price() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Books").await;

        let product = ctx
            .products
            .create_product(
                category.id,
                new_product("Dune", Decimal::new(2500, 2), Decimal::new(20, 0), 5),
            )
            .await?;

        assert_eq!(product.category_id, category.id);
        assert_eq!(product.price, Decimal::new(2500, 2));
        assert_eq!(product.special_price, Decimal::new(2000, 2));
        assert_eq!(product.quantity, 5);
        assert_eq!(product.image, "default.png");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_name_in_category_returns_already_exists() {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Books").await;

        ctx.create_product(category.id, "Dune", "9.99", "0", 1).await;

        let result = ctx
            .products
            .create_product(
                category.id,
                new_product("Dune", Decimal::ONE, Decimal::ZERO, 1),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
    }

    #[tokio::test]
    async fn same_name_in_another_category_is_allowed() -> TestResult {
        let ctx = TestContext::new().await;
        let books = ctx.create_category("Books").await;
        let films = ctx.create_category("Films").await;

        ctx.create_product(books.id, "Dune", "9.99", "0", 1).await;

        let product = ctx
            .products
            .create_product(films.id, new_product("Dune", Decimal::TEN, Decimal::ZERO, 1))
            .await?;

        assert_eq!(product.category_id, films.id);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                CategoryId::from_i64(404),
                new_product("Dune", Decimal::ONE, Decimal::ZERO, 1),
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::NotFound {
                    resource: "Category",
                    ..
                })
            ),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductId::from_i64(404)).await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::NotFound {
                    resource: "Product",
                    field: "productId",
                    ..
                })
            ),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_by_category_orders_by_price() -> TestResult {
        let ctx = TestContext::new().await;
        let books = ctx.create_category("Books").await;
        let films = ctx.create_category("Films").await;

        let pricey = ctx.create_product(books.id, "Atlas", "30.00", "0", 1).await;
        let cheap = ctx.create_product(books.id, "Zine", "2.00", "0", 1).await;
        ctx.create_product(films.id, "Alien", "5.00", "0", 1).await;

        let ids: Vec<ProductId> = ctx
            .products
            .list_products_by_category(books.id)
            .await?
            .iter()
            .map(|product| product.id)
            .collect();

        assert_eq!(ids, vec![cheap.id, pricey.id]);

        Ok(())
    }

    #[tokio::test]
    async fn search_products_matches_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;
        let books = ctx.create_category("Books").await;

        let dune = ctx.create_product(books.id, "Dune Messiah", "9.99", "0", 1).await;
        ctx.create_product(books.id, "Emma", "4.99", "0", 1).await;

        let found = ctx.products.search_products("dUNE").await?;

        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|product| product.id), Some(dune.id));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_recomputes_special_price() -> TestResult {
        let ctx = TestContext::new().await;
        let books = ctx.create_category("Books").await;
        let product = ctx.create_product(books.id, "Dune", "10.00", "0", 4).await;

        let updated = ctx
            .products
            .update_product(
                product.id,
                ProductUpdate {
                    name: "Dune".to_string(),
                    description: "Desert planet".to_string(),
                    price: Decimal::new(4000, 2),
                    discount: Decimal::new(25, 0),
                    quantity: 9,
                },
            )
            .await?;

        assert_eq!(updated.special_price, Decimal::new(3000, 2));
        assert_eq!(updated.quantity, 9);
        assert_eq!(updated.description, "Desert planet");

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reprices_carts_holding_it() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "10.00", "0", 10).await;
        let emma = ctx.create_product(books.id, "Emma", "5.00", "0", 10).await;

        ctx.carts.add_product("buyer@x.com", dune.id, 2).await?;
        ctx.carts.add_product("buyer@x.com", emma.id, 1).await?;

        ctx.products
            .update_product(
                dune.id,
                ProductUpdate {
                    name: "Dune".to_string(),
                    description: String::new(),
                    price: Decimal::new(1200, 2),
                    discount: Decimal::new(50, 0),
                    quantity: 10,
                },
            )
            .await?;

        let cart = ctx.carts.get_cart("buyer@x.com").await?;

        // 2 x 6.00 + 1 x 5.00
        assert_eq!(cart.total_price, Decimal::new(1700, 2));

        let repriced = cart
            .items
            .iter()
            .find(|item| item.product_id == dune.id)
            .map(|item| (item.product_price, item.discount));

        assert_eq!(
            repriced,
            Some((Decimal::new(600, 2), Decimal::new(50, 0)))
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductId::from_i64(404),
                ProductUpdate {
                    name: "Ghost".to_string(),
                    description: String::new(),
                    price: Decimal::ONE,
                    discount: Decimal::ZERO,
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound { .. })),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_removes_it_from_carts() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.create_user("buyer", "buyer@x.com").await;
        let books = ctx.create_category("Books").await;
        let dune = ctx.create_product(books.id, "Dune", "10.00", "0", 10).await;
        let emma = ctx.create_product(books.id, "Emma", "5.00", "0", 10).await;

        ctx.carts.add_product("buyer@x.com", dune.id, 2).await?;
        ctx.carts.add_product("buyer@x.com", emma.id, 1).await?;

        ctx.products.delete_product(dune.id).await?;

        let cart = ctx.carts.get_cart("buyer@x.com").await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_price, Decimal::new(500, 2));

        let result = ctx.products.get_product(dune.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound { .. })),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn negative_stock_is_rejected_by_the_schema() {
        let ctx = TestContext::new().await;
        let books = ctx.create_category("Books").await;
        let product = ctx.create_product(books.id, "Dune", "10.00", "0", 1).await;

        let result = sqlx::query("UPDATE products SET quantity = -1 WHERE id = $1")
            .bind(product.id.into_i64())
            .execute(ctx.db.pool())
            .await
            .map_err(ProductsServiceError::from);

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
