//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        addresses::{AddressesService, data::NewAddress, records::AddressRecord},
        categories::{
            CategoriesService,
            data::NewCategory,
            records::{CategoryId, CategoryRecord},
        },
        products::{ProductsService, data::NewProduct, records::ProductRecord},
        users::{UsersService, data::NewUser, records::UserRecord},
    },
    test::TestContext,
};

impl TestContext {
    pub(crate) async fn create_user(&self, username: &str, email: &str) -> UserRecord {
        self.users
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
            })
            .await
            .expect("Failed to create test user")
    }

    pub(crate) async fn create_category(&self, name: &str) -> CategoryRecord {
        self.categories
            .create_category(NewCategory {
                name: name.to_string(),
            })
            .await
            .expect("Failed to create test category")
    }

    /// Create a product from decimal strings, e.g. `("19.99", "10")`.
    pub(crate) async fn create_product(
        &self,
        category: CategoryId,
        name: &str,
        price: &str,
        discount: &str,
        quantity: u32,
    ) -> ProductRecord {
        self.products
            .create_product(
                category,
                NewProduct {
                    name: name.to_string(),
                    description: String::new(),
                    price: Decimal::from_str_exact(price).expect("Invalid test price"),
                    discount: Decimal::from_str_exact(discount).expect("Invalid test discount"),
                    quantity,
                },
            )
            .await
            .expect("Failed to create test product")
    }

    pub(crate) async fn create_address(&self, email: &str) -> AddressRecord {
        self.addresses
            .create_address(
                email,
                NewAddress {
                    street: "221B Baker Street".to_string(),
                    building_name: "Flat B".to_string(),
                    city: "London".to_string(),
                    state: "Greater London".to_string(),
                    country: "United Kingdom".to_string(),
                    pincode: "NW16XE".to_string(),
                },
            )
            .await
            .expect("Failed to create test address")
    }

    /// Count the rows of a table, bypassing the services.
    pub(crate) async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows")
    }
}
