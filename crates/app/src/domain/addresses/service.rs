//! Addresses service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::addresses::{
        data::{AddressUpdate, NewAddress},
        errors::AddressesServiceError,
        records::{AddressId, AddressRecord},
        repository::PgAddressesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    #[tracing::instrument(
        name = "addresses.service.create_address",
        skip(self, address),
        fields(city = %address.city),
        err
    )]
    async fn create_address(
        &self,
        email: &str,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_address(&mut tx, email, address)
            .await?
            .ok_or_else(|| AddressesServiceError::NotFound {
                resource: "User",
                field: "email",
                value: email.to_string(),
            })?;

        tx.commit().await?;

        info!(address_id = %created.id, "created address");

        Ok(created)
    }

    async fn get_address(&self, address: AddressId) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let address = self
            .repository
            .find_address(&mut tx, address)
            .await?
            .ok_or_else(|| AddressesServiceError::address_not_found(address))?;

        tx.commit().await?;

        Ok(address)
    }

    async fn list_addresses(&self) -> Result<Vec<AddressRecord>, AddressesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let addresses = self.repository.list_addresses(&mut tx).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn list_user_addresses(
        &self,
        email: &str,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let addresses = self.repository.list_user_addresses(&mut tx, email).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    #[tracing::instrument(
        name = "addresses.service.update_address",
        skip(self, address, update),
        fields(address_id = %address),
        err
    )]
    async fn update_address(
        &self,
        address: AddressId,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_address(&mut tx, address, update)
            .await?
            .ok_or_else(|| AddressesServiceError::address_not_found(address))?;

        tx.commit().await?;

        info!(address_id = %address, "updated address");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "addresses.service.delete_address",
        skip(self, address),
        fields(address_id = %address),
        err
    )]
    async fn delete_address(&self, address: AddressId) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_address(&mut tx, address).await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::address_not_found(address));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Creates an address for the user with `email`.
    async fn create_address(
        &self,
        email: &str,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError>;

    async fn get_address(&self, address: AddressId) -> Result<AddressRecord, AddressesServiceError>;

    /// Retrieves every user's addresses, oldest first.
    async fn list_addresses(&self) -> Result<Vec<AddressRecord>, AddressesServiceError>;

    /// Retrieves a user's addresses, oldest first.
    async fn list_user_addresses(
        &self,
        email: &str,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError>;

    async fn update_address(
        &self,
        address: AddressId,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Deletes an address. Addresses used by an order cannot be deleted.
    async fn delete_address(&self, address: AddressId) -> Result<(), AddressesServiceError>;
}
