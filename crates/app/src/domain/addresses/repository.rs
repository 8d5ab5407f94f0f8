//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    addresses::{
        data::{AddressUpdate, NewAddress},
        records::{AddressId, AddressRecord},
    },
    users::records::UserId,
};

const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const GET_ADDRESS_SQL: &str = include_str!("sql/get_address.sql");
const FIND_USER_ADDRESS_SQL: &str = include_str!("sql/find_user_address.sql");
const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const LIST_USER_ADDRESSES_SQL: &str = include_str!("sql/list_user_addresses.sql");
const UPDATE_ADDRESS_SQL: &str = include_str!("sql/update_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an address for the user with `email`.
    ///
    /// Returns `None` when no such user exists.
    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        address: NewAddress,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(email)
            .bind(address.street)
            .bind(address.building_name)
            .bind(address.city)
            .bind(address.state)
            .bind(address.country)
            .bind(address.pincode)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(GET_ADDRESS_SQL)
            .bind(address.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find an address only if it belongs to the user with `email`.
    pub(crate) async fn find_user_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
        email: &str,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(FIND_USER_ADDRESS_SQL)
            .bind(address.into_i64())
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(LIST_ADDRESSES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Vec<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(LIST_USER_ADDRESSES_SQL)
            .bind(email)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
        update: AddressUpdate,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(UPDATE_ADDRESS_SQL)
            .bind(address.into_i64())
            .bind(update.street)
            .bind(update.building_name)
            .bind(update.city)
            .bind(update.state)
            .bind(update.country)
            .bind(update.pincode)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADDRESS_SQL)
            .bind(address.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: AddressId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            street: row.try_get("street")?,
            building_name: row.try_get("building_name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            country: row.try_get("country")?,
            pincode: row.try_get("pincode")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
