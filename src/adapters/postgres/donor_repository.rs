//! PostgreSQL implementation of DonorRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::donation::{Address, Donor, Phone};
use crate::domain::foundation::{DomainError, DonorId, ErrorCode, UserId};
use crate::ports::DonorRepository;

/// PostgreSQL implementation of the DonorRepository port.
///
/// Addresses are stored in their own table and inserted before the donor
/// row so the donor's address references are valid.
pub struct PostgresDonorRepository {
    pool: PgPool,
}

impl PostgresDonorRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_address(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        address: &Address,
    ) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO donor_addresses (id, street, city, state, postal_code)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(address.street())
        .bind(address.city())
        .bind(address.state())
        .bind(address.postal_code())
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save address: {}", e))
        })?;
        Ok(id)
    }
}

/// Database row representation of a donor with joined addresses.
#[derive(Debug, sqlx::FromRow)]
struct DonorRow {
    id: Uuid,
    user_reference: Option<String>,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    billing_street: Option<String>,
    billing_city: Option<String>,
    billing_state: Option<String>,
    billing_postal_code: Option<String>,
    mailing_street: Option<String>,
    mailing_city: Option<String>,
    mailing_state: Option<String>,
    mailing_postal_code: Option<String>,
}

impl TryFrom<DonorRow> for Donor {
    type Error = DomainError;

    fn try_from(row: DonorRow) -> Result<Self, Self::Error> {
        let user_reference = row
            .user_reference
            .map(UserId::new)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user reference: {}", e))
            })?;

        let phone = row.phone.map(Phone::try_new).transpose().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid phone: {}", e))
        })?;

        let billing_address = address_from_parts(
            row.billing_street,
            row.billing_city,
            row.billing_state,
            row.billing_postal_code,
        )?;
        let mailing_address = address_from_parts(
            row.mailing_street,
            row.mailing_city,
            row.mailing_state,
            row.mailing_postal_code,
        )?;

        Ok(Donor {
            id: DonorId::from_uuid(row.id),
            user_reference,
            first_name: row.first_name,
            last_name: row.last_name,
            billing_address,
            mailing_address,
            phone,
        })
    }
}

fn address_from_parts(
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
) -> Result<Option<Address>, DomainError> {
    match (street, city, state, postal_code) {
        (Some(street), Some(city), Some(state), Some(postal_code)) => {
            Address::try_new(street, city, state, postal_code)
                .map(Some)
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid stored address: {}", e),
                    )
                })
        }
        _ => Ok(None),
    }
}

#[async_trait]
impl DonorRepository for PostgresDonorRepository {
    async fn insert(&self, donor: &Donor) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        // Addresses first so the donor's references are valid. A mailing
        // address equal to the billing one shares the same row.
        let billing_id = match &donor.billing_address {
            Some(address) => Some(Self::insert_address(&mut tx, address).await?),
            None => None,
        };
        let mailing_id = match &donor.mailing_address {
            Some(address) if donor.billing_address.as_ref() == Some(address) => billing_id,
            Some(address) => Some(Self::insert_address(&mut tx, address).await?),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO donors (
                id, user_reference, first_name, last_name,
                billing_address_id, mailing_address_id, phone
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(donor.id.as_uuid())
        .bind(donor.user_reference.as_ref().map(UserId::as_str))
        .bind(&donor.first_name)
        .bind(&donor.last_name)
        .bind(billing_id)
        .bind(mailing_id)
        .bind(donor.phone.as_ref().map(Phone::as_str))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save donor: {}", e))
        })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit donor: {}", e))
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &DonorId) -> Result<Option<Donor>, DomainError> {
        let row: Option<DonorRow> = sqlx::query_as(
            r#"
            SELECT
                d.id, d.user_reference, d.first_name, d.last_name, d.phone,
                b.street AS billing_street, b.city AS billing_city,
                b.state AS billing_state, b.postal_code AS billing_postal_code,
                m.street AS mailing_street, m.city AS mailing_city,
                m.state AS mailing_state, m.postal_code AS mailing_postal_code
            FROM donors d
            LEFT JOIN donor_addresses b ON b.id = d.billing_address_id
            LEFT JOIN donor_addresses m ON m.id = d.mailing_address_id
            WHERE d.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load donor: {}", e))
        })?;

        row.map(Donor::try_from).transpose()
    }
}
