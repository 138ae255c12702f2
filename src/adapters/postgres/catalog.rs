//! PostgreSQL implementations of the catalog repositories.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::donation::{DonationTypeOption, PromoCode};
use crate::domain::foundation::{
    Amount, DiscountPercent, DomainError, DonationTypeId, DonationTypeOptionId, ErrorCode,
    PromoCodeId,
};
use crate::ports::{DonationTypeOptionRepository, PromoCodeRepository};

/// PostgreSQL implementation of the DonationTypeOptionRepository port.
pub struct PostgresDonationTypeOptionRepository {
    pool: PgPool,
}

impl PostgresDonationTypeOptionRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OptionRow {
    id: Uuid,
    donation_type_id: Uuid,
    amount: Decimal,
    months_per_installment: i32,
    repeat_count: i32,
}

impl TryFrom<OptionRow> for DonationTypeOption {
    type Error = DomainError;

    fn try_from(row: OptionRow) -> Result<Self, Self::Error> {
        let amount = Amount::try_new(row.amount).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored amount: {}", e))
        })?;
        Ok(DonationTypeOption::from_stored(
            DonationTypeOptionId::from_uuid(row.id),
            DonationTypeId::from_uuid(row.donation_type_id),
            amount,
            row.months_per_installment as u32,
            row.repeat_count as u32,
        ))
    }
}

#[async_trait]
impl DonationTypeOptionRepository for PostgresDonationTypeOptionRepository {
    async fn find_by_id(
        &self,
        id: &DonationTypeOptionId,
    ) -> Result<Option<DonationTypeOption>, DomainError> {
        let row: Option<OptionRow> = sqlx::query_as(
            r#"
            SELECT id, donation_type_id, amount, months_per_installment, repeat_count
            FROM donation_type_options
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load donation type option: {}", e),
            )
        })?;

        row.map(DonationTypeOption::try_from).transpose()
    }
}

/// PostgreSQL implementation of the PromoCodeRepository port.
pub struct PostgresPromoCodeRepository {
    pool: PgPool,
}

impl PostgresPromoCodeRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PromoRow {
    id: Uuid,
    code: String,
    discount_percent: Decimal,
}

impl TryFrom<PromoRow> for PromoCode {
    type Error = DomainError;

    fn try_from(row: PromoRow) -> Result<Self, Self::Error> {
        let discount = DiscountPercent::try_new(row.discount_percent).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored discount: {}", e))
        })?;
        Ok(PromoCode::from_stored(
            PromoCodeId::from_uuid(row.id),
            row.code,
            discount,
        ))
    }
}

#[async_trait]
impl PromoCodeRepository for PostgresPromoCodeRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
        let row: Option<PromoRow> = sqlx::query_as(
            r#"
            SELECT id, code, discount_percent
            FROM promo_codes
            WHERE code = $1
            "#,
        )
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load promo code: {}", e))
        })?;

        row.map(PromoCode::try_from).transpose()
    }
}
