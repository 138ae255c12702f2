//! PostgreSQL implementation of DonationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::donation::{Donation, DonationTypeOption, PromoCode};
use crate::domain::foundation::{
    Amount, DiscountPercent, DomainError, DonationId, DonationTypeId, DonationTypeOptionId,
    DonorId, ErrorCode, PromoCodeId, Timestamp,
};
use crate::ports::DonationRepository;

/// PostgreSQL implementation of the DonationRepository port.
///
/// The donation row stores references to the catalog option and promo code;
/// loading a donation re-joins both so the aggregate comes back complete.
pub struct PostgresDonationRepository {
    pool: PgPool,
}

impl PostgresDonationRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a donation with joined catalog data.
#[derive(Debug, sqlx::FromRow)]
struct DonationRow {
    id: Uuid,
    donor_id: Uuid,
    donation_type_option_id: Option<Uuid>,
    promo_code_id: Option<Uuid>,
    amount: Decimal,
    created_at: DateTime<Utc>,
    processed: bool,
    attribution: String,
    anonymous: bool,
    option_donation_type_id: Option<Uuid>,
    option_amount: Option<Decimal>,
    option_months_per_installment: Option<i32>,
    option_repeat_count: Option<i32>,
    promo_code: Option<String>,
    promo_discount_percent: Option<Decimal>,
}

impl TryFrom<DonationRow> for Donation {
    type Error = DomainError;

    fn try_from(row: DonationRow) -> Result<Self, Self::Error> {
        let option = match (
            row.donation_type_option_id,
            row.option_donation_type_id,
            row.option_amount,
            row.option_months_per_installment,
            row.option_repeat_count,
        ) {
            (Some(id), Some(type_id), Some(amount), Some(months), Some(repeat)) => {
                Some(DonationTypeOption::from_stored(
                    DonationTypeOptionId::from_uuid(id),
                    DonationTypeId::from_uuid(type_id),
                    stored_amount(amount)?,
                    months as u32,
                    repeat as u32,
                ))
            }
            _ => None,
        };

        let promo_code = match (row.promo_code_id, row.promo_code, row.promo_discount_percent) {
            (Some(id), Some(code), Some(percent)) => {
                let discount = DiscountPercent::try_new(percent).map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid stored discount: {}", e),
                    )
                })?;
                Some(PromoCode::from_stored(
                    PromoCodeId::from_uuid(id),
                    code,
                    discount,
                ))
            }
            _ => None,
        };

        Ok(Donation::from_stored(
            DonationId::from_uuid(row.id),
            DonorId::from_uuid(row.donor_id),
            option,
            promo_code,
            stored_amount(row.amount)?,
            Timestamp::from_datetime(row.created_at),
            row.processed,
            row.attribution,
            row.anonymous,
        ))
    }
}

fn stored_amount(value: Decimal) -> Result<Amount, DomainError> {
    Amount::try_new(value).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored amount: {}", e))
    })
}

#[async_trait]
impl DonationRepository for PostgresDonationRepository {
    async fn insert(&self, donation: &Donation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                id, donor_id, donation_type_option_id, promo_code_id,
                amount, created_at, processed, attribution, anonymous
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(donation.id.as_uuid())
        .bind(donation.donor_id.as_uuid())
        .bind(
            donation
                .donation_type_option
                .as_ref()
                .map(|option| option.id.as_uuid()),
        )
        .bind(donation.promo_code.as_ref().map(|promo| promo.id.as_uuid()))
        .bind(donation.amount.value())
        .bind(donation.created_at.as_datetime())
        .bind(donation.is_processed())
        .bind(&donation.attribution)
        .bind(donation.anonymous)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save donation: {}", e))
        })?;
        Ok(())
    }

    async fn update(&self, donation: &Donation) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE donations SET processed = $2 WHERE id = $1
            "#,
        )
        .bind(donation.id.as_uuid())
        .bind(donation.is_processed())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update donation: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DonationNotFound,
                format!("Donation {} not found", donation.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DomainError> {
        let row: Option<DonationRow> = sqlx::query_as(
            r#"
            SELECT
                d.id, d.donor_id, d.donation_type_option_id, d.promo_code_id,
                d.amount, d.created_at, d.processed, d.attribution, d.anonymous,
                o.donation_type_id AS option_donation_type_id,
                o.amount AS option_amount,
                o.months_per_installment AS option_months_per_installment,
                o.repeat_count AS option_repeat_count,
                p.code AS promo_code,
                p.discount_percent AS promo_discount_percent
            FROM donations d
            LEFT JOIN donation_type_options o ON o.id = d.donation_type_option_id
            LEFT JOIN promo_codes p ON p.id = d.promo_code_id
            WHERE d.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load donation: {}", e))
        })?;

        row.map(Donation::try_from).transpose()
    }
}
