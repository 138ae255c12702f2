//! Donation aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Amount, DonationId, DonorId, Timestamp};

use super::donation_type::DonationTypeOption;
use super::errors::DonationError;
use super::pricing::{self, PricingError};
use super::promo_code::PromoCode;

/// One monetary gift record, possibly the start of a recurring series.
///
/// The charge amount is resolved once at creation (explicit amount wins over
/// the catalog amount; the promo discount applies to that base) and never
/// changes afterwards. `processed` flips false to true exactly once, inside
/// the payment backend's one-time-charge success path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    pub donor_id: DonorId,
    pub donation_type_option: Option<DonationTypeOption>,
    pub promo_code: Option<PromoCode>,
    pub amount: Amount,
    pub created_at: Timestamp,
    processed: bool,
    pub attribution: String,
    pub anonymous: bool,
}

impl Donation {
    /// Creates a Donation, resolving the charge amount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingAmount`] when neither an explicit
    /// amount nor a donation type option is given.
    pub fn create(
        donor_id: DonorId,
        explicit_amount: Option<Amount>,
        donation_type_option: Option<DonationTypeOption>,
        promo_code: Option<PromoCode>,
        attribution: impl Into<String>,
        anonymous: bool,
    ) -> Result<Self, PricingError> {
        let amount = pricing::resolve_amount(
            explicit_amount,
            donation_type_option.as_ref(),
            promo_code.as_ref(),
        )?;

        Ok(Self {
            id: DonationId::new(),
            donor_id,
            donation_type_option,
            promo_code,
            amount,
            created_at: Timestamp::now(),
            processed: false,
            attribution: attribution.into(),
            anonymous,
        })
    }

    /// Reconstitutes a Donation from stored state.
    ///
    /// Used by persistence adapters; performs no amount resolution.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: DonationId,
        donor_id: DonorId,
        donation_type_option: Option<DonationTypeOption>,
        promo_code: Option<PromoCode>,
        amount: Amount,
        created_at: Timestamp,
        processed: bool,
        attribution: String,
        anonymous: bool,
    ) -> Self {
        Self {
            id,
            donor_id,
            donation_type_option,
            promo_code,
            amount,
            created_at,
            processed,
            attribution,
            anonymous,
        }
    }

    /// True once the one-time charge has succeeded.
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// True when the selected option schedules additional billing cycles.
    pub fn is_repeating(&self) -> bool {
        self.donation_type_option
            .as_ref()
            .map(DonationTypeOption::is_repeating)
            .unwrap_or(false)
    }

    /// Marks the donation processed.
    ///
    /// The transition happens exactly once; a second call is a programming
    /// error and is rejected.
    pub fn mark_processed(&mut self) -> Result<(), DonationError> {
        if self.processed {
            return Err(DonationError::already_processed(self.id));
        }
        self.processed = true;
        Ok(())
    }
}

impl fmt::Display for Donation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "donation {} for {}", self.id, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DiscountPercent, DonationTypeId};

    fn monthly_option(dollars: u32, repeat_count: u32) -> DonationTypeOption {
        DonationTypeOption::try_new(
            DonationTypeId::new(),
            Amount::from_dollars(dollars),
            1,
            repeat_count,
        )
        .unwrap()
    }

    fn promo(percent: u8) -> PromoCode {
        PromoCode::try_new("TEST", DiscountPercent::from_whole(percent).unwrap()).unwrap()
    }

    #[test]
    fn explicit_amount_is_kept() {
        let donation = Donation::create(
            DonorId::new(),
            Some(Amount::from_dollars(50)),
            None,
            None,
            "",
            false,
        )
        .unwrap();
        assert_eq!(donation.amount, Amount::from_dollars(50));
        assert!(!donation.is_processed());
    }

    #[test]
    fn catalog_amount_fills_in_when_no_explicit_amount() {
        let option = monthly_option(100, 0);
        let donation =
            Donation::create(DonorId::new(), None, Some(option), None, "", false).unwrap();
        assert_eq!(donation.amount, Amount::from_dollars(100));
    }

    #[test]
    fn promo_discounts_the_resolved_base() {
        let donation = Donation::create(
            DonorId::new(),
            Some(Amount::from_dollars(100)),
            None,
            Some(promo(25)),
            "",
            false,
        )
        .unwrap();
        assert_eq!(donation.amount, Amount::from_dollars(75));
    }

    #[test]
    fn promo_discounts_catalog_amount_too() {
        let option = monthly_option(200, 0);
        let donation =
            Donation::create(DonorId::new(), None, Some(option), Some(promo(50)), "", false)
                .unwrap();
        assert_eq!(donation.amount, Amount::from_dollars(100));
    }

    #[test]
    fn missing_amount_and_option_fails() {
        let result = Donation::create(DonorId::new(), None, None, None, "", false);
        assert_eq!(result.unwrap_err(), PricingError::MissingAmount);
    }

    #[test]
    fn repeating_follows_the_selected_option() {
        let one_time =
            Donation::create(DonorId::new(), None, Some(monthly_option(25, 0)), None, "", false)
                .unwrap();
        let repeating =
            Donation::create(DonorId::new(), None, Some(monthly_option(25, 12)), None, "", false)
                .unwrap();
        let free_form = Donation::create(
            DonorId::new(),
            Some(Amount::from_dollars(25)),
            None,
            None,
            "",
            false,
        )
        .unwrap();

        assert!(!one_time.is_repeating());
        assert!(repeating.is_repeating());
        assert!(!free_form.is_repeating());
    }

    #[test]
    fn mark_processed_transitions_once() {
        let mut donation = Donation::create(
            DonorId::new(),
            Some(Amount::from_dollars(10)),
            None,
            None,
            "",
            false,
        )
        .unwrap();

        assert!(donation.mark_processed().is_ok());
        assert!(donation.is_processed());

        let second = donation.mark_processed();
        assert!(matches!(second, Err(DonationError::AlreadyProcessed(_))));
        assert!(donation.is_processed());
    }

    #[test]
    fn stored_state_roundtrips_amount_exactly() {
        let donation = Donation::create(
            DonorId::new(),
            Some(Amount::parse("87.00").unwrap()),
            None,
            None,
            "in memory of M.",
            true,
        )
        .unwrap();

        let restored = Donation::from_stored(
            donation.id,
            donation.donor_id,
            None,
            None,
            donation.amount,
            donation.created_at,
            donation.is_processed(),
            donation.attribution.clone(),
            donation.anonymous,
        );

        assert_eq!(restored, donation);
        assert_eq!(restored.amount, Amount::parse("87.00").unwrap());
    }
}
