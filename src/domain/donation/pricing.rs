//! Pricing engine: pure charge-amount resolution.
//!
//! No side effects, no I/O, decimal arithmetic throughout. The same inputs
//! always produce the same cents, which is what makes charge records
//! auditable against gateway statements.

use thiserror::Error;

use crate::domain::foundation::Amount;

use super::donation_type::DonationTypeOption;
use super::promo_code::PromoCode;

/// Errors from charge-amount resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Neither an explicit amount nor a donation type option was supplied.
    #[error("no amount given and no donation type to take one from")]
    MissingAmount,
}

/// Resolves the base charge amount before any discount.
///
/// An explicit amount always wins; otherwise the option's catalog amount is
/// used.
///
/// # Errors
///
/// Returns [`PricingError::MissingAmount`] when neither source is present.
pub fn resolve_base_amount(
    explicit_amount: Option<Amount>,
    option: Option<&DonationTypeOption>,
) -> Result<Amount, PricingError> {
    match (explicit_amount, option) {
        (Some(amount), _) => Ok(amount),
        (None, Some(option)) => Ok(option.amount),
        (None, None) => Err(PricingError::MissingAmount),
    }
}

/// Applies an optional promo code to an amount.
///
/// Without a code the amount passes through unchanged. With one, the
/// discounted amount is rounded half-up at the cent boundary and is always
/// in `[0, amount]`.
pub fn apply_promo(amount: Amount, promo: Option<&PromoCode>) -> Amount {
    match promo {
        Some(promo) => promo.apply(amount),
        None => amount,
    }
}

/// Full resolution: base amount first, then the discount.
///
/// The order matters — the discount always applies to the resolved base
/// (explicit or catalog), never the other way around.
pub fn resolve_amount(
    explicit_amount: Option<Amount>,
    option: Option<&DonationTypeOption>,
    promo: Option<&PromoCode>,
) -> Result<Amount, PricingError> {
    let base = resolve_base_amount(explicit_amount, option)?;
    Ok(apply_promo(base, promo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DiscountPercent, DonationTypeId};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn catalog_option(dollars: u32) -> DonationTypeOption {
        DonationTypeOption::one_time(DonationTypeId::new(), Amount::from_dollars(dollars)).unwrap()
    }

    fn promo(percent: u8) -> PromoCode {
        PromoCode::try_new("TEST", DiscountPercent::from_whole(percent).unwrap()).unwrap()
    }

    #[test]
    fn explicit_amount_wins_over_catalog_amount() {
        let option = catalog_option(100);
        let resolved =
            resolve_base_amount(Some(Amount::from_dollars(50)), Some(&option)).unwrap();
        assert_eq!(resolved, Amount::from_dollars(50));
    }

    #[test]
    fn catalog_amount_is_used_when_no_explicit_amount() {
        let option = catalog_option(100);
        let resolved = resolve_base_amount(None, Some(&option)).unwrap();
        assert_eq!(resolved, Amount::from_dollars(100));
    }

    #[test]
    fn missing_both_sources_is_an_error() {
        assert_eq!(
            resolve_base_amount(None, None),
            Err(PricingError::MissingAmount)
        );
    }

    #[test]
    fn no_promo_passes_amount_through() {
        assert_eq!(
            apply_promo(Amount::from_dollars(50), None),
            Amount::from_dollars(50)
        );
    }

    #[test]
    fn discount_applies_to_catalog_base() {
        let option = catalog_option(100);
        let code = promo(25);
        let resolved = resolve_amount(None, Some(&option), Some(&code)).unwrap();
        assert_eq!(resolved, Amount::from_dollars(75));
    }

    #[test]
    fn discount_applies_to_explicit_base() {
        let code = promo(25);
        let resolved =
            resolve_amount(Some(Amount::from_dollars(100)), None, Some(&code)).unwrap();
        assert_eq!(resolved, Amount::from_dollars(75));
    }

    #[test]
    fn discount_on_missing_amount_still_errors() {
        let code = promo(25);
        assert_eq!(
            resolve_amount(None, None, Some(&code)),
            Err(PricingError::MissingAmount)
        );
    }

    proptest! {
        /// For any amount and percent, the discounted amount stays within
        /// [0, amount] and lands on a whole number of cents.
        #[test]
        fn discounted_amount_is_bounded_and_cent_aligned(
            cents in 0u64..=10_000_000,
            percent in 0u8..=100,
        ) {
            let amount = Amount::try_new(Decimal::new(cents as i64, 2)).unwrap();
            let code = promo(percent);
            let discounted = apply_promo(amount, Some(&code));

            prop_assert!(discounted <= amount);
            prop_assert!(discounted >= Amount::ZERO);
            // Two decimal places: scaling by 100 yields an integer.
            let scaled = discounted.value() * Decimal::ONE_HUNDRED;
            prop_assert_eq!(scaled.fract(), Decimal::ZERO);
        }

        /// Zero percent is the identity, one hundred percent is zero.
        #[test]
        fn boundary_percents_behave(cents in 0u64..=10_000_000) {
            let amount = Amount::try_new(Decimal::new(cents as i64, 2)).unwrap();
            prop_assert_eq!(apply_promo(amount, Some(&promo(0))), amount);
            prop_assert_eq!(apply_promo(amount, Some(&promo(100))), Amount::ZERO);
        }

        /// Resolution is deterministic: the same inputs give the same cents.
        #[test]
        fn resolution_is_deterministic(
            cents in 1u64..=10_000_000,
            percent in 0u8..=100,
        ) {
            let amount = Amount::try_new(Decimal::new(cents as i64, 2)).unwrap();
            let code = promo(percent);
            let first = resolve_amount(Some(amount), None, Some(&code)).unwrap();
            let second = resolve_amount(Some(amount), None, Some(&code)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
