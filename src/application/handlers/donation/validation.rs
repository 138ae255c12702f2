//! Composite validation of a donation submission.
//!
//! All sections validate as one pass — donor fields, both address sections,
//! donation fields, and the payment fields the backend's form contract asks
//! for — so the donor sees every problem at once. Catalog lookups (donation
//! type option, promo code) happen in the handler before this pass; their
//! misses arrive as pre-seeded field errors.

use crate::domain::donation::{
    Address, CardDetails, DonationTypeOption, Donor, Expiration, Phone, PromoCode,
};
use crate::domain::foundation::{Amount, Timestamp, ValidationError};
use crate::ports::{FormContract, PaymentField};

use super::submission::{AddressFields, DonationSubmission, FieldErrors};

/// A submission with every field parsed into domain values.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub donor: Donor,
    pub explicit_amount: Option<Amount>,
    pub option: Option<DonationTypeOption>,
    pub promo: Option<PromoCode>,
    pub card: CardDetails,
    pub attribution: String,
    pub anonymous: bool,
}

impl ValidatedSubmission {
    /// The charge amount this submission resolves to.
    ///
    /// Infallible after validation: a missing amount was already reported.
    pub fn resolved_amount(&self) -> Amount {
        crate::domain::donation::pricing::resolve_amount(
            self.explicit_amount,
            self.option.as_ref(),
            self.promo.as_ref(),
        )
        .unwrap_or(Amount::ZERO)
    }
}

/// Runs the composite validation pass.
///
/// `errors` arrives pre-seeded with catalog lookup failures; this function
/// adds everything else and either returns the parsed submission or the
/// full error set.
pub fn validate(
    submission: &DonationSubmission,
    contract: &FormContract,
    option: Option<DonationTypeOption>,
    promo: Option<PromoCode>,
    mut errors: FieldErrors,
    now: &Timestamp,
) -> Result<ValidatedSubmission, FieldErrors> {
    let donor = validate_donor(submission, &mut errors);
    let billing = validate_address(&submission.billing_address, "billing", &mut errors);
    let mailing = if submission.mailing_same_as_billing {
        billing.clone()
    } else {
        validate_address(&submission.mailing_address, "mailing", &mut errors)
    };
    let explicit_amount = validate_amount(submission, option.as_ref(), &mut errors);
    let card = validate_payment(submission, contract, now, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // All section results are present once the error set is empty.
    let (Some(mut donor), Some(card)) = (donor, card) else {
        return Err(errors);
    };
    donor.billing_address = billing;
    donor.mailing_address = mailing;

    Ok(ValidatedSubmission {
        donor,
        explicit_amount,
        option,
        promo,
        card,
        attribution: submission.donation.attribution.trim().to_string(),
        anonymous: submission.donation.anonymous,
    })
}

/// Donor names (with account default-fill) and optional phone.
fn validate_donor(submission: &DonationSubmission, errors: &mut FieldErrors) -> Option<Donor> {
    let mut donor = match Donor::create(
        submission.donor.first_name.clone(),
        submission.donor.last_name.clone(),
        submission.account.as_ref(),
    ) {
        Ok(donor) => Some(donor),
        Err(err) => {
            errors.add(err.field(), err.to_string());
            None
        }
    };

    let phone_input = submission.donor.phone.trim();
    if !phone_input.is_empty() {
        match Phone::try_new(phone_input) {
            Ok(phone) => {
                if let Some(donor) = donor.as_mut() {
                    donor.phone = Some(phone);
                }
            }
            Err(err) => errors.add("phone", err.to_string()),
        }
    }

    donor
}

/// One address section: omitted entirely, or complete and well-formed.
fn validate_address(
    fields: &AddressFields,
    prefix: &str,
    errors: &mut FieldErrors,
) -> Option<Address> {
    if fields.is_blank() {
        return None;
    }

    let mut incomplete = false;
    for (name, value) in [
        ("street", &fields.street),
        ("city", &fields.city),
        ("state", &fields.state),
        ("postal_code", &fields.postal_code),
    ] {
        if value.trim().is_empty() {
            errors.add(format!("{}_{}", prefix, name), "This field is required");
            incomplete = true;
        }
    }
    if incomplete {
        return None;
    }

    match Address::try_new(
        fields.street.clone(),
        fields.city.clone(),
        fields.state.clone(),
        fields.postal_code.clone(),
    ) {
        Ok(address) => Some(address),
        Err(err) => {
            errors.add(format!("{}_{}", prefix, err.field()), err.to_string());
            None
        }
    }
}

/// Free-form amount, or the catalog fallback check.
fn validate_amount(
    submission: &DonationSubmission,
    option: Option<&DonationTypeOption>,
    errors: &mut FieldErrors,
) -> Option<Amount> {
    let raw = submission.donation.amount.trim();
    if raw.is_empty() {
        if option.is_none() && !errors.has("donation_type_option") {
            errors.add("amount", "Enter an amount or choose a donation type");
        }
        return None;
    }

    match Amount::parse(raw) {
        Ok(amount) if amount.is_positive() => Some(amount),
        Ok(_) => {
            errors.add("amount", "Amount must be greater than zero");
            None
        }
        Err(err) => {
            errors.add("amount", err.to_string());
            None
        }
    }
}

/// Payment fields, driven by the backend's form contract.
fn validate_payment(
    submission: &DonationSubmission,
    contract: &FormContract,
    now: &Timestamp,
    errors: &mut FieldErrors,
) -> Option<CardDetails> {
    let payment = &submission.payment;
    let mut missing = false;

    for (field, value, name) in [
        (PaymentField::CardNumber, &payment.card_number, "card_number"),
        (PaymentField::SecurityCode, &payment.security_code, "security_code"),
        (
            PaymentField::ExpirationMonth,
            &payment.expiration_month,
            "expiration_month",
        ),
        (
            PaymentField::ExpirationYear,
            &payment.expiration_year,
            "expiration_year",
        ),
    ] {
        if contract.requires(field) && value.trim().is_empty() {
            errors.add(name, "This field is required");
            missing = true;
        }
    }
    if missing {
        return None;
    }

    let month: u8 = match payment.expiration_month.trim().parse() {
        Ok(month) => month,
        Err(_) => {
            errors.add("expiration_month", "Not a valid month");
            return None;
        }
    };
    let year: u16 = match payment.expiration_year.trim().parse() {
        Ok(year) => year,
        Err(_) => {
            errors.add("expiration_year", "Not a valid year");
            return None;
        }
    };

    let expiration = match Expiration::try_new(month, year) {
        Ok(expiration) => expiration,
        Err(err) => {
            errors.add(payment_error_field(&err), err.to_string());
            return None;
        }
    };
    if expiration.is_expired(now) {
        errors.add("expiration_year", "This card has expired");
        return None;
    }

    match CardDetails::try_new(
        payment.card_number.clone(),
        payment.security_code.clone(),
        expiration,
    ) {
        Ok(card) => Some(card),
        Err(err) => {
            errors.add(payment_error_field(&err), err.to_string());
            None
        }
    }
}

/// Maps value-object error fields back to submission field names.
fn payment_error_field(err: &ValidationError) -> &'static str {
    match err.field() {
        "card_number" | "card_number_length" => "card_number",
        "security_code" => "security_code",
        "expiration_month" => "expiration_month",
        _ => "expiration_year",
    }
}
