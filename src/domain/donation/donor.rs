//! Donor entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DonorId, UserId, ValidationError};

use super::address::{Address, Phone};

/// Identity snapshot of an externally-managed account.
///
/// The web layer hands the signed-in account (if any) to the workflow so a
/// donor created while logged in can default blank name fields from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

/// A person making a donation: identity plus optional addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    /// Weak reference to an external account, when the donor was signed in.
    pub user_reference: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub billing_address: Option<Address>,
    pub mailing_address: Option<Address>,
    pub phone: Option<Phone>,
}

impl Donor {
    /// Creates a Donor, default-filling blank names from the account profile.
    ///
    /// The fill is one-way: a name supplied in the submission always wins
    /// over the account's name. After the fill, both names must be present.
    pub fn create(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        account: Option<&AccountProfile>,
    ) -> Result<Self, ValidationError> {
        let mut first_name = first_name.into().trim().to_string();
        let mut last_name = last_name.into().trim().to_string();

        if let Some(profile) = account {
            if first_name.is_empty() {
                first_name = profile.first_name.clone();
            }
            if last_name.is_empty() {
                last_name = profile.last_name.clone();
            }
        }

        if first_name.is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        if last_name.is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }

        Ok(Self {
            id: DonorId::new(),
            user_reference: account.map(|profile| profile.id.clone()),
            first_name,
            last_name,
            billing_address: None,
            mailing_address: None,
            phone: None,
        })
    }

    /// Attaches a billing address.
    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    /// Attaches a mailing address.
    pub fn with_mailing_address(mut self, address: Address) -> Self {
        self.mailing_address = Some(address);
        self
    }

    /// Attaches a phone number.
    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Returns "First Last" for billing and display purposes.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Donor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountProfile {
        AccountProfile {
            id: UserId::new("account-7").unwrap(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[test]
    fn donor_keeps_supplied_names() {
        let donor = Donor::create("Grace", "Hopper", None).unwrap();
        assert_eq!(donor.first_name, "Grace");
        assert_eq!(donor.last_name, "Hopper");
        assert!(donor.user_reference.is_none());
    }

    #[test]
    fn blank_names_are_filled_from_account() {
        let profile = account();
        let donor = Donor::create("", "", Some(&profile)).unwrap();
        assert_eq!(donor.first_name, "Ada");
        assert_eq!(donor.last_name, "Lovelace");
        assert_eq!(donor.user_reference, Some(profile.id));
    }

    #[test]
    fn supplied_name_is_never_overwritten_by_account() {
        let profile = account();
        let donor = Donor::create("Grace", "", Some(&profile)).unwrap();
        assert_eq!(donor.first_name, "Grace");
        assert_eq!(donor.last_name, "Lovelace");
    }

    #[test]
    fn blank_names_without_account_are_rejected() {
        assert!(matches!(
            Donor::create("", "Hopper", None),
            Err(ValidationError::EmptyField { ref field }) if field == "first_name"
        ));
        assert!(matches!(
            Donor::create("Grace", "", None),
            Err(ValidationError::EmptyField { ref field }) if field == "last_name"
        ));
    }

    #[test]
    fn names_are_trimmed() {
        let donor = Donor::create("  Grace ", " Hopper  ", None).unwrap();
        assert_eq!(donor.full_name(), "Grace Hopper");
    }

    #[test]
    fn addresses_and_phone_are_optional() {
        let donor = Donor::create("Grace", "Hopper", None).unwrap();
        assert!(donor.billing_address.is_none());
        assert!(donor.mailing_address.is_none());
        assert!(donor.phone.is_none());
    }

    #[test]
    fn builder_style_attachment_works() {
        let billing = Address::try_new("1 Navy Way", "Arlington", "VA", "22202").unwrap();
        let donor = Donor::create("Grace", "Hopper", None)
            .unwrap()
            .with_billing_address(billing.clone())
            .with_mailing_address(billing.clone())
            .with_phone(Phone::try_new("7035550100").unwrap());

        assert_eq!(donor.billing_address, Some(billing.clone()));
        assert_eq!(donor.mailing_address, Some(billing));
        assert!(donor.phone.is_some());
    }

    #[test]
    fn donor_displays_full_name() {
        let donor = Donor::create("Grace", "Hopper", None).unwrap();
        assert_eq!(format!("{}", donor), "Grace Hopper");
    }
}
