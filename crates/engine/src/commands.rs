//! Command structs for engine operations.
//!
//! These types group parameters for write operations (registration, record
//! edits, payment toggles), keeping call sites readable and avoiding long
//! argument lists.

use crate::Money;

/// Data collected by the registration form.
#[derive(Clone, Debug, Default)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    pub full_name: String,
    pub national_id: String,
    pub monthly_income: Money,
    pub dependents: u32,
    pub property_value: Money,
    pub vehicle_value: Money,
}

impl Registration {
    #[must_use]
    pub fn new(username: impl Into<String>, national_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            national_id: national_id.into(),
            ..Self::default()
        }
    }

    /// Sets both the password and its confirmation.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password_confirmation = password.clone();
        self.password = password;
        self
    }

    #[must_use]
    pub fn password_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirmation = confirmation.into();
        self
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    #[must_use]
    pub fn monthly_income(mut self, amount: Money) -> Self {
        self.monthly_income = amount;
        self
    }

    #[must_use]
    pub fn dependents(mut self, dependents: u32) -> Self {
        self.dependents = dependents;
        self
    }

    #[must_use]
    pub fn property_value(mut self, amount: Money) -> Self {
        self.property_value = amount;
        self
    }

    #[must_use]
    pub fn vehicle_value(mut self, amount: Money) -> Self {
        self.vehicle_value = amount;
        self
    }
}

/// A single-field change applied by the administrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaxpayerEdit {
    FullName(String),
    /// Not checked against the other records.
    NationalId(String),
    MonthlyIncome(Money),
    PropertyValue(Money),
    VehicleValue(Money),
    Dependents(u32),
    Password(String),
}

impl TaxpayerEdit {
    /// Name of the edited field, safe to log.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            TaxpayerEdit::FullName(_) => "full name",
            TaxpayerEdit::NationalId(_) => "national id",
            TaxpayerEdit::MonthlyIncome(_) => "monthly income",
            TaxpayerEdit::PropertyValue(_) => "property value",
            TaxpayerEdit::VehicleValue(_) => "vehicle value",
            TaxpayerEdit::Dependents(_) => "dependents",
            TaxpayerEdit::Password(_) => "password",
        }
    }
}

/// Manual payment status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentChoice {
    Paid,
    Unpaid,
    Cancel,
}
