//! Taxpayer records and their line-oriented storage codec.
//!
//! One record per line, fields joined by `|` in this order:
//!
//! ```text
//! username|password|nationalId|fullName|monthlyIncome|dependents|propertyValue|vehicleValue|isAdmin|paid
//! ```
//!
//! Decoding never fails: a missing field or a field that does not convert
//! falls back to the zero value of its type.

use crate::{Money, commands::TaxpayerEdit};

/// Field separator of the roster file.
pub const FIELD_DELIMITER: &str = "|";

/// Number of fields in a stored line. The last one absorbs any extra text.
pub const FIELD_COUNT: usize = 10;

/// Access level of a logged in identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Citizen,
    Administrator,
}

/// A single account of the roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Taxpayer {
    pub username: String,
    /// Stored as plain text.
    pub password: String,
    pub national_id: String,
    pub full_name: String,
    pub monthly_income: Money,
    pub property_value: Money,
    pub vehicle_value: Money,
    pub dependents: u32,
    /// Whether this period's tax has been marked paid.
    pub paid: bool,
    pub is_admin: bool,
}

impl Taxpayer {
    #[must_use]
    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Administrator
        } else {
            Role::Citizen
        }
    }

    /// Decodes one roster line.
    ///
    /// The line is split into at most [`FIELD_COUNT`] parts, so a stray
    /// delimiter ends up inside the `paid` field and turns it into `false`.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let mut fields = line.splitn(FIELD_COUNT, FIELD_DELIMITER);
        let mut next = || fields.next().unwrap_or_default();

        let username = next().to_string();
        let password = next().to_string();
        let national_id = next().to_string();
        let full_name = next().to_string();
        let monthly_income = Money::parse_stored(next()).unwrap_or_default();
        let dependents = next().trim().parse::<u32>().unwrap_or_default();
        let property_value = Money::parse_stored(next()).unwrap_or_default();
        let vehicle_value = Money::parse_stored(next()).unwrap_or_default();
        let is_admin = parse_flag(next());
        let paid = parse_flag(next());

        Self {
            username,
            password,
            national_id,
            full_name,
            monthly_income,
            property_value,
            vehicle_value,
            dependents,
            paid,
            is_admin,
        }
    }

    /// Encodes the record as one roster line, without the trailing newline.
    ///
    /// Values are written verbatim: a `|` inside a text field shifts the
    /// columns of that line on the next load.
    #[must_use]
    pub fn to_line(&self) -> String {
        [
            self.username.clone(),
            self.password.clone(),
            self.national_id.clone(),
            self.full_name.clone(),
            self.monthly_income.to_storage(),
            self.dependents.to_string(),
            self.property_value.to_storage(),
            self.vehicle_value.to_storage(),
            flag_text(self.is_admin).to_string(),
            flag_text(self.paid).to_string(),
        ]
        .join(FIELD_DELIMITER)
    }

    /// Overwrites exactly one field.
    pub fn apply(&mut self, edit: TaxpayerEdit) {
        match edit {
            TaxpayerEdit::FullName(value) => self.full_name = value,
            TaxpayerEdit::NationalId(value) => self.national_id = value,
            TaxpayerEdit::MonthlyIncome(value) => self.monthly_income = value,
            TaxpayerEdit::PropertyValue(value) => self.property_value = value,
            TaxpayerEdit::VehicleValue(value) => self.vehicle_value = value,
            TaxpayerEdit::Dependents(value) => self.dependents = value,
            TaxpayerEdit::Password(value) => self.password = value,
        }
    }
}

/// Integer text, non-zero meaning `true`. Anything else is `false`.
fn parse_flag(raw: &str) -> bool {
    raw.trim().parse::<i64>().is_ok_and(|value| value != 0)
}

fn flag_text(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn sample() -> Taxpayer {
        Taxpayer {
            username: "budi".to_string(),
            password: "rahasia".to_string(),
            national_id: "3201010101010001".to_string(),
            full_name: "Budi Santoso".to_string(),
            monthly_income: Money::from_major(10_000_000),
            property_value: Money::new(Decimal::new(1_250_000_050, 2)),
            vehicle_value: Money::from_major(200_000_000),
            dependents: 2,
            paid: true,
            is_admin: false,
        }
    }

    #[test]
    fn line_has_fixed_field_order() {
        assert_eq!(
            sample().to_line(),
            "budi|rahasia|3201010101010001|Budi Santoso|10000000|2|12500000.5|200000000|0|1"
        );
    }

    #[test]
    fn line_decodes_back_to_the_same_record() {
        let taxpayer = sample();
        assert_eq!(Taxpayer::from_line(&taxpayer.to_line()), taxpayer);
    }

    #[test]
    fn missing_trailing_fields_default_to_zero() {
        let taxpayer = Taxpayer::from_line("siti|pw|3300|Siti");
        assert_eq!(taxpayer.username, "siti");
        assert_eq!(taxpayer.full_name, "Siti");
        assert_eq!(taxpayer.monthly_income, Money::ZERO);
        assert_eq!(taxpayer.dependents, 0);
        assert!(!taxpayer.is_admin);
        assert!(!taxpayer.paid);
    }

    #[test]
    fn malformed_numbers_are_coerced() {
        let taxpayer = Taxpayer::from_line("a|b|c|d|lots|-1|x|5e|yes|2");
        assert_eq!(taxpayer.monthly_income, Money::ZERO);
        assert_eq!(taxpayer.dependents, 0);
        assert_eq!(taxpayer.property_value, Money::ZERO);
        assert_eq!(taxpayer.vehicle_value, Money::ZERO);
        assert!(!taxpayer.is_admin);
        assert!(taxpayer.paid);
    }

    #[test]
    fn extra_delimiters_are_absorbed_by_the_last_field() {
        let taxpayer = Taxpayer::from_line("a|b|c|d|1|0|0|0|1|1|extra");
        assert!(taxpayer.is_admin);
        assert!(!taxpayer.paid);
    }

    #[test]
    fn legacy_scientific_amounts_load() {
        let taxpayer = Taxpayer::from_line("a|b|c|d|1.5e+07|1|0|2.5e+08|0|0");
        assert_eq!(taxpayer.monthly_income, Money::from_major(15_000_000));
        assert_eq!(taxpayer.vehicle_value, Money::from_major(250_000_000));
    }

    #[test]
    fn apply_changes_only_the_selected_field() {
        let mut taxpayer = sample();
        taxpayer.apply(TaxpayerEdit::Dependents(4));
        assert_eq!(taxpayer.dependents, 4);
        assert_eq!(taxpayer.full_name, "Budi Santoso");

        taxpayer.apply(TaxpayerEdit::NationalId("999".to_string()));
        assert_eq!(taxpayer.national_id, "999");
        assert_eq!(taxpayer.dependents, 4);
    }
}
