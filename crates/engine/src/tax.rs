//! Tax computation.
//!
//! Pure functions of a [`Taxpayer`]'s financial fields. Nothing here touches
//! the roster.
//!
//! Three taxes are levied per year:
//!
//! - income tax: a progressive schedule applied to the annual income above the
//!   exemption floor (54,000,000 plus 4,500,000 for each of up to three
//!   dependents), skipped entirely when the monthly income is below
//!   4,500,000;
//! - property tax: 0.1% of the property value;
//! - vehicle tax: 2% of the vehicle value.

use rust_decimal::Decimal;

use crate::{Money, Taxpayer};

/// Monthly income below which no income tax is due.
pub const INCOME_EXEMPTION_THRESHOLD: Decimal = Decimal::from_parts(4_500_000, 0, 0, false, 0);

/// Annual exemption floor without dependents.
pub const BASE_EXEMPTION: Decimal = Decimal::from_parts(54_000_000, 0, 0, false, 0);

/// Extra annual exemption per dependent.
pub const DEPENDENT_EXEMPTION: Decimal = Decimal::from_parts(4_500_000, 0, 0, false, 0);

/// Dependents above this count do not raise the exemption floor.
pub const MAX_DEPENDENTS: u32 = 3;

/// Progressive schedule: `(upper bound of the bracket, marginal rate)`.
/// The last bracket has no upper bound.
const BRACKETS: [(Option<Decimal>, Decimal); 5] = [
    (
        Some(Decimal::from_parts(60_000_000, 0, 0, false, 0)),
        Decimal::from_parts(5, 0, 0, false, 2),
    ),
    (
        Some(Decimal::from_parts(250_000_000, 0, 0, false, 0)),
        Decimal::from_parts(15, 0, 0, false, 2),
    ),
    (
        Some(Decimal::from_parts(500_000_000, 0, 0, false, 0)),
        Decimal::from_parts(25, 0, 0, false, 2),
    ),
    (
        // 5,000,000,000 does not fit the low 32 bits.
        Some(Decimal::from_parts(705_032_704, 1, 0, false, 0)),
        Decimal::from_parts(30, 0, 0, false, 2),
    ),
    (None, Decimal::from_parts(35, 0, 0, false, 2)),
];

const PROPERTY_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);
const VEHICLE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// `true` when the monthly income is below the exemption threshold.
#[must_use]
pub fn is_income_exempt(taxpayer: &Taxpayer) -> bool {
    taxpayer.monthly_income.amount() < INCOME_EXEMPTION_THRESHOLD
}

/// `true` when the taxpayer owns property or a vehicle.
#[must_use]
pub fn has_taxable_assets(taxpayer: &Taxpayer) -> bool {
    taxpayer.property_value.is_positive() || taxpayer.vehicle_value.is_positive()
}

/// Whether the roster overview marks the taxpayer as liable.
///
/// Kept separate from `!is_income_exempt || has_taxable_assets`: this is the
/// predicate behind the administrator listing, the other pair gates the
/// "not required to pay" notices.
#[must_use]
pub fn is_liable_for_tax(taxpayer: &Taxpayer) -> bool {
    taxpayer.monthly_income.amount() >= INCOME_EXEMPTION_THRESHOLD
        || taxpayer.property_value.is_positive()
        || taxpayer.vehicle_value.is_positive()
}

/// Annual income tax for a monthly income and number of dependents.
#[must_use]
pub fn income_tax(monthly_income: Money, dependents: u32) -> Money {
    let annual_income = monthly_income.amount().saturating_mul(Decimal::from(12));
    let capped_dependents = Decimal::from(dependents.min(MAX_DEPENDENTS));
    let exemption_floor =
        BASE_EXEMPTION.saturating_add(capped_dependents.saturating_mul(DEPENDENT_EXEMPTION));

    let taxable_income = annual_income.saturating_sub(exemption_floor);
    if taxable_income <= Decimal::ZERO {
        return Money::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for (upper, rate) in BRACKETS {
        let ceiling = upper.map_or(taxable_income, |upper| upper.min(taxable_income));
        tax = tax.saturating_add(ceiling.saturating_sub(lower).saturating_mul(rate));
        match upper {
            Some(upper) if taxable_income > upper => lower = upper,
            _ => break,
        }
    }

    Money::new(tax)
}

/// Annual property tax.
#[must_use]
pub fn property_tax(property_value: Money) -> Money {
    property_value.apply_rate(PROPERTY_RATE)
}

/// Annual vehicle tax.
#[must_use]
pub fn vehicle_tax(vehicle_value: Money) -> Money {
    vehicle_value.apply_rate(VEHICLE_RATE)
}

/// Total annual tax. Used for ranking, payment amounts and reports.
#[must_use]
pub fn total_tax(taxpayer: &Taxpayer) -> Money {
    TaxBreakdown::of(taxpayer).total()
}

/// The three components of a taxpayer's annual tax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub income: Money,
    pub property: Money,
    pub vehicle: Money,
}

impl TaxBreakdown {
    #[must_use]
    pub fn of(taxpayer: &Taxpayer) -> Self {
        let income = if is_income_exempt(taxpayer) {
            Money::ZERO
        } else {
            income_tax(taxpayer.monthly_income, taxpayer.dependents)
        };
        Self {
            income,
            property: property_tax(taxpayer.property_value),
            vehicle: vehicle_tax(taxpayer.vehicle_value),
        }
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.income + self.property + self.vehicle
    }
}

/// Everything the reports need to know about one taxpayer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assessment {
    pub income_exempt: bool,
    pub has_assets: bool,
    pub liable: bool,
    pub breakdown: TaxBreakdown,
}

impl Assessment {
    /// No income tax and nothing else to tax: payment is not required.
    #[must_use]
    pub fn payment_required(&self) -> bool {
        !(self.income_exempt && !self.has_assets)
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.breakdown.total()
    }
}

/// Evaluates all predicates and amounts for `taxpayer`.
#[must_use]
pub fn assess(taxpayer: &Taxpayer) -> Assessment {
    Assessment {
        income_exempt: is_income_exempt(taxpayer),
        has_assets: has_taxable_assets(taxpayer),
        liable: is_liable_for_tax(taxpayer),
        breakdown: TaxBreakdown::of(taxpayer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rp(amount: i64) -> Money {
        Money::from_major(amount)
    }

    fn taxpayer(income: i64, dependents: u32, property: i64, vehicle: i64) -> Taxpayer {
        Taxpayer {
            username: "t".to_string(),
            monthly_income: rp(income),
            dependents,
            property_value: rp(property),
            vehicle_value: rp(vehicle),
            ..Taxpayer::default()
        }
    }

    #[test]
    fn bracket_bounds_are_exact() {
        assert_eq!(BRACKETS[3].0, Some(Decimal::from(5_000_000_000_i64)));
    }

    #[test]
    fn no_income_no_tax() {
        assert_eq!(income_tax(Money::ZERO, 0), Money::ZERO);
    }

    #[test]
    fn income_below_floor_is_untaxed() {
        // 4.5M * 12 = 54M, exactly the floor.
        assert_eq!(income_tax(rp(4_500_000), 0), Money::ZERO);
        assert_eq!(income_tax(rp(5_000_000), 3), Money::ZERO);
    }

    #[test]
    fn second_bracket_matches_literal_value() {
        // 120M - 54M = 66M taxable: 60M * 5% + 6M * 15%.
        assert_eq!(income_tax(rp(10_000_000), 0), rp(3_900_000));
    }

    #[test]
    fn first_bracket_only() {
        // 72M - 58.5M = 13.5M taxable at 5%.
        assert_eq!(income_tax(rp(6_000_000), 1), rp(675_000));
    }

    #[test]
    fn every_bracket_is_cumulative() {
        let first = Decimal::from(3_000_000);
        let second = Decimal::from(28_500_000);
        let third = Decimal::from(62_500_000);
        let fourth = Decimal::from(1_350_000_000);

        // taxable 300M: third bracket.
        let monthly = (300_000_000 + 54_000_000) / 12;
        assert_eq!(
            income_tax(rp(monthly), 0).amount(),
            first + second + Decimal::from(12_500_000)
        );

        // taxable 600M: fourth bracket.
        let monthly = (600_000_000 + 54_000_000) / 12;
        assert_eq!(
            income_tax(rp(monthly), 0).amount(),
            first + second + third + Decimal::from(30_000_000)
        );

        // taxable 6,000M: top bracket.
        let monthly = (6_000_000_000_i64 + 54_000_000) / 12;
        assert_eq!(
            income_tax(rp(monthly), 0).amount(),
            first + second + third + fourth + Decimal::from(350_000_000)
        );
    }

    #[test]
    fn dependents_are_capped_at_three() {
        for income in [8_000_000, 25_000_000, 90_000_000] {
            assert_eq!(income_tax(rp(income), 3), income_tax(rp(income), 10));
        }
        assert!(income_tax(rp(8_000_000), 2) > income_tax(rp(8_000_000), 3));
    }

    #[test]
    fn income_tax_is_monotonic_in_income() {
        for dependents in [0, 1, 3, 7] {
            let mut previous = Money::ZERO;
            for step in 0..200_i64 {
                let current = income_tax(rp(step * 2_750_000), dependents);
                assert!(current >= previous, "income step {step}");
                previous = current;
            }
        }
    }

    #[test]
    fn asset_taxes_use_flat_rates() {
        assert_eq!(property_tax(rp(1_000_000)), rp(1_000));
        assert_eq!(vehicle_tax(rp(1_000_000)), rp(20_000));
    }

    #[test]
    fn total_is_sum_of_components() {
        let t = taxpayer(10_000_000, 0, 1_000_000, 1_000_000);
        assert_eq!(total_tax(&t), rp(3_900_000 + 1_000 + 20_000));
    }

    #[test]
    fn exempt_income_forces_income_component_to_zero() {
        let t = taxpayer(4_000_000, 0, 0, 1_000_000);
        let breakdown = TaxBreakdown::of(&t);
        assert_eq!(breakdown.income, Money::ZERO);
        assert_eq!(total_tax(&t), rp(20_000));
    }

    #[test]
    fn liability_and_notice_predicates_stay_distinct() {
        // Not exempt, but the income is still under the floor: liable with a
        // zero total.
        let t = taxpayer(4_500_000, 0, 0, 0);
        assert!(!is_income_exempt(&t));
        assert!(!has_taxable_assets(&t));
        assert!(is_liable_for_tax(&t));
        assert_eq!(total_tax(&t), Money::ZERO);

        let poor = taxpayer(1_000_000, 0, 0, 0);
        let assessment = assess(&poor);
        assert!(assessment.income_exempt);
        assert!(!assessment.liable);
        assert!(!assessment.payment_required());

        let owner = taxpayer(1_000_000, 0, 5_000_000, 0);
        assert!(assess(&owner).payment_required());
        assert!(is_liable_for_tax(&owner));
    }
}
