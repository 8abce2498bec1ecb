//! Plain-text rendering of profiles, tax reports and administrator tables.

use std::fmt::Write as _;

use engine::{RosterEntry, Taxpayer, tax};

pub const NOT_REQUIRED_NOTICE: &str = "You are not required to pay tax.";

const RULE: &str = "------------------------------------------";

fn paid_label(paid: bool) -> &'static str {
    if paid { "PAID" } else { "UNPAID" }
}

pub fn profile(taxpayer: &Taxpayer) -> String {
    let mut out = String::from("\n--- YOUR PROFILE ---\n");
    let _ = writeln!(out, "Username      : {}", taxpayer.username);
    let _ = writeln!(out, "Name          : {}", taxpayer.full_name);
    let _ = writeln!(out, "National ID   : {}", taxpayer.national_id);
    let _ = writeln!(out, "Income        : {}", taxpayer.monthly_income);
    let _ = writeln!(out, "Property      : {}", taxpayer.property_value);
    let _ = writeln!(out, "Vehicle       : {}", taxpayer.vehicle_value);
    let _ = writeln!(out, "Dependents    : {}", taxpayer.dependents);
    let _ = writeln!(out, "Tax status    : {}", paid_label(taxpayer.paid));

    if !tax::assess(taxpayer).payment_required() {
        let _ = writeln!(out, "\n{NOT_REQUIRED_NOTICE}");
    }
    out
}

/// Yearly amounts, or the notice when nothing is due.
pub fn tax_calculation(taxpayer: &Taxpayer) -> String {
    let assessment = tax::assess(taxpayer);
    if !assessment.payment_required() {
        return format!("\n{NOT_REQUIRED_NOTICE}\n");
    }

    let breakdown = assessment.breakdown;
    let mut out = String::from("\n--- YOUR TAX CALCULATION ---\n");
    let _ = writeln!(out, "Income tax / year     : {}", breakdown.income);
    let _ = writeln!(out, "Property tax / year   : {}", breakdown.property);
    let _ = writeln!(out, "Vehicle tax / year    : {}", breakdown.vehicle);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total annual tax      : {}", breakdown.total());
    out
}

pub fn annual_report(taxpayer: &Taxpayer, year: i32) -> String {
    let mut out = format!("\n--- ANNUAL TAX REPORT {year} ---\n");
    let _ = writeln!(out, "Username      : {}", taxpayer.username);
    let _ = writeln!(out, "Name          : {}", taxpayer.full_name);
    let _ = writeln!(out, "National ID   : {}", taxpayer.national_id);
    let _ = writeln!(out, "{RULE}");

    if !tax::assess(taxpayer).payment_required() {
        let _ = writeln!(out, "\n{NOT_REQUIRED_NOTICE}");
        return out;
    }

    out.push_str(&tax_calculation(taxpayer));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Payment status : {}", paid_label(taxpayer.paid));
    out
}

pub fn roster_table(entries: &[RosterEntry<'_>]) -> String {
    if entries.is_empty() {
        return "No registered taxpayers.\n".to_string();
    }

    let mut out = String::from("\n--- ALL TAXPAYERS ---\n");
    let _ = writeln!(
        out,
        "{:<15}{:<25}{:<20}{:<15}{:<15}{:<15}",
        "Username", "Full name", "National ID", "Income", "Paid", "Liable"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));
    for entry in entries {
        let taxpayer = entry.taxpayer;
        let _ = writeln!(
            out,
            "{:<15}{:<25}{:<20}{:<15}{:<15}{:<15}",
            taxpayer.username,
            taxpayer.full_name,
            taxpayer.national_id,
            taxpayer.monthly_income.amount().round_dp(0).to_string(),
            if taxpayer.paid { "Yes" } else { "No" },
            if entry.liable { "Liable" } else { "Exempt" },
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(100));
    out
}

pub fn taxpayer_details(taxpayer: &Taxpayer) -> String {
    let mut out = String::from("\n--- Taxpayer found ---\n");
    let _ = writeln!(out, "Username      : {}", taxpayer.username);
    let _ = writeln!(out, "Name          : {}", taxpayer.full_name);
    let _ = writeln!(out, "National ID   : {}", taxpayer.national_id);
    let _ = writeln!(out, "Income        : {}", taxpayer.monthly_income);
    let _ = writeln!(out, "Property      : {}", taxpayer.property_value);
    let _ = writeln!(out, "Vehicle       : {}", taxpayer.vehicle_value);
    let _ = writeln!(out, "Dependents    : {}", taxpayer.dependents);
    let _ = writeln!(out, "Payment       : {}", paid_label(taxpayer.paid));
    out
}

pub fn ranking_table(taxpayers: &[Taxpayer]) -> String {
    if taxpayers.is_empty() {
        return "No taxpayers to sort.\n".to_string();
    }

    let mut out = String::from("\n--- TAXPAYERS BY TOTAL TAX (HIGHEST FIRST) ---\n");
    let _ = writeln!(
        out,
        "{:<15}{:<25}{:<20}",
        "Username", "Full name", "Total tax"
    );
    let _ = writeln!(out, "{}", "-".repeat(60));
    for taxpayer in taxpayers {
        let _ = writeln!(
            out,
            "{:<15}{:<25}{:<20}",
            taxpayer.username,
            taxpayer.full_name,
            tax::total_tax(taxpayer).to_string(),
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(60));
    out
}

#[cfg(test)]
mod tests {
    use engine::Money;

    use super::*;

    fn taxpayer(username: &str, income: i64, vehicle: i64) -> Taxpayer {
        Taxpayer {
            username: username.to_string(),
            full_name: format!("{username} lengkap"),
            national_id: format!("id-{username}"),
            monthly_income: Money::from_major(income),
            vehicle_value: Money::from_major(vehicle),
            ..Taxpayer::default()
        }
    }

    #[test]
    fn asset_free_low_income_gets_the_notice() {
        let poor = taxpayer("miskin", 1_000_000, 0);
        assert!(profile(&poor).contains(NOT_REQUIRED_NOTICE));
        assert_eq!(tax_calculation(&poor), format!("\n{NOT_REQUIRED_NOTICE}\n"));
        let report = annual_report(&poor, 2026);
        assert!(report.contains(NOT_REQUIRED_NOTICE));
        assert!(!report.contains("Payment status"));
    }

    #[test]
    fn calculation_lists_components_and_total() {
        let rich = taxpayer("kaya", 10_000_000, 1_000_000);
        let text = tax_calculation(&rich);
        assert!(text.contains("Income tax / year     : Rp 3900000.00"));
        assert!(text.contains("Vehicle tax / year    : Rp 20000.00"));
        assert!(text.contains("Total annual tax      : Rp 3920000.00"));
        assert!(!profile(&rich).contains(NOT_REQUIRED_NOTICE));
    }

    #[test]
    fn report_is_headed_with_the_year() {
        let rich = taxpayer("kaya", 10_000_000, 0);
        let report = annual_report(&rich, 2031);
        assert!(report.starts_with("\n--- ANNUAL TAX REPORT 2031 ---"));
        assert!(report.contains("Payment status : UNPAID"));
    }

    #[test]
    fn roster_marks_liability() {
        let rich = taxpayer("kaya", 10_000_000, 0);
        let edge = taxpayer("batas", 4_500_000, 0);
        let poor = taxpayer("miskin", 1_000_000, 0);
        let entries: Vec<_> = [&rich, &edge, &poor]
            .into_iter()
            .map(|taxpayer| RosterEntry {
                taxpayer,
                liable: tax::is_liable_for_tax(taxpayer),
                total_tax: tax::total_tax(taxpayer),
            })
            .collect();

        let table = roster_table(&entries);
        let line = |name: &str| {
            table
                .lines()
                .find(|line| line.starts_with(name))
                .unwrap()
                .trim_end()
                .to_string()
        };
        assert!(line("kaya").ends_with("Liable"));
        assert!(line("batas").ends_with("Liable"));
        assert!(line("miskin").ends_with("Exempt"));
        assert!(line("kaya").contains("10000000"));
        assert_eq!(roster_table(&[]), "No registered taxpayers.\n");
    }

    #[test]
    fn ranking_lists_in_given_order_or_reports_empty() {
        let rich = taxpayer("kaya", 10_000_000, 0);
        let poor = taxpayer("miskin", 1_000_000, 0);
        let table = ranking_table(&[rich, poor]);

        let kaya = table.find("kaya").unwrap();
        let miskin = table.find("miskin").unwrap();
        assert!(kaya < miskin);
        assert!(table.contains("Rp 3900000.00"));
        assert_eq!(ranking_table(&[]), "No taxpayers to sort.\n");
    }
}
