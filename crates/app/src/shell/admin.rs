use std::io::{BufRead, Write};

use engine::{EditOutcome, PaymentChoice, PaymentToggle, TaxpayerEdit};

use super::Shell;
use crate::{error::Result, views};

const EDIT_MENU: &str = "\nField to edit:\n1. Full name\n2. National ID\n3. Monthly income\n\
                         4. Property value\n5. Vehicle value\n6. Dependents\n7. Password\n0. Cancel";

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn admin_menu(&mut self) -> Result<()> {
        loop {
            self.console.say(
                "\n=== ADMINISTRATOR MENU ===\n1. List all taxpayers\n\
                 2. Search by national ID\n3. Edit taxpayer\n4. Sort by total tax\n\
                 5. Update payment status\n6. Logout",
            )?;
            match self.console.prompt_parsed::<u32>("Choose: ")? {
                1 => {
                    let table = views::roster_table(&self.engine.roster());
                    self.console.say(table)?;
                }
                2 => self.search()?,
                3 => self.edit()?,
                4 => {
                    let table = views::ranking_table(self.engine.sort_by_total_tax());
                    self.console.say(table)?;
                }
                5 => self.toggle_payment()?,
                6 => return Ok(()),
                _ => self.console.say("Invalid choice.")?,
            }
        }
    }

    fn search(&mut self) -> Result<()> {
        let national_id = self.console.prompt("National ID to search: ")?;
        let text = match self.engine.find_by_national_id(&national_id) {
            Some(taxpayer) => views::taxpayer_details(taxpayer),
            None => "Taxpayer not found.".to_string(),
        };
        self.console.say(text)
    }

    fn edit(&mut self) -> Result<()> {
        let national_id = self.console.prompt("National ID of the taxpayer to edit: ")?;
        let Some(details) = self
            .engine
            .find_by_national_id(&national_id)
            .map(views::taxpayer_details)
        else {
            return self.console.say("Taxpayer not found.");
        };
        self.console.say(details)?;
        self.console.say(EDIT_MENU)?;

        let edit = match self.console.prompt_parsed::<u32>("Choose: ")? {
            0 => return self.console.say("Edit cancelled."),
            1 => TaxpayerEdit::FullName(self.console.prompt("New full name: ")?),
            2 => TaxpayerEdit::NationalId(self.console.prompt("New national ID: ")?),
            3 => TaxpayerEdit::MonthlyIncome(self.console.prompt_money("New monthly income: ")?),
            4 => TaxpayerEdit::PropertyValue(self.console.prompt_money("New property value: ")?),
            5 => TaxpayerEdit::VehicleValue(self.console.prompt_money("New vehicle value: ")?),
            6 => TaxpayerEdit::Dependents(
                self.console.prompt_parsed::<u32>("New number of dependents: ")?,
            ),
            7 => TaxpayerEdit::Password(self.console.prompt_password("New password: ")?),
            _ => return self.console.say("Invalid choice."),
        };

        let outcome = self.engine.edit_by_national_id(&national_id, edit);
        match self.saved(outcome)? {
            Some(EditOutcome::Updated) => self.console.say("Taxpayer updated."),
            Some(EditOutcome::NotFound) => self.console.say("Taxpayer not found."),
            None => Ok(()),
        }
    }

    fn toggle_payment(&mut self) -> Result<()> {
        let username = self.console.prompt("Username: ")?;
        let Some(paid) = self.engine.find_by_username(&username).map(|t| t.paid) else {
            return self.console.say("Taxpayer not found.");
        };
        self.console.say(format!(
            "Current status: {}",
            if paid { "PAID" } else { "UNPAID" }
        ))?;

        let mut answer = self
            .console
            .prompt("Mark as paid? (y = paid, n = unpaid, c = cancel): ")?;
        let choice = loop {
            match answer.to_ascii_lowercase().as_str() {
                "y" => break PaymentChoice::Paid,
                "n" => break PaymentChoice::Unpaid,
                "c" => break PaymentChoice::Cancel,
                _ => answer = self.console.prompt("Please answer y, n or c: ")?,
            }
        };

        let outcome = self.engine.set_payment_status(&username, choice);
        match self.saved(outcome)? {
            Some(PaymentToggle::Updated { paid }) => self.console.say(format!(
                "Payment status of {username} set to {}.",
                if paid { "PAID" } else { "UNPAID" }
            )),
            Some(PaymentToggle::Cancelled) => self.console.say("No changes made."),
            Some(PaymentToggle::NotFound) => self.console.say("Taxpayer not found."),
            None => Ok(()),
        }
    }
}
