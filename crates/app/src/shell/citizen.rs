use std::io::{BufRead, Write};

use chrono::Datelike;
use engine::{PaymentOutcome, PaymentQuote, Session};

use super::Shell;
use crate::{error::Result, views};

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn citizen_menu(&mut self, mut session: Session) -> Result<()> {
        loop {
            self.console.say(
                "\n=== CITIZEN MENU ===\n1. View profile\n2. Calculate tax\n\
                 3. Pay tax\n4. Annual tax report\n5. Logout",
            )?;
            match self.console.prompt_parsed::<u32>("Choose: ")? {
                1 => self.console.say(views::profile(session.profile()))?,
                2 => self.console.say(views::tax_calculation(session.profile()))?,
                3 => self.pay(&mut session)?,
                4 => {
                    let year = chrono::Local::now().year();
                    self.console
                        .say(views::annual_report(session.profile(), year))?;
                }
                5 => {
                    tracing::debug!("{} logged out", session.username());
                    return Ok(());
                }
                _ => self.console.say("Invalid choice.")?,
            }
        }
    }

    fn pay(&mut self, session: &mut Session) -> Result<()> {
        let amount = match self.engine.payment_quote(session) {
            PaymentQuote::NotRequired => return self.console.say(views::NOT_REQUIRED_NOTICE),
            PaymentQuote::AlreadyPaid => return self.console.say("Your tax is already paid."),
            PaymentQuote::Due(amount) => amount,
        };

        self.console.say(format!("Total tax due: {amount}"))?;
        let confirmed = self.console.prompt_yes_no("Pay now? (y/n): ")?;
        if confirmed {
            self.payments.open_qr();
            self.console
                .wait_for_enter("Scan the QR code, then press Enter once the transfer is done...")?;
            self.payments
                .show_progress(self.console.output(), "Processing payment")?;
        }

        let outcome = self.engine.complete_payment(session, confirmed);
        let message = match self.saved(outcome)? {
            Some(PaymentOutcome::Paid(amount)) => {
                format!("Payment of {amount} received. Thank you.")
            }
            Some(PaymentOutcome::Cancelled) => "Payment cancelled.".to_string(),
            Some(PaymentOutcome::AlreadyPaid) => "Your tax is already paid.".to_string(),
            Some(PaymentOutcome::NotRequired) => views::NOT_REQUIRED_NOTICE.to_string(),
            Some(PaymentOutcome::MissingRecord) => {
                "Your record could not be found in the roster.".to_string()
            }
            None => return Ok(()),
        };
        self.console.say(message)
    }
}
