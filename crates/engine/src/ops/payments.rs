use crate::{Money, ResultEngine, tax};

use super::{Engine, Session};

/// What the logged in taxpayer owes right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentQuote {
    /// Exempt income and no property or vehicle.
    NotRequired,
    AlreadyPaid,
    Due(Money),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    NotRequired,
    AlreadyPaid,
    Cancelled,
    /// The session's username no longer matches a roster record.
    MissingRecord,
    Paid(Money),
}

impl Engine {
    #[must_use]
    pub fn payment_quote(&self, session: &Session) -> PaymentQuote {
        let profile = session.profile();
        let assessment = tax::assess(profile);
        if !assessment.payment_required() {
            return PaymentQuote::NotRequired;
        }
        if profile.paid {
            return PaymentQuote::AlreadyPaid;
        }
        PaymentQuote::Due(assessment.total())
    }

    /// Marks the session's tax as paid once the payment has been confirmed.
    ///
    /// Sets the flag on the session copy and on the roster record with the
    /// same username, then persists. Every other outcome leaves both
    /// untouched and skips the save.
    pub fn complete_payment(
        &mut self,
        session: &mut Session,
        confirmed: bool,
    ) -> ResultEngine<PaymentOutcome> {
        let amount = match self.payment_quote(session) {
            PaymentQuote::NotRequired => return Ok(PaymentOutcome::NotRequired),
            PaymentQuote::AlreadyPaid => return Ok(PaymentOutcome::AlreadyPaid),
            PaymentQuote::Due(amount) => amount,
        };
        if !confirmed {
            return Ok(PaymentOutcome::Cancelled);
        }

        let Some(record) = self
            .store
            .position_by_username(session.username())
            .and_then(|index| self.store.get_mut(index))
        else {
            tracing::warn!("no roster record for {}", session.username());
            return Ok(PaymentOutcome::MissingRecord);
        };
        record.paid = true;
        session.profile_mut().paid = true;
        tracing::info!("{} paid {amount}", session.username());

        self.store.save()?;
        Ok(PaymentOutcome::Paid(amount))
    }
}
