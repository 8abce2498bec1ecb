use std::cmp::Reverse;

use crate::{Money, PaymentChoice, ResultEngine, Taxpayer, TaxpayerEdit, tax};

use super::Engine;

/// One line of the administrator's roster overview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterEntry<'a> {
    pub taxpayer: &'a Taxpayer,
    pub liable: bool,
    pub total_tax: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    NotFound,
    Updated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentToggle {
    NotFound,
    Cancelled,
    Updated { paid: bool },
}

impl Engine {
    /// Every taxpayer in roster order, with the liability flag and total tax.
    #[must_use]
    pub fn roster(&self) -> Vec<RosterEntry<'_>> {
        self.store
            .taxpayers()
            .iter()
            .map(|taxpayer| RosterEntry {
                taxpayer,
                liable: tax::is_liable_for_tax(taxpayer),
                total_tax: tax::total_tax(taxpayer),
            })
            .collect()
    }

    /// First taxpayer with `national_id`, in roster order.
    #[must_use]
    pub fn find_by_national_id(&self, national_id: &str) -> Option<&Taxpayer> {
        self.store
            .position_by_national_id(national_id)
            .and_then(|index| self.store.get(index))
    }

    /// First taxpayer with `username`, in roster order.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&Taxpayer> {
        self.store
            .position_by_username(username)
            .and_then(|index| self.store.get(index))
    }

    /// Applies one field change to the taxpayer found by `national_id` and
    /// persists. A new national ID is not checked for uniqueness.
    pub fn edit_by_national_id(
        &mut self,
        national_id: &str,
        edit: TaxpayerEdit,
    ) -> ResultEngine<EditOutcome> {
        let Some(taxpayer) = self
            .store
            .position_by_national_id(national_id)
            .and_then(|index| self.store.get_mut(index))
        else {
            return Ok(EditOutcome::NotFound);
        };
        tracing::info!("editing {} of {}", edit.field_name(), taxpayer.username);
        taxpayer.apply(edit);

        self.store.save()?;
        Ok(EditOutcome::Updated)
    }

    /// Reorders the roster by total tax, highest first, and returns it.
    ///
    /// The new order is kept in memory only; the next save writes it out.
    pub fn sort_by_total_tax(&mut self) -> &[Taxpayer] {
        self.store
            .taxpayers_mut()
            .sort_by_cached_key(|taxpayer| Reverse(tax::total_tax(taxpayer)));
        self.store.taxpayers()
    }

    /// Manual payment status change. Persists unless cancelled.
    pub fn set_payment_status(
        &mut self,
        username: &str,
        choice: PaymentChoice,
    ) -> ResultEngine<PaymentToggle> {
        let Some(taxpayer) = self
            .store
            .position_by_username(username)
            .and_then(|index| self.store.get_mut(index))
        else {
            return Ok(PaymentToggle::NotFound);
        };

        let paid = match choice {
            PaymentChoice::Paid => true,
            PaymentChoice::Unpaid => false,
            PaymentChoice::Cancel => return Ok(PaymentToggle::Cancelled),
        };
        taxpayer.paid = paid;
        tracing::info!("payment status of {username} set to {paid}");

        self.store.save()?;
        Ok(PaymentToggle::Updated { paid })
    }
}
