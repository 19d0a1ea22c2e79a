use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Amount, ClientId, InstallmentDescription, InstallmentId, InstallmentStatus,
};

/// Tax debt installment plan (parcelamento) negotiated for a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Installment {
    pub id: InstallmentId,
    pub client_id: ClientId,
    pub description: InstallmentDescription,
    pub total_amount: Amount,
    /// Number of installments, always positive.
    pub installment_count: u32,
    pub first_due_date: Option<NaiveDate>,
    pub status: InstallmentStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewInstallment {
    pub client_id: ClientId,
    pub description: InstallmentDescription,
    pub total_amount: Amount,
    pub installment_count: u32,
    pub first_due_date: Option<NaiveDate>,
    pub status: InstallmentStatus,
}

impl Installment {
    /// Value of each installment, spread evenly.
    pub fn installment_value(&self) -> f64 {
        self.total_amount.get() / f64::from(self.installment_count.max(1))
    }
}
