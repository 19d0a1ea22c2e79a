use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::installment::{
    Installment as DomainInstallment, NewInstallment as DomainNewInstallment,
};
use crate::domain::types::{
    Amount, ClientId, InstallmentDescription, InstallmentId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::installments)]
pub struct Installment {
    pub id: i32,
    pub client_id: i32,
    pub description: String,
    pub total_amount: f64,
    pub installment_count: i32,
    pub first_due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::installments)]
pub struct NewInstallment<'a> {
    pub client_id: i32,
    pub description: &'a str,
    pub total_amount: f64,
    pub installment_count: i32,
    pub first_due_date: Option<NaiveDate>,
    pub status: &'a str,
}

impl TryFrom<Installment> for DomainInstallment {
    type Error = TypeConstraintError;

    fn try_from(row: Installment) -> Result<Self, Self::Error> {
        let installment_count = u32::try_from(row.installment_count)
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!(
                    "installment count {}",
                    row.installment_count
                ))
            })?;
        Ok(Self {
            id: InstallmentId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            description: InstallmentDescription::new(row.description)?,
            total_amount: Amount::new(row.total_amount)?,
            installment_count,
            first_due_date: row.first_due_date,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewInstallment> for NewInstallment<'a> {
    type Error = TypeConstraintError;

    fn try_from(installment: &'a DomainNewInstallment) -> Result<Self, Self::Error> {
        let installment_count = i32::try_from(installment.installment_count).map_err(|_| {
            TypeConstraintError::InvalidValue(format!(
                "installment count {}",
                installment.installment_count
            ))
        })?;
        Ok(Self {
            client_id: installment.client_id.get(),
            description: installment.description.as_str(),
            total_amount: installment.total_amount.get(),
            installment_count,
            first_due_date: installment.first_due_date,
            status: installment.status.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::InstallmentStatus;

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn zero_installment_count_is_rejected() {
        let row = Installment {
            id: 1,
            client_id: 1,
            description: "PERT".to_string(),
            total_amount: 1200.0,
            installment_count: 0,
            first_due_date: None,
            status: "Ativo".to_string(),
            created_at: epoch(),
        };
        assert!(DomainInstallment::try_from(row).is_err());
    }

    #[test]
    fn row_converts_into_domain_installment() {
        let row = Installment {
            id: 3,
            client_id: 1,
            description: "Simples Nacional 2024".to_string(),
            total_amount: 1200.0,
            installment_count: 12,
            first_due_date: NaiveDate::from_ymd_opt(2025, 1, 31),
            status: "quitado".to_string(),
            created_at: epoch(),
        };
        let installment = DomainInstallment::try_from(row).unwrap();
        assert_eq!(installment.status, InstallmentStatus::Settled);
        assert_eq!(installment.installment_value(), 100.0);
    }
}
