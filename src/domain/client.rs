use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Amount, ClientId, CompanyName, LegalName, Municipality, RegularityStatus, Situation, Squad,
    TaxId, TaxRegime, Uf,
};

/// Regularity status per government/professional scope.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Regularity {
    pub federal: Option<RegularityStatus>,
    pub municipal: Option<RegularityStatus>,
    pub state: Option<RegularityStatus>,
    /// Professional council (CRC, CRM, OAB, ...).
    pub council: Option<RegularityStatus>,
}

impl Regularity {
    /// `true` when any scope is pending or irregular.
    pub fn needs_attention(&self) -> bool {
        [self.federal, self.municipal, self.state, self.council]
            .into_iter()
            .flatten()
            .any(RegularityStatus::needs_attention)
    }
}

/// Fiscal deadlines tracked per client.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deadlines {
    pub iss_due: Option<NaiveDate>,
    pub efd_reinf: Option<NaiveDate>,
    pub closing: Option<NaiveDate>,
}

/// A managed company or individual.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub legal_name: LegalName,
    pub tax_id: TaxId,
    /// Office company responsible for the client.
    pub company: CompanyName,
    pub squad: Option<Squad>,
    pub uf: Option<Uf>,
    pub municipality: Municipality,
    pub situation: Situation,
    pub tax_regime: Option<TaxRegime>,
    pub revenue: Amount,
    pub installment_status: Option<String>,
    pub regularity: Regularity,
    pub entry_date: Option<NaiveDate>,
    pub incorporation_date: Option<NaiveDate>,
    pub last_fiscal_check: Option<NaiveDate>,
    pub deadlines: Deadlines,
    pub regularity_notes: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable fields of a client, used both to create and to update records.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientDetails {
    pub legal_name: LegalName,
    pub tax_id: TaxId,
    pub company: CompanyName,
    pub squad: Option<Squad>,
    pub uf: Option<Uf>,
    pub municipality: Municipality,
    pub situation: Situation,
    pub tax_regime: Option<TaxRegime>,
    pub revenue: Amount,
    pub installment_status: Option<String>,
    pub regularity: Regularity,
    pub entry_date: Option<NaiveDate>,
    pub incorporation_date: Option<NaiveDate>,
    pub last_fiscal_check: Option<NaiveDate>,
    pub deadlines: Deadlines,
    pub regularity_notes: Option<String>,
    pub notes: Option<String>,
}

/// One field that differs between two versions of a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

fn text<T: ToString>(value: &T) -> Option<String> {
    Some(value.to_string())
}

fn opt_text<T: ToString>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

impl ClientDetails {
    /// Field name and display value pairs, in form order.
    fn field_values(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("legal_name", text(&self.legal_name)),
            ("tax_id", text(&self.tax_id)),
            ("company", text(&self.company)),
            ("squad", opt_text(&self.squad)),
            ("uf", opt_text(&self.uf)),
            ("municipality", text(&self.municipality)),
            ("situation", text(&self.situation)),
            ("tax_regime", opt_text(&self.tax_regime)),
            ("revenue", text(&self.revenue)),
            ("installment_status", self.installment_status.clone()),
            ("federal_status", opt_text(&self.regularity.federal)),
            ("municipal_status", opt_text(&self.regularity.municipal)),
            ("state_status", opt_text(&self.regularity.state)),
            ("council_status", opt_text(&self.regularity.council)),
            ("entry_date", opt_text(&self.entry_date)),
            ("incorporation_date", opt_text(&self.incorporation_date)),
            ("last_fiscal_check", opt_text(&self.last_fiscal_check)),
            ("iss_due_date", opt_text(&self.deadlines.iss_due)),
            ("efd_reinf_deadline", opt_text(&self.deadlines.efd_reinf)),
            ("closing_deadline", opt_text(&self.deadlines.closing)),
            ("regularity_notes", self.regularity_notes.clone()),
            ("notes", self.notes.clone()),
        ]
    }

    /// Lists the fields whose display value changes from `self` to `updated`.
    pub fn diff(&self, updated: &ClientDetails) -> Vec<FieldChange> {
        self.field_values()
            .into_iter()
            .zip(updated.field_values())
            .filter(|((_, old), (_, new))| old != new)
            .map(|((field, old_value), (_, new_value))| FieldChange {
                field,
                old_value,
                new_value,
            })
            .collect()
    }
}

impl Client {
    /// Editable projection of the stored record.
    pub fn details(&self) -> ClientDetails {
        ClientDetails {
            legal_name: self.legal_name.clone(),
            tax_id: self.tax_id.clone(),
            company: self.company.clone(),
            squad: self.squad.clone(),
            uf: self.uf.clone(),
            municipality: self.municipality.clone(),
            situation: self.situation,
            tax_regime: self.tax_regime.clone(),
            revenue: self.revenue,
            installment_status: self.installment_status.clone(),
            regularity: self.regularity,
            entry_date: self.entry_date,
            incorporation_date: self.incorporation_date,
            last_fiscal_check: self.last_fiscal_check,
            deadlines: self.deadlines,
            regularity_notes: self.regularity_notes.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A valid client with only the required fields set.
    pub fn client(id: i32, legal_name: &str) -> Client {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        Client {
            id: ClientId::new(id).unwrap(),
            legal_name: LegalName::new(legal_name).unwrap(),
            tax_id: TaxId::new("11144477735").unwrap(),
            company: CompanyName::new("Matriz").unwrap(),
            squad: None,
            uf: None,
            municipality: Municipality::new("São Paulo").unwrap(),
            situation: Situation::Active,
            tax_regime: None,
            revenue: Amount::default(),
            installment_status: None,
            regularity: Regularity::default(),
            entry_date: None,
            incorporation_date: None,
            last_fiscal_check: None,
            deadlines: Deadlines::default(),
            regularity_notes: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}
