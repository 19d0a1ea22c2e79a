use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, ClientDetails, Deadlines, Regularity};
use crate::domain::types::{
    Amount, ClientId, CompanyName, LegalName, Municipality, RegularityStatus, Squad, TaxId,
    TaxRegime, TypeConstraintError, Uf,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub legal_name: String,
    pub tax_id: String,
    pub company: String,
    pub squad: Option<String>,
    pub uf: Option<String>,
    pub municipality: String,
    pub situation: String,
    pub tax_regime: Option<String>,
    pub revenue: f64,
    pub installment_status: Option<String>,
    pub federal_status: Option<String>,
    pub municipal_status: Option<String>,
    pub state_status: Option<String>,
    pub council_status: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub incorporation_date: Option<NaiveDate>,
    pub last_fiscal_check: Option<NaiveDate>,
    pub iss_due_date: Option<NaiveDate>,
    pub efd_reinf_deadline: Option<NaiveDate>,
    pub closing_deadline: Option<NaiveDate>,
    pub regularity_notes: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub legal_name: &'a str,
    pub tax_id: &'a str,
    pub company: &'a str,
    pub squad: Option<&'a str>,
    pub uf: Option<&'a str>,
    pub municipality: &'a str,
    pub situation: &'a str,
    pub tax_regime: Option<&'a str>,
    pub revenue: f64,
    pub installment_status: Option<&'a str>,
    pub federal_status: Option<&'a str>,
    pub municipal_status: Option<&'a str>,
    pub state_status: Option<&'a str>,
    pub council_status: Option<&'a str>,
    pub entry_date: Option<NaiveDate>,
    pub incorporation_date: Option<NaiveDate>,
    pub last_fiscal_check: Option<NaiveDate>,
    pub iss_due_date: Option<NaiveDate>,
    pub efd_reinf_deadline: Option<NaiveDate>,
    pub closing_deadline: Option<NaiveDate>,
    pub regularity_notes: Option<&'a str>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Full replacement of the editable columns; `None` clears a column.
pub struct UpdateClient<'a> {
    pub legal_name: &'a str,
    pub tax_id: &'a str,
    pub company: &'a str,
    pub squad: Option<&'a str>,
    pub uf: Option<&'a str>,
    pub municipality: &'a str,
    pub situation: &'a str,
    pub tax_regime: Option<&'a str>,
    pub revenue: f64,
    pub installment_status: Option<&'a str>,
    pub federal_status: Option<&'a str>,
    pub municipal_status: Option<&'a str>,
    pub state_status: Option<&'a str>,
    pub council_status: Option<&'a str>,
    pub entry_date: Option<NaiveDate>,
    pub incorporation_date: Option<NaiveDate>,
    pub last_fiscal_check: Option<NaiveDate>,
    pub iss_due_date: Option<NaiveDate>,
    pub efd_reinf_deadline: Option<NaiveDate>,
    pub closing_deadline: Option<NaiveDate>,
    pub regularity_notes: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Parses an optional labelled column; blank values read as unset.
pub(crate) fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, TypeConstraintError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse())
        .transpose()
}

fn optional_with<T>(
    value: Option<String>,
    ctor: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    value.filter(|v| !v.trim().is_empty()).map(ctor).transpose()
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(row: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(row.id)?,
            legal_name: LegalName::new(row.legal_name)?,
            tax_id: TaxId::new(row.tax_id)?,
            company: CompanyName::new(row.company)?,
            squad: optional_with(row.squad, Squad::new)?,
            uf: optional_with(row.uf, Uf::new)?,
            municipality: Municipality::new(row.municipality)?,
            situation: row.situation.parse()?,
            tax_regime: optional_with(row.tax_regime, TaxRegime::new)?,
            revenue: Amount::new(row.revenue)?,
            installment_status: row.installment_status,
            regularity: Regularity {
                federal: parse_optional(row.federal_status)?,
                municipal: parse_optional(row.municipal_status)?,
                state: parse_optional(row.state_status)?,
                council: parse_optional(row.council_status)?,
            },
            entry_date: row.entry_date,
            incorporation_date: row.incorporation_date,
            last_fiscal_check: row.last_fiscal_check,
            deadlines: Deadlines {
                iss_due: row.iss_due_date,
                efd_reinf: row.efd_reinf_deadline,
                closing: row.closing_deadline,
            },
            regularity_notes: row.regularity_notes,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn status(value: Option<RegularityStatus>) -> Option<&'static str> {
    value.map(RegularityStatus::as_str)
}

impl<'a> From<&'a ClientDetails> for NewClient<'a> {
    fn from(details: &'a ClientDetails) -> Self {
        Self {
            legal_name: details.legal_name.as_str(),
            tax_id: details.tax_id.as_str(),
            company: details.company.as_str(),
            squad: details.squad.as_deref(),
            uf: details.uf.as_ref().map(Uf::as_str),
            municipality: details.municipality.as_str(),
            situation: details.situation.as_str(),
            tax_regime: details.tax_regime.as_deref(),
            revenue: details.revenue.get(),
            installment_status: details.installment_status.as_deref(),
            federal_status: status(details.regularity.federal),
            municipal_status: status(details.regularity.municipal),
            state_status: status(details.regularity.state),
            council_status: status(details.regularity.council),
            entry_date: details.entry_date,
            incorporation_date: details.incorporation_date,
            last_fiscal_check: details.last_fiscal_check,
            iss_due_date: details.deadlines.iss_due,
            efd_reinf_deadline: details.deadlines.efd_reinf,
            closing_deadline: details.deadlines.closing,
            regularity_notes: details.regularity_notes.as_deref(),
            notes: details.notes.as_deref(),
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn new(details: &'a ClientDetails, updated_at: NaiveDateTime) -> Self {
        let row = NewClient::from(details);
        Self {
            legal_name: row.legal_name,
            tax_id: row.tax_id,
            company: row.company,
            squad: row.squad,
            uf: row.uf,
            municipality: row.municipality,
            situation: row.situation,
            tax_regime: row.tax_regime,
            revenue: row.revenue,
            installment_status: row.installment_status,
            federal_status: row.federal_status,
            municipal_status: row.municipal_status,
            state_status: row.state_status,
            council_status: row.council_status,
            entry_date: row.entry_date,
            incorporation_date: row.incorporation_date,
            last_fiscal_check: row.last_fiscal_check,
            iss_due_date: row.iss_due_date,
            efd_reinf_deadline: row.efd_reinf_deadline,
            closing_deadline: row.closing_deadline,
            regularity_notes: row.regularity_notes,
            notes: row.notes,
            updated_at,
        }
    }
}
