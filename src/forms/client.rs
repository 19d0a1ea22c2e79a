use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::client::{Client, ClientDetails, Deadlines, Regularity};
use crate::domain::comment::NewComment;
use crate::domain::document::NewDocument;
use crate::domain::installment::NewInstallment;
use crate::domain::types::{
    Amount, ClientId, CommentText, CompanyName, DocumentName, InstallmentDescription,
    InstallmentStatus, LegalName, Municipality, Situation, Squad, TaxId, TaxRegime,
    TypeConstraintError, Uf, UserEmail, parse_optional_date,
};
use crate::forms::FormError;
use crate::tax_id;

fn validate_tax_id(value: &str) -> Result<(), ValidationError> {
    if tax_id::validate(value) {
        Ok(())
    } else {
        Err(ValidationError::new("tax_id").with_message("CPF/CNPJ inválido".into()))
    }
}

/// Trimmed text, or `None` when blank.
fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_value<T>(
    field: &'static str,
    value: &str,
    ctor: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, FormError> {
    optional_text(value)
        .map(ctor)
        .transpose()
        .map_err(FormError::field(field))
}

fn optional_parse<T>(field: &'static str, value: &str) -> Result<Option<T>, FormError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    optional_value(field, value, |v| v.parse())
}

fn optional_date(
    field: &'static str,
    value: &str,
) -> Result<Option<chrono::NaiveDate>, FormError> {
    parse_optional_date(value).map_err(FormError::field(field))
}

/// Unparsable revenue counts as zero; negative revenue is rejected.
fn parse_revenue(value: &str) -> Result<Amount, FormError> {
    let revenue = value.trim().parse::<f64>().unwrap_or(0.0);
    let revenue = if revenue.is_nan() { 0.0 } else { revenue };
    Amount::new(revenue).map_err(FormError::field("revenue"))
}

/// Client modal payload, as typed by the operator.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub legal_name: String,
    #[validate(custom(function = "validate_tax_id"))]
    pub tax_id: String,
    #[validate(length(min = 1))]
    pub municipality: String,
    #[serde(default)]
    pub squad: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub tax_regime: String,
    #[serde(default)]
    pub revenue: String,
    #[serde(default)]
    pub installment_status: String,
    #[serde(default)]
    pub federal_status: String,
    #[serde(default)]
    pub municipal_status: String,
    #[serde(default)]
    pub state_status: String,
    #[serde(default)]
    pub council_status: String,
    #[serde(default)]
    pub entry_date: String,
    #[serde(default)]
    pub incorporation_date: String,
    #[serde(default)]
    pub last_fiscal_check: String,
    #[serde(default)]
    pub iss_due_date: String,
    #[serde(default)]
    pub efd_reinf_deadline: String,
    #[serde(default)]
    pub closing_deadline: String,
    #[serde(default)]
    pub regularity_notes: String,
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<&ClientForm> for ClientDetails {
    type Error = FormError;

    fn try_from(form: &ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let situation = optional_parse::<Situation>("situation", &form.situation)?
            .unwrap_or_default();

        Ok(Self {
            legal_name: LegalName::new(form.legal_name.as_str())
                .map_err(FormError::field("legal_name"))?,
            tax_id: TaxId::new(&form.tax_id).map_err(FormError::field("tax_id"))?,
            company: CompanyName::new(form.company.as_str()).map_err(FormError::field("company"))?,
            squad: optional_value("squad", &form.squad, Squad::new)?,
            uf: optional_value("uf", &form.uf, Uf::new)?,
            municipality: Municipality::new(form.municipality.as_str())
                .map_err(FormError::field("municipality"))?,
            situation,
            tax_regime: optional_value("tax_regime", &form.tax_regime, TaxRegime::new)?,
            revenue: parse_revenue(&form.revenue)?,
            installment_status: optional_text(&form.installment_status),
            regularity: Regularity {
                federal: optional_parse("federal_status", &form.federal_status)?,
                municipal: optional_parse("municipal_status", &form.municipal_status)?,
                state: optional_parse("state_status", &form.state_status)?,
                council: optional_parse("council_status", &form.council_status)?,
            },
            entry_date: optional_date("entry_date", &form.entry_date)?,
            incorporation_date: optional_date("incorporation_date", &form.incorporation_date)?,
            last_fiscal_check: optional_date("last_fiscal_check", &form.last_fiscal_check)?,
            deadlines: Deadlines {
                iss_due: optional_date("iss_due_date", &form.iss_due_date)?,
                efd_reinf: optional_date("efd_reinf_deadline", &form.efd_reinf_deadline)?,
                closing: optional_date("closing_deadline", &form.closing_deadline)?,
            },
            regularity_notes: optional_text(&form.regularity_notes),
            notes: optional_text(&form.notes),
        })
    }
}

fn text_or_empty<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl From<&Client> for ClientForm {
    /// Pre-fills the edit modal from a stored client.
    fn from(client: &Client) -> Self {
        Self {
            company: client.company.to_string(),
            legal_name: client.legal_name.to_string(),
            tax_id: client.tax_id.formatted(),
            municipality: client.municipality.to_string(),
            squad: text_or_empty(&client.squad),
            uf: text_or_empty(&client.uf),
            situation: client.situation.to_string(),
            tax_regime: text_or_empty(&client.tax_regime),
            revenue: client.revenue.get().to_string(),
            installment_status: text_or_empty(&client.installment_status),
            federal_status: text_or_empty(&client.regularity.federal),
            municipal_status: text_or_empty(&client.regularity.municipal),
            state_status: text_or_empty(&client.regularity.state),
            council_status: text_or_empty(&client.regularity.council),
            entry_date: text_or_empty(&client.entry_date),
            incorporation_date: text_or_empty(&client.incorporation_date),
            last_fiscal_check: text_or_empty(&client.last_fiscal_check),
            iss_due_date: text_or_empty(&client.deadlines.iss_due),
            efd_reinf_deadline: text_or_empty(&client.deadlines.efd_reinf),
            closing_deadline: text_or_empty(&client.deadlines.closing),
            regularity_notes: text_or_empty(&client.regularity_notes),
            notes: text_or_empty(&client.notes),
        }
    }
}

fn client_id(id: i32) -> Result<ClientId, FormError> {
    ClientId::new(id).map_err(|_| FormError::InvalidClientId)
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a comment to a client.
pub struct AddCommentForm {
    pub client_id: i32,
    #[validate(length(min = 1))]
    pub text: String,
}

impl AddCommentForm {
    pub fn into_new_comment(self, author: &UserEmail) -> Result<NewComment, FormError> {
        self.validate()?;
        Ok(NewComment {
            client_id: client_id(self.client_id)?,
            author_email: author.clone(),
            text: CommentText::new(self.text).map_err(FormError::field("text"))?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for registering an installment plan.
pub struct AddInstallmentForm {
    pub client_id: i32,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub total_amount: f64,
    #[validate(range(min = 1))]
    pub installment_count: u32,
    #[serde(default)]
    pub first_due_date: String,
    #[serde(default)]
    pub status: String,
}

impl TryFrom<AddInstallmentForm> for NewInstallment {
    type Error = FormError;

    fn try_from(form: AddInstallmentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            client_id: client_id(form.client_id)?,
            description: InstallmentDescription::new(form.description)
                .map_err(FormError::field("description"))?,
            total_amount: Amount::new(form.total_amount)
                .map_err(FormError::field("total_amount"))?,
            installment_count: form.installment_count,
            first_due_date: optional_date("first_due_date", &form.first_due_date)?,
            status: optional_parse::<InstallmentStatus>("status", &form.status)?
                .unwrap_or(InstallmentStatus::Active),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for tracking a client document.
pub struct AddDocumentForm {
    pub client_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub expires_on: String,
}

impl TryFrom<AddDocumentForm> for NewDocument {
    type Error = FormError;

    fn try_from(form: AddDocumentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            client_id: client_id(form.client_id)?,
            name: DocumentName::new(form.name).map_err(FormError::field("name"))?,
            expires_on: optional_date("expires_on", &form.expires_on)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::client::fixtures::client;
    use crate::domain::types::RegularityStatus;

    fn form() -> ClientForm {
        ClientForm {
            company: "Matriz".to_string(),
            legal_name: "  Silva Ltda ".to_string(),
            tax_id: "11.222.333/0001-81".to_string(),
            municipality: "Campinas".to_string(),
            ..ClientForm::default()
        }
    }

    #[test]
    fn minimal_form_fills_defaults() {
        let details = ClientDetails::try_from(&form()).unwrap();

        assert_eq!(details.legal_name.as_str(), "Silva Ltda");
        assert_eq!(details.tax_id.as_str(), "11222333000181");
        assert_eq!(details.situation, Situation::Active);
        assert_eq!(details.revenue.get(), 0.0);
        assert_eq!(details.squad, None);
        assert_eq!(details.uf, None);
        assert_eq!(details.notes, None);
        assert_eq!(details.regularity, Regularity::default());
    }

    #[test]
    fn optional_fields_are_parsed() {
        let form = ClientForm {
            uf: "mg".to_string(),
            situation: "Baixada".to_string(),
            revenue: "2500.75".to_string(),
            federal_status: "IRREGULAR".to_string(),
            iss_due_date: "2025-04-10".to_string(),
            notes: "  ".to_string(),
            ..form()
        };

        let details = ClientDetails::try_from(&form).unwrap();

        assert_eq!(details.uf.as_ref().map(Uf::as_str), Some("MG"));
        assert_eq!(details.situation, Situation::Deregistered);
        assert_eq!(details.revenue.get(), 2500.75);
        assert_eq!(details.regularity.federal, Some(RegularityStatus::Irregular));
        assert_eq!(details.deadlines.iss_due, NaiveDate::from_ymd_opt(2025, 4, 10));
        assert_eq!(details.notes, None);
    }

    #[test]
    fn unparsable_revenue_becomes_zero() {
        let form = ClientForm {
            revenue: "mil reais".to_string(),
            ..form()
        };
        assert_eq!(ClientDetails::try_from(&form).unwrap().revenue.get(), 0.0);

        let negative = ClientForm {
            revenue: "-10".to_string(),
            ..self::form()
        };
        assert!(matches!(
            ClientDetails::try_from(&negative),
            Err(FormError::InvalidField { field: "revenue", .. })
        ));
    }

    #[test]
    fn invalid_tax_id_fails_validation() {
        let form = ClientForm {
            tax_id: "111.111.111-11".to_string(),
            ..form()
        };
        assert!(matches!(
            ClientDetails::try_from(&form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn required_fields_must_be_present() {
        let form = ClientForm {
            municipality: String::new(),
            ..form()
        };
        assert!(matches!(
            ClientDetails::try_from(&form),
            Err(FormError::Validation(_))
        ));

        let blank = ClientForm {
            legal_name: "   ".to_string(),
            ..self::form()
        };
        assert!(matches!(
            ClientDetails::try_from(&blank),
            Err(FormError::InvalidField { field: "legal_name", .. })
        ));
    }

    #[test]
    fn bad_uf_and_dates_name_the_field() {
        let form = ClientForm {
            uf: "XX".to_string(),
            ..form()
        };
        assert!(matches!(
            ClientDetails::try_from(&form),
            Err(FormError::InvalidField { field: "uf", .. })
        ));

        let form = ClientForm {
            closing_deadline: "31/12/2025".to_string(),
            ..self::form()
        };
        assert!(matches!(
            ClientDetails::try_from(&form),
            Err(FormError::InvalidField { field: "closing_deadline", .. })
        ));
    }

    #[test]
    fn stored_client_round_trips_through_the_form() {
        let mut stored = client(3, "Souza ME");
        stored.regularity.municipal = Some(RegularityStatus::Pending);
        stored.deadlines.closing = NaiveDate::from_ymd_opt(2025, 12, 31);
        stored.revenue = Amount::new(99.5).unwrap();

        let form = ClientForm::from(&stored);
        assert_eq!(form.tax_id, "111.444.777-35");
        assert_eq!(form.municipal_status, "PENDENTE");
        assert_eq!(form.closing_deadline, "2025-12-31");

        let details = ClientDetails::try_from(&form).unwrap();
        assert_eq!(details, stored.details());
    }

    #[test]
    fn comment_form_sanitizes_text() {
        let author = UserEmail::new("ana@example.com").unwrap();
        let form = AddCommentForm {
            client_id: 1,
            text: "<script>alert(1)</script>Ligar amanhã".to_string(),
        };
        let comment = form.into_new_comment(&author).unwrap();
        assert_eq!(comment.text.as_str(), "Ligar amanhã");
        assert_eq!(comment.author_email, author);

        let invalid = AddCommentForm {
            client_id: 0,
            text: "ok".to_string(),
        };
        assert!(matches!(
            invalid.into_new_comment(&author),
            Err(FormError::InvalidClientId)
        ));
    }

    #[test]
    fn installment_form_defaults_to_active() {
        let form = AddInstallmentForm {
            client_id: 1,
            description: "PERT".to_string(),
            total_amount: 1200.0,
            installment_count: 0,
            first_due_date: String::new(),
            status: String::new(),
        };
        assert!(matches!(
            NewInstallment::try_from(form),
            Err(FormError::Validation(_))
        ));

        let form = AddInstallmentForm {
            client_id: 1,
            description: "PERT".to_string(),
            total_amount: 1200.0,
            installment_count: 12,
            first_due_date: "2025-02-28".to_string(),
            status: String::new(),
        };
        let installment = NewInstallment::try_from(form).unwrap();
        assert_eq!(installment.status, InstallmentStatus::Active);
        assert_eq!(installment.first_due_date, NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn document_form_accepts_missing_expiry() {
        let form = AddDocumentForm {
            client_id: 2,
            name: "Certificado digital".to_string(),
            expires_on: String::new(),
        };
        let document = NewDocument::try_from(form).unwrap();
        assert_eq!(document.expires_on, None);
        assert_eq!(document.client_id.get(), 2);
    }
}
