//! Brazilian taxpayer identifiers (CPF and CNPJ).
//!
//! Everything here is a pure function over strings: punctuation is stripped
//! before any check, check digits are recomputed with the official weighted
//! sums, and malformed input simply yields `false` (or the input unchanged for
//! [`format`]). Callers that need to know *why* a value was rejected use
//! [`inspect`].

use thiserror::Error;

/// Number of digits in a CPF (individual taxpayer).
pub const CPF_LEN: usize = 11;
/// Number of digits in a CNPJ (company taxpayer).
pub const CNPJ_LEN: usize = 14;

/// Sequences that pass the check-digit arithmetic but are published as
/// examples and never issued.
const CPF_DENYLIST: &[&str] = &["12345678909"];
const CNPJ_DENYLIST: &[&str] = &["12345678000195"];

/// Which identifier a digit string was recognised as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaxIdKind {
    Cpf,
    Cnpj,
}

/// Why an identifier was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TaxIdError {
    /// Digit count is neither 11 nor 14.
    #[error("expected 11 (CPF) or 14 (CNPJ) digits, got {0}")]
    InvalidFormat(usize),
    /// Right length, but a check digit does not match.
    #[error("check digits do not match")]
    InvalidChecksum,
    /// All digits identical or a known placeholder sequence.
    #[error("identifier is a known invalid sequence")]
    InvalidPattern,
}

/// Removes every character that is not an ASCII digit.
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn to_digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_identical(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// `(sum * 10) mod 11`, with 10 folded to 0.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, digit)| digit * (top_weight - position as u32))
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder >= 10 { 0 } else { remainder }
}

/// Weights cycle 2..=9 from the rightmost digit leftwards.
fn cnpj_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .rev()
        .zip((2..=9).cycle())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let result = sum % 11;
    if result < 2 { 0 } else { 11 - result }
}

fn check_pattern(digits_str: &str, digits: &[u32], denylist: &[&str]) -> Result<(), TaxIdError> {
    if all_identical(digits) || denylist.contains(&digits_str) {
        Err(TaxIdError::InvalidPattern)
    } else {
        Ok(())
    }
}

fn check_cpf(digits_str: &str) -> Result<(), TaxIdError> {
    let digits = to_digits(digits_str);
    if digits.len() != CPF_LEN || digits_str.len() != CPF_LEN {
        return Err(TaxIdError::InvalidFormat(digits.len()));
    }
    check_pattern(digits_str, &digits, CPF_DENYLIST)?;

    if cpf_check_digit(&digits[..9]) != digits[9] || cpf_check_digit(&digits[..10]) != digits[10] {
        return Err(TaxIdError::InvalidChecksum);
    }
    Ok(())
}

fn check_cnpj(digits_str: &str) -> Result<(), TaxIdError> {
    let digits = to_digits(digits_str);
    if digits.len() != CNPJ_LEN || digits_str.len() != CNPJ_LEN {
        return Err(TaxIdError::InvalidFormat(digits.len()));
    }
    check_pattern(digits_str, &digits, CNPJ_DENYLIST)?;

    if cnpj_check_digit(&digits[..12]) != digits[12]
        || cnpj_check_digit(&digits[..13]) != digits[13]
    {
        return Err(TaxIdError::InvalidChecksum);
    }
    Ok(())
}

/// Validates an 11-digit CPF. Punctuation is not accepted here; see [`validate`].
pub fn is_valid_cpf(digits: &str) -> bool {
    check_cpf(digits).is_ok()
}

/// Validates a 14-digit CNPJ. Punctuation is not accepted here; see [`validate`].
pub fn is_valid_cnpj(digits: &str) -> bool {
    check_cnpj(digits).is_ok()
}

/// Classifies `raw` after stripping punctuation, reporting the reason on failure.
pub fn inspect(raw: &str) -> Result<TaxIdKind, TaxIdError> {
    let digits = strip_non_digits(raw);
    match digits.len() {
        CPF_LEN => check_cpf(&digits).map(|_| TaxIdKind::Cpf),
        CNPJ_LEN => check_cnpj(&digits).map(|_| TaxIdKind::Cnpj),
        other => Err(TaxIdError::InvalidFormat(other)),
    }
}

/// Returns `true` when `raw` is a valid CPF or CNPJ, punctuated or not.
pub fn validate(raw: &str) -> bool {
    inspect(raw).is_ok()
}

/// Punctuates an 11- or 14-digit value for display; anything else is returned unchanged.
///
/// Formatting does not look at check digits.
pub fn format(raw: &str) -> String {
    let d = strip_non_digits(raw);
    match d.len() {
        CPF_LEN => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
        CNPJ_LEN => format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        ),
        _ => raw.to_string(),
    }
}
