//! Declarative rule table for every settable field.
//!
//! Each [`Field`] maps to exactly one [`Rule`]. Setters call [`check`]
//! before assigning, so a rejected value never reaches the entity.

use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::round_amount;

/// Characters permitted by the SEPA Latin character subset used for
/// identifiers and unstructured remittance information.
pub fn is_sepa_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '+' | '/' | '?' | ':' | '(' | ')' | ',' | '.' | ' ' | '\'' | '-'
        )
}

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `min..=max` characters drawn from the SEPA character set.
    SepaText { min: usize, max: usize },
    /// `min..=max` characters, no control characters.
    Length { min: usize, max: usize },
    /// 8 or 11 character bank identifier code, whitespace stripped first.
    Bic,
    /// IBAN shape (no checksum), whitespace stripped first.
    Iban,
    /// `min..=max` ASCII digits.
    Digits { min: usize, max: usize },
    /// Exact membership in a fixed code list.
    OneOf(&'static [&'static str]),
    /// Any non-empty value.
    NonEmpty,
    /// Decimal literal with exactly two fraction digits, optionally negative.
    Amount,
}

impl Rule {
    /// Normalize the raw input before checking. BIC and IBAN lose all
    /// whitespace, everything else is kept verbatim.
    pub fn normalize(&self, value: &str) -> String {
        match self {
            Self::Bic | Self::Iban => value.chars().filter(|c| !c.is_whitespace()).collect(),
            _ => value.to_string(),
        }
    }

    /// Whether an already normalized value satisfies the rule.
    pub fn accepts(&self, value: &str) -> bool {
        match *self {
            Self::SepaText { min, max } => {
                let len = value.chars().count();
                (min..=max).contains(&len) && value.chars().all(is_sepa_char)
            }
            Self::Length { min, max } => {
                (min..=max).contains(&value.chars().count()) && !value.chars().any(char::is_control)
            }
            Self::Bic => is_bic_shape(value),
            Self::Iban => is_iban_shape(value),
            Self::Digits { min, max } => {
                (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
            }
            Self::OneOf(codes) => codes.contains(&value),
            Self::NonEmpty => !value.is_empty(),
            Self::Amount => is_cent_literal(value),
        }
    }
}

fn is_bic_shape(bic: &str) -> bool {
    let b = bic.as_bytes();
    if !bic.is_ascii() || (b.len() != 8 && b.len() != 11) {
        return false;
    }
    b[..4].iter().all(u8::is_ascii_alphanumeric)
        && b[4..6].iter().all(u8::is_ascii_alphabetic)
        && b[6..].iter().all(u8::is_ascii_alphanumeric)
}

fn is_iban_shape(iban: &str) -> bool {
    let b = iban.as_bytes();
    if !iban.is_ascii() || !(15..=31).contains(&b.len()) {
        return false;
    }
    b[..2].iter().all(u8::is_ascii_alphabetic)
        && b[2..4].iter().all(u8::is_ascii_digit)
        && b[4..].iter().all(u8::is_ascii_alphanumeric)
}

fn is_cent_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    match digits.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.len() == 2
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Every validated field of the payment model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MessageIdentification,
    PaymentInformationIdentification,
    MandateIdentification,
    InstructionIdentification,
    EndToEndIdentification,
    InitiatingPartyName,
    CreditorName,
    DebtorName,
    CreditorCountry,
    DebtorCountry,
    CreditorAgentBic,
    DebtorAgentBic,
    CreditorIban,
    DebtorIban,
    RemittanceInformation,
    NumberOfTransactions,
    LocalInstrumentCode,
    CategoryPurposeCode,
    SequenceType,
    CreditorSchemeIdentification,
    InstructedAmount,
    ControlSum,
}

pub const LOCAL_INSTRUMENT_CODES: &[&str] = &["CORE", "COR1", "B2B"];
pub const CATEGORY_PURPOSE_CODES: &[&str] = &["SUPP", "SALA"];
pub const SEQUENCE_TYPE_CODES: &[&str] = &["FRST", "FNAL", "OOFF", "RCUR"];

impl Field {
    pub const ALL: &'static [Field] = &[
        Self::MessageIdentification,
        Self::PaymentInformationIdentification,
        Self::MandateIdentification,
        Self::InstructionIdentification,
        Self::EndToEndIdentification,
        Self::InitiatingPartyName,
        Self::CreditorName,
        Self::DebtorName,
        Self::CreditorCountry,
        Self::DebtorCountry,
        Self::CreditorAgentBic,
        Self::DebtorAgentBic,
        Self::CreditorIban,
        Self::DebtorIban,
        Self::RemittanceInformation,
        Self::NumberOfTransactions,
        Self::LocalInstrumentCode,
        Self::CategoryPurposeCode,
        Self::SequenceType,
        Self::CreditorSchemeIdentification,
        Self::InstructedAmount,
        Self::ControlSum,
    ];

    /// The rule this field is checked against.
    pub fn rule(self) -> Rule {
        match self {
            Self::MessageIdentification
            | Self::PaymentInformationIdentification
            | Self::MandateIdentification => Rule::SepaText { min: 1, max: 35 },
            Self::InstructionIdentification | Self::EndToEndIdentification => {
                Rule::SepaText { min: 0, max: 35 }
            }
            Self::InitiatingPartyName | Self::CreditorName | Self::DebtorName => {
                Rule::Length { min: 1, max: 70 }
            }
            Self::CreditorCountry | Self::DebtorCountry => Rule::Length { min: 1, max: 2 },
            Self::CreditorAgentBic | Self::DebtorAgentBic => Rule::Bic,
            Self::CreditorIban | Self::DebtorIban => Rule::Iban,
            Self::RemittanceInformation => Rule::SepaText { min: 0, max: 140 },
            Self::NumberOfTransactions => Rule::Digits { min: 1, max: 15 },
            Self::LocalInstrumentCode => Rule::OneOf(LOCAL_INSTRUMENT_CODES),
            Self::CategoryPurposeCode => Rule::OneOf(CATEGORY_PURPOSE_CODES),
            Self::SequenceType => Rule::OneOf(SEQUENCE_TYPE_CODES),
            Self::CreditorSchemeIdentification => Rule::NonEmpty,
            Self::InstructedAmount | Self::ControlSum => Rule::Amount,
        }
    }

    /// Field name as reported in validation errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::MessageIdentification => "MsgId",
            Self::PaymentInformationIdentification => "PmtInfId",
            Self::MandateIdentification => "MndtId",
            Self::InstructionIdentification => "InstrId",
            Self::EndToEndIdentification => "EndToEndId",
            Self::InitiatingPartyName => "initiating party name",
            Self::CreditorName => "creditor name",
            Self::DebtorName => "debtor name",
            Self::CreditorCountry => "creditor country",
            Self::DebtorCountry => "debtor country",
            Self::CreditorAgentBic => "creditor BIC",
            Self::DebtorAgentBic => "debtor BIC",
            Self::CreditorIban => "creditor IBAN",
            Self::DebtorIban => "debtor IBAN",
            Self::RemittanceInformation => "RmtInf",
            Self::NumberOfTransactions => "NbOfTxs",
            Self::LocalInstrumentCode => "LclInstrm",
            Self::CategoryPurposeCode => "CtgyPurp",
            Self::SequenceType => "SeqTp",
            Self::CreditorSchemeIdentification => "CdtrSchmeId",
            Self::InstructedAmount => "InstdAmt",
            Self::ControlSum => "CtrlSum",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::MessageIdentification
            | Self::PaymentInformationIdentification
            | Self::MandateIdentification => {
                "must be 1 to 35 characters from the SEPA character set"
            }
            Self::InstructionIdentification | Self::EndToEndIdentification => {
                "must be at most 35 characters from the SEPA character set"
            }
            Self::InitiatingPartyName | Self::CreditorName | Self::DebtorName => {
                "must be 1 to 70 characters without control characters"
            }
            Self::CreditorCountry | Self::DebtorCountry => {
                "must be a country code of at most 2 characters"
            }
            Self::CreditorAgentBic | Self::DebtorAgentBic => {
                "must be an 8 or 11 character BIC"
            }
            Self::CreditorIban | Self::DebtorIban => "is not a well-formed IBAN",
            Self::RemittanceInformation => {
                "must be at most 140 characters from the SEPA character set"
            }
            Self::NumberOfTransactions => "must be 1 to 15 digits",
            Self::LocalInstrumentCode => "only 'CORE', 'COR1' or 'B2B' are allowed",
            Self::CategoryPurposeCode => "only 'SUPP' or 'SALA' are allowed",
            Self::SequenceType => "only 'FRST', 'FNAL', 'OOFF' or 'RCUR' are allowed",
            Self::CreditorSchemeIdentification => "must not be empty",
            Self::InstructedAmount | Self::ControlSum => {
                "must be representable with exactly two fraction digits"
            }
        }
    }
}

/// Check `value` against the rule for `field`.
///
/// Returns the normalized value that the caller should store, or a
/// [`ValidationError`] naming the field.
pub fn check(field: Field, value: &str) -> Result<String, ValidationError> {
    let rule = field.rule();
    let normalized = rule.normalize(value);
    if rule.accepts(&normalized) {
        Ok(normalized)
    } else {
        Err(rejection(field))
    }
}

/// Round `amount` to cents and check the result against `field`.
///
/// Amounts too close to the `Decimal` limit cannot carry two fraction
/// digits and are rejected instead of being rendered without them.
pub fn check_amount(field: Field, amount: Decimal) -> Result<Decimal, ValidationError> {
    let rounded = round_amount(amount);
    check(field, &rounded.to_string())?;
    Ok(rounded)
}

/// The error reported when `field` rejects a value.
pub fn rejection(field: Field) -> ValidationError {
    ValidationError::new(field.name(), field.message())
}
