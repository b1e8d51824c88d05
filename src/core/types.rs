use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::SepaError;
use super::validation::{self, Field};

/// The only currency SEPA payment initiation supports.
pub const CURRENCY_CODE: &str = "EUR";
/// Service level code (`PmtTpInf/SvcLvl/Cd`).
pub const SERVICE_LEVEL_CODE: &str = "SEPA";
/// Charge bearer (`ChrgBr`): charges shared following the service level.
pub const CHARGE_BEARER: &str = "SLEV";
/// Proprietary scheme name of the creditor scheme identification.
pub const PROPRIETARY_SCHEME_NAME: &str = "SEPA";

/// Namespace URIs of the generated documents.
pub mod ns {
    /// pain.001.001.03: customer credit transfer initiation.
    pub const PAIN_001: &str = "urn:iso:std:iso:20022:tech:xsd:pain.001.001.03";
    /// pain.008.001.02: customer direct debit initiation.
    pub const PAIN_008: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02";
    /// XML Schema instance namespace declared on every `Document`.
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}

/// Kind of payment initiation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageMode {
    /// pain.001: the initiating party pays creditors.
    CreditTransfer,
    /// pain.008: the initiating party collects from debtors.
    DirectDebit,
}

impl MessageMode {
    /// Default namespace of the `Document` root.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::CreditTransfer => ns::PAIN_001,
            Self::DirectDebit => ns::PAIN_008,
        }
    }

    /// Message-type element directly below `Document`.
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::CreditTransfer => "CstmrCdtTrfInitn",
            Self::DirectDebit => "CstmrDrctDbtInitn",
        }
    }

    /// Payment method every batch of this message must use.
    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            Self::CreditTransfer => PaymentMethod::CreditTransfer,
            Self::DirectDebit => PaymentMethod::DirectDebit,
        }
    }

    /// Resolve a mode from its namespace URI.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        match uri {
            ns::PAIN_001 => Some(Self::CreditTransfer),
            ns::PAIN_008 => Some(Self::DirectDebit),
            _ => None,
        }
    }
}

/// `PmtMtd`: payment method of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// DD
    DirectDebit,
    /// TRF
    CreditTransfer,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DirectDebit => "DD",
            Self::CreditTransfer => "TRF",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DD" => Some(Self::DirectDebit),
            "TRF" => Some(Self::CreditTransfer),
            _ => None,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = SepaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            SepaError::Construction(format!(
                "invalid payment method '{s}', must be either 'DD' or 'TRF'"
            ))
        })
    }
}

/// `LclInstrm/Cd`: direct debit scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalInstrument {
    /// CORE: consumer direct debit.
    #[default]
    Core,
    /// COR1: consumer direct debit with shortened lead time.
    Cor1,
    /// B2B: business to business direct debit.
    B2b,
}

impl LocalInstrument {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core => "CORE",
            Self::Cor1 => "COR1",
            Self::B2b => "B2B",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CORE" => Some(Self::Core),
            "COR1" => Some(Self::Cor1),
            "B2B" => Some(Self::B2b),
            _ => None,
        }
    }
}

/// `CtgyPurp/Cd`: purpose of a credit transfer batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryPurpose {
    /// SUPP: supplier payment.
    #[default]
    Supplier,
    /// SALA: salary payment.
    Salary,
}

impl CategoryPurpose {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Supplier => "SUPP",
            Self::Salary => "SALA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SUPP" => Some(Self::Supplier),
            "SALA" => Some(Self::Salary),
            _ => None,
        }
    }
}

/// `SeqTp`: position of a collection within a mandate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    /// FRST: first collection of a recurrent mandate.
    #[default]
    First,
    /// FNAL: final collection.
    Final,
    /// OOFF: one-off collection.
    OneOff,
    /// RCUR: subsequent recurrent collection.
    Recurrent,
}

impl SequenceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::First => "FRST",
            Self::Final => "FNAL",
            Self::OneOff => "OOFF",
            Self::Recurrent => "RCUR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FRST" => Some(Self::First),
            "FNAL" => Some(Self::Final),
            "OOFF" => Some(Self::OneOff),
            "RCUR" => Some(Self::Recurrent),
            _ => None,
        }
    }
}

// Textual codes go through the rule table so the error carries the same
// field-specific message as a setter would.
macro_rules! code_from_str {
    ($ty:ty, $field:expr) => {
        impl FromStr for $ty {
            type Err = SepaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validation::check($field, s)?;
                Self::from_code(s).ok_or_else(|| validation::rejection($field).into())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

code_from_str!(LocalInstrument, Field::LocalInstrumentCode);
code_from_str!(CategoryPurpose, Field::CategoryPurposeCode);
code_from_str!(SequenceType, Field::SequenceType);

/// Values that normalize to a boolean flag.
///
/// Only `true` and the literal string `"true"` count as true; every other
/// value is false.
pub trait FlagValue {
    fn as_flag(&self) -> bool;
}

impl FlagValue for bool {
    fn as_flag(&self) -> bool {
        *self
    }
}

impl FlagValue for &str {
    fn as_flag(&self) -> bool {
        *self == "true"
    }
}

impl FlagValue for String {
    fn as_flag(&self) -> bool {
        self == "true"
    }
}

/// Round to cents (commercial rounding) with a scale of 2.
///
/// Values within two digits of the `Decimal` limit cannot take scale 2 and
/// keep their own; [`validation::check_amount`] rejects those.
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Render an amount with two fraction digits. See [`round_amount`] for
/// amounts near the `Decimal` limit.
pub fn format_amount(amount: Decimal) -> String {
    round_amount(amount).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_amount_cases() {
        assert_eq!(format_amount(dec!(100)), "100.00");
        assert_eq!(format_amount(dec!(12.34)), "12.34");
        assert_eq!(format_amount(dec!(49.9)), "49.90");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
        assert_eq!(format_amount(dec!(1.004)), "1.00");
        assert_eq!(format_amount(dec!(0)), "0.00");
    }

    #[test]
    fn mode_is_pure_function_of_variant() {
        assert_eq!(MessageMode::CreditTransfer.namespace(), ns::PAIN_001);
        assert_eq!(MessageMode::DirectDebit.root_element(), "CstmrDrctDbtInitn");
        assert_eq!(
            MessageMode::from_namespace(ns::PAIN_008),
            Some(MessageMode::DirectDebit)
        );
        assert_eq!(MessageMode::from_namespace("urn:unknown"), None);
    }

    #[test]
    fn codes_parse_through_rule_table() {
        assert_eq!("B2B".parse::<LocalInstrument>().unwrap(), LocalInstrument::B2b);
        assert_eq!("OOFF".parse::<SequenceType>().unwrap(), SequenceType::OneOff);
        let err = "XXXX".parse::<CategoryPurpose>().unwrap_err();
        assert_eq!(err.as_validation().unwrap().field, "CtgyPurp");
        assert!(matches!(
            "CHK".parse::<PaymentMethod>(),
            Err(SepaError::Construction(_))
        ));
    }

    #[test]
    fn flag_values() {
        assert!(true.as_flag());
        assert!("true".as_flag());
        assert!(String::from("true").as_flag());
        assert!(!"TRUE".as_flag());
        assert!(!"yes".as_flag());
        assert!(!false.as_flag());
    }

    #[test]
    fn enums_serialize_by_variant() {
        let json = serde_json::to_string(&SequenceType::Recurrent).unwrap();
        assert_eq!(json, "\"Recurrent\"");
        let back: PaymentMethod = serde_json::from_str("\"DirectDebit\"").unwrap();
        assert_eq!(back, PaymentMethod::DirectDebit);
    }
}
