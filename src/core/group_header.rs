use std::cell::OnceCell;

use chrono::Local;
use rust_decimal::Decimal;

use super::error::SepaError;
use super::types::round_amount;
use super::validation::{self, Field};

/// `GrpHdr`: message identification and message-wide totals.
///
/// The totals are pushed in by [`Message::add_payment_info`](super::Message::add_payment_info);
/// they are not recomputed from the payment infos.
#[derive(Debug, Clone)]
pub struct GroupHeader {
    message_identification: String,
    creation_date_time: OnceCell<String>,
    number_of_transactions: u64,
    control_sum: Decimal,
    initiating_party_name: String,
    initiating_party_bei: Option<String>,
}

impl Default for GroupHeader {
    fn default() -> Self {
        Self {
            message_identification: String::new(),
            creation_date_time: OnceCell::new(),
            number_of_transactions: 0,
            control_sum: round_amount(Decimal::ZERO),
            initiating_party_name: String::new(),
            initiating_party_bei: None,
        }
    }
}

impl GroupHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_identification(&self) -> &str {
        &self.message_identification
    }

    pub fn set_message_identification(&mut self, id: &str) -> Result<(), SepaError> {
        self.message_identification = validation::check(Field::MessageIdentification, id)?;
        Ok(())
    }

    /// `CreDtTm` as a local `YYYY-MM-DDTHH:MM:SS` timestamp.
    ///
    /// Taken from the clock on first read and never recomputed, so reading
    /// it early pins the value.
    pub fn creation_date_time(&self) -> &str {
        self.creation_date_time
            .get_or_init(|| Local::now().format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn number_of_transactions(&self) -> u64 {
        self.number_of_transactions
    }

    /// Rejects counts whose decimal form exceeds 15 digits.
    pub fn set_number_of_transactions(&mut self, count: u64) -> Result<(), SepaError> {
        validation::check(Field::NumberOfTransactions, &count.to_string())?;
        self.number_of_transactions = count;
        Ok(())
    }

    /// Always carries exactly two fraction digits.
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    /// Rounds to cents. Rejects sums too large to carry two fraction digits.
    pub fn set_control_sum(&mut self, sum: Decimal) -> Result<(), SepaError> {
        self.control_sum = validation::check_amount(Field::ControlSum, sum)?;
        Ok(())
    }

    pub fn initiating_party_name(&self) -> &str {
        &self.initiating_party_name
    }

    pub fn set_initiating_party_name(&mut self, name: &str) -> Result<(), SepaError> {
        self.initiating_party_name = validation::check(Field::InitiatingPartyName, name)?;
        Ok(())
    }

    pub fn initiating_party_bei(&self) -> Option<&str> {
        self.initiating_party_bei.as_deref()
    }

    /// Not validated. An empty value clears the identifier.
    pub fn set_initiating_party_bei(&mut self, bei: impl Into<String>) {
        let bei = bei.into();
        self.initiating_party_bei = (!bei.is_empty()).then_some(bei);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn control_sum_has_two_fraction_digits() {
        let mut gh = GroupHeader::new();
        assert_eq!(gh.control_sum().to_string(), "0.00");
        gh.set_control_sum(dec!(12.3)).unwrap();
        assert_eq!(gh.control_sum().to_string(), "12.30");
        gh.set_control_sum(dec!(12.345)).unwrap();
        assert_eq!(gh.control_sum().to_string(), "12.35");

        let err = gh.set_control_sum(Decimal::MAX).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field, "CtrlSum");
        assert_eq!(gh.control_sum().to_string(), "12.35");
    }

    #[test]
    fn creation_date_time_is_cached() {
        let gh = GroupHeader::new();
        let first = gh.creation_date_time().to_string();
        assert_eq!(first.len(), 19);
        assert_eq!(&first[10..11], "T");
        assert_eq!(gh.creation_date_time(), first);
    }

    #[test]
    fn number_of_transactions_limit() {
        let mut gh = GroupHeader::new();
        gh.set_number_of_transactions(999_999_999_999_999).unwrap();
        let err = gh.set_number_of_transactions(1_000_000_000_000_000).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field, "NbOfTxs");
        assert_eq!(gh.number_of_transactions(), 999_999_999_999_999);
    }

    #[test]
    fn initiating_party() {
        let mut gh = GroupHeader::new();
        gh.set_initiating_party_name("ACME GmbH").unwrap();
        assert!(gh.set_initiating_party_name("").is_err());
        assert_eq!(gh.initiating_party_name(), "ACME GmbH");

        assert_eq!(gh.initiating_party_bei(), None);
        gh.set_initiating_party_bei("ACMEDEFFXXX");
        assert_eq!(gh.initiating_party_bei(), Some("ACMEDEFFXXX"));
        gh.set_initiating_party_bei("");
        assert_eq!(gh.initiating_party_bei(), None);
    }
}
