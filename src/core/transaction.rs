use rust_decimal::Decimal;

use super::error::SepaError;
use super::types::{FlagValue, PaymentMethod};
use super::validation::{self, Field};

/// Fields shared by credit transfer and direct debit transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFields {
    instruction_identification: String,
    end_to_end_identification: String,
    instructed_amount: Decimal,
    remittance_information: String,
}

/// Accessors for the payment fields every transaction variant carries.
///
/// Setters validate against the rule table and leave the stored value
/// untouched on failure.
pub trait PaymentTransaction {
    fn fields(&self) -> &TransactionFields;
    fn fields_mut(&mut self) -> &mut TransactionFields;

    /// `PmtId/InstrId`. Falls back to the end-to-end identification while
    /// no instruction identification has been set.
    fn instruction_identification(&self) -> &str {
        let f = self.fields();
        if f.instruction_identification.is_empty() {
            &f.end_to_end_identification
        } else {
            &f.instruction_identification
        }
    }

    fn set_instruction_identification(&mut self, id: &str) -> Result<(), SepaError> {
        self.fields_mut().instruction_identification =
            validation::check(Field::InstructionIdentification, id)?;
        Ok(())
    }

    /// `PmtId/EndToEndId`.
    fn end_to_end_identification(&self) -> &str {
        &self.fields().end_to_end_identification
    }

    fn set_end_to_end_identification(&mut self, id: &str) -> Result<(), SepaError> {
        self.fields_mut().end_to_end_identification =
            validation::check(Field::EndToEndIdentification, id)?;
        Ok(())
    }

    /// `InstdAmt`, always in EUR.
    fn instructed_amount(&self) -> Decimal {
        self.fields().instructed_amount
    }

    /// Amounts are taken as given: neither sign nor magnitude is checked.
    fn set_instructed_amount(&mut self, amount: Decimal) {
        self.fields_mut().instructed_amount = amount;
    }

    /// `RmtInf/Ustrd`.
    fn remittance_information(&self) -> &str {
        &self.fields().remittance_information
    }

    fn set_remittance_information(&mut self, text: &str) -> Result<(), SepaError> {
        self.fields_mut().remittance_information =
            validation::check(Field::RemittanceInformation, text)?;
        Ok(())
    }
}

/// A single credit transfer (`CdtTrfTxInf`) paying one creditor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditTransferTransaction {
    fields: TransactionFields,
    creditor_agent_bic: String,
    creditor_name: String,
    creditor_iban: String,
}

impl PaymentTransaction for CreditTransferTransaction {
    fn fields(&self) -> &TransactionFields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut TransactionFields {
        &mut self.fields
    }
}

impl CreditTransferTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creditor agent BIC; empty when the creditor bank is not named.
    pub fn creditor_agent_bic(&self) -> &str {
        &self.creditor_agent_bic
    }

    pub fn set_creditor_agent_bic(&mut self, bic: &str) -> Result<(), SepaError> {
        self.creditor_agent_bic = validation::check(Field::CreditorAgentBic, bic)?;
        Ok(())
    }

    pub fn creditor_name(&self) -> &str {
        &self.creditor_name
    }

    pub fn set_creditor_name(&mut self, name: &str) -> Result<(), SepaError> {
        self.creditor_name = validation::check(Field::CreditorName, name)?;
        Ok(())
    }

    pub fn creditor_iban(&self) -> &str {
        &self.creditor_iban
    }

    pub fn set_creditor_iban(&mut self, iban: &str) -> Result<(), SepaError> {
        self.creditor_iban = validation::check(Field::CreditorIban, iban)?;
        Ok(())
    }
}

/// A single direct debit (`DrctDbtTxInf`) collected from one debtor
/// under a signed mandate.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectDebitTransaction {
    fields: TransactionFields,
    mandate_identification: String,
    date_of_signature: String,
    amendment_indicator: &'static str,
    debtor_agent_bic: String,
    debtor_name: String,
    debtor_iban: String,
}

impl Default for DirectDebitTransaction {
    fn default() -> Self {
        Self {
            fields: TransactionFields::default(),
            mandate_identification: String::new(),
            date_of_signature: String::new(),
            amendment_indicator: "false",
            debtor_agent_bic: String::new(),
            debtor_name: String::new(),
            debtor_iban: String::new(),
        }
    }
}

impl PaymentTransaction for DirectDebitTransaction {
    fn fields(&self) -> &TransactionFields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut TransactionFields {
        &mut self.fields
    }
}

impl DirectDebitTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// `MndtRltdInf/MndtId`.
    pub fn mandate_identification(&self) -> &str {
        &self.mandate_identification
    }

    pub fn set_mandate_identification(&mut self, id: &str) -> Result<(), SepaError> {
        self.mandate_identification = validation::check(Field::MandateIdentification, id)?;
        Ok(())
    }

    /// `MndtRltdInf/DtOfSgntr`, stored exactly as given.
    pub fn date_of_signature(&self) -> &str {
        &self.date_of_signature
    }

    pub fn set_date_of_signature(&mut self, date: impl Into<String>) {
        self.date_of_signature = date.into();
    }

    /// `MndtRltdInf/AmdmntInd`: the literal `"true"` or `"false"`.
    pub fn amendment_indicator(&self) -> &str {
        self.amendment_indicator
    }

    pub fn set_amendment_indicator(&mut self, value: impl FlagValue) {
        self.amendment_indicator = if value.as_flag() { "true" } else { "false" };
    }

    pub fn debtor_agent_bic(&self) -> &str {
        &self.debtor_agent_bic
    }

    pub fn set_debtor_agent_bic(&mut self, bic: &str) -> Result<(), SepaError> {
        self.debtor_agent_bic = validation::check(Field::DebtorAgentBic, bic)?;
        Ok(())
    }

    pub fn debtor_name(&self) -> &str {
        &self.debtor_name
    }

    pub fn set_debtor_name(&mut self, name: &str) -> Result<(), SepaError> {
        self.debtor_name = validation::check(Field::DebtorName, name)?;
        Ok(())
    }

    pub fn debtor_iban(&self) -> &str {
        &self.debtor_iban
    }

    pub fn set_debtor_iban(&mut self, iban: &str) -> Result<(), SepaError> {
        self.debtor_iban = validation::check(Field::DebtorIban, iban)?;
        Ok(())
    }
}

/// A transaction of either variant, as held by a payment info block.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    CreditTransfer(CreditTransferTransaction),
    DirectDebit(DirectDebitTransaction),
}

impl Transaction {
    /// The payment method a batch must have to accept this transaction.
    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            Self::CreditTransfer(_) => PaymentMethod::CreditTransfer,
            Self::DirectDebit(_) => PaymentMethod::DirectDebit,
        }
    }

    pub fn as_payment(&self) -> &dyn PaymentTransaction {
        match self {
            Self::CreditTransfer(tx) => tx,
            Self::DirectDebit(tx) => tx,
        }
    }

    pub fn instructed_amount(&self) -> Decimal {
        self.as_payment().instructed_amount()
    }
}

impl From<CreditTransferTransaction> for Transaction {
    fn from(tx: CreditTransferTransaction) -> Self {
        Self::CreditTransfer(tx)
    }
}

impl From<DirectDebitTransaction> for Transaction {
    fn from(tx: DirectDebitTransaction) -> Self {
        Self::DirectDebit(tx)
    }
}
