use std::cell::OnceCell;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::error::SepaError;
use super::transaction::Transaction;
use super::types::*;
use super::validation::{self, Field};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `PmtInf`: one batch of transactions sharing a payment method, a
/// requested date and the initiating party's account.
///
/// For direct debits the initiating party is the creditor; for credit
/// transfers it is the debtor. Only the fields of that role are rendered.
#[derive(Debug, Clone)]
pub struct PaymentInfo {
    payment_method: PaymentMethod,
    payment_information_identification: String,
    batch_booking: bool,
    number_of_transactions: u64,
    control_sum: Decimal,
    local_instrument: LocalInstrument,
    category_purpose: CategoryPurpose,
    sequence_type: SequenceType,
    requested_collection_date: OnceCell<String>,
    requested_execution_date: OnceCell<String>,
    creditor_name: String,
    creditor_country: String,
    creditor_account_iban: String,
    creditor_agent_bic: String,
    debtor_name: String,
    debtor_country: String,
    debtor_account_iban: String,
    debtor_agent_bic: String,
    creditor_scheme_identification: String,
    transactions: Vec<Transaction>,
}

impl PaymentInfo {
    pub fn new(payment_method: PaymentMethod) -> Self {
        Self {
            payment_method,
            payment_information_identification: String::new(),
            batch_booking: true,
            number_of_transactions: 0,
            control_sum: Decimal::ZERO,
            local_instrument: LocalInstrument::default(),
            category_purpose: CategoryPurpose::default(),
            sequence_type: SequenceType::default(),
            requested_collection_date: OnceCell::new(),
            requested_execution_date: OnceCell::new(),
            creditor_name: String::new(),
            creditor_country: String::new(),
            creditor_account_iban: String::new(),
            creditor_agent_bic: String::new(),
            debtor_name: String::new(),
            debtor_country: String::new(),
            debtor_account_iban: String::new(),
            debtor_agent_bic: String::new(),
            creditor_scheme_identification: String::new(),
            transactions: Vec::new(),
        }
    }

    /// Construct from the `PmtMtd` wire code (`"DD"` or `"TRF"`).
    pub fn from_code(payment_method: &str) -> Result<Self, SepaError> {
        Ok(Self::new(payment_method.parse()?))
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn payment_information_identification(&self) -> &str {
        &self.payment_information_identification
    }

    pub fn set_payment_information_identification(&mut self, id: &str) -> Result<(), SepaError> {
        self.payment_information_identification =
            validation::check(Field::PaymentInformationIdentification, id)?;
        Ok(())
    }

    pub fn batch_booking(&self) -> bool {
        self.batch_booking
    }

    pub fn set_batch_booking(&mut self, value: impl FlagValue) {
        self.batch_booking = value.as_flag();
    }

    /// Transactions added so far. Only [`add_transaction`](Self::add_transaction) changes it.
    pub fn number_of_transactions(&self) -> u64 {
        self.number_of_transactions
    }

    /// Sum of the instructed amounts added so far.
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    pub fn local_instrument(&self) -> LocalInstrument {
        self.local_instrument
    }

    /// Direct debit only; ignored when rendering a credit transfer batch.
    pub fn set_local_instrument(&mut self, code: LocalInstrument) {
        self.local_instrument = code;
    }

    pub fn set_local_instrument_code(&mut self, code: &str) -> Result<(), SepaError> {
        self.local_instrument = code.parse()?;
        Ok(())
    }

    pub fn category_purpose(&self) -> CategoryPurpose {
        self.category_purpose
    }

    /// Credit transfer only; ignored when rendering a direct debit batch.
    pub fn set_category_purpose(&mut self, code: CategoryPurpose) {
        self.category_purpose = code;
    }

    pub fn set_category_purpose_code(&mut self, code: &str) -> Result<(), SepaError> {
        self.category_purpose = code.parse()?;
        Ok(())
    }

    pub fn sequence_type(&self) -> SequenceType {
        self.sequence_type
    }

    /// Direct debit only; ignored when rendering a credit transfer batch.
    pub fn set_sequence_type(&mut self, sequence_type: SequenceType) {
        self.sequence_type = sequence_type;
    }

    pub fn set_sequence_type_code(&mut self, code: &str) -> Result<(), SepaError> {
        self.sequence_type = code.parse()?;
        Ok(())
    }

    /// `ReqdColltnDt` as `YYYY-MM-DD`. Defaults to today, fixed on first read.
    pub fn requested_collection_date(&self) -> &str {
        self.requested_collection_date.get_or_init(today)
    }

    pub fn set_requested_collection_date(&mut self, date: NaiveDate) {
        self.requested_collection_date = OnceCell::from(date.format(DATE_FORMAT).to_string());
    }

    /// `ReqdExctnDt` as `YYYY-MM-DD`. Defaults to today, fixed on first read.
    pub fn requested_execution_date(&self) -> &str {
        self.requested_execution_date.get_or_init(today)
    }

    pub fn set_requested_execution_date(&mut self, date: NaiveDate) {
        self.requested_execution_date = OnceCell::from(date.format(DATE_FORMAT).to_string());
    }

    pub fn creditor_name(&self) -> &str {
        &self.creditor_name
    }

    pub fn set_creditor_name(&mut self, name: &str) -> Result<(), SepaError> {
        self.creditor_name = validation::check(Field::CreditorName, name)?;
        Ok(())
    }

    pub fn creditor_country(&self) -> &str {
        &self.creditor_country
    }

    pub fn set_creditor_country(&mut self, country: &str) -> Result<(), SepaError> {
        self.creditor_country = validation::check(Field::CreditorCountry, country)?;
        Ok(())
    }

    pub fn creditor_account_iban(&self) -> &str {
        &self.creditor_account_iban
    }

    pub fn set_creditor_account_iban(&mut self, iban: &str) -> Result<(), SepaError> {
        self.creditor_account_iban = validation::check(Field::CreditorIban, iban)?;
        Ok(())
    }

    pub fn creditor_agent_bic(&self) -> &str {
        &self.creditor_agent_bic
    }

    pub fn set_creditor_agent_bic(&mut self, bic: &str) -> Result<(), SepaError> {
        self.creditor_agent_bic = validation::check(Field::CreditorAgentBic, bic)?;
        Ok(())
    }

    pub fn debtor_name(&self) -> &str {
        &self.debtor_name
    }

    pub fn set_debtor_name(&mut self, name: &str) -> Result<(), SepaError> {
        self.debtor_name = validation::check(Field::DebtorName, name)?;
        Ok(())
    }

    pub fn debtor_country(&self) -> &str {
        &self.debtor_country
    }

    pub fn set_debtor_country(&mut self, country: &str) -> Result<(), SepaError> {
        self.debtor_country = validation::check(Field::DebtorCountry, country)?;
        Ok(())
    }

    pub fn debtor_account_iban(&self) -> &str {
        &self.debtor_account_iban
    }

    pub fn set_debtor_account_iban(&mut self, iban: &str) -> Result<(), SepaError> {
        self.debtor_account_iban = validation::check(Field::DebtorIban, iban)?;
        Ok(())
    }

    pub fn debtor_agent_bic(&self) -> &str {
        &self.debtor_agent_bic
    }

    pub fn set_debtor_agent_bic(&mut self, bic: &str) -> Result<(), SepaError> {
        self.debtor_agent_bic = validation::check(Field::DebtorAgentBic, bic)?;
        Ok(())
    }

    /// SEPA creditor identifier; empty until set.
    pub fn creditor_scheme_identification(&self) -> &str {
        &self.creditor_scheme_identification
    }

    pub fn set_creditor_scheme_identification(&mut self, id: &str) -> Result<(), SepaError> {
        self.creditor_scheme_identification =
            validation::check(Field::CreditorSchemeIdentification, id)?;
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Append a transaction and roll its amount into the batch totals.
    ///
    /// The transaction variant must match the batch's payment method, and
    /// both the amount and the new control sum must fit with two fraction
    /// digits. A rejected transaction leaves the batch unchanged.
    pub fn add_transaction(&mut self, transaction: impl Into<Transaction>) -> Result<(), SepaError> {
        let transaction = transaction.into();
        if transaction.payment_method() != self.payment_method {
            return Err(SepaError::TypeMismatch(format!(
                "cannot add a {} transaction to a {} payment info",
                transaction.payment_method().code(),
                self.payment_method.code()
            )));
        }

        let amount = transaction.instructed_amount();
        validation::check_amount(Field::InstructedAmount, amount)?;
        let control_sum = self
            .control_sum
            .checked_add(amount)
            .ok_or_else(|| validation::rejection(Field::ControlSum))?;
        validation::check_amount(Field::ControlSum, control_sum)?;

        self.number_of_transactions += 1;
        self.control_sum = control_sum;
        self.transactions.push(transaction);

        tracing::debug!(
            pmt_inf_id = %self.payment_information_identification,
            nb_of_txs = self.number_of_transactions,
            ctrl_sum = %self.control_sum,
            "Transaction added"
        );

        Ok(())
    }
}

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
