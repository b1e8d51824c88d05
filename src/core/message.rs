use super::error::SepaError;
use super::group_header::GroupHeader;
use super::payment_info::PaymentInfo;
use super::types::MessageMode;
use super::validation::{self, Field};

/// A pain.001 or pain.008 customer payment initiation message.
///
/// Owns exactly one [`GroupHeader`] and an append-only list of
/// [`PaymentInfo`] batches. Adding a batch pushes its current totals into
/// the group header once; transactions added to that batch afterwards are
/// not reflected in the group header totals.
#[derive(Debug, Clone)]
pub struct Message {
    mode: MessageMode,
    group_header: GroupHeader,
    payment_infos: Vec<PaymentInfo>,
}

impl Message {
    pub fn new(mode: MessageMode) -> Self {
        Self {
            mode,
            group_header: GroupHeader::default(),
            payment_infos: Vec::new(),
        }
    }

    /// Construct from a message definition namespace URI
    /// (`urn:iso:std:iso:20022:tech:xsd:pain.001.001.03` or `...pain.008.001.02`).
    pub fn with_definition(namespace: &str) -> Result<Self, SepaError> {
        MessageMode::from_namespace(namespace)
            .map(Self::new)
            .ok_or_else(|| {
                SepaError::Construction(format!("unsupported message definition '{namespace}'"))
            })
    }

    pub fn mode(&self) -> MessageMode {
        self.mode
    }

    pub fn namespace(&self) -> &'static str {
        self.mode.namespace()
    }

    pub fn group_header(&self) -> &GroupHeader {
        &self.group_header
    }

    pub fn group_header_mut(&mut self) -> &mut GroupHeader {
        &mut self.group_header
    }

    /// Replace the group header, including any totals it already carries.
    pub fn set_group_header(&mut self, group_header: GroupHeader) {
        self.group_header = group_header;
    }

    pub fn payment_infos(&self) -> &[PaymentInfo] {
        &self.payment_infos
    }

    /// Mutable access to an already added batch. Totals already pushed into
    /// the group header are left as they are.
    pub fn payment_info_mut(&mut self, index: usize) -> Option<&mut PaymentInfo> {
        self.payment_infos.get_mut(index)
    }

    /// Append a batch and add its current count and sum to the group header.
    pub fn add_payment_info(&mut self, payment_info: PaymentInfo) -> Result<(), SepaError> {
        let expected = self.mode.payment_method();
        if payment_info.payment_method() != expected {
            return Err(SepaError::TypeMismatch(format!(
                "cannot add a {} payment info to a {} message",
                payment_info.payment_method().code(),
                expected.code()
            )));
        }

        let count = self
            .group_header
            .number_of_transactions()
            .checked_add(payment_info.number_of_transactions())
            .ok_or_else(|| SepaError::from(validation::rejection(Field::NumberOfTransactions)))?;
        let sum = self
            .group_header
            .control_sum()
            .checked_add(payment_info.control_sum())
            .ok_or_else(|| SepaError::from(validation::rejection(Field::ControlSum)))?;
        let sum = validation::check_amount(Field::ControlSum, sum)?;

        self.group_header.set_number_of_transactions(count)?;
        self.group_header.set_control_sum(sum)?;

        tracing::debug!(
            pmt_inf_id = %payment_info.payment_information_identification(),
            nb_of_txs = count,
            ctrl_sum = %self.group_header.control_sum(),
            "Payment info added"
        );

        self.payment_infos.push(payment_info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CreditTransferTransaction, PaymentMethod, PaymentTransaction};
    use rust_decimal_macros::dec;

    fn transfer_batch(amounts: &[rust_decimal::Decimal]) -> PaymentInfo {
        let mut pi = PaymentInfo::new(PaymentMethod::CreditTransfer);
        for amount in amounts {
            let mut tx = CreditTransferTransaction::new();
            tx.set_instructed_amount(*amount);
            pi.add_transaction(tx).unwrap();
        }
        pi
    }

    #[test]
    fn with_definition() {
        let msg =
            Message::with_definition("urn:iso:std:iso:20022:tech:xsd:pain.008.001.02").unwrap();
        assert_eq!(msg.mode(), MessageMode::DirectDebit);
        assert!(matches!(
            Message::with_definition("urn:iso:std:iso:20022:tech:xsd:pain.001.001.09"),
            Err(SepaError::Construction(_))
        ));
    }

    #[test]
    fn totals_are_pushed_on_add() {
        let mut msg = Message::new(MessageMode::CreditTransfer);
        msg.add_payment_info(transfer_batch(&[dec!(1.50), dec!(2.25)]))
            .unwrap();
        msg.add_payment_info(transfer_batch(&[dec!(0.333)])).unwrap();
        assert_eq!(msg.group_header().number_of_transactions(), 3);
        assert_eq!(msg.group_header().control_sum().to_string(), "4.08");
    }

    #[test]
    fn later_transactions_do_not_reach_group_header() {
        let mut msg = Message::new(MessageMode::CreditTransfer);
        msg.add_payment_info(transfer_batch(&[dec!(10)])).unwrap();

        let mut tx = CreditTransferTransaction::new();
        tx.set_instructed_amount(dec!(5));
        msg.payment_info_mut(0).unwrap().add_transaction(tx).unwrap();

        assert_eq!(msg.payment_infos()[0].number_of_transactions(), 2);
        assert_eq!(msg.group_header().number_of_transactions(), 1);
        assert_eq!(msg.group_header().control_sum(), dec!(10.00));
    }

    #[test]
    fn control_sum_overflow_is_rejected_without_side_effects() {
        let half = rust_decimal::Decimal::from_i128_with_scale(
            50_000_000_000_000_000_000_000_000_000,
            2,
        );
        let mut msg = Message::new(MessageMode::CreditTransfer);
        msg.add_payment_info(transfer_batch(&[half])).unwrap();
        let err = msg.add_payment_info(transfer_batch(&[half])).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field, "CtrlSum");
        assert_eq!(msg.payment_infos().len(), 1);
        assert_eq!(msg.group_header().number_of_transactions(), 1);
        assert_eq!(msg.group_header().control_sum(), half);
    }

    #[test]
    fn mismatched_payment_info_is_rejected() {
        let mut msg = Message::new(MessageMode::DirectDebit);
        let err = msg.add_payment_info(transfer_batch(&[dec!(1)])).unwrap_err();
        assert!(matches!(err, SepaError::TypeMismatch(_)));
        assert!(msg.payment_infos().is_empty());
        assert_eq!(msg.group_header().number_of_transactions(), 0);
    }
}
