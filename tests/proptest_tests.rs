//! Property-based tests for validation and aggregation.
//!
//! Run with: `cargo test --test proptest_tests`

use proptest::prelude::*;
use rust_decimal::Decimal;
use sepa_pain::core::validation::{check, is_sepa_char};
use sepa_pain::core::*;

/// Amounts between 0.00 and 999999.99.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amounts with up to four fraction digits.
fn raw_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|units| Decimal::new(units, 4))
}

fn sepa_id(max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[A-Za-z0-9+/?:(),.' -]{{1,{max}}}")).unwrap()
}

fn credit_transfer(amount: Decimal) -> CreditTransferTransaction {
    let mut tx = CreditTransferTransaction::new();
    tx.set_instructed_amount(amount);
    tx
}

// --- Identification rules ---

proptest! {
    #[test]
    fn sepa_identifiers_up_to_35_are_accepted(id in sepa_id(35)) {
        let mut gh = GroupHeader::new();
        prop_assert!(gh.set_message_identification(&id).is_ok());
        prop_assert_eq!(gh.message_identification(), id.as_str());
    }

    #[test]
    fn identifiers_over_35_are_rejected(id in sepa_id(35), extra in sepa_id(10)) {
        let long = format!("{id}{extra}");
        prop_assume!(long.chars().count() > 35);
        let mut pi = PaymentInfo::new(PaymentMethod::DirectDebit);
        prop_assert!(pi.set_payment_information_identification(&long).is_err());
        prop_assert_eq!(pi.payment_information_identification(), "");
    }

    #[test]
    fn foreign_characters_are_rejected(prefix in sepa_id(10), c in any::<char>()) {
        prop_assume!(!is_sepa_char(c));
        let id = format!("{prefix}{c}");
        prop_assume!(id.chars().count() <= 35);
        prop_assert!(check(Field::EndToEndIdentification, &id).is_err());
        prop_assert!(check(Field::MandateIdentification, &id).is_err());
    }
}

// --- BIC / IBAN normalization ---

proptest! {
    #[test]
    fn bic_whitespace_is_ignored(split in 0usize..=11, spaces in "[ \t]{0,3}") {
        let bic = "COBADEFFXXX";
        let padded = format!("{}{spaces}{}", &bic[..split], &bic[split..]);
        let mut tx = CreditTransferTransaction::new();
        prop_assert!(tx.set_creditor_agent_bic(&padded).is_ok());
        prop_assert_eq!(tx.creditor_agent_bic(), bic);
    }

    #[test]
    fn iban_groups_of_four_are_accepted(digits in "[0-9]{18}") {
        let iban = format!("DE89{digits}");
        let grouped = iban
            .as_bytes()
            .chunks(4)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join(" ");
        let mut tx = DirectDebitTransaction::new();
        prop_assert!(tx.set_debtor_iban(&grouped).is_ok());
        prop_assert_eq!(tx.debtor_iban(), iban.as_str());
    }
}

// --- Aggregation ---

proptest! {
    #[test]
    fn payment_info_totals_match_transactions(amounts in prop::collection::vec(amount(), 0..20)) {
        let mut pi = PaymentInfo::new(PaymentMethod::CreditTransfer);
        for a in &amounts {
            pi.add_transaction(credit_transfer(*a)).unwrap();
        }
        prop_assert_eq!(pi.number_of_transactions(), amounts.len() as u64);
        prop_assert_eq!(pi.control_sum(), amounts.iter().copied().sum::<Decimal>());
    }

    #[test]
    fn group_header_sum_has_two_decimals(
        batches in prop::collection::vec(prop::collection::vec(raw_amount(), 0..5), 1..5)
    ) {
        let mut msg = Message::new(MessageMode::CreditTransfer);
        let mut count = 0u64;
        for batch in &batches {
            let mut pi = PaymentInfo::new(PaymentMethod::CreditTransfer);
            for a in batch {
                pi.add_transaction(credit_transfer(*a)).unwrap();
            }
            count += batch.len() as u64;
            msg.add_payment_info(pi).unwrap();
        }
        let gh = msg.group_header();
        prop_assert_eq!(gh.number_of_transactions(), count);
        prop_assert_eq!(gh.control_sum().scale(), 2);
    }

    #[test]
    fn cent_amounts_sum_exactly(batches in prop::collection::vec(prop::collection::vec(amount(), 0..5), 1..5)) {
        let mut msg = Message::new(MessageMode::CreditTransfer);
        let mut total = Decimal::ZERO;
        for batch in &batches {
            let mut pi = PaymentInfo::new(PaymentMethod::CreditTransfer);
            for a in batch {
                pi.add_transaction(credit_transfer(*a)).unwrap();
                total += *a;
            }
            msg.add_payment_info(pi).unwrap();
        }
        prop_assert_eq!(msg.group_header().control_sum(), total);
    }

    #[test]
    fn formatted_amount_has_two_fraction_digits(a in raw_amount()) {
        let s = format_amount(a);
        let (_, frac) = s.split_once('.').unwrap();
        prop_assert_eq!(frac.len(), 2);
        prop_assert!((round_amount(a) - a).abs() <= Decimal::new(5, 3));
    }
}

// --- Flags ---

proptest! {
    #[test]
    fn only_literal_true_is_a_true_flag(s in "\\PC{0,8}") {
        let mut pi = PaymentInfo::new(PaymentMethod::CreditTransfer);
        pi.set_batch_booking(s.as_str());
        prop_assert_eq!(pi.batch_booking(), s == "true");
    }
}
