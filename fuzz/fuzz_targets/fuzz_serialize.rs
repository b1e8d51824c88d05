#![no_main]

use libfuzzer_sys::fuzz_target;
use sepa_pain::core::*;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Whatever the setters accept must serialize without panicking.
    let mut tx = CreditTransferTransaction::new();
    let _ = tx.set_end_to_end_identification(s);
    let _ = tx.set_creditor_name(s);
    let _ = tx.set_remittance_information(s);
    tx.set_instructed_amount(rust_decimal::Decimal::from(data.len()));

    let mut pi = PaymentInfo::new(PaymentMethod::CreditTransfer);
    let _ = pi.set_debtor_name(s);
    let _ = pi.set_payment_information_identification(s);
    let _ = pi.add_transaction(tx);

    let mut msg = Message::new(MessageMode::CreditTransfer);
    let _ = msg.group_header_mut().set_initiating_party_name(s);
    let _ = msg.add_payment_info(pi);
    let _ = msg.to_xml();
});
