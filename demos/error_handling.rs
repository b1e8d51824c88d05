use rust_decimal_macros::dec;
use sepa_pain::core::*;

fn main() {
    // ── 1. Rejected field values ──────────────────────────────────────
    println!("=== Validation Errors ===");
    let mut tx = DirectDebitTransaction::new();
    let attempts = [
        tx.set_mandate_identification("MANDATE#1"),
        tx.set_debtor_iban("DE12"),
        tx.set_debtor_agent_bic("NOTABIC"),
        tx.set_end_to_end_identification(&"X".repeat(36)),
    ];
    for result in attempts {
        if let Err(e) = result {
            match e.as_validation() {
                Some(v) => println!("  {} -> {}", v.field, v.message),
                None => println!("  {e}"),
            }
        }
    }
    // Rejected values never reach the entity
    println!("  mandate after rejection: {:?}", tx.mandate_identification());

    // ── 2. Wrong transaction type for a batch ─────────────────────────
    println!("\n=== Type Mismatch ===");
    let mut batch = PaymentInfo::new(PaymentMethod::DirectDebit);
    let mut transfer = CreditTransferTransaction::new();
    transfer.set_instructed_amount(dec!(10));
    if let Err(e) = batch.add_transaction(transfer) {
        println!("  {e}");
    }

    let mut message = Message::new(MessageMode::CreditTransfer);
    if let Err(e) = message.add_payment_info(batch) {
        println!("  {e}");
    }

    // ── 3. Unknown codes ──────────────────────────────────────────────
    println!("\n=== Construction Errors ===");
    for code in ["SCT", "DD"] {
        match PaymentInfo::from_code(code) {
            Ok(pi) => println!("  {code}: {:?}", pi.payment_method()),
            Err(e) => println!("  {code}: {e}"),
        }
    }
    if let Err(e) = Message::with_definition("urn:iso:std:iso:20022:tech:xsd:pain.001.001.09") {
        println!("  {e}");
    }
    if let Err(e) = "ONCE".parse::<SequenceType>() {
        println!("  {e}");
    }
}
