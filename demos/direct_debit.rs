use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sepa_pain::core::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SepaError> {
    // RUST_LOG=sepa_pain=debug shows the running totals as they change
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let members = [
        ("M-0001", "2023-01-15", "Anna Schmidt", "DE02100100100006820101", "PBNKDEFF"),
        ("M-0002", "2023-03-02", "Jonas Weber", "DE02300209000106531065", "CMCIDEDD"),
        ("M-0003", "2024-02-20", "Lea Fischer", "DE02500105170137075030", "INGDDEFFXXX"),
    ];

    let mut batch = PaymentInfo::new(PaymentMethod::DirectDebit);
    batch.set_payment_information_identification("BEITRAG-2024-Q3")?;
    batch.set_sequence_type(SequenceType::Recurrent);
    batch.set_requested_collection_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    batch.set_creditor_name("Sportverein Musterstadt e.V.")?;
    batch.set_creditor_country("DE")?;
    batch.set_creditor_account_iban("DE44500105175407324931")?;
    batch.set_creditor_agent_bic("INGDDEFFXXX")?;
    batch.set_creditor_scheme_identification("DE98ZZZ09999999999")?;

    for (mandate, signed, name, iban, bic) in members {
        let mut tx = DirectDebitTransaction::new();
        tx.set_end_to_end_identification(&format!("BEITRAG-Q3-{mandate}"))?;
        tx.set_instructed_amount(dec!(45.00));
        tx.set_mandate_identification(mandate)?;
        tx.set_date_of_signature(signed);
        tx.set_debtor_name(name)?;
        tx.set_debtor_iban(iban)?;
        tx.set_debtor_agent_bic(bic)?;
        tx.set_remittance_information("Mitgliedsbeitrag Q3 2024")?;
        batch.add_transaction(tx)?;
    }

    let mut message = Message::with_definition(ns::PAIN_008)?;
    message.group_header_mut().set_message_identification("MSG-BEITRAG-2024-Q3")?;
    message.group_header_mut().set_initiating_party_name("Sportverein Musterstadt e.V.")?;
    message.add_payment_info(batch)?;

    println!("{}", message.to_xml()?);
    Ok(())
}
