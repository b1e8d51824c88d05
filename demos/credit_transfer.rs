use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sepa_pain::core::*;

fn main() -> Result<(), SepaError> {
    // Salary run: two employees paid from the company account
    let mut batch = PaymentInfo::new(PaymentMethod::CreditTransfer);
    batch.set_payment_information_identification("SALARY-2024-06")?;
    batch.set_category_purpose(CategoryPurpose::Salary);
    batch.set_requested_execution_date(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
    batch.set_debtor_name("ACME GmbH")?;
    batch.set_debtor_account_iban("DE44 5001 0517 5407 3249 31")?;
    batch.set_debtor_agent_bic("INGDDEFFXXX")?;

    for (n, (name, iban, amount)) in [
        ("Erika Mustermann", "DE89370400440532013000", dec!(3250.00)),
        ("Max Mustermann", "DE02120300000000202051", dec!(2980.55)),
    ]
    .into_iter()
    .enumerate()
    {
        let mut tx = CreditTransferTransaction::new();
        tx.set_end_to_end_identification(&format!("SAL-2024-06-{:03}", n + 1))?;
        tx.set_instructed_amount(amount);
        tx.set_creditor_name(name)?;
        tx.set_creditor_iban(iban)?;
        tx.set_remittance_information("Gehalt Juni 2024")?;
        batch.add_transaction(tx)?;
    }

    let mut message = Message::new(MessageMode::CreditTransfer);
    message.group_header_mut().set_message_identification("MSG-SAL-2024-06")?;
    message.group_header_mut().set_initiating_party_name("ACME GmbH")?;
    message.add_payment_info(batch)?;

    println!(
        "{} transactions, control sum {}",
        message.group_header().number_of_transactions(),
        format_amount(message.group_header().control_sum())
    );
    println!("{}", message.to_xml()?);
    Ok(())
}
