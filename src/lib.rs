//! # sepa-pain
//!
//! ISO 20022 SEPA payment initiation: builds `pain.001` credit transfer and
//! `pain.008` direct debit documents from validated business data.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every setter checks its value against a single rule table
//! ([`crate::core::validation`]) before assigning it, and running totals are kept
//! at three levels: transaction → payment info → group header.
//!
//! ## Quick Start
//!
//! ```rust
//! use sepa_pain::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut tx = DirectDebitTransaction::new();
//! tx.set_end_to_end_identification("INV-2024-001").unwrap();
//! tx.set_instructed_amount(dec!(49.90));
//! tx.set_mandate_identification("MANDATE-42").unwrap();
//! tx.set_date_of_signature("2024-01-15");
//! tx.set_debtor_name("Kunde AG").unwrap();
//! tx.set_debtor_iban("DE89 3704 0044 0532 0130 00").unwrap();
//! tx.set_debtor_agent_bic("COBADEFFXXX").unwrap();
//!
//! let mut batch = PaymentInfo::new(PaymentMethod::DirectDebit);
//! batch.set_payment_information_identification("BATCH-2024-06").unwrap();
//! batch.set_creditor_scheme_identification("DE98ZZZ09999999999").unwrap();
//! batch.add_transaction(tx).unwrap();
//!
//! let mut message = Message::new(MessageMode::DirectDebit);
//! message.group_header_mut().set_message_identification("MSG-1").unwrap();
//! message.group_header_mut().set_initiating_party_name("ACME GmbH").unwrap();
//! message.add_payment_info(batch).unwrap();
//!
//! assert_eq!(message.group_header().number_of_transactions(), 1);
//! assert_eq!(message.group_header().control_sum(), dec!(49.90));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Payment model, validation rule table, aggregation |
//! | `xml` (default) | pain.001 / pain.008 XML generation |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
