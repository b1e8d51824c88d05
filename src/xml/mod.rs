//! pain.001 / pain.008 XML generation.
//!
//! Every entity renders itself to an [`XmlElement`] block; [`to_xml`]
//! assembles the blocks under a namespaced `Document` root, corrects the
//! transaction counts and control sums, and writes the tree out.
//!
//! # Example
//!
//! ```
//! use sepa_pain::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut tx = CreditTransferTransaction::new();
//! tx.set_end_to_end_identification("INV-2024-001").unwrap();
//! tx.set_instructed_amount(dec!(12.34));
//! tx.set_creditor_name("Kunde AG").unwrap();
//! tx.set_creditor_iban("DE89 3704 0044 0532 0130 00").unwrap();
//!
//! let mut batch = PaymentInfo::new(PaymentMethod::CreditTransfer);
//! batch.set_payment_information_identification("BATCH-1").unwrap();
//! batch.add_transaction(tx).unwrap();
//!
//! let mut message = Message::new(MessageMode::CreditTransfer);
//! message.group_header_mut().set_message_identification("MSG-1").unwrap();
//! message.add_payment_info(batch).unwrap();
//!
//! let xml = sepa_pain::xml::to_xml(&message).unwrap();
//! assert!(xml.contains("<CtrlSum>12.34</CtrlSum>"));
//! ```

mod render;
mod tree;
pub(crate) mod xml_utils;

pub use render::to_xml;
pub use tree::XmlElement;
pub use xml_utils::XmlResult;
