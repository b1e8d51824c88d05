use rust_decimal::Decimal;

use super::tree::XmlElement;
use super::xml_utils::{XmlResult, write_document};
use crate::core::*;

/// Generate the pain.001 / pain.008 document for a message.
///
/// After all blocks are assembled, the `NbOfTxs` and `CtrlSum` nodes of the
/// group header and of every payment info block are overwritten with the
/// entities' current totals.
pub fn to_xml(message: &Message) -> XmlResult {
    let mode = message.mode();
    tracing::debug!(
        ?mode,
        payment_infos = message.payment_infos().len(),
        "Serializing message"
    );

    let mut body = XmlElement::new(mode.root_element());
    body.append(message.group_header().to_xml());
    for payment_info in message.payment_infos() {
        body.append(payment_info.to_xml());
    }

    let group_header = message.group_header();
    if let Some(grp_hdr) = body.find_mut("GrpHdr") {
        overwrite_totals(
            grp_hdr,
            group_header.number_of_transactions(),
            group_header.control_sum(),
        );
    }
    let blocks = body
        .children_mut()
        .iter_mut()
        .filter(|c| c.name() == "PmtInf");
    for (block, payment_info) in blocks.zip(message.payment_infos()) {
        overwrite_totals(
            block,
            payment_info.number_of_transactions(),
            payment_info.control_sum(),
        );
    }

    let document = XmlElement::new("Document")
        .attr("xmlns", mode.namespace())
        .attr("xmlns:xsi", ns::XSI)
        .child(body);

    let xml = write_document(&document)?;
    tracing::debug!(bytes = xml.len(), "Message serialized");
    Ok(xml)
}

impl Message {
    /// Serialize this message. See [`to_xml`](crate::xml::to_xml).
    pub fn to_xml(&self) -> XmlResult {
        to_xml(self)
    }
}

/// Rewrite the first `NbOfTxs` and `CtrlSum` below `block`.
fn overwrite_totals(block: &mut XmlElement, count: u64, sum: Decimal) {
    if let Some(node) = block.find_mut("NbOfTxs") {
        node.set_text(count.to_string());
    }
    if let Some(node) = block.find_mut("CtrlSum") {
        node.set_text(format_amount(sum));
    }
    tracing::trace!(block = block.name(), count, %sum, "Totals rewritten");
}

fn leaf(name: &str, text: impl Into<String>) -> XmlElement {
    XmlElement::with_text(name, text)
}

fn instructed_amount(amount: Decimal) -> XmlElement {
    leaf("InstdAmt", format_amount(amount)).attr("Ccy", CURRENCY_CODE)
}

fn payment_id(tx: &dyn PaymentTransaction) -> XmlElement {
    XmlElement::new("PmtId")
        .child(leaf("InstrId", tx.instruction_identification()))
        .child(leaf("EndToEndId", tx.end_to_end_identification()))
}

fn financial_institution(wrapper: &str, bic: &str) -> XmlElement {
    XmlElement::nested(&[wrapper, "FinInstnId", "BIC"], bic)
}

fn remittance(tx: &dyn PaymentTransaction) -> XmlElement {
    XmlElement::nested(&["RmtInf", "Ustrd"], tx.remittance_information())
}

impl GroupHeader {
    /// Render the `GrpHdr` block.
    pub fn to_xml(&self) -> XmlElement {
        let mut initg_pty = XmlElement::new("InitgPty").child(leaf("Nm", self.initiating_party_name()));
        if let Some(bei) = self.initiating_party_bei() {
            initg_pty.append(XmlElement::nested(&["Id", "OrgId", "BICOrBEI"], bei));
        }

        XmlElement::new("GrpHdr")
            .child(leaf("MsgId", self.message_identification()))
            .child(leaf("CreDtTm", self.creation_date_time()))
            .child(leaf("NbOfTxs", self.number_of_transactions().to_string()))
            .child(leaf("CtrlSum", format_amount(self.control_sum())))
            .child(initg_pty)
    }
}

impl PaymentInfo {
    /// Render the `PmtInf` block including its transactions.
    pub fn to_xml(&self) -> XmlElement {
        let method = self.payment_method();
        let mut xml = XmlElement::new("PmtInf")
            .child(leaf("PmtInfId", self.payment_information_identification()))
            .child(leaf("PmtMtd", method.code()))
            .child(leaf("BtchBookg", self.batch_booking().to_string()))
            .child(leaf("NbOfTxs", self.number_of_transactions().to_string()))
            .child(leaf("CtrlSum", format_amount(self.control_sum())))
            .child(self.payment_type_information());

        match method {
            PaymentMethod::DirectDebit => {
                xml.append(leaf("ReqdColltnDt", self.requested_collection_date()))
                    .append(
                        XmlElement::new("Cdtr")
                            .child(leaf("Nm", self.creditor_name()))
                            .child(XmlElement::nested(&["PstlAdr", "Ctry"], self.creditor_country())),
                    )
                    .append(
                        XmlElement::new("CdtrAcct")
                            .child(XmlElement::nested(&["Id", "IBAN"], self.creditor_account_iban())),
                    )
                    .append(financial_institution("CdtrAgt", self.creditor_agent_bic()));
            }
            PaymentMethod::CreditTransfer => {
                xml.append(leaf("ReqdExctnDt", self.requested_execution_date()))
                    .append(XmlElement::new("Dbtr").child(leaf("Nm", self.debtor_name())))
                    .append(
                        XmlElement::new("DbtrAcct")
                            .child(XmlElement::nested(&["Id", "IBAN"], self.debtor_account_iban()))
                            .child(leaf("Ccy", CURRENCY_CODE)),
                    )
                    .append(financial_institution("DbtrAgt", self.debtor_agent_bic()));
            }
        }

        xml.append(leaf("ChrgBr", CHARGE_BEARER));

        if method == PaymentMethod::DirectDebit && !self.creditor_scheme_identification().is_empty() {
            let othr = XmlElement::new("Othr")
                .child(leaf("Id", self.creditor_scheme_identification()))
                .child(XmlElement::nested(&["SchmeNm", "Prtry"], PROPRIETARY_SCHEME_NAME));
            xml.append(
                XmlElement::new("CdtrSchmeId")
                    .child(XmlElement::new("Id").child(XmlElement::new("PrvtId").child(othr))),
            );
        }

        for transaction in self.transactions() {
            xml.append(transaction.to_xml());
        }

        overwrite_totals(&mut xml, self.number_of_transactions(), self.control_sum());
        xml
    }

    fn payment_type_information(&self) -> XmlElement {
        let mut pmt_tp_inf =
            XmlElement::new("PmtTpInf").child(XmlElement::nested(&["SvcLvl", "Cd"], SERVICE_LEVEL_CODE));
        match self.payment_method() {
            PaymentMethod::DirectDebit => {
                pmt_tp_inf
                    .append(XmlElement::nested(&["LclInstrm", "Cd"], self.local_instrument().code()))
                    .append(leaf("SeqTp", self.sequence_type().code()));
            }
            PaymentMethod::CreditTransfer => {
                pmt_tp_inf.append(XmlElement::nested(
                    &["CtgyPurp", "Cd"],
                    self.category_purpose().code(),
                ));
            }
        }
        pmt_tp_inf
    }
}

impl Transaction {
    pub fn to_xml(&self) -> XmlElement {
        match self {
            Self::CreditTransfer(tx) => tx.to_xml(),
            Self::DirectDebit(tx) => tx.to_xml(),
        }
    }
}

impl CreditTransferTransaction {
    /// Render the `CdtTrfTxInf` block.
    pub fn to_xml(&self) -> XmlElement {
        let mut xml = XmlElement::new("CdtTrfTxInf")
            .child(payment_id(self))
            .child(XmlElement::new("Amt").child(instructed_amount(self.instructed_amount())));
        if !self.creditor_agent_bic().is_empty() {
            xml.append(financial_institution("CdtrAgt", self.creditor_agent_bic()));
        }
        xml.child(XmlElement::nested(&["Cdtr", "Nm"], self.creditor_name()))
            .child(
                XmlElement::new("CdtrAcct")
                    .child(XmlElement::nested(&["Id", "IBAN"], self.creditor_iban())),
            )
            .child(remittance(self))
    }
}

impl DirectDebitTransaction {
    /// Render the `DrctDbtTxInf` block.
    pub fn to_xml(&self) -> XmlElement {
        let mndt_rltd_inf = XmlElement::new("MndtRltdInf")
            .child(leaf("MndtId", self.mandate_identification()))
            .child(leaf("DtOfSgntr", self.date_of_signature()))
            .child(leaf("AmdmntInd", self.amendment_indicator()));

        XmlElement::new("DrctDbtTxInf")
            .child(payment_id(self))
            .child(instructed_amount(self.instructed_amount()))
            .child(leaf("ChrgBr", CHARGE_BEARER))
            .child(XmlElement::new("DrctDbtTx").child(mndt_rltd_inf))
            .child(financial_institution("DbtrAgt", self.debtor_agent_bic()))
            .child(XmlElement::nested(&["Dbtr", "Nm"], self.debtor_name()))
            .child(
                XmlElement::new("DbtrAcct")
                    .child(XmlElement::nested(&["Id", "IBAN"], self.debtor_iban())),
            )
            .child(remittance(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn text<'a>(elem: &'a XmlElement, path: &[&str]) -> Option<&'a str> {
        elem.at(path).and_then(XmlElement::text)
    }

    #[test]
    fn group_header_block() {
        let mut gh = GroupHeader::new();
        gh.set_message_identification("MSG-1").unwrap();
        gh.set_initiating_party_name("ACME GmbH").unwrap();
        let xml = gh.to_xml();
        let names: Vec<&str> = xml.children().iter().map(XmlElement::name).collect();
        assert_eq!(names, ["MsgId", "CreDtTm", "NbOfTxs", "CtrlSum", "InitgPty"]);
        assert_eq!(text(&xml, &["CtrlSum"]), Some("0.00"));
        assert!(xml.at(&["InitgPty", "Id"]).is_none());

        gh.set_initiating_party_bei("ACMEDEFF");
        let xml = gh.to_xml();
        assert_eq!(
            text(&xml, &["InitgPty", "Id", "OrgId", "BICOrBEI"]),
            Some("ACMEDEFF")
        );
    }

    #[test]
    fn credit_transfer_agent_is_optional() {
        let mut tx = CreditTransferTransaction::new();
        tx.set_instructed_amount(dec!(7));
        let xml = tx.to_xml();
        assert!(xml.find("CdtrAgt").is_none());
        assert_eq!(text(&xml, &["Amt", "InstdAmt"]), Some("7.00"));
        assert_eq!(xml.at(&["Amt", "InstdAmt"]).unwrap().attribute("Ccy"), Some("EUR"));

        tx.set_creditor_agent_bic("COBADEFFXXX").unwrap();
        let xml = tx.to_xml();
        let names: Vec<&str> = xml.children().iter().map(XmlElement::name).collect();
        assert_eq!(
            names,
            ["PmtId", "Amt", "CdtrAgt", "Cdtr", "CdtrAcct", "RmtInf"]
        );
    }

    #[test]
    fn direct_debit_transaction_layout() {
        let mut tx = DirectDebitTransaction::new();
        tx.set_end_to_end_identification("E2E-9").unwrap();
        tx.set_mandate_identification("MNDT-9").unwrap();
        tx.set_date_of_signature("2023-11-01");
        tx.set_amendment_indicator(true);
        let xml = tx.to_xml();
        let names: Vec<&str> = xml.children().iter().map(XmlElement::name).collect();
        assert_eq!(
            names,
            ["PmtId", "InstdAmt", "ChrgBr", "DrctDbtTx", "DbtrAgt", "Dbtr", "DbtrAcct", "RmtInf"]
        );
        assert_eq!(text(&xml, &["PmtId", "InstrId"]), Some("E2E-9"));
        assert_eq!(
            text(&xml, &["DrctDbtTx", "MndtRltdInf", "AmdmntInd"]),
            Some("true")
        );
    }

    #[test]
    fn scheme_identification_block_only_when_set() {
        let mut pi = PaymentInfo::new(PaymentMethod::DirectDebit);
        assert!(pi.to_xml().find("CdtrSchmeId").is_none());

        pi.set_creditor_scheme_identification("DE98ZZZ09999999999").unwrap();
        let xml = pi.to_xml();
        let othr = xml.at(&["CdtrSchmeId", "Id", "PrvtId", "Othr"]).unwrap();
        assert_eq!(text(othr, &["Id"]), Some("DE98ZZZ09999999999"));
        assert_eq!(text(othr, &["SchmeNm", "Prtry"]), Some("SEPA"));
    }

    #[test]
    fn overwrite_totals_targets_first_match() {
        let mut block = XmlElement::new("PmtInf")
            .child(leaf("NbOfTxs", "0"))
            .child(leaf("CtrlSum", "0.00"));
        overwrite_totals(&mut block, 4, dec!(1.5));
        assert_eq!(text(&block, &["NbOfTxs"]), Some("4"));
        assert_eq!(text(&block, &["CtrlSum"]), Some("1.50"));
    }
}
