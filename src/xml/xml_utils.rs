use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use super::tree::XmlElement;
use crate::core::SepaError;

pub type XmlResult = Result<String, SepaError>;

fn xml_io(e: std::io::Error) -> SepaError {
    SepaError::Xml(format!("XML write error: {e}"))
}

/// Indenting writer that serializes an [`XmlElement`] tree.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, SepaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, SepaError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SepaError::Xml(format!("XML UTF-8 error: {e}")))
    }

    /// Write `elem` and its subtree. Elements without text or children
    /// are written as empty tags.
    pub fn write_element(&mut self, elem: &XmlElement) -> Result<&mut Self, SepaError> {
        let mut start = BytesStart::new(elem.name());
        for (k, v) in elem.attributes() {
            start.push_attribute((k.as_str(), v.as_str()));
        }

        if elem.text().is_none() && elem.children().is_empty() {
            self.writer
                .write_event(Event::Empty(start))
                .map_err(xml_io)?;
            return Ok(self);
        }

        self.writer
            .write_event(Event::Start(start))
            .map_err(xml_io)?;
        if let Some(text) = elem.text() {
            self.writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_io)?;
        }
        for child in elem.children() {
            self.write_element(child)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(elem.name())))
            .map_err(xml_io)?;
        Ok(self)
    }
}

/// Serialize a complete document rooted at `root`, with XML declaration.
pub fn write_document(root: &XmlElement) -> XmlResult {
    let mut w = XmlWriter::new()?;
    w.write_element(root)?;
    w.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_declaration_text_and_escapes() {
        let root = XmlElement::new("Document")
            .attr("xmlns", "urn:test")
            .child(XmlElement::with_text("Nm", "Müller & Söhne"))
            .child(XmlElement::new("Empty"));
        let xml = write_document(&root).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<Document xmlns="urn:test">"#));
        assert!(xml.contains("<Nm>Müller &amp; Söhne</Nm>"));
        assert!(xml.contains("<Empty/>"));
        assert!(xml.trim_end().ends_with("</Document>"));
    }

    #[test]
    fn empty_text_is_written_as_start_end_pair() {
        let root = XmlElement::new("Ustrd").child(XmlElement::with_text("Cd", ""));
        let xml = write_document(&root).unwrap();
        assert!(xml.contains("<Cd></Cd>"));
    }
}
