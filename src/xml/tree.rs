/// An in-memory XML element: name, attributes in insertion order, optional
/// text content and child elements in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Leaf element carrying text content.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut elem = Self::new(name);
        elem.text = Some(text.into());
        elem
    }

    /// A chain of nested elements with the text on the innermost one,
    /// e.g. `nested(&["Id", "IBAN"], iban)` for `<Id><IBAN>..</IBAN></Id>`.
    pub fn nested(names: &[&str], text: impl Into<String>) -> Self {
        let Some((innermost, outer)) = names.split_last() else {
            return Self::default();
        };
        outer
            .iter()
            .rev()
            .fold(Self::with_text(*innermost, text), |inner, name| {
                Self::new(*name).child(inner)
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [XmlElement] {
        &mut self.children
    }

    /// Append as last child.
    pub fn append(&mut self, child: XmlElement) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Builder form of [`append`](Self::append).
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// First descendant (document order, excluding `self`) with the given tag.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        for child in &mut self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find_mut(name) {
                return Some(found);
            }
        }
        None
    }

    /// Follow a path of child tags from `self`, e.g. `["PmtId", "EndToEndId"]`.
    pub fn at(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |elem, name| {
            elem.children.iter().find(|c| c.name == *name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_builds_chain() {
        let elem = XmlElement::nested(&["CdtrAgt", "FinInstnId", "BIC"], "COBADEFFXXX");
        assert_eq!(elem.name(), "CdtrAgt");
        assert_eq!(
            elem.at(&["FinInstnId", "BIC"]).and_then(XmlElement::text),
            Some("COBADEFFXXX")
        );
    }

    #[test]
    fn find_is_depth_first_in_document_order() {
        let mut root = XmlElement::new("PmtInf")
            .child(XmlElement::new("PmtTpInf").child(XmlElement::with_text("Cd", "SEPA")))
            .child(XmlElement::with_text("Cd", "outer"));
        assert_eq!(root.find("Cd").and_then(XmlElement::text), Some("SEPA"));

        root.find_mut("Cd").unwrap().set_text("changed");
        assert_eq!(
            root.at(&["PmtTpInf", "Cd"]).and_then(XmlElement::text),
            Some("changed")
        );
        assert!(root.find("PmtInf").is_none());
    }

    #[test]
    fn attributes_keep_order_and_replace() {
        let mut elem = XmlElement::new("Document")
            .attr("xmlns", "a")
            .attr("xmlns:xsi", "b");
        elem.set_attribute("xmlns", "c");
        assert_eq!(
            elem.attributes(),
            &[
                ("xmlns".to_string(), "c".to_string()),
                ("xmlns:xsi".to_string(), "b".to_string())
            ]
        );
        assert_eq!(elem.attribute("xmlns:xsi"), Some("b"));
    }
}
