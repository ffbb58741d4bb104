//! Minimal XML element tree
//!
//! Article bodies and glossaries only need element names, child order and
//! text, so the tree keeps nothing else. Parsing is strict: a document that
//! is not well-formed (unclosed or mismatched tags, no root, content after
//! the root, unknown entities, malformed or repeated attributes) is an error
//! as a whole.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: String) -> Self {
        Self { name, children: Vec::new() }
    }

    /// Direct child elements, in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given name
    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Concatenation of every descendant text node, in document order
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.push_text(out),
            }
        }
    }
}

/// Parse a complete document and return its root element.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::Xml(format!("at byte {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(Error::Xml("content after root element".to_string()));
                }
                check_attributes(&e)?;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(Element::new(name));
            }
            Event::Empty(e) => {
                check_attributes(&e)?;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, Element::new(name))?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("unmatched end tag".to_string()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::Xml("no root element".to_string()))
}

/// Attributes are not kept, but must be well-formed and unique.
fn check_attributes(start: &BytesStart) -> Result<()> {
    let mut attributes = start.attributes();
    attributes.with_checks(true);
    for attr in attributes {
        let attr = attr.map_err(|e| Error::Xml(format!("<{}>: {}", String::from_utf8_lossy(start.name().as_ref()), e)))?;
        attr.unescape_value().map_err(|e| Error::Xml(e.to_string()))?;
    }
    Ok(())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None if root.is_none() => *root = Some(el),
        None => return Err(Error::Xml("content after root element".to_string())),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Text(text.to_string())),
        None if text.trim().is_empty() => {}
        None => return Err(Error::Xml("text outside root element".to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itertext_order() {
        let root = parse("<p>The <italic>ER</italic> gene<sup>1</sup>.</p>").unwrap();
        assert_eq!(root.name, "p");
        assert_eq!(root.text(), "The ER gene1.");
    }

    #[test]
    fn test_declaration_and_entities() {
        let root = parse("<?xml version=\"1.0\"?>\n<!-- c --><a>x &amp; y<![CDATA[<z>]]></a>\n").unwrap();
        assert_eq!(root.text(), "x & y<z>");
    }

    #[test]
    fn test_child_elements_in_order() {
        let root = parse("<a><b><c/></b>text<d/></a>").unwrap();
        let names: Vec<_> = root.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d"]);
        assert_eq!(root.first_child("d").map(|e| e.name.as_str()), Some("d"));
        assert!(root.first_child("c").is_none());
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse("").is_err());
        assert!(parse("just text").is_err());
        assert!(parse("<a><b></a>").is_err());
        assert!(parse("<a>").is_err());
        assert!(parse("<a/><b/>").is_err());
        assert!(parse("<a>&undefined;</a>").is_err());
        assert!(parse("<a b/>").is_err());
        assert!(parse(r#"<a x="1" x="2"/>"#).is_err());
        assert!(parse(r#"<a x="1" x="2"></a>"#).is_err());
        assert!(parse("<a x=1></a>").is_err());
        assert!(parse(r#"<a x="&undefined;"/>"#).is_err());
    }

    #[test]
    fn test_well_formed_attributes_are_accepted() {
        let root = parse(r#"<a id="1" class='x &amp; y'><b lang="en">t</b></a>"#).unwrap();
        assert_eq!(root.text(), "t");
    }
}
