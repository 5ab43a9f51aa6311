//! Owned XML element tree with local-name lookup.
//!
//! Maven POMs normally carry a single default namespace on the root
//! `<project>` element, so element tags are unprefixed in the source text.
//! Lookup here matches on the *local* part of a tag name, which makes both
//! namespaced and namespace-free POMs behave identically. The `xmlns`
//! declaration survives as an ordinary attribute, so a rewritten document
//! keeps its single default namespace declaration without any registration
//! step.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

/// A node in the element tree: a child element or a run of text.
///
/// Whitespace-only text is dropped at parse time; output is re-indented on
/// write, so the original formatting is not preserved byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Unescaped character data.
    Text(String),
}

/// An XML element: tag name as written, attributes in document order,
/// and child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as it appeared in the source, prefix included if any.
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf element holding only the given text.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut elem = Self::new(name);
        elem.children.push(Node::Text(text.into()));
        elem
    }

    /// The tag name without any namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// First direct child element with the given local name.
    #[must_use]
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.local_name() == local)
    }

    /// Mutable variant of [`Element::child`].
    pub fn child_mut(&mut self, local: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) if e.local_name() == local => Some(e),
            _ => None,
        })
    }

    /// All direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Direct child elements with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |e| e.local_name() == local)
    }

    /// Concatenated text content of this element, trimmed.
    ///
    /// Returns `None` when the element holds no non-whitespace text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            Node::Text(t) => {
                let trimmed = t.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            Node::Element(_) => None,
        })
    }

    /// Trimmed text of the first child with the given local name.
    #[must_use]
    pub fn child_text(&self, local: &str) -> Option<&str> {
        self.child(local).and_then(Element::text)
    }

    /// Replace this element's content with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// All descendant elements (depth-first, document order) with the given
    /// local name. The element itself is not considered.
    #[must_use]
    pub fn descendants_named(&self, local: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_descendants(self, local, &mut found);
        found
    }

    /// Visit every descendant element with the given local name, mutably.
    pub fn for_each_descendant_named_mut<F>(&mut self, local: &str, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        for node in &mut self.children {
            if let Node::Element(e) = node {
                if e.local_name() == local {
                    f(e);
                }
                e.for_each_descendant_named_mut(local, f);
            }
        }
    }
}

fn collect_descendants<'a>(elem: &'a Element, local: &str, found: &mut Vec<&'a Element>) {
    for child in elem.child_elements() {
        if child.local_name() == local {
            found.push(child);
        }
        collect_descendants(child, local, found);
    }
}

/// Parse an XML document into its root element.
///
/// Comments, processing instructions, and the XML declaration are dropped;
/// whitespace-only text is skipped. CDATA is folded into plain text.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    // Stack of open elements; the document root ends up as the only entry
    // popped at depth zero.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let elem = element_from_start(&start)?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::End(end) => {
                let elem = stack.pop().ok_or_else(|| {
                    Error::Malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, elem)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| Error::Malformed(e.to_string()))?;
                if !value.trim().is_empty() {
                    if let Some(open) = stack.last_mut() {
                        open.children.push(Node::Text(value.into_owned()));
                    }
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                if let Some(open) = stack.last_mut() {
                    open.children.push(Node::Text(value));
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(Error::Malformed(format!(
            "unclosed element <{}>",
            stack[stack.len() - 1].name
        )));
    }
    root.ok_or_else(|| Error::Malformed("document has no root element".to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut elem = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Malformed(e.to_string()))?
            .into_owned();
        elem.attributes.push((key, value));
    }
    Ok(elem)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, elem: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(elem));
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::Malformed(
            "document has more than one root element".to_string(),
        ));
    }
    *root = Some(elem);
    Ok(())
}

/// Serialize an element tree back to XML with an XML declaration and
/// two-space indentation.
pub fn write(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_element(writer: &mut Writer<Vec<u8>>, elem: &Element) -> Result<()> {
    let mut start = BytesStart::new(elem.name.as_str());
    for (key, value) in &elem.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if elem.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &elem.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(elem.name.as_str())))?;
    Ok(())
}
