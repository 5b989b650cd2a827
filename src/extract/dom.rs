//! Minimal owned element tree over a quick-xml event stream.
//!
//! NF-e payloads in the wild are loosely structured: some carry the portal
//! namespace on every element, some only on the root, some prefix elements.
//! Lookups here match on the prefix-stripped local name so both shapes
//! resolve, and every accessor returns an `Option` — the call site states
//! its own default.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::core::ExtractError;

/// One parsed XML element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Local name with any namespace prefix stripped.
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated character data directly under this element, trimmed.
    pub text: String,
}

impl Element {
    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First element with the given local name, in document order, searching
    /// this element and its whole subtree.
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.descendant(name))
    }

    /// Text content of the first descendant with the given local name.
    /// `None` when the element is absent or empty.
    pub fn text_of(&self, name: &str) -> Option<&str> {
        let text = &self.descendant(name)?.text;
        if text.is_empty() { None } else { Some(text) }
    }

    /// Attribute value on this element.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn local_name(qname: &[u8]) -> String {
    let raw = String::from_utf8_lossy(qname);
    match raw.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => raw.into_owned(),
    }
}

/// Parse a document into its root element. Structural failures (unclosed
/// tags, stray markup, no root at all) map to [`ExtractError::Malformed`].
pub fn parse(xml: &str) -> Result<Element, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(open_element(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let elem = open_element(e)?;
                attach(&mut stack, &mut root, elem)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractError::Malformed(e.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(text.trim());
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text
                        .push_str(String::from_utf8_lossy(e.as_ref()).trim());
                }
            }
            Ok(Event::End(_)) => {
                let finished = stack
                    .pop()
                    .ok_or_else(|| ExtractError::Malformed("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, finished)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ExtractError::Malformed(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(ExtractError::Malformed("unclosed element".into()));
    }
    root.ok_or_else(|| ExtractError::Malformed("no root element".into()))
}

fn open_element(start: &quick_xml::events::BytesStart<'_>) -> Result<Element, ExtractError> {
    let mut elem = Element {
        name: local_name(start.name().as_ref()),
        ..Element::default()
    };
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ExtractError::Malformed(e.to_string()))?;
        let key = local_name(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_err(|e| ExtractError::Malformed(e.to_string()))?;
        elem.attributes.push((key, value.into_owned()));
    }
    Ok(elem)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    elem: Element,
) -> Result<(), ExtractError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(elem),
        None if root.is_none() => *root = Some(elem),
        None => {
            return Err(ExtractError::Malformed(
                "multiple root elements".into(),
            ));
        }
    }
    Ok(())
}
