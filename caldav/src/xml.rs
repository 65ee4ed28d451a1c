// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for WebDAV/CalDAV processing.

use std::borrow::Cow;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::CalDavError;
use crate::value::ElementHandle;

/// XML namespaces used in `CalDAV` and its vendor extensions.
pub mod ns {
    /// `WebDAV` namespace.
    pub const DAV: &str = "DAV:";

    /// `CalDAV` namespace.
    pub const CALDAV: &str = "urn:ietf:params:xml:ns:caldav";

    /// `CardDAV` namespace.
    pub const CARDDAV: &str = "urn:ietf:params:xml:ns:carddav";

    /// Apple `CalendarServer` namespace.
    pub const CALENDARSERVER: &str = "http://calendarserver.org/ns/";

    /// Apple iCal namespace (calendar colour and order).
    pub const APPLE_ICAL: &str = "http://apple.com/ns/ical/";

    /// ownCloud namespace.
    pub const OWNCLOUD: &str = "http://owncloud.org/ns";

    /// Nextcloud namespace.
    pub const NEXTCLOUD: &str = "http://nextcloud.com/ns";
}

/// A node inside an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A child element.
    Element(Element),
    /// Character data, kept verbatim.
    Text(String),
}

/// An owned, namespace-resolved XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: String,
    local_name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute, keyed by its local name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a text node.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Namespace URI, empty when the element is not in a namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local name without prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns `true` if the element has the given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace == namespace && self.local_name == local_name
    }

    /// All child nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, namespace: &str, local_name: &str) -> Option<&Self> {
        self.children().find(|e| e.is(namespace, local_name))
    }

    /// Returns `true` if the element has at least one child element.
    #[must_use]
    pub fn has_child_elements(&self) -> bool {
        self.children().next().is_some()
    }

    /// Consumes the element and returns its child elements.
    #[must_use]
    pub fn into_children(self) -> Vec<Self> {
        self.children
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(e) => Some(e),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Parses a document and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed, uses an undeclared
    /// namespace prefix, or has no root element.
    pub fn parse(xml: &str) -> Result<Self, CalDavError> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut stack: Vec<Self> = Vec::new();

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            let namespace = namespace_uri(&resolved)?;

            match event {
                Event::Start(ref e) => stack.push(Self::from_start(namespace, e)?),
                Event::Empty(ref e) => {
                    let element = Self::from_start(namespace, e)?;
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| CalDavError::Xml("Unbalanced end tag".to_string()))?;
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::Text(ref e) => {
                    let raw = std::str::from_utf8(e)
                        .map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))?;
                    let text = quick_xml::escape::unescape(raw)
                        .map_err(|e| CalDavError::Xml(e.to_string()))?;
                    push_text(&mut stack, &text);
                }
                Event::CData(ref e) => {
                    let text = std::str::from_utf8(e)
                        .map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))?;
                    push_text(&mut stack, text);
                }
                Event::GeneralRef(ref e) => {
                    if let Some(ch) = e.resolve_char_ref()? {
                        push_text(&mut stack, ch.encode_utf8(&mut [0; 4]));
                    } else {
                        let name = e.decode().map_err(|e| CalDavError::Xml(e.to_string()))?;
                        let resolved = quick_xml::escape::resolve_predefined_entity(&name)
                            .ok_or_else(|| {
                                CalDavError::Xml(format!("Unknown entity reference: &{name};"))
                            })?;
                        push_text(&mut stack, resolved);
                    }
                }
                Event::Eof => {
                    return Err(CalDavError::Xml("Unexpected EOF".to_string()));
                }
                _ => {}
            }
        }
    }

    fn from_start(namespace: String, start: &BytesStart<'_>) -> Result<Self, CalDavError> {
        let local_name = utf8(start.local_name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| CalDavError::Xml(e.to_string()))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = utf8(attr.key.local_name().as_ref())?.to_string();
            let value = quick_xml::escape::unescape(utf8(&attr.value)?)
                .map_err(|e| CalDavError::Xml(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            namespace,
            local_name,
            attributes,
            children: Vec::new(),
        })
    }
}

impl ElementHandle for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text_content(&self) -> Cow<'_, str> {
        match self.children.as_slice() {
            [] => Cow::Borrowed(""),
            [Node::Text(text)] => Cow::Borrowed(text),
            nodes => {
                let mut text = String::new();
                collect_text(nodes, &mut text);
                Cow::Owned(text)
            }
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) => collect_text(&e.children, out),
        }
    }
}

/// Appends a finished element to its parent, returning it if it is the root.
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            None
        }
        None => Some(element),
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    // Text outside the root element (prolog whitespace) is dropped.
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

fn namespace_uri(resolved: &ResolveResult<'_>) -> Result<String, CalDavError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(utf8(ns.0)?.to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(CalDavError::Xml(format!(
            "Unknown namespace prefix: {}",
            String::from_utf8_lossy(prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, CalDavError> {
    std::str::from_utf8(bytes).map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))
}
