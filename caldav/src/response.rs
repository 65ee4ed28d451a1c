// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsers for `WebDAV` multistatus bodies.

use crate::decode::decode;
use crate::error::CalDavError;
use crate::property::{self, PropertyName, Rule};
use crate::types::Href;
use crate::value::{DecodedProperties, ElementHandle, RawProperties, RawValue};
use crate::xml::{Element, ns};

/// `WebDAV` multistatus response.
#[derive(Debug, Clone)]
pub struct MultiStatusResponse {
    /// The response items.
    pub responses: Vec<ResponseItem>,
}

/// Individual response in multistatus.
#[derive(Debug, Clone)]
pub struct ResponseItem {
    /// The resource the response is about.
    pub href: Href,
    /// Property groups, each with its own status.
    pub prop_stats: Vec<PropStat>,
    /// Response-level status, present when there are no propstats.
    pub status: Option<String>,
}

/// Property stat with status and values.
#[derive(Debug, Clone)]
pub struct PropStat {
    /// Undecoded properties.
    pub props: RawProperties<Element>,
    /// Status line, e.g. `HTTP/1.1 200 OK`.
    pub status: String,
}

impl MultiStatusResponse {
    /// Parses multistatus response from XML.
    ///
    /// # Errors
    ///
    /// Returns an error if XML parsing fails or the root element is not
    /// `DAV:multistatus`.
    pub fn from_xml(xml: &str) -> Result<Self, CalDavError> {
        let root = Element::parse(xml)?;
        if !root.is(ns::DAV, "multistatus") {
            return Err(CalDavError::InvalidResponse(format!(
                "expected {{DAV:}}multistatus, found {{{}}}{}",
                root.namespace(),
                root.local_name()
            )));
        }

        let responses: Vec<_> = root
            .into_children()
            .into_iter()
            .filter(|e| e.is(ns::DAV, "response"))
            .map(ResponseItem::from_element)
            .collect();

        tracing::debug!(count = responses.len(), "parsed multistatus response");
        Ok(Self { responses })
    }

    /// Finds the response for a given href.
    #[must_use]
    pub fn find(&self, href: &str) -> Option<&ResponseItem> {
        self.responses.iter().find(|r| r.href.as_str() == href)
    }
}

impl ResponseItem {
    fn from_element(element: Element) -> Self {
        let mut href = Href::new(String::new());
        let mut status = None;
        let mut prop_stats = Vec::new();

        for child in element.into_children() {
            if child.is(ns::DAV, "href") {
                href = Href::new(child.text_content().trim().to_string());
            } else if child.is(ns::DAV, "status") {
                status = Some(child.text_content().trim().to_string());
            } else if child.is(ns::DAV, "propstat") {
                prop_stats.push(PropStat::from_element(child));
            }
        }

        Self {
            href,
            prop_stats,
            status,
        }
    }

    /// Raw properties of all successful propstats, in document order.
    #[must_use]
    pub fn properties(&self) -> RawProperties<Element> {
        let mut props = RawProperties::new();
        for prop_stat in self.prop_stats.iter().filter(|p| p.is_success()) {
            props.extend(
                prop_stat
                    .props
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone())),
            );
        }
        props
    }

    /// Decodes the successful properties of this response.
    #[must_use]
    pub fn decode(&self) -> DecodedProperties {
        decode(&self.properties())
    }

    /// Text of a successful property, e.g. `DAV:displayname`.
    #[must_use]
    pub fn text(&self, name: &PropertyName) -> Option<String> {
        self.prop_stats
            .iter()
            .filter(|p| p.is_success())
            .find_map(|p| p.props.get(name))
            .map(|value| value.text().into_owned())
    }

    /// Names of the elements inside `DAV:resourcetype`.
    #[must_use]
    pub fn resource_types(&self) -> Vec<PropertyName> {
        let value = self
            .prop_stats
            .iter()
            .filter(|p| p.is_success())
            .find_map(|p| p.props.get(&property::RESOURCE_TYPE));

        match value {
            Some(RawValue::Elements(elements)) => elements
                .iter()
                .map(|e| PropertyName::new(e.namespace(), e.local_name()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns `true` if the resource is a calendar collection.
    #[must_use]
    pub fn is_calendar(&self) -> bool {
        self.resource_types()
            .iter()
            .any(|t| t.namespace() == ns::CALDAV && t.local_name() == "calendar")
    }
}

impl PropStat {
    fn from_element(element: Element) -> Self {
        let mut props = RawProperties::new();
        let mut status = String::new();

        for child in element.into_children() {
            if child.is(ns::DAV, "status") {
                status = child.text_content().trim().to_string();
            } else if child.is(ns::DAV, "prop") {
                for prop in child.into_children() {
                    let name = PropertyName::new(prop.namespace(), prop.local_name());
                    let value = if prop.has_child_elements() {
                        RawValue::Elements(prop.into_children())
                    } else if takes_elements(&name) && prop.text_content().trim().is_empty() {
                        RawValue::Elements(Vec::new())
                    } else {
                        RawValue::Text(prop.text_content().into_owned())
                    };
                    props.insert(name, value);
                }
            }
        }

        let prop_stat = Self { props, status };
        if prop_stat.status_code().is_none() {
            tracing::warn!(status = %prop_stat.status, "unparsable propstat status line");
        }
        prop_stat
    }

    /// Numeric status code parsed from the status line.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code()
            .is_some_and(|code| (200..300).contains(&code))
    }
}

/// Whether the property's value is a list of elements, so an empty element
/// means an empty list rather than empty text.
fn takes_elements(name: &PropertyName) -> bool {
    matches!(
        name.rule(),
        Some(Rule::ComponentSet | Rule::CalendarData | Rule::CollationSet)
    )
}
