// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request builders for `WebDAV` operations.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::CalDavError;
use crate::property::{self, PropertyName, RULES};
use crate::xml::ns;

/// Conventional prefixes for well-known namespaces.
const PREFIXES: &[(&str, &str)] = &[
    (ns::DAV, "D"),
    (ns::CALDAV, "C"),
    (ns::CALENDARSERVER, "CS"),
    (ns::APPLE_ICAL, "ICAL"),
    (ns::OWNCLOUD, "OC"),
    (ns::NEXTCLOUD, "NC"),
    (ns::CARDDAV, "CARD"),
];

/// Value of the `Depth` request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// The resource itself.
    Zero,
    /// The resource and its direct members.
    One,
    /// The resource and all its descendants.
    Infinity,
}

impl Depth {
    /// Header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Infinity => "infinity",
        }
    }
}

/// PROPFIND request builder.
#[derive(Debug, Clone, Default)]
pub struct PropFindRequest {
    props: Vec<PropertyName>,
    all_prop: bool,
}

impl PropFindRequest {
    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request for all live properties (`<D:allprop/>`).
    #[must_use]
    pub fn all_prop() -> Self {
        Self {
            props: Vec::new(),
            all_prop: true,
        }
    }

    /// Creates a request for the display name, the resource type and every
    /// property the decoder understands.
    #[must_use]
    pub fn calendar_properties() -> Self {
        let mut request = Self::new();
        request.add_property(property::DISPLAY_NAME);
        request.add_property(property::RESOURCE_TYPE);
        for (name, _) in RULES {
            request.add_property(name.clone());
        }
        request
    }

    /// Adds a property to the request; duplicates are ignored.
    pub fn add_property(&mut self, prop: PropertyName) -> &mut Self {
        if !self.props.contains(&prop) {
            self.props.push(prop);
        }
        self
    }

    /// Requested properties.
    #[must_use]
    pub fn properties(&self) -> &[PropertyName] {
        &self.props
    }

    /// Builds the XML body for the PROPFIND request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, CalDavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let bindings = NamespaceBindings::for_properties(&self.props);

        // <D:propfind xmlns:D="DAV:" ...>
        let mut propfind = BytesStart::new("D:propfind");
        for (uri, prefix) in &bindings.0 {
            propfind.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
        }
        writer.write_event(Event::Start(propfind))?;

        if self.all_prop {
            writer.write_event(Event::Empty(BytesStart::new("D:allprop")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
            for prop in &self.props {
                let element = if prop.namespace().is_empty() {
                    // No-namespace names cannot take a prefix.
                    BytesStart::new(prop.local_name()).with_attributes([("xmlns", "")])
                } else {
                    let prefix = bindings.prefix(prop.namespace());
                    BytesStart::new(format!("{prefix}:{}", prop.local_name()))
                };
                writer.write_event(Event::Empty(element))?;
            }
            writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("D:propfind")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| CalDavError::Xml(format!("UTF-8 error: {e}")))
    }
}

/// Namespace URI to prefix assignments, in declaration order.
struct NamespaceBindings(Vec<(String, String)>);

impl NamespaceBindings {
    fn for_properties(props: &[PropertyName]) -> Self {
        let mut bindings = Self(vec![(ns::DAV.to_string(), "D".to_string())]);
        let mut unknown = 0;
        for prop in props {
            let uri = prop.namespace();
            if uri.is_empty() || bindings.0.iter().any(|(u, _)| u == uri) {
                continue;
            }
            let prefix = match PREFIXES.iter().find(|(u, _)| *u == uri) {
                Some((_, p)) => (*p).to_string(),
                None => {
                    let p = format!("X{unknown}");
                    unknown += 1;
                    p
                }
            };
            bindings.0.push((uri.to_string(), prefix));
        }
        bindings
    }

    fn prefix(&self, uri: &str) -> &str {
        self.0
            .iter()
            .find(|(u, _)| u == uri)
            .map_or("D", |(_, p)| p.as_str())
    }
}
