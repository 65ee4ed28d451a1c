// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Namespaced `WebDAV` property names and their decoding rules.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::CalDavError;
use crate::xml::ns;

/// A property identified by namespace URI and local name.
///
/// Rendered in Clark notation, `{namespace-uri}local-name`, e.g.
/// `{urn:ietf:params:xml:ns:caldav}calendar-timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyName {
    namespace: Cow<'static, str>,
    local_name: Cow<'static, str>,
}

impl PropertyName {
    /// Creates a property name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            local_name: Cow::Owned(local_name.into()),
        }
    }

    /// Creates a property name from static strings, usable in constants.
    #[must_use]
    pub const fn from_static(namespace: &'static str, local_name: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            local_name: Cow::Borrowed(local_name),
        }
    }

    /// Namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Looks up the decoding rule registered for this property.
    ///
    /// Returns `None` for properties the decoder does not understand.
    #[must_use]
    pub fn rule(&self) -> Option<Rule> {
        RULES
            .iter()
            .find(|(name, _)| name == self)
            .map(|(_, rule)| *rule)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local_name)
    }
}

impl FromStr for PropertyName {
    type Err = CalDavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalDavError::InvalidPropertyName(s.to_string());
        let rest = s.strip_prefix('{').ok_or_else(invalid)?;
        let (namespace, local_name) = rest.split_once('}').ok_or_else(invalid)?;
        if local_name.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(namespace, local_name))
    }
}

impl serde::Serialize for PropertyName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `{DAV:}displayname`
pub const DISPLAY_NAME: PropertyName = PropertyName::from_static(ns::DAV, "displayname");
/// `{DAV:}resourcetype`
pub const RESOURCE_TYPE: PropertyName = PropertyName::from_static(ns::DAV, "resourcetype");

/// `{http://apple.com/ns/ical/}calendar-order`
pub const CALENDAR_ORDER: PropertyName =
    PropertyName::from_static(ns::APPLE_ICAL, "calendar-order");
/// `{http://apple.com/ns/ical/}calendar-color`
pub const CALENDAR_COLOR: PropertyName =
    PropertyName::from_static(ns::APPLE_ICAL, "calendar-color");
/// `{http://calendarserver.org/ns/}getctag`
pub const GETCTAG: PropertyName = PropertyName::from_static(ns::CALENDARSERVER, "getctag");
/// `{http://calendarserver.org/ns/}source`
pub const SOURCE: PropertyName = PropertyName::from_static(ns::CALENDARSERVER, "source");
/// `{urn:ietf:params:xml:ns:caldav}calendar-description`
pub const CALENDAR_DESCRIPTION: PropertyName =
    PropertyName::from_static(ns::CALDAV, "calendar-description");
/// `{urn:ietf:params:xml:ns:caldav}calendar-timezone`
pub const CALENDAR_TIMEZONE: PropertyName =
    PropertyName::from_static(ns::CALDAV, "calendar-timezone");
/// `{urn:ietf:params:xml:ns:caldav}supported-calendar-component-set`
pub const SUPPORTED_CALENDAR_COMPONENT_SET: PropertyName =
    PropertyName::from_static(ns::CALDAV, "supported-calendar-component-set");
/// `{urn:ietf:params:xml:ns:caldav}supported-calendar-data`
pub const SUPPORTED_CALENDAR_DATA: PropertyName =
    PropertyName::from_static(ns::CALDAV, "supported-calendar-data");
/// `{urn:ietf:params:xml:ns:caldav}max-resource-size`
pub const MAX_RESOURCE_SIZE: PropertyName =
    PropertyName::from_static(ns::CALDAV, "max-resource-size");
/// `{urn:ietf:params:xml:ns:caldav}min-date-time`
pub const MIN_DATE_TIME: PropertyName = PropertyName::from_static(ns::CALDAV, "min-date-time");
/// `{urn:ietf:params:xml:ns:caldav}max-date-time`
pub const MAX_DATE_TIME: PropertyName = PropertyName::from_static(ns::CALDAV, "max-date-time");
/// `{urn:ietf:params:xml:ns:caldav}max-instances`
pub const MAX_INSTANCES: PropertyName = PropertyName::from_static(ns::CALDAV, "max-instances");
/// `{urn:ietf:params:xml:ns:caldav}max-attendees-per-instance`
pub const MAX_ATTENDEES_PER_INSTANCE: PropertyName =
    PropertyName::from_static(ns::CALDAV, "max-attendees-per-instance");
/// `{urn:ietf:params:xml:ns:caldav}supported-collation-set`
pub const SUPPORTED_COLLATION_SET: PropertyName =
    PropertyName::from_static(ns::CALDAV, "supported-collation-set");
/// `{http://owncloud.org/ns}calendar-enabled`
pub const CALENDAR_ENABLED: PropertyName =
    PropertyName::from_static(ns::OWNCLOUD, "calendar-enabled");
/// `{http://nextcloud.com/ns}owner-displayname`
pub const OWNER_DISPLAYNAME: PropertyName =
    PropertyName::from_static(ns::NEXTCLOUD, "owner-displayname");

/// How a raw property value is turned into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Base-10 integer.
    Integer,
    /// Text, passed through verbatim.
    Text,
    /// Colour text with an optional `#RRGGBBAA` alpha channel stripped.
    Color,
    /// Recognized, but always decoded as undefined.
    Undefined,
    /// `true` iff the text is exactly `1`.
    Flag,
    /// `VEVENT`/`VJOURNAL`/`VTODO` support flags from `comp` elements.
    ComponentSet,
    /// `{content-type, version}` records from `calendar-data` elements.
    CalendarData,
    /// Positional `YYYYMMDDTHHMMSS` UTC date-time.
    DateTime,
    /// Collation identifiers from element text.
    CollationSet,
}

/// Every property the decoder understands, with its rule.
pub const RULES: &[(PropertyName, Rule)] = &[
    (CALENDAR_ORDER, Rule::Integer),
    (CALENDAR_COLOR, Rule::Color),
    (GETCTAG, Rule::Text),
    (SOURCE, Rule::Undefined),
    (CALENDAR_DESCRIPTION, Rule::Text),
    (CALENDAR_TIMEZONE, Rule::Text),
    (SUPPORTED_CALENDAR_COMPONENT_SET, Rule::ComponentSet),
    (SUPPORTED_CALENDAR_DATA, Rule::CalendarData),
    (MAX_RESOURCE_SIZE, Rule::Integer),
    (MIN_DATE_TIME, Rule::DateTime),
    (MAX_DATE_TIME, Rule::DateTime),
    (MAX_INSTANCES, Rule::Integer),
    (MAX_ATTENDEES_PER_INSTANCE, Rule::Integer),
    (SUPPORTED_COLLATION_SET, Rule::CollationSet),
    (CALENDAR_ENABLED, Rule::Flag),
    (OWNER_DISPLAYNAME, Rule::Text),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_name_display_uses_clark_notation() {
        assert_eq!(
            CALENDAR_TIMEZONE.to_string(),
            "{urn:ietf:params:xml:ns:caldav}calendar-timezone"
        );
        assert_eq!(PropertyName::new("", "foo").to_string(), "{}foo");
    }

    #[test]
    fn property_name_parse() {
        let name: PropertyName = "{http://apple.com/ns/ical/}calendar-color".parse().unwrap();
        assert_eq!(name, CALENDAR_COLOR);
        assert_eq!(name.namespace(), "http://apple.com/ns/ical/");
        assert_eq!(name.local_name(), "calendar-color");
    }

    #[test]
    fn property_name_parse_rejects_malformed() {
        for input in ["calendar-color", "{DAV:displayname", "{DAV:}", ""] {
            assert!(
                input.parse::<PropertyName>().is_err(),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn property_name_owned_equals_static() {
        let owned = PropertyName::new(ns::CALDAV, "max-instances");
        assert_eq!(owned, MAX_INSTANCES);
        assert_eq!(owned.rule(), Some(Rule::Integer));
    }

    #[test]
    fn rules_cover_every_known_property_once() {
        assert_eq!(RULES.len(), 16);
        for (i, (name, _)) in RULES.iter().enumerate() {
            assert!(
                RULES.iter().skip(i + 1).all(|(other, _)| other != name),
                "{name} registered twice"
            );
        }
    }

    #[test]
    fn rule_lookup_misses_unknown_properties() {
        assert_eq!(DISPLAY_NAME.rule(), None);
        assert_eq!(PropertyName::new(ns::CALDAV, "calendar-data").rule(), None);
        assert_eq!(SOURCE.rule(), Some(Rule::Undefined));
        assert_eq!(CALENDAR_ENABLED.rule(), Some(Rule::Flag));
    }
}
