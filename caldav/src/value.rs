// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Raw and decoded property values.

use std::borrow::Cow;

use jiff::Timestamp;
use serde::ser::SerializeMap;

use crate::property::PropertyName;

/// Read access to an XML element, as needed by the decoder.
pub trait ElementHandle {
    /// Returns the value of the attribute with the given local name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Returns the concatenated text of the element and its descendants.
    fn text_content(&self) -> Cow<'_, str>;
}

/// Undecoded value of a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue<E> {
    /// Text content of an element without child elements.
    Text(String),
    /// Child elements, in document order.
    Elements(Vec<E>),
}

impl<E: ElementHandle> RawValue<E> {
    /// Text of the value, concatenating element text if needed.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Elements(elements) => match elements.as_slice() {
                [single] => single.text_content(),
                elements => Cow::Owned(elements.iter().map(|e| e.text_content()).collect()),
            },
        }
    }
}

/// Undecoded properties of a single resource, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperties<E> {
    entries: Vec<(PropertyName, RawValue<E>)>,
}

impl<E> Default for RawProperties<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> RawProperties<E> {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, replacing the value of an existing one in place.
    pub fn insert(&mut self, name: PropertyName, value: RawValue<E>) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the raw value of a property.
    #[must_use]
    pub fn get(&self, name: &PropertyName) -> Option<&RawValue<E>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterates properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyName, &RawValue<E>)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> FromIterator<(PropertyName, RawValue<E>)> for RawProperties<E> {
    fn from_iter<T: IntoIterator<Item = (PropertyName, RawValue<E>)>>(iter: T) -> Self {
        let mut props = Self::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

impl<E> Extend<(PropertyName, RawValue<E>)> for RawProperties<E> {
    fn extend<T: IntoIterator<Item = (PropertyName, RawValue<E>)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Calendar component types a collection accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ComponentSet {
    /// Events.
    pub vevent: bool,
    /// Journal entries.
    pub vjournal: bool,
    /// Todos.
    pub vtodo: bool,
}

/// A media type accepted for calendar object resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CalendarDataType {
    /// Media type, e.g. `text/calendar`.
    #[serde(rename = "content-type")]
    pub content_type: Option<String>,
    /// Format version, e.g. `2.0`.
    pub version: Option<String>,
}

/// Decoded value of a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Text.
    Text(String),
    /// Integer.
    Integer(i64),
    /// Boolean.
    Boolean(bool),
    /// UTC instant.
    Timestamp(Timestamp),
    /// Supported calendar components.
    Components(ComponentSet),
    /// Supported calendar data types, in server order.
    CalendarData(Vec<CalendarDataType>),
    /// Collation identifiers, in server order.
    Collations(Vec<String>),
    /// The property was recognized but has no usable value.
    Undefined,
    /// A malformed integer or date-time; holds the raw text.
    Invalid(String),
}

impl PropertyValue {
    /// Returns `true` for [`Self::Undefined`] and [`Self::Invalid`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Undefined | Self::Invalid(_))
    }

    /// Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Timestamp value.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Component set value.
    #[must_use]
    pub const fn as_components(&self) -> Option<ComponentSet> {
        match self {
            Self::Components(set) => Some(*set),
            _ => None,
        }
    }

    /// Calendar data types.
    #[must_use]
    pub fn as_calendar_data(&self) -> Option<&[CalendarDataType]> {
        match self {
            Self::CalendarData(types) => Some(types),
            _ => None,
        }
    }

    /// Collation identifiers.
    #[must_use]
    pub fn as_collations(&self) -> Option<&[String]> {
        match self {
            Self::Collations(collations) => Some(collations),
            _ => None,
        }
    }
}

impl serde::Serialize for PropertyValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Timestamp(ts) => serde::Serialize::serialize(ts, serializer),
            Self::Components(set) => serde::Serialize::serialize(set, serializer),
            Self::CalendarData(types) => serde::Serialize::serialize(types, serializer),
            Self::Collations(collations) => serde::Serialize::serialize(collations, serializer),
            Self::Undefined | Self::Invalid(_) => serializer.serialize_none(),
        }
    }
}

/// Decoded properties of a single resource, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedProperties {
    entries: Vec<(PropertyName, PropertyValue)>,
}

impl DecodedProperties {
    pub(crate) fn push(&mut self, name: PropertyName, value: PropertyValue) {
        self.entries.push((name, value));
    }

    /// Returns the decoded value of a property.
    #[must_use]
    pub fn get(&self, name: &PropertyName) -> Option<&PropertyValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns `true` if the property was decoded.
    #[must_use]
    pub fn contains(&self, name: &PropertyName) -> bool {
        self.get(name).is_some()
    }

    /// Iterates decoded properties in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyName, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Property names in input order.
    pub fn names(&self) -> impl Iterator<Item = &PropertyName> {
        self.entries.iter().map(|(n, _)| n)
    }

    /// Number of decoded properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for DecodedProperties {
    type Item = (PropertyName, PropertyValue);
    type IntoIter = std::vec::IntoIter<(PropertyName, PropertyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl serde::Serialize for DecodedProperties {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
