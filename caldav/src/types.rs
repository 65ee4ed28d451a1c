// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

use jiff::Timestamp;

use crate::property::{self, PropertyName};
use crate::response::ResponseItem;
use crate::value::{CalendarDataType, ComponentSet, DecodedProperties};

/// Resource href (path).
///
/// A `Href` represents the path to a resource on a `WebDAV` server,
/// such as `/calendars/user/personal/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Href(String);

impl Href {
    /// Creates a new `Href` from a string.
    #[must_use]
    pub const fn new(href: String) -> Self {
        Self(href)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Href {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Href {
    fn from(href: String) -> Self {
        Self(href)
    }
}

impl From<&str> for Href {
    fn from(href: &str) -> Self {
        Self(href.to_string())
    }
}

/// Calendar collection metadata.
///
/// Built from the decoded properties of a calendar collection. Properties the
/// server did not report, or reported with a malformed value, are `None`.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CalendarCollection {
    /// The href of the calendar collection.
    pub href: Option<Href>,
    /// The display name of the calendar.
    pub display_name: Option<String>,
    /// The description of the calendar.
    pub description: Option<String>,
    /// `#RRGGBB` colour (or whatever the server sent, minus an alpha channel).
    pub color: Option<String>,
    /// Sort position among the user's calendars.
    pub order: Option<i64>,
    /// Collection tag (`CTag`) for change detection.
    pub ctag: Option<String>,
    /// `VTIMEZONE` body of the default time zone.
    pub timezone: Option<String>,
    /// Whether the calendar is enabled (ownCloud/Nextcloud).
    pub enabled: Option<bool>,
    /// Display name of the owner (Nextcloud).
    pub owner_display_name: Option<String>,
    /// Supported component types.
    pub components: Option<ComponentSet>,
    /// Supported media types for calendar objects.
    pub calendar_data: Option<Vec<CalendarDataType>>,
    /// Largest accepted calendar object, in octets.
    pub max_resource_size: Option<i64>,
    /// Earliest date-time the server accepts.
    pub min_date_time: Option<Timestamp>,
    /// Latest date-time the server accepts.
    pub max_date_time: Option<Timestamp>,
    /// Maximum number of recurrence instances.
    pub max_instances: Option<i64>,
    /// Maximum number of attendees per instance.
    pub max_attendees_per_instance: Option<i64>,
    /// Supported text-matching collations.
    pub collations: Option<Vec<String>>,
}

impl CalendarCollection {
    /// Creates a `CalendarCollection` from decoded properties.
    #[must_use]
    pub fn from_properties(props: &DecodedProperties) -> Self {
        let text = |name: &PropertyName| {
            props
                .get(name)
                .and_then(|v| v.as_text())
                .map(str::to_string)
        };
        let integer = |name: &PropertyName| props.get(name).and_then(|v| v.as_integer());
        let timestamp = |name: &PropertyName| props.get(name).and_then(|v| v.as_timestamp());

        Self {
            href: None,
            display_name: None,
            description: text(&property::CALENDAR_DESCRIPTION),
            color: text(&property::CALENDAR_COLOR),
            order: integer(&property::CALENDAR_ORDER),
            ctag: text(&property::GETCTAG),
            timezone: text(&property::CALENDAR_TIMEZONE),
            enabled: props
                .get(&property::CALENDAR_ENABLED)
                .and_then(|v| v.as_bool()),
            owner_display_name: text(&property::OWNER_DISPLAYNAME),
            components: props
                .get(&property::SUPPORTED_CALENDAR_COMPONENT_SET)
                .and_then(|v| v.as_components()),
            calendar_data: props
                .get(&property::SUPPORTED_CALENDAR_DATA)
                .and_then(|v| v.as_calendar_data())
                .map(<[_]>::to_vec),
            max_resource_size: integer(&property::MAX_RESOURCE_SIZE),
            min_date_time: timestamp(&property::MIN_DATE_TIME),
            max_date_time: timestamp(&property::MAX_DATE_TIME),
            max_instances: integer(&property::MAX_INSTANCES),
            max_attendees_per_instance: integer(&property::MAX_ATTENDEES_PER_INSTANCE),
            collations: props
                .get(&property::SUPPORTED_COLLATION_SET)
                .and_then(|v| v.as_collations())
                .map(<[_]>::to_vec),
        }
    }

    /// Creates a `CalendarCollection` from a multistatus response item.
    #[must_use]
    pub fn from_response(response: &ResponseItem) -> Self {
        Self {
            href: Some(response.href.clone()),
            display_name: response.text(&property::DISPLAY_NAME),
            ..Self::from_properties(&response.decode())
        }
    }

    /// Returns `true` if the calendar accepts events.
    #[must_use]
    pub fn supports_events(&self) -> bool {
        self.components.is_some_and(|c| c.vevent)
    }

    /// Returns `true` if the calendar accepts todos.
    #[must_use]
    pub fn supports_todos(&self) -> bool {
        self.components.is_some_and(|c| c.vtodo)
    }
}
