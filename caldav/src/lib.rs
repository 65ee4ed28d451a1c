// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `CalDAV` client that reads collection properties from `CalDAV` servers
//! (RFC 4791) and decodes them into typed values.
//!
//! The core is [`decode`], which maps namespaced properties such as
//! `{http://apple.com/ns/ical/}calendar-color` to [`PropertyValue`]s.
//! Unknown properties are dropped, and malformed values degrade to
//! [`PropertyValue::Invalid`] or [`PropertyValue::Undefined`].

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod client;
mod config;
mod decode;
mod error;
mod http;
pub mod property;
mod request;
mod response;
mod types;
mod value;
pub mod xml;

pub use crate::client::CalDavClient;
pub use crate::config::CalDavConfig;
pub use crate::decode::{decode, decode_value};
pub use crate::error::CalDavError;
pub use crate::property::{PropertyName, Rule};
pub use crate::request::{Depth, PropFindRequest};
pub use crate::response::{MultiStatusResponse, PropStat, ResponseItem};
pub use crate::types::{CalendarCollection, Href};
pub use crate::value::{
    CalendarDataType, ComponentSet, DecodedProperties, ElementHandle, PropertyValue,
    RawProperties, RawValue,
};
