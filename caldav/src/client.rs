// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `CalDAV` client for collection property discovery.

use std::sync::Arc;

use reqwest::Method;

use crate::config::CalDavConfig;
use crate::error::CalDavError;
use crate::http::HttpClient;
use crate::request::{Depth, PropFindRequest};
use crate::response::{MultiStatusResponse, ResponseItem};
use crate::types::CalendarCollection;
use crate::value::DecodedProperties;

/// `CalDAV` client for reading collection properties from `CalDAV` servers.
///
/// # Example
///
/// ```ignore
/// use cdav_caldav::{CalDavClient, CalDavConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CalDavConfig {
///     calendar_home: "/dav/calendars/user/".to_string(),
///     ..CalDavConfig::new("https://caldav.example.com")
/// };
///
/// let client = CalDavClient::new(config)?;
/// for calendar in client.list_calendars().await? {
///     println!("{:?}: {:?}", calendar.display_name, calendar.color);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CalDavClient {
    http: Arc<HttpClient>,
    config: CalDavConfig,
}

impl CalDavClient {
    /// Creates a new `CalDAV` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: CalDavConfig) -> Result<Self, CalDavError> {
        config.validate()?;
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &CalDavConfig {
        &self.config
    }

    /// Sends a PROPFIND request and parses the multistatus response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a valid
    /// multistatus document.
    pub async fn propfind(
        &self,
        href: &str,
        request: &PropFindRequest,
        depth: Depth,
    ) -> Result<MultiStatusResponse, CalDavError> {
        let url = self.config.url_for(href);
        let body = request.build()?;
        tracing::debug!(%url, depth = depth.as_str(), "sending PROPFIND");

        let method = Method::from_bytes(b"PROPFIND")
            .map_err(|e| CalDavError::Http(format!("Invalid method: {e}")))?;
        let resp = self
            .http
            .execute(
                self.http
                    .build_request(method, &url)
                    .header("Content-Type", "application/xml; charset=utf-8")
                    .header("Depth", depth.as_str())
                    .body(body),
            )
            .await?;

        let xml = resp.text().await?;
        MultiStatusResponse::from_xml(&xml)
    }

    /// Fetches and decodes the properties of a single collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the PROPFIND fails or the server returns no
    /// response for the collection.
    pub async fn calendar_properties(&self, href: &str) -> Result<DecodedProperties, CalDavError> {
        let multistatus = self
            .propfind(href, &PropFindRequest::calendar_properties(), Depth::Zero)
            .await?;

        multistatus
            .find(href)
            .or_else(|| multistatus.responses.first())
            .map(ResponseItem::decode)
            .ok_or_else(|| CalDavError::InvalidResponse(format!("no response for {href}")))
    }

    /// Lists the calendar collections in the configured calendar home.
    ///
    /// # Errors
    ///
    /// Returns an error if the PROPFIND fails.
    pub async fn list_calendars(&self) -> Result<Vec<CalendarCollection>, CalDavError> {
        let multistatus = self
            .propfind(
                &self.config.calendar_home,
                &PropFindRequest::calendar_properties(),
                Depth::One,
            )
            .await?;

        let calendars: Vec<_> = multistatus
            .responses
            .iter()
            .filter(|r| r.is_calendar())
            .map(CalendarCollection::from_response)
            .collect();

        tracing::debug!(count = calendars.len(), "listed calendars");
        Ok(calendars)
    }
}
