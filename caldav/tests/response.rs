// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsing tests.

use cdav_caldav::property;
use cdav_caldav::{
    CalDavError, CalendarCollection, ComponentSet, MultiStatusResponse, PropertyValue, RawValue,
};

const CALENDAR_PROPFIND: &str = r##"<?xml version="1.0" encoding="utf-8" ?>
<d:multistatus xmlns:d="DAV:" xmlns:cal="urn:ietf:params:xml:ns:caldav" xmlns:cs="http://calendarserver.org/ns/" xmlns:x1="http://apple.com/ns/ical/" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.com/ns">
  <d:response>
    <d:href>/remote.php/dav/calendars/admin/personal/</d:href>
    <d:propstat>
      <d:prop>
        <d:displayname>Personal</d:displayname>
        <d:resourcetype>
          <d:collection/>
          <cal:calendar/>
        </d:resourcetype>
        <cs:getctag>http://sabre.io/ns/sync/42</cs:getctag>
        <x1:calendar-order>2</x1:calendar-order>
        <x1:calendar-color>#0082C9FF</x1:calendar-color>
        <cal:calendar-description>Work &amp; private</cal:calendar-description>
        <cal:supported-calendar-component-set>
          <cal:comp name="VEVENT"/>
          <cal:comp name="VTODO"/>
        </cal:supported-calendar-component-set>
        <cal:supported-calendar-data>
          <cal:calendar-data content-type="text/calendar" version="2.0"/>
        </cal:supported-calendar-data>
        <cal:max-resource-size>10000000</cal:max-resource-size>
        <cal:min-date-time>19000101T000000Z</cal:min-date-time>
        <cal:max-date-time>20491231T235959Z</cal:max-date-time>
        <cal:supported-collation-set>
          <cal:supported-collation>i;ascii-casemap</cal:supported-collation>
          <cal:supported-collation>i;octet</cal:supported-collation>
        </cal:supported-collation-set>
        <oc:calendar-enabled>1</oc:calendar-enabled>
        <nc:owner-displayname>admin</nc:owner-displayname>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
    <d:propstat>
      <d:prop>
        <cal:max-instances/>
        <cal:calendar-timezone/>
      </d:prop>
      <d:status>HTTP/1.1 404 Not Found</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"##;

#[test]
fn response_parse_multistatus_basic() {
    let xml = "\
<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/calendars/user/event1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>\"12345\"</D:getetag>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");

    assert_eq!(response.responses.len(), 1);
    let item = &response.responses[0];
    assert_eq!(item.href.as_str(), "/calendars/user/event1.ics");
    assert_eq!(item.prop_stats.len(), 1);
    assert_eq!(item.prop_stats[0].status, "HTTP/1.1 200 OK");
    assert_eq!(item.prop_stats[0].status_code(), Some(200));

    let etag = cdav_caldav::PropertyName::new("DAV:", "getetag");
    assert_eq!(
        item.prop_stats[0].props.get(&etag),
        Some(&RawValue::Text("\"12345\"".to_string()))
    );
}

#[test]
fn response_parse_default_namespace() {
    let xml = "\
<multistatus xmlns=\"DAV:\">
  <response>
    <href>/a/</href>
    <status>HTTP/1.1 404 Not Found</status>
  </response>
</multistatus>";

    let response = MultiStatusResponse::from_xml(xml).expect("Failed to parse multistatus");
    assert_eq!(response.responses.len(), 1);
    assert_eq!(
        response.responses[0].status.as_deref(),
        Some("HTTP/1.1 404 Not Found")
    );
    assert!(response.responses[0].prop_stats.is_empty());
}

#[test]
fn response_parse_rejects_non_multistatus() {
    let xml = "<D:propfind xmlns:D=\"DAV:\"><D:allprop/></D:propfind>";
    let err = MultiStatusResponse::from_xml(xml).unwrap_err();
    assert!(matches!(err, CalDavError::InvalidResponse(_)));
}

#[test]
fn response_parse_rejects_malformed_xml() {
    let err = MultiStatusResponse::from_xml("<D:multistatus xmlns:D=\"DAV:\">").unwrap_err();
    assert!(matches!(err, CalDavError::Xml(_)));
}

#[test]
fn response_raw_properties_keep_structure() {
    let response = MultiStatusResponse::from_xml(CALENDAR_PROPFIND).unwrap();
    let props = response.responses[0].properties();

    match props.get(&property::SUPPORTED_CALENDAR_COMPONENT_SET) {
        Some(RawValue::Elements(elements)) => assert_eq!(elements.len(), 2),
        other => panic!("expected elements, got {other:?}"),
    }
    assert_eq!(
        props.get(&property::CALENDAR_DESCRIPTION),
        Some(&RawValue::Text("Work & private".to_string()))
    );
}

#[test]
fn response_decode_calendar_properties() {
    let response = MultiStatusResponse::from_xml(CALENDAR_PROPFIND).unwrap();
    let item = response
        .find("/remote.php/dav/calendars/admin/personal/")
        .expect("response for personal calendar");
    let decoded = item.decode();

    assert_eq!(
        decoded.get(&property::CALENDAR_COLOR),
        Some(&PropertyValue::Text("#0082C9".to_string()))
    );
    assert_eq!(
        decoded.get(&property::CALENDAR_ORDER),
        Some(&PropertyValue::Integer(2))
    );
    assert_eq!(
        decoded.get(&property::MAX_RESOURCE_SIZE),
        Some(&PropertyValue::Integer(10_000_000))
    );
    assert_eq!(
        decoded.get(&property::CALENDAR_ENABLED),
        Some(&PropertyValue::Boolean(true))
    );
    assert_eq!(
        decoded
            .get(&property::SUPPORTED_COLLATION_SET)
            .and_then(PropertyValue::as_collations),
        Some(&["i;ascii-casemap".to_string(), "i;octet".to_string()][..])
    );

    // Unknown properties and failed propstats are not decoded.
    assert!(!decoded.contains(&property::DISPLAY_NAME));
    assert!(!decoded.contains(&property::RESOURCE_TYPE));
    assert!(!decoded.contains(&property::MAX_INSTANCES));
    assert!(!decoded.contains(&property::CALENDAR_TIMEZONE));
}

#[test]
fn response_resource_types() {
    let response = MultiStatusResponse::from_xml(CALENDAR_PROPFIND).unwrap();
    let item = &response.responses[0];

    let types: Vec<_> = item.resource_types().iter().map(ToString::to_string).collect();
    assert_eq!(
        types,
        vec!["{DAV:}collection", "{urn:ietf:params:xml:ns:caldav}calendar"]
    );
    assert!(item.is_calendar());
}

#[test]
fn response_into_calendar_collection() {
    let response = MultiStatusResponse::from_xml(CALENDAR_PROPFIND).unwrap();
    let calendar = CalendarCollection::from_response(&response.responses[0]);

    assert_eq!(
        calendar.href.as_ref().map(|h| h.as_str()),
        Some("/remote.php/dav/calendars/admin/personal/")
    );
    assert_eq!(calendar.display_name.as_deref(), Some("Personal"));
    assert_eq!(calendar.color.as_deref(), Some("#0082C9"));
    assert_eq!(calendar.ctag.as_deref(), Some("http://sabre.io/ns/sync/42"));
    assert_eq!(calendar.description.as_deref(), Some("Work & private"));
    assert_eq!(calendar.owner_display_name.as_deref(), Some("admin"));
    assert_eq!(calendar.enabled, Some(true));
    assert_eq!(
        calendar.components,
        Some(ComponentSet {
            vevent: true,
            vjournal: false,
            vtodo: true,
        })
    );
    assert!(calendar.supports_events());
    assert!(calendar.supports_todos());
    assert_eq!(calendar.max_instances, None);
    assert_eq!(calendar.timezone, None);
    assert_eq!(
        calendar.min_date_time.map(|t| t.to_string()).as_deref(),
        Some("1900-01-01T00:00:00Z")
    );
}

#[test]
fn response_non_calendar_collection() {
    let xml = "\
<D:multistatus xmlns:D=\"DAV:\">
  <D:response>
    <D:href>/calendars/user/</D:href>
    <D:propstat>
      <D:prop>
        <D:resourcetype><D:collection/></D:resourcetype>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).unwrap();
    assert!(!response.responses[0].is_calendar());
    assert!(response.responses[0].decode().is_empty());
}

#[test]
fn response_empty_list_properties_decode_to_empty_lists() {
    let xml = "\
<d:multistatus xmlns:d=\"DAV:\" xmlns:c=\"urn:ietf:params:xml:ns:caldav\">
  <d:response>
    <d:href>/calendars/user/empty/</d:href>
    <d:propstat>
      <d:prop>
        <c:supported-calendar-data/>
        <c:supported-collation-set></c:supported-collation-set>
        <c:supported-calendar-component-set>
        </c:supported-calendar-component-set>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>";

    let response = MultiStatusResponse::from_xml(xml).unwrap();
    let decoded = response.responses[0].decode();

    assert_eq!(
        decoded.get(&property::SUPPORTED_CALENDAR_DATA),
        Some(&PropertyValue::CalendarData(Vec::new()))
    );
    assert_eq!(
        decoded.get(&property::SUPPORTED_COLLATION_SET),
        Some(&PropertyValue::Collations(Vec::new()))
    );
    assert_eq!(
        decoded.get(&property::SUPPORTED_CALENDAR_COMPONENT_SET),
        Some(&PropertyValue::Components(ComponentSet::default()))
    );
}
