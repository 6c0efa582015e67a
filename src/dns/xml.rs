// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{
    AliasTarget, Change, ChangeInfo, HostedZone, HostedZoneCreation, Name, RRSet, RRSetKey,
    RecordType,
};
use crate::common::Error;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Namespace of every request and response document.
pub const XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";

/// One page of `ListHostedZonesResponse`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostedZonesPage {
    /// Zones in provider order.
    pub zones: Vec<HostedZone>,
    /// Whether more zones follow.
    pub is_truncated: bool,
    /// Marker to request the next page with.
    pub next_marker: Option<String>,
}

impl HostedZonesPage {
    /// The marker of the next page, or `None` on the last page.
    pub fn continuation(&self) -> Result<Option<String>, Error> {
        continuation(self.is_truncated, self.next_marker.clone(), "NextMarker")
    }
}

/// Where the next `ListResourceRecordSets` page starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordSetMarker {
    /// `NextRecordName`, sent back as `name`.
    pub name: String,
    /// `NextRecordType`, sent back as `type`.
    pub record_type: String,
    /// `NextRecordIdentifier`, sent back as `identifier`.
    pub identifier: Option<String>,
}

impl RecordSetMarker {
    /// Query parameters that request the page this marker points to.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("name".to_string(), self.name.clone()),
            ("type".to_string(), self.record_type.clone()),
        ];
        if let Some(identifier) = &self.identifier {
            query.push(("identifier".to_string(), identifier.clone()));
        }
        query
    }
}

/// The outcome of decoding one `<ResourceRecordSet>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodedRecordSet {
    /// A record set with literal values.
    Supported(RRSet),
    /// An alias record set; it has no values and is left out of listings.
    Alias {
        /// Owner name.
        label: Name,
        /// `<Type>` as sent, which need not be a registered type.
        record_type: String,
        /// What the alias points at.
        target: AliasTarget,
    },
}

/// One page of `ListResourceRecordSetsResponse`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordSetsPage {
    /// Record sets in provider order.
    pub record_sets: Vec<DecodedRecordSet>,
    /// Whether more record sets follow.
    pub is_truncated: bool,
    /// Start of the next page.
    pub next: Option<RecordSetMarker>,
}

impl RecordSetsPage {
    /// Where the next page starts, or `None` on the last page.
    pub fn continuation(&self) -> Result<Option<RecordSetMarker>, Error> {
        continuation(self.is_truncated, self.next.clone(), "NextRecordName")
    }

    /// Supported record sets keyed by name and type. Aliases are dropped.
    pub fn into_map(self) -> HashMap<RRSetKey, RRSet> {
        self.record_sets
            .into_iter()
            .filter_map(|decoded| match decoded {
                DecodedRecordSet::Supported(rrset) => Some((rrset.key(), rrset)),
                DecodedRecordSet::Alias { .. } => None,
            })
            .collect()
    }
}

fn continuation<T>(is_truncated: bool, next: Option<T>, element: &str) -> Result<Option<T>, Error> {
    match (is_truncated, next) {
        (false, _) => Ok(None),
        (true, Some(next)) => Ok(Some(next)),
        (true, None) => Err(Error::MalformedResponse(format!(
            "IsTruncated is true but {element} is missing"
        ))),
    }
}

/// Decode `ListHostedZonesResponse`.
pub fn decode_hosted_zones(body: &[u8]) -> Result<HostedZonesPage, Error> {
    let response: ListHostedZonesXml = parse(body, "ListHostedZonesResponse")?;
    Ok(HostedZonesPage {
        zones: response
            .hosted_zones
            .hosted_zone
            .into_iter()
            .map(HostedZone::from)
            .collect(),
        is_truncated: response.is_truncated,
        next_marker: response.next_marker,
    })
}

/// Decode `ListResourceRecordSetsResponse`.
///
/// A record set of an unregistered type fails with [`Error::UnsupportedRecordType`]
/// unless it is an alias, and a value that does not parse fails with
/// [`Error::MalformedResponse`].
pub fn decode_resource_record_sets(body: &[u8]) -> Result<RecordSetsPage, Error> {
    let response: ListResourceRecordSetsXml = parse(body, "ListResourceRecordSetsResponse")?;
    let record_sets = response
        .resource_record_sets
        .resource_record_set
        .into_iter()
        .map(decode_record_set)
        .collect::<Result<Vec<_>, _>>()?;
    let next = response
        .next_record_name
        .map(|name| -> Result<RecordSetMarker, Error> {
            Ok(RecordSetMarker {
                name,
                record_type: response.next_record_type.ok_or_else(|| {
                    Error::MalformedResponse(
                        "NextRecordName is present but NextRecordType is missing".to_string(),
                    )
                })?,
                identifier: response.next_record_identifier,
            })
        })
        .transpose()?;
    Ok(RecordSetsPage {
        record_sets,
        is_truncated: response.is_truncated,
        next,
    })
}

fn decode_record_set(xml: ResourceRecordSetXml) -> Result<DecodedRecordSet, Error> {
    let label = Name::new(&xml.name);
    if let Some(alias) = xml.alias_target {
        return Ok(DecodedRecordSet::Alias {
            label,
            record_type: xml.record_type,
            target: AliasTarget {
                hosted_zone_id: alias.hosted_zone_id,
                dns_name: Name::new(&alias.dns_name),
                evaluate_target_health: alias.evaluate_target_health,
            },
        });
    }
    let record_type: RecordType = xml.record_type.parse()?;
    let ttl = xml.ttl.ok_or_else(|| {
        Error::MalformedResponse(format!("{label} {record_type}: TTL is missing"))
    })?;
    let resource_records = xml.resource_records.ok_or_else(|| {
        Error::MalformedResponse(format!("{label} {record_type}: ResourceRecords is missing"))
    })?;
    let records = resource_records
        .resource_record
        .iter()
        .map(|rr| {
            record_type
                .parse_value(&rr.value)
                .map_err(|e| Error::MalformedResponse(format!("{label} {record_type}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DecodedRecordSet::Supported(RRSet::new(
        label,
        record_type,
        ttl,
        records,
    )))
}

/// Decode the `<ChangeInfo>` of `ChangeResourceRecordSetsResponse`, `GetChangeResponse`
/// or `DeleteHostedZoneResponse`.
pub fn decode_change_info(body: &[u8]) -> Result<ChangeInfo, Error> {
    let response: ChangeInfoResponseXml = parse(body, "ChangeInfo")?;
    Ok(response.change_info.into())
}

/// Decode `CreateHostedZoneResponse`.
pub fn decode_hosted_zone_creation(body: &[u8]) -> Result<HostedZoneCreation, Error> {
    let response: CreateHostedZoneXml = parse(body, "CreateHostedZoneResponse")?;
    Ok(HostedZoneCreation {
        zone: response.hosted_zone.into(),
        change_info: response.change_info.into(),
        name_servers: response
            .delegation_set
            .map(|delegation_set| {
                delegation_set
                    .name_servers
                    .name_server
                    .iter()
                    .map(|name| Name::new(name))
                    .collect()
            })
            .unwrap_or_default(),
    })
}

/// Encode `ChangeResourceRecordSetsRequest`. Changes are written in the order given.
pub fn encode_change_batch(changes: &[Change]) -> Result<Vec<u8>, Error> {
    if changes.is_empty() {
        return Err(Error::RequestEncoding(
            "a change batch needs at least one change".to_string(),
        ));
    }
    for Change { rrset, .. } in changes {
        if rrset.records.is_empty() {
            return Err(Error::RequestEncoding(format!(
                "{} {}: a record set needs at least one record",
                rrset.label, rrset.record_type
            )));
        }
        if let Some(record) = rrset.mismatched_records().next() {
            return Err(Error::RequestEncoding(format!(
                "{}: {} record {:?} in a {} record set",
                rrset.label,
                record.record_type(),
                record.to_value(),
                rrset.record_type
            )));
        }
    }

    let mut xml = XmlWriter::new("ChangeResourceRecordSetsRequest")?;
    xml.start("ChangeBatch")?;
    xml.start("Changes")?;
    for Change { action, rrset } in changes {
        xml.start("Change")?;
        xml.text_element("Action", action.as_str())?;
        xml.start("ResourceRecordSet")?;
        xml.text_element("Name", rrset.label.as_str())?;
        xml.text_element("Type", rrset.record_type.as_str())?;
        xml.text_element("TTL", &rrset.ttl.to_string())?;
        xml.start("ResourceRecords")?;
        for record in &rrset.records {
            xml.start("ResourceRecord")?;
            xml.text_element("Value", &record.to_value())?;
            xml.end("ResourceRecord")?;
        }
        xml.end("ResourceRecords")?;
        xml.end("ResourceRecordSet")?;
        xml.end("Change")?;
    }
    xml.end("Changes")?;
    xml.end("ChangeBatch")?;
    xml.finish()
}

/// Encode `CreateHostedZoneRequest`.
pub fn encode_create_hosted_zone(
    name: &Name,
    caller_reference: &str,
    comment: Option<&str>,
) -> Result<Vec<u8>, Error> {
    if caller_reference.is_empty() {
        return Err(Error::RequestEncoding(
            "caller reference must not be empty".to_string(),
        ));
    }
    let mut xml = XmlWriter::new("CreateHostedZoneRequest")?;
    xml.text_element("Name", name.as_str())?;
    xml.text_element("CallerReference", caller_reference)?;
    if let Some(comment) = comment {
        xml.start("HostedZoneConfig")?;
        xml.text_element("Comment", comment)?;
        xml.end("HostedZoneConfig")?;
    }
    xml.finish()
}

/// Writes a namespaced request document without indentation.
struct XmlWriter {
    root: &'static str,
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new(root: &'static str) -> Result<Self, Error> {
        let mut xml = Self {
            root,
            writer: Writer::new(Vec::new()),
        };
        xml.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write(Event::Text(BytesText::from_escaped("\n")))?;
        xml.write(Event::Start(
            BytesStart::new(root).with_attributes([("xmlns", XMLNS)]),
        ))?;
        Ok(xml)
    }

    fn end(&mut self, name: &str) -> Result<(), Error> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn finish(mut self) -> Result<Vec<u8>, Error> {
        let root = self.root;
        self.end(root)?;
        Ok(self.writer.into_inner())
    }

    fn start(&mut self, name: &str) -> Result<(), Error> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), Error> {
        self.start(name)?;
        self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.end(name)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), Error> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::RequestEncoding(format!("xml: {e}")))
    }
}

fn parse<T: DeserializeOwned>(body: &[u8], document: &str) -> Result<T, Error> {
    let text = std::str::from_utf8(body)
        .map_err(|e| Error::MalformedResponse(format!("{document}: {e}")))?;
    quick_xml::de::from_str(text).map_err(|e| Error::MalformedResponse(format!("{document}: {e}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListHostedZonesXml {
    hosted_zones: HostedZonesXml,
    is_truncated: bool,
    next_marker: Option<String>,
}

#[derive(Deserialize)]
struct HostedZonesXml {
    #[serde(rename = "HostedZone", default)]
    hosted_zone: Vec<HostedZoneXml>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HostedZoneXml {
    id: String,
    name: String,
    caller_reference: String,
    config: Option<HostedZoneConfigXml>,
    #[serde(default)]
    resource_record_set_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HostedZoneConfigXml {
    comment: Option<String>,
    #[serde(default)]
    private_zone: bool,
}

impl From<HostedZoneXml> for HostedZone {
    fn from(xml: HostedZoneXml) -> Self {
        let (comment, private_zone) = xml
            .config
            .map(|config| (config.comment, config.private_zone))
            .unwrap_or_default();
        HostedZone {
            name: Name::new(&xml.name),
            identifier: strip_path(&xml.id, "/hostedzone/"),
            reference: xml.caller_reference,
            rrset_count: xml.resource_record_set_count,
            private_zone,
            comment,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListResourceRecordSetsXml {
    resource_record_sets: ResourceRecordSetsXml,
    is_truncated: bool,
    next_record_name: Option<String>,
    next_record_type: Option<String>,
    next_record_identifier: Option<String>,
}

#[derive(Deserialize)]
struct ResourceRecordSetsXml {
    #[serde(rename = "ResourceRecordSet", default)]
    resource_record_set: Vec<ResourceRecordSetXml>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceRecordSetXml {
    name: String,
    #[serde(rename = "Type")]
    record_type: String,
    #[serde(rename = "TTL")]
    ttl: Option<u32>,
    resource_records: Option<ResourceRecordsXml>,
    alias_target: Option<AliasTargetXml>,
}

#[derive(Deserialize)]
struct ResourceRecordsXml {
    #[serde(rename = "ResourceRecord", default)]
    resource_record: Vec<ResourceRecordXml>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceRecordXml {
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AliasTargetXml {
    hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    dns_name: String,
    #[serde(default)]
    evaluate_target_health: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChangeInfoResponseXml {
    change_info: ChangeInfoXml,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChangeInfoXml {
    id: String,
    status: String,
    submitted_at: String,
    comment: Option<String>,
}

impl From<ChangeInfoXml> for ChangeInfo {
    fn from(xml: ChangeInfoXml) -> Self {
        ChangeInfo {
            identifier: strip_path(&xml.id, "/change/"),
            status: xml.status,
            submitted_at: xml.submitted_at,
            comment: xml.comment,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateHostedZoneXml {
    hosted_zone: HostedZoneXml,
    change_info: ChangeInfoXml,
    delegation_set: Option<DelegationSetXml>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DelegationSetXml {
    name_servers: NameServersXml,
}

#[derive(Deserialize)]
struct NameServersXml {
    #[serde(rename = "NameServer", default)]
    name_server: Vec<String>,
}

fn strip_path(id: &str, prefix: &str) -> String {
    id.strip_prefix(prefix).unwrap_or(id).to_string()
}
