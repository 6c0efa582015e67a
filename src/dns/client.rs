// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::xml::{
    decode_change_info, decode_hosted_zone_creation, decode_hosted_zones,
    decode_resource_record_sets, encode_change_batch, encode_create_hosted_zone,
    DecodedRecordSet,
};
use super::{
    Change, ChangeInfo, HostedZone, HostedZoneCreation, HttpExecutor, HttpRequest, Name, RRSet,
    RRSetKey,
};
use crate::common::{Error, Route53Settings};
use crate::log::StringLogger;
use hyper::Method;
use std::collections::HashMap;

/// Route 53 hosted zone and record set operations over an [`HttpExecutor`].
///
/// List operations follow pagination markers one page at a time and return nothing
/// unless every page decoded.
pub struct Route53Client<E> {
    executor: E,
    api_version: String,
    max_items: Option<u32>,
    logger: StringLogger,
}

impl<E: HttpExecutor> Route53Client<E> {
    /// Create a client with default settings.
    pub fn new(executor: E) -> Self {
        Self::with_settings(executor, &Route53Settings::default(), false)
    }

    /// Create a client from the `[route53]` configuration table.
    #[cfg(feature = "toml")]
    pub fn from_config(executor: E, cub_config: &crate::common::CubConfig) -> Result<Self, Error> {
        Ok(Self::with_settings(
            executor,
            &cub_config.route53()?,
            cub_config.debug(),
        ))
    }

    /// Create a client from explicit settings.
    pub fn with_settings(executor: E, settings: &Route53Settings, debug: bool) -> Self {
        Self {
            executor,
            api_version: settings.api_version.clone(),
            max_items: settings.max_items,
            logger: StringLogger::new(debug),
        }
    }

    /// The executor requests are sent through.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Trace of requests, pages and dropped aliases. Duplicate record set keys are warnings.
    pub fn logger(&self) -> &StringLogger {
        &self.logger
    }

    /// List every hosted zone of the account, in provider order.
    pub async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, Error> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let mut query = self.max_items_query();
            if let Some(marker) = marker.take() {
                query.push(("marker".to_string(), marker));
            }
            let body = self
                .send(Method::GET, self.path(&["hostedzone"]), query, None)
                .await?;
            let page = decode_hosted_zones(&body)?;
            let next = page.continuation()?;
            self.logger
                .trace(format!("hostedzone page: {} zones", page.zones.len()));
            zones.extend(page.zones);
            match next {
                Some(next) => marker = Some(next),
                None => break,
            }
        }
        Ok(zones)
    }

    /// List every record set of a zone, keyed by name and type.
    ///
    /// Alias record sets are left out. If the provider returns the same key twice the
    /// later set replaces the earlier one and a warning is logged.
    pub async fn list_resource_record_sets(
        &self,
        zone_id: &str,
    ) -> Result<HashMap<RRSetKey, RRSet>, Error> {
        let mut rrsets: HashMap<RRSetKey, RRSet> = HashMap::new();
        let mut query = self.max_items_query();
        loop {
            let body = self
                .send(
                    Method::GET,
                    self.path(&["hostedzone", zone_id, "rrset"]),
                    query,
                    None,
                )
                .await?;
            let page = decode_resource_record_sets(&body)?;
            let next = page.continuation()?;
            self.logger.trace(format!(
                "hostedzone/{zone_id}/rrset page: {} record sets",
                page.record_sets.len()
            ));
            for decoded in page.record_sets {
                match decoded {
                    DecodedRecordSet::Supported(rrset) => {
                        let key = rrset.key();
                        if rrsets.insert(key.clone(), rrset).is_some() {
                            self.logger
                                .warn(format!("hostedzone/{zone_id}: duplicate record set {key}"));
                        }
                    }
                    DecodedRecordSet::Alias {
                        label,
                        record_type,
                        target,
                    } => self.logger.trace(format!(
                        "hostedzone/{zone_id}: alias {label} {record_type} -> {} dropped",
                        target.dns_name
                    )),
                }
            }
            match next {
                Some(next) => {
                    query = self.max_items_query();
                    query.extend(next.to_query());
                }
                None => break,
            }
        }
        Ok(rrsets)
    }

    /// Submit a change batch. Changes are applied by the provider in the order given.
    ///
    /// The batch is encoded before anything is sent, so an encoding error submits nothing.
    pub async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<ChangeInfo, Error> {
        let body = encode_change_batch(changes)?;
        let response = self
            .send(
                Method::POST,
                self.path(&["hostedzone", zone_id, "rrset"]),
                Vec::new(),
                Some(body),
            )
            .await?;
        decode_change_info(&response)
    }

    /// Create a hosted zone. `caller_reference` makes the request idempotent.
    pub async fn create_hosted_zone(
        &self,
        name: &Name,
        caller_reference: &str,
        comment: Option<&str>,
    ) -> Result<HostedZoneCreation, Error> {
        let body = encode_create_hosted_zone(name, caller_reference, comment)?;
        let response = self
            .send(
                Method::POST,
                self.path(&["hostedzone"]),
                Vec::new(),
                Some(body),
            )
            .await?;
        decode_hosted_zone_creation(&response)
    }

    /// Delete a hosted zone, which must hold only its SOA and NS record sets.
    pub async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo, Error> {
        let response = self
            .send(
                Method::DELETE,
                self.path(&["hostedzone", zone_id]),
                Vec::new(),
                None,
            )
            .await?;
        decode_change_info(&response)
    }

    /// Current status of a submitted change.
    pub async fn get_change(&self, change_id: &str) -> Result<ChangeInfo, Error> {
        let response = self
            .send(
                Method::GET,
                self.path(&["change", change_id]),
                Vec::new(),
                None,
            )
            .await?;
        decode_change_info(&response)
    }

    fn max_items_query(&self) -> Vec<(String, String)> {
        self.max_items
            .map(|max_items| vec![("maxitems".to_string(), max_items.to_string())])
            .unwrap_or_default()
    }

    fn path(&self, segments: &[&str]) -> Vec<String> {
        std::iter::once(self.api_version.as_str())
            .chain(segments.iter().copied())
            .map(str::to_string)
            .collect()
    }

    async fn send(
        &self,
        method: Method,
        path: Vec<String>,
        query: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, Error> {
        let request = HttpRequest {
            method,
            path,
            query,
            body,
        };
        let line = format!("{} {}", request.method, request.path_string());
        let result = match self.executor.execute(request).await {
            Ok(response) if response.status.is_success() => Ok(response.body),
            Ok(response) => Err(Error::Transport(
                response.status,
                format!(
                    "route53: {}",
                    String::from_utf8_lossy(&response.body).trim()
                ),
            )),
            Err(e) => Err(e),
        };
        self.logger.call(line, result)
    }
}
