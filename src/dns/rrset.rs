// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{Name, Record, RecordType};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Identifies one resource record set within a zone.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RRSetKey {
    /// Owner name.
    pub label: Name,
    /// Record type.
    pub record_type: RecordType,
}

impl RRSetKey {
    /// Create a key.
    pub fn new(label: Name, record_type: RecordType) -> Self {
        Self { label, record_type }
    }
}

impl Display for RRSetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} {}", self.label, self.record_type)
    }
}

/// All records sharing a name and type, plus their TTL.
///
/// `records` is a set; its iteration order is the order values are sent in a change batch.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RRSet {
    /// Owner name.
    pub label: Name,
    /// Record type; every record should be of this type.
    pub record_type: RecordType,
    /// Time to live in seconds.
    pub ttl: u32,
    /// The records.
    pub records: BTreeSet<Record>,
}

impl RRSet {
    /// Create a record set, collapsing duplicate records.
    pub fn new(
        label: Name,
        record_type: RecordType,
        ttl: u32,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        Self {
            label,
            record_type,
            ttl,
            records: records.into_iter().collect(),
        }
    }

    /// The key this set is stored under.
    pub fn key(&self) -> RRSetKey {
        RRSetKey::new(self.label.clone(), self.record_type)
    }

    /// Records whose variant does not match `record_type`.
    pub fn mismatched_records(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(move |record| record.record_type() != self.record_type)
    }
}

/// What a [`Change`] does to its record set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ChangeAction {
    /// Create a record set that must not exist yet.
    Create,
    /// Delete a record set that must match exactly.
    Delete,
    /// Create or replace.
    Upsert,
}

impl ChangeAction {
    /// The `<Action>` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "CREATE",
            ChangeAction::Delete => "DELETE",
            ChangeAction::Upsert => "UPSERT",
        }
    }
}

/// One entry of a change batch. Batches are applied in order.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Change {
    /// Action.
    pub action: ChangeAction,
    /// Record set the action applies to.
    pub rrset: RRSet,
}

/// A change that creates `rrset`.
pub fn create_rrset(rrset: RRSet) -> Change {
    Change {
        action: ChangeAction::Create,
        rrset,
    }
}

/// A change that deletes `rrset`.
pub fn delete_rrset(rrset: RRSet) -> Change {
    Change {
        action: ChangeAction::Delete,
        rrset,
    }
}

/// A change that creates or replaces `rrset`.
pub fn upsert_rrset(rrset: RRSet) -> Change {
    Change {
        action: ChangeAction::Upsert,
        rrset,
    }
}

/// A hosted zone owned by the account.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HostedZone {
    /// Zone apex.
    pub name: Name,
    /// Provider-assigned ID, without the `/hostedzone/` prefix.
    pub identifier: String,
    /// Idempotency string supplied when the zone was created.
    pub reference: String,
    /// Number of record sets in the zone.
    pub rrset_count: u64,
    /// Whether the zone is attached to a VPC.
    pub private_zone: bool,
    /// Free-form comment.
    pub comment: Option<String>,
}

/// Provider acknowledgement of a submitted change.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ChangeInfo {
    /// Change ID, without the `/change/` prefix.
    pub identifier: String,
    /// `PENDING` or `INSYNC`.
    pub status: String,
    /// Submission time as sent by the provider.
    pub submitted_at: String,
    /// Comment echoed from the request.
    pub comment: Option<String>,
}

impl ChangeInfo {
    /// Whether the change has propagated to all name servers.
    pub fn is_in_sync(&self) -> bool {
        self.status == "INSYNC"
    }

    /// Submission time, if it is valid RFC 3339.
    #[cfg(feature = "chrono")]
    pub fn submitted_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.submitted_at)
            .ok()
            .map(|t| t.with_timezone(&chrono::Utc))
    }
}

/// Result of creating a hosted zone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostedZoneCreation {
    /// The new zone.
    pub zone: HostedZone,
    /// Creation change, initially `PENDING`.
    pub change_info: ChangeInfo,
    /// Name servers of the zone's delegation set.
    pub name_servers: Vec<Name>,
}

/// Target of an alias record set. Alias sets carry no values, so they never become an [`RRSet`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AliasTarget {
    /// Zone of the target resource.
    pub hosted_zone_id: String,
    /// DNS name of the target resource.
    pub dns_name: Name,
    /// Whether the target's health is evaluated.
    pub evaluate_target_health: bool,
}
