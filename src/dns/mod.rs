// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Route 53 client operations.
mod client;
/// HTTP executor trait and its `reqwest` implementation.
mod executor;
/// Canonical DNS names.
mod name;
/// Record type registry.
mod record;
/// Record sets, changes and zones.
mod rrset;
/// XML codec for the Route 53 wire format.
pub mod xml;

pub use self::client::Route53Client;
#[cfg(feature = "reqwest")]
pub use self::executor::ReqwestExecutor;
pub use self::executor::{HttpExecutor, HttpRequest, HttpResponse};
pub use self::name::Name;
pub use self::record::{Record, RecordType};
pub use self::rrset::{
    create_rrset, delete_rrset, upsert_rrset, AliasTarget, Change, ChangeAction, ChangeInfo,
    HostedZone, HostedZoneCreation, RRSet, RRSetKey,
};
