// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! A client for the Route 53 DNS hosting API: list hosted zones, list a zone's
//! resource record sets and submit ordered change batches, all over the provider's
//! XML REST interface.

/// Types common to multiple wrappers.
pub mod common;
pub use common::*;

/// Record sets, their XML codec and the Route 53 client.
pub mod dns;
pub use dns::*;

/// Thread-safe logging.
pub mod log;
pub use log::*;
