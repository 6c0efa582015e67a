// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Request trace and warning lines shared by a client and its owner.
mod string_logger;
/// Unit tests.
mod tests;

pub use self::string_logger::StringLogger;
