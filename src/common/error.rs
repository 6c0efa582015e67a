// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use hyper::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
/// An enum that encapsulates the failure kinds of the Route 53 client.
///
/// # Example
///
/// Error::Transport(StatusCode::NOT_FOUND, format!("{path}: not found"))
pub enum Error {
    /// The HTTP executor failed, or the provider answered with a non-2xx status.
    Transport(StatusCode, String),
    /// The response body is not well-formed XML or lacks a required element.
    MalformedResponse(String),
    /// A single record value could not be parsed for its type.
    MalformedRecord(String),
    /// A record set carries a type with no entry in the record type registry.
    UnsupportedRecordType(String),
    /// A change batch could not be serialized; nothing was sent.
    RequestEncoding(String),
    /// String error (configuration and miscellaneous).
    String(String),
}

impl Error {
    /// Returns `true` for errors raised before or during the HTTP round trip.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(..))
    }

    /// The HTTP status associated with a transport error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Transport(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::Transport(status_code, mesg) => Display::fmt(&format!("{status_code}: {mesg}"), f),
            Error::MalformedResponse(mesg) => {
                Display::fmt(&format!("malformed response: {mesg}"), f)
            }
            Error::MalformedRecord(mesg) => Display::fmt(&format!("malformed record: {mesg}"), f),
            Error::UnsupportedRecordType(record_type) => {
                Display::fmt(&format!("unsupported record type {record_type}"), f)
            }
            Error::RequestEncoding(mesg) => Display::fmt(&format!("cannot encode request: {mesg}"), f),
            Error::String(s) => Display::fmt(&s, f),
        }
    }
}

impl std::error::Error for Error {}
