// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Name;
use crate::common::Error;
use std::fmt::{Display, Formatter};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// The record types this crate can parse and serialize.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RecordType {
    /// IPv4 address.
    A,
    /// IPv6 address.
    AAAA,
    /// Certification authority authorization.
    CAA,
    /// Canonical name.
    CNAME,
    /// Mail exchange.
    MX,
    /// Naming authority pointer.
    NAPTR,
    /// Name server.
    NS,
    /// Pointer.
    PTR,
    /// Start of authority.
    SOA,
    /// Sender policy framework.
    SPF,
    /// Service locator.
    SRV,
    /// Text.
    TXT,
}

impl RecordType {
    /// Registry of every supported type. Fixed at compile time.
    pub const ALL: [RecordType; 12] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CAA,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::NAPTR,
        RecordType::NS,
        RecordType::PTR,
        RecordType::SOA,
        RecordType::SPF,
        RecordType::SRV,
        RecordType::TXT,
    ];

    /// The `<Type>` tag of this record type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CAA => "CAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::NAPTR => "NAPTR",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::SOA => "SOA",
            RecordType::SPF => "SPF",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
        }
    }

    /// Parse one `<Value>` of a record set of this type.
    pub fn parse_value(&self, value: &str) -> Result<Record, Error> {
        let mut fields = Fields::new(*self, value)?;
        let record = match self {
            RecordType::A => Record::A {
                address: fields.next_parsed("address")?,
            },
            RecordType::AAAA => Record::AAAA {
                address: fields.next_parsed("address")?,
            },
            RecordType::CAA => Record::CAA {
                flags: fields.next_parsed("flags")?,
                tag: fields.next_text("tag")?,
                value: fields.next_text("value")?,
            },
            RecordType::CNAME => Record::CNAME {
                canonical_name: fields.next_name("canonical name")?,
            },
            RecordType::MX => Record::MX {
                preference: fields.next_parsed("preference")?,
                exchange: fields.next_name("exchange")?,
            },
            RecordType::NAPTR => Record::NAPTR {
                order: fields.next_parsed("order")?,
                preference: fields.next_parsed("preference")?,
                flags: fields.next_text("flags")?,
                service: fields.next_text("service")?,
                regexp: fields.next_text("regexp")?,
                replacement: fields.next_name("replacement")?,
            },
            RecordType::NS => Record::NS {
                nameserver: fields.next_name("nameserver")?,
            },
            RecordType::PTR => Record::PTR {
                name: fields.next_name("name")?,
            },
            RecordType::SOA => Record::SOA {
                mname: fields.next_name("mname")?,
                rname: fields.next_name("rname")?,
                serial: fields.next_parsed("serial")?,
                refresh: fields.next_parsed("refresh")?,
                retry: fields.next_parsed("retry")?,
                expire: fields.next_parsed("expire")?,
                minimum: fields.next_parsed("minimum")?,
            },
            RecordType::SPF => Record::SPF {
                texts: fields.remaining("text")?,
            },
            RecordType::SRV => Record::SRV {
                priority: fields.next_parsed("priority")?,
                weight: fields.next_parsed("weight")?,
                port: fields.next_parsed("port")?,
                target: fields.next_name("target")?,
            },
            RecordType::TXT => Record::TXT {
                texts: fields.remaining("text")?,
            },
        };
        fields.finish()?;
        Ok(record)
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|record_type| record_type.as_str() == s)
            .ok_or_else(|| Error::UnsupportedRecordType(s.to_string()))
    }
}

/// One record of a resource record set. Each variant belongs to exactly one [`RecordType`].
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Record {
    /// `A` record.
    A {
        /// IPv4 address.
        address: Ipv4Addr,
    },
    /// `AAAA` record.
    AAAA {
        /// IPv6 address.
        address: Ipv6Addr,
    },
    /// `CAA` record.
    CAA {
        /// Flags (0 or 128 in practice).
        flags: u8,
        /// Property tag such as `issue`.
        tag: String,
        /// Property value.
        value: String,
    },
    /// `CNAME` record.
    CNAME {
        /// The name this alias points to.
        canonical_name: Name,
    },
    /// `MX` record.
    MX {
        /// Lower is preferred.
        preference: u16,
        /// Mail server.
        exchange: Name,
    },
    /// `NAPTR` record.
    NAPTR {
        /// Processing order.
        order: u16,
        /// Preference among equal orders.
        preference: u16,
        /// Flags character-string.
        flags: String,
        /// Service character-string.
        service: String,
        /// Substitution expression.
        regexp: String,
        /// Next name to query.
        replacement: Name,
    },
    /// `NS` record.
    NS {
        /// Authoritative server.
        nameserver: Name,
    },
    /// `PTR` record.
    PTR {
        /// Target name.
        name: Name,
    },
    /// `SOA` record.
    SOA {
        /// Primary server.
        mname: Name,
        /// Responsible mailbox.
        rname: Name,
        /// Zone serial.
        serial: u32,
        /// Refresh interval in seconds.
        refresh: u32,
        /// Retry interval in seconds.
        retry: u32,
        /// Expiry in seconds.
        expire: u32,
        /// Negative caching TTL in seconds.
        minimum: u32,
    },
    /// `SPF` record.
    SPF {
        /// Character-strings, in order.
        texts: Vec<String>,
    },
    /// `SRV` record.
    SRV {
        /// Lower is tried first.
        priority: u16,
        /// Relative weight among equal priorities.
        weight: u16,
        /// Service port.
        port: u16,
        /// Host providing the service.
        target: Name,
    },
    /// `TXT` record.
    TXT {
        /// Character-strings, in order.
        texts: Vec<String>,
    },
}

impl Record {
    /// The type this record belongs to.
    pub fn record_type(&self) -> RecordType {
        match self {
            Record::A { .. } => RecordType::A,
            Record::AAAA { .. } => RecordType::AAAA,
            Record::CAA { .. } => RecordType::CAA,
            Record::CNAME { .. } => RecordType::CNAME,
            Record::MX { .. } => RecordType::MX,
            Record::NAPTR { .. } => RecordType::NAPTR,
            Record::NS { .. } => RecordType::NS,
            Record::PTR { .. } => RecordType::PTR,
            Record::SOA { .. } => RecordType::SOA,
            Record::SPF { .. } => RecordType::SPF,
            Record::SRV { .. } => RecordType::SRV,
            Record::TXT { .. } => RecordType::TXT,
        }
    }

    /// Serialize to the text of one `<Value>` element.
    pub fn to_value(&self) -> String {
        match self {
            Record::A { address } => address.to_string(),
            Record::AAAA { address } => address.to_string(),
            Record::CAA { flags, tag, value } => format!("{flags} {tag} {}", quoted(value)),
            Record::CNAME { canonical_name } => canonical_name.to_string(),
            Record::MX {
                preference,
                exchange,
            } => format!("{preference} {exchange}"),
            Record::NAPTR {
                order,
                preference,
                flags,
                service,
                regexp,
                replacement,
            } => format!(
                "{order} {preference} {} {} {} {replacement}",
                quoted(flags),
                quoted(service),
                quoted(regexp)
            ),
            Record::NS { nameserver } => nameserver.to_string(),
            Record::PTR { name } => name.to_string(),
            Record::SOA {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => format!("{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}"),
            Record::SPF { texts } | Record::TXT { texts } => texts
                .iter()
                .map(|text| quoted(text))
                .collect::<Vec<_>>()
                .join(" "),
            Record::SRV {
                priority,
                weight,
                port,
                target,
            } => format!("{priority} {weight} {port} {target}"),
        }
    }
}

/// Quote a DNS character-string, escaping `"` and `\`. Bytes outside printable ASCII
/// are written as three digit octal escapes, as Route 53 does.
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for byte in text.bytes() {
        match byte {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            b' '..=b'~' => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out.push('"');
    out
}

/// Whitespace separated fields of a value. Quoted character-strings count as one field
/// and have their escapes (`\"`, `\\`, octal `\NNN`) decoded; bare fields are returned verbatim.
struct Fields<'a> {
    record_type: RecordType,
    value: &'a str,
    tokens: std::vec::IntoIter<String>,
}

impl<'a> Fields<'a> {
    fn new(record_type: RecordType, value: &'a str) -> Result<Self, Error> {
        let tokens = Self::tokenize(value).map_err(|reason| {
            Error::MalformedRecord(format!("{record_type} {value:?}: {reason}"))
        })?;
        Ok(Self {
            record_type,
            value,
            tokens: tokens.into_iter(),
        })
    }

    fn tokenize(value: &str) -> Result<Vec<String>, &'static str> {
        let mut tokens = Vec::new();
        let mut chars = value.chars().peekable();
        loop {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.peek() {
                None => break,
                Some('"') => {
                    chars.next();
                    let mut bytes: Vec<u8> = Vec::new();
                    loop {
                        match chars.next() {
                            None => return Err("unterminated quoted string"),
                            Some('"') => break,
                            Some('\\') => {
                                let digits: String = (0..3)
                                    .map_while(|_| chars.next_if(|c| c.is_ascii_digit()))
                                    .collect();
                                if digits.is_empty() {
                                    match chars.next() {
                                        Some(c) => Self::push_char(&mut bytes, c),
                                        None => return Err("unterminated quoted string"),
                                    }
                                } else if digits.len() == 3 {
                                    let byte = u8::from_str_radix(&digits, 8)
                                        .map_err(|_| "octal escape out of range")?;
                                    bytes.push(byte);
                                } else {
                                    return Err("short octal escape");
                                }
                            }
                            Some(c) => Self::push_char(&mut bytes, c),
                        }
                    }
                    tokens.push(String::from_utf8(bytes).map_err(|_| "invalid UTF-8 escape")?);
                }
                Some(_) => {
                    let mut token = String::new();
                    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                        token.push(c);
                    }
                    tokens.push(token);
                }
            }
        }
        Ok(tokens)
    }

    fn push_char(bytes: &mut Vec<u8>, c: char) {
        let mut buf = [0u8; 4];
        bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn error(&self, reason: String) -> Error {
        Error::MalformedRecord(format!("{} {:?}: {reason}", self.record_type, self.value))
    }

    fn finish(mut self) -> Result<(), Error> {
        match self.tokens.next() {
            Some(extra) => Err(self.error(format!("unexpected field {extra:?}"))),
            None => Ok(()),
        }
    }

    fn next_name(&mut self, field: &str) -> Result<Name, Error> {
        self.next_text(field).map(|text| Name::new(&text))
    }

    fn next_parsed<T: FromStr>(&mut self, field: &str) -> Result<T, Error> {
        let text = self.next_text(field)?;
        text.parse()
            .map_err(|_| self.error(format!("invalid {field} {text:?}")))
    }

    fn next_text(&mut self, field: &str) -> Result<String, Error> {
        match self.tokens.next() {
            Some(text) => Ok(text),
            None => Err(self.error(format!("missing {field}"))),
        }
    }

    fn remaining(&mut self, field: &str) -> Result<Vec<String>, Error> {
        let texts: Vec<String> = self.tokens.by_ref().collect();
        if texts.is_empty() {
            Err(self.error(format!("missing {field}")))
        } else {
            Ok(texts)
        }
    }
}
