// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::fmt::{Display, Formatter};

/// A DNS name, always stored with a trailing dot.
///
/// Route 53 returns some characters as three digit octal escapes (`*` arrives as `\052`);
/// those are decoded on construction so that names compare equal however they were spelled.
/// Escaped dots and backslashes are kept escaped, since decoding them would change the labels.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name(String);

impl Name {
    /// Canonicalize `name`.
    pub fn new(name: &str) -> Self {
        let mut name = Self::unescape(name);
        if !name.ends_with('.') {
            name.push('.');
        }
        Self(name)
    }

    /// The canonical text, trailing dot included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The text without the trailing dot (the root stays `.`).
    pub fn sans_trailing_dot(&self) -> &str {
        if self.0.len() > 1 {
            &self.0[..self.0.len() - 1]
        } else {
            &self.0
        }
    }

    fn unescape(name: &str) -> String {
        let bytes = name.as_bytes();
        let mut out = String::with_capacity(name.len());
        let mut i = 0;
        while i < name.len() {
            if bytes[i] == b'\\' && i + 3 < bytes.len() && Self::octal(&bytes[i + 1..i + 4]) {
                let code = bytes[i + 1..i + 4]
                    .iter()
                    .fold(0u32, |acc, b| acc * 8 + (b - b'0') as u32);
                // `\056` and `\134` stay escaped: they are a dot and a backslash inside a label.
                if let Some(c) = char::from_u32(code)
                    .filter(|c| c.is_ascii() && !matches!(c, '.' | '\\'))
                {
                    out.push(c);
                    i += 4;
                    continue;
                }
            }
            // Non-ASCII characters are copied whole.
            let c = name[i..].chars().next().unwrap_or_default();
            out.push(c);
            i += c.len_utf8().max(1);
        }
        out
    }

    fn octal(digits: &[u8]) -> bool {
        digits.iter().all(|b| (b'0'..=b'7').contains(b))
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
