/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

/// Data channel address announced by a `227` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveEndpoint {
    host: String,
    port: u16,
}

impl PassiveEndpoint {
    pub fn new(host: &str, port: u16) -> Self {
        PassiveEndpoint {
            host: host.to_string(),
            port,
        }
    }

    /// dotted-quad ipv4 address
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Decode `(h1,h2,h3,h4,p1,p2)` from the reply text.
    pub(crate) fn parse_pasv_227_reply(line: &str) -> Option<Self> {
        let p_start = memchr::memchr(b'(', line.as_bytes())?;
        let p_end = memchr::memchr(b')', &line.as_bytes()[p_start..])? + p_start;

        let a: Vec<&str> = line[p_start + 1..p_end].split(',').collect();
        if a.len() != 6 {
            return None;
        }

        let mut v = [0u8; 6];
        for (i, s) in a.iter().enumerate() {
            v[i] = u8::from_str(s.trim()).ok()?;
        }

        let host = format!("{}.{}.{}.{}", v[0], v[1], v[2], v[3]);
        let port = (v[4] as u16) * 256 + (v[5] as u16);
        Some(PassiveEndpoint { host, port })
    }
}

impl fmt::Display for PassiveEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
