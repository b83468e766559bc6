/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use crate::error::FtpServerAddrParseError;

/// Control connection target, `host[:port]`.
///
/// A missing port is kept as 0 so that the caller can decide on the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpServerAddr {
    host: String,
    port: u16,
}

impl FtpServerAddr {
    pub fn new(host: &str, port: u16) -> Self {
        FtpServerAddr {
            host: host.to_string(),
            port,
        }
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[inline]
    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }
}

impl FromStr for FtpServerAddr {
    type Err = FtpServerAddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FtpServerAddrParseError::EmptyHost);
        }

        let (host, port) = if let Some(left) = s.strip_prefix('[') {
            let Some(p) = memchr::memchr(b']', left.as_bytes()) else {
                return Err(FtpServerAddrParseError::UnclosedBracket);
            };
            let host = &left[..p];
            match &left[p + 1..] {
                "" => (host, None),
                tail => match tail.strip_prefix(':') {
                    Some(port) => (host, Some(port)),
                    None => return Err(FtpServerAddrParseError::TrailingData),
                },
            }
        } else if memchr::memchr_iter(b':', s.as_bytes()).count() > 1 {
            // bare ipv6 address
            (s, None)
        } else {
            match s.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (s, None),
            }
        };

        if host.is_empty() {
            return Err(FtpServerAddrParseError::EmptyHost);
        }
        let port = match port {
            Some(p) => u16::from_str(p).map_err(|_| FtpServerAddrParseError::InvalidPort)?,
            None => 0,
        };
        Ok(FtpServerAddr::new(host, port))
    }
}

impl fmt::Display for FtpServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
