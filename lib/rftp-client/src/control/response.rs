/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use super::{FtpControlChannel, PassiveEndpoint};
use crate::error::FtpRawResponseError;

/// Outcome class of a reply code, as far as this client cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtpReplyKind {
    /// 220
    Ready,
    /// 230
    LoggedIn,
    /// 331
    NeedPassword,
    /// 550
    NotFound,
    Other(u16),
}

impl FtpReplyKind {
    pub fn code(&self) -> u16 {
        match self {
            FtpReplyKind::Ready => 220,
            FtpReplyKind::LoggedIn => 230,
            FtpReplyKind::NeedPassword => 331,
            FtpReplyKind::NotFound => 550,
            FtpReplyKind::Other(n) => *n,
        }
    }
}

impl From<u16> for FtpReplyKind {
    fn from(code: u16) -> Self {
        match code {
            220 => FtpReplyKind::Ready,
            230 => FtpReplyKind::LoggedIn,
            331 => FtpReplyKind::NeedPassword,
            550 => FtpReplyKind::NotFound,
            n => FtpReplyKind::Other(n),
        }
    }
}

/// One reply read from the control channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpResponse {
    code: u16,
    raw: Vec<u8>,
}

macro_rules! char_to_u16 {
    ($c:expr) => {
        ($c - b'0') as u16
    };
}

impl FtpResponse {
    pub fn parse(raw: Vec<u8>) -> Result<Self, FtpRawResponseError> {
        if raw.len() < 3 || !raw[..3].iter().all(u8::is_ascii_digit) {
            return Err(FtpRawResponseError::InvalidLineFormat);
        }
        let code = char_to_u16!(raw[0]) * 100 + char_to_u16!(raw[1]) * 10 + char_to_u16!(raw[2]);
        if !(100..600).contains(&code) {
            return Err(FtpRawResponseError::InvalidReplyCode(code));
        }
        match raw.get(3).copied() {
            None | Some(b' ' | b'-' | b'\r' | b'\n') => {}
            Some(_) => return Err(FtpRawResponseError::InvalidLineFormat),
        }
        Ok(FtpResponse { code, raw })
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.code
    }

    #[inline]
    pub fn kind(&self) -> FtpReplyKind {
        FtpReplyKind::from(self.code)
    }

    /// 1xx, another reply will follow
    #[inline]
    pub fn is_preliminary(&self) -> bool {
        (100..200).contains(&self.code)
    }

    /// The raw bytes as received, terminators included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Reply text after the code and its separator.
    pub fn text(&self) -> Cow<'_, str> {
        let mut msg = &self.raw[3..];
        if let Some((b' ' | b'-', left)) = msg.split_first() {
            msg = left;
        }
        let end = msg
            .iter()
            .rposition(|c| !c.is_ascii_whitespace())
            .map(|p| p + 1)
            .unwrap_or(0);
        String::from_utf8_lossy(&msg[..end])
    }

    pub fn passive_endpoint(&self) -> Option<PassiveEndpoint> {
        PassiveEndpoint::parse_pasv_227_reply(&self.text())
    }
}

/// Split off the first reply if the chunk carries more than one.
///
/// Only a complete single line reply (`xyz text\r\n`) is split off, the
/// remaining bytes are returned for the next read.
fn split_first_reply(mut chunk: Vec<u8>) -> (Vec<u8>, Vec<u8>) {
    if chunk.get(3).copied() != Some(b' ') {
        return (chunk, Vec::new());
    }
    match memchr::memchr(b'\n', &chunk) {
        Some(p) if p + 1 < chunk.len() => {
            let left = chunk.split_off(p + 1);
            (chunk, left)
        }
        _ => (chunk, Vec::new()),
    }
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Read until the buffered data holds at least one complete line,
    /// or until `max_response_len` bytes have been collected.
    async fn read_chunk(&mut self) -> Result<Vec<u8>, FtpRawResponseError> {
        let max_len = self.config.max_response_len;
        let mut chunk = std::mem::take(&mut self.pending);
        let mut buf = Vec::new();
        while memchr::memchr(b'\n', &chunk).is_none() && chunk.len() < max_len {
            buf.resize(max_len - chunk.len(), 0);
            let nr = self
                .stream
                .read(&mut buf)
                .await
                .map_err(FtpRawResponseError::ReadFailed)?;
            if nr == 0 {
                if chunk.is_empty() {
                    return Err(FtpRawResponseError::ConnectionClosed);
                }
                break;
            }
            chunk.extend_from_slice(&buf[..nr]);
        }
        Ok(chunk)
    }

    pub(super) async fn read_raw_response(&mut self) -> Result<FtpResponse, FtpRawResponseError> {
        let chunk = self.read_chunk().await?;
        let (reply, left) = split_first_reply(chunk);
        self.pending = left;

        #[cfg(feature = "log-raw-io")]
        crate::debug::log_rsp(&reply);

        FtpResponse::parse(reply)
    }

    pub(super) async fn timed_read_raw_response(
        &mut self,
        stage: &'static str,
    ) -> Result<FtpResponse, FtpRawResponseError> {
        match tokio::time::timeout(self.config.command_timeout, self.read_raw_response()).await {
            Ok(r) => r,
            Err(_) => Err(FtpRawResponseError::ReadResponseTimedOut(stage)),
        }
    }
}
