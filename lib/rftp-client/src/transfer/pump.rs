/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::time::Duration;

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::FtpTransferConfig;
use crate::error::FtpPumpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpDirection {
    /// remote to local
    Inbound,
    /// local to remote
    Outbound,
}

impl fmt::Display for PumpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PumpDirection::Inbound => f.write_str("inbound"),
            PumpDirection::Outbound => f.write_str("outbound"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpEnd {
    /// nothing became readable within the idle timeout
    Idle,
    /// the source returned a zero-byte read
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpSummary {
    bytes: u64,
    end: PumpEnd,
}

impl PumpSummary {
    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    #[inline]
    pub fn end(&self) -> PumpEnd {
        self.end
    }
}

/// Move bytes from a source to a sink until the source is idle or closed.
#[derive(Debug, Clone, Copy)]
pub struct FtpStreamPump {
    buffer_size: usize,
    idle_timeout: Duration,
}

impl FtpStreamPump {
    pub fn new(buffer_size: usize, idle_timeout: Duration) -> Self {
        FtpStreamPump {
            buffer_size: buffer_size.max(1),
            idle_timeout,
        }
    }

    pub async fn drain<R, W>(
        &self,
        source: &mut R,
        sink: &mut W,
        direction: PumpDirection,
    ) -> Result<PumpSummary, FtpPumpError>
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut buf = vec![0u8; self.buffer_size];
        let mut bytes = 0u64;

        let end = loop {
            let nr = match tokio::time::timeout(self.idle_timeout, source.read(&mut buf)).await {
                Ok(Ok(0)) => break PumpEnd::Closed,
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(FtpPumpError::ReadFailed(e)),
                Err(_) => break PumpEnd::Idle,
            };
            sink.write_all(&buf[..nr])
                .await
                .map_err(FtpPumpError::WriteFailed)?;
            bytes += nr as u64;
        };
        sink.flush().await.map_err(FtpPumpError::WriteFailed)?;

        debug!("{direction} pump finished with {bytes} bytes, end: {end:?}");
        Ok(PumpSummary { bytes, end })
    }
}

impl From<&FtpTransferConfig> for FtpStreamPump {
    fn from(config: &FtpTransferConfig) -> Self {
        FtpStreamPump::new(config.buffer_size, config.idle_timeout)
    }
}
