/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

#[cfg(feature = "yaml")]
mod yaml;

const DEFAULT_BUFFER_SIZE: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpControlConfig {
    /// max bytes taken by a single read on the control channel
    pub max_response_len: usize,
    pub command_timeout: Duration,
}

impl Default for FtpControlConfig {
    fn default() -> Self {
        FtpControlConfig {
            max_response_len: DEFAULT_BUFFER_SIZE,
            command_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpTransferConfig {
    /// max bytes moved by a single pump iteration
    pub buffer_size: usize,
    /// the pump stops if no data is readable within this time
    pub idle_timeout: Duration,
    pub data_connect_timeout: Duration,
}

impl Default for FtpTransferConfig {
    fn default() -> Self {
        FtpTransferConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            idle_timeout: Duration::from_secs(1),
            data_connect_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpClientConfig {
    pub control: FtpControlConfig,
    pub transfer: FtpTransferConfig,
    pub connect_timeout: Duration,
    pub greeting_timeout: Duration,
}

impl Default for FtpClientConfig {
    fn default() -> Self {
        FtpClientConfig {
            control: FtpControlConfig::default(),
            transfer: FtpTransferConfig::default(),
            connect_timeout: Duration::from_secs(30),
            greeting_timeout: Duration::from_secs(10),
        }
    }
}
