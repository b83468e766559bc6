/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod debug;
pub use debug::{FTP_DEBUG_LOG_LEVEL, FTP_DEBUG_LOG_TARGET};

mod addr;
pub use addr::FtpServerAddr;

mod config;
pub use config::{FtpClientConfig, FtpControlConfig, FtpTransferConfig};

mod error;
pub use error::{
    FtpCommandError, FtpConnectError, FtpPumpError, FtpRawResponseError, FtpServerAddrParseError,
    FtpSessionOpenError, FtpTransferError,
};

mod connection;
pub use connection::FtpConnectionProvider;

mod control;
pub use control::{FtpCommand, FtpReplyKind, FtpResponse, PassiveEndpoint};

mod transfer;
pub use transfer::{
    FtpStreamPump, FtpTransferDirection, FtpTransferOutcome, FtpTransferRequest, FtpTransferStage,
    FtpTransferSummary, FtpTransferType, PumpDirection, PumpEnd, PumpSummary,
};

mod client;
pub use client::FtpClient;
