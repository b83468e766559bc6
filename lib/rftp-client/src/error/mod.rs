/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod addr;
pub use addr::FtpServerAddrParseError;

mod response;
pub use response::FtpRawResponseError;

mod command;
pub use command::FtpCommandError;

mod connect;
pub use connect::FtpConnectError;

mod session;
pub use session::FtpSessionOpenError;

mod transfer;
pub use transfer::{FtpPumpError, FtpTransferError};
