/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use log::Level;

pub const FTP_DEBUG_LOG_LEVEL: Level = Level::Debug;
pub const FTP_DEBUG_LOG_TARGET: &str = "rftp";

/// Log an outgoing command line, the password is never shown.
#[cfg(feature = "log-raw-io")]
pub(crate) fn log_cmd(cmd: crate::FtpCommand, param1: &str) {
    if param1.is_empty() {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "> {cmd}");
    } else if cmd == crate::FtpCommand::PASS {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "> {cmd} ****");
    } else {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "> {cmd} {param1}");
    }
}

/// Log a reply as received, one log line per reply line.
#[cfg(feature = "log-raw-io")]
pub(crate) fn log_rsp(raw: &[u8]) {
    for line in String::from_utf8_lossy(raw).lines() {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "< {line}");
    }
}
