/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FtpServerAddrParseError {
    #[error("empty host")]
    EmptyHost,
    #[error("invalid port")]
    InvalidPort,
    #[error("unclosed bracket in ipv6 host")]
    UnclosedBracket,
    #[error("trailing data after host")]
    TrailingData,
}
