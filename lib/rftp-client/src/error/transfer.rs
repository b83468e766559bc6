/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

use super::command::FtpCommandError;
use crate::transfer::FtpTransferStage;

#[derive(Debug, Error)]
pub enum FtpPumpError {
    #[error("read from source failed: {0:?}")]
    ReadFailed(io::Error),
    #[error("write to sink failed: {0:?}")]
    WriteFailed(io::Error),
}

#[derive(Debug, Error)]
pub enum FtpTransferError {
    #[error("command failed at stage {stage}: {source}")]
    CommandFailed {
        stage: FtpTransferStage,
        source: FtpCommandError,
    },
    #[error("data connection failed: {0}")]
    DataConnectFailed(Box<dyn StdError + Send + Sync>),
    #[error("timed out to open data connection")]
    DataConnectTimedOut,
    #[error("unable to create local file: {0:?}")]
    LocalFileCreateFailed(io::Error),
    #[error("unable to open local file: {0:?}")]
    LocalFileOpenFailed(io::Error),
    #[error("data pump failed: {0}")]
    PumpFailed(#[from] FtpPumpError),
}

impl FtpTransferError {
    pub fn stage(&self) -> FtpTransferStage {
        match self {
            FtpTransferError::CommandFailed { stage, .. } => *stage,
            FtpTransferError::DataConnectFailed(_) | FtpTransferError::DataConnectTimedOut => {
                FtpTransferStage::PassiveNegotiated
            }
            FtpTransferError::LocalFileCreateFailed(_)
            | FtpTransferError::LocalFileOpenFailed(_) => FtpTransferStage::DataOpen,
            FtpTransferError::PumpFailed(_) => FtpTransferStage::Draining,
        }
    }
}
