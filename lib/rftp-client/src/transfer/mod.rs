/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::control::{FtpCommand, FtpResponse};

mod pump;
pub use pump::{FtpStreamPump, PumpDirection, PumpEnd, PumpSummary};

/// Representation type set by `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtpTransferType {
    Ascii,
    Image,
}

impl FtpTransferType {
    pub(crate) fn command(&self) -> FtpCommand {
        match self {
            FtpTransferType::Ascii => FtpCommand::TYPE_A,
            FtpTransferType::Image => FtpCommand::TYPE_I,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtpTransferDirection {
    List,
    Download,
    Upload,
}

impl FtpTransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpTransferDirection::List => "list",
            FtpTransferDirection::Download => "download",
            FtpTransferDirection::Upload => "upload",
        }
    }

    pub fn pump_direction(&self) -> PumpDirection {
        match self {
            FtpTransferDirection::List | FtpTransferDirection::Download => PumpDirection::Inbound,
            FtpTransferDirection::Upload => PumpDirection::Outbound,
        }
    }
}

impl fmt::Display for FtpTransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtpTransferStage {
    Idle,
    PassiveNegotiated,
    DataOpen,
    Draining,
    DataClosed,
}

impl FtpTransferStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpTransferStage::Idle => "idle",
            FtpTransferStage::PassiveNegotiated => "passive negotiated",
            FtpTransferStage::DataOpen => "data open",
            FtpTransferStage::Draining => "draining",
            FtpTransferStage::DataClosed => "data closed",
        }
    }
}

impl fmt::Display for FtpTransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) struct FtpTransferProgress {
    direction: FtpTransferDirection,
    stage: FtpTransferStage,
}

impl FtpTransferProgress {
    pub(crate) fn new(direction: FtpTransferDirection) -> Self {
        FtpTransferProgress {
            direction,
            stage: FtpTransferStage::Idle,
        }
    }

    #[inline]
    pub(crate) fn stage(&self) -> FtpTransferStage {
        self.stage
    }

    pub(crate) fn enter(&mut self, stage: FtpTransferStage) {
        debug!("{} transfer: {} -> {}", self.direction, self.stage, stage);
        self.stage = stage;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpTransferRequest {
    direction: FtpTransferDirection,
    remote_name: String,
    local_path: PathBuf,
    representation_type: Option<FtpTransferType>,
}

impl FtpTransferRequest {
    /// List `path`, or the current remote directory if it is empty.
    pub fn list(path: &str) -> Self {
        FtpTransferRequest {
            direction: FtpTransferDirection::List,
            remote_name: path.to_string(),
            local_path: PathBuf::new(),
            representation_type: None,
        }
    }

    pub fn download<P: AsRef<Path>>(remote_name: &str, local_path: P) -> Self {
        FtpTransferRequest {
            direction: FtpTransferDirection::Download,
            remote_name: remote_name.to_string(),
            local_path: local_path.as_ref().to_path_buf(),
            representation_type: Some(FtpTransferType::Image),
        }
    }

    pub fn upload<P: AsRef<Path>>(local_path: P, remote_name: &str) -> Self {
        FtpTransferRequest {
            direction: FtpTransferDirection::Upload,
            remote_name: remote_name.to_string(),
            local_path: local_path.as_ref().to_path_buf(),
            representation_type: Some(FtpTransferType::Image),
        }
    }

    pub fn with_representation_type(mut self, t: FtpTransferType) -> Self {
        self.representation_type = Some(t);
        self
    }

    #[inline]
    pub fn direction(&self) -> FtpTransferDirection {
        self.direction
    }

    #[inline]
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    #[inline]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    #[inline]
    pub fn representation_type(&self) -> Option<FtpTransferType> {
        self.representation_type
    }
}

#[derive(Debug, Clone)]
pub struct FtpTransferSummary {
    bytes: u64,
    pump_end: PumpEnd,
    final_reply: Option<FtpResponse>,
}

impl FtpTransferSummary {
    pub(crate) fn new(pump: PumpSummary, final_reply: Option<FtpResponse>) -> Self {
        FtpTransferSummary {
            bytes: pump.bytes(),
            pump_end: pump.end(),
            final_reply,
        }
    }

    /// bytes moved over the data channel
    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    #[inline]
    pub fn pump_end(&self) -> PumpEnd {
        self.pump_end
    }

    /// Not set if the acknowledgment was already a completion reply.
    #[inline]
    pub fn final_reply(&self) -> Option<&FtpResponse> {
        self.final_reply.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum FtpTransferOutcome {
    Completed(FtpTransferSummary),
    /// `550` to `RETR`, nothing was written locally
    RemoteFileNotFound,
}
