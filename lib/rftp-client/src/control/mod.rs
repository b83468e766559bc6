/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::FtpControlConfig;
use crate::error::{FtpCommandError, FtpRawResponseError};

mod command;
pub use command::FtpCommand;

mod response;
pub use response::{FtpReplyKind, FtpResponse};

mod pasv;
pub use pasv::PassiveEndpoint;

pub(crate) struct FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite,
{
    config: FtpControlConfig,
    stream: T,
    pending: Vec<u8>,
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(stream: T, config: FtpControlConfig) -> Self {
        FtpControlChannel {
            config,
            stream,
            pending: Vec::new(),
        }
    }

    pub(crate) async fn wait_greetings(&mut self) -> Result<FtpResponse, FtpRawResponseError> {
        self.read_raw_response().await
    }

    /// Send one command line and read the reply to it.
    pub(crate) async fn execute(
        &mut self,
        cmd: FtpCommand,
        param1: &str,
    ) -> Result<FtpResponse, FtpCommandError> {
        self.send_cmd1(cmd, param1).await?;
        let reply = self.timed_read_raw_response(cmd.as_str()).await?;
        Ok(reply)
    }

    /// Read a reply without sending anything, for replies that end a transfer.
    pub(crate) async fn wait_reply(
        &mut self,
        stage: &'static str,
    ) -> Result<FtpResponse, FtpCommandError> {
        let reply = self.timed_read_raw_response(stage).await?;
        Ok(reply)
    }

    /// Bytes already read from the stream but not yet consumed as a reply.
    pub(crate) fn take_pending(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn stream_mut(&mut self) -> &mut T {
        &mut self.stream
    }

    pub(crate) async fn shutdown(&mut self) -> std::io::Result<()> {
        self.stream.shutdown().await
    }
}
