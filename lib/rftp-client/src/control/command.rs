/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::FtpControlChannel;
use crate::error::FtpCommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FtpCommand(&'static str);

impl FtpCommand {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! ftp_commands {
    (
        $(
            $(#[$docs:meta])*
            ($konst:ident, $phrase:expr);
        )+
    ) => {
        impl FtpCommand {
        $(
            $(#[$docs])*
            pub const $konst: FtpCommand = FtpCommand($phrase);
        )+
        }
    };
}

ftp_commands! {
    /// a fake command for greeting
    (GREETING, "-");
    (USER, "USER");
    (PASS, "PASS");
    (SYST, "SYST");
    (QUIT, "QUIT");
    (CWD, "CWD");
    (MKD, "MKD");
    (DELE, "DELE");
    (TYPE_A, "TYPE A");
    (TYPE_I, "TYPE I");
    (PASV, "PASV");
    (LIST, "LIST");
    (RETR, "RETR");
    (STOR, "STOR");
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    async fn send_all(&mut self, buf: &[u8]) -> Result<(), FtpCommandError> {
        self.stream
            .write_all(buf)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        self.stream
            .flush()
            .await
            .map_err(FtpCommandError::SendFailed)?;
        Ok(())
    }

    pub(super) async fn send_cmd(&mut self, cmd: FtpCommand) -> Result<(), FtpCommandError> {
        #[cfg(feature = "log-raw-io")]
        crate::debug::log_cmd(cmd, "");

        let buf = build_command_line(cmd, "");
        self.send_all(&buf).await
    }

    pub(super) async fn send_cmd1(
        &mut self,
        cmd: FtpCommand,
        param1: &str,
    ) -> Result<(), FtpCommandError> {
        if param1.is_empty() {
            return self.send_cmd(cmd).await;
        }
        if memchr::memchr2(b'\r', b'\n', param1.as_bytes()).is_some() {
            return Err(FtpCommandError::InvalidParameter(cmd));
        }

        #[cfg(feature = "log-raw-io")]
        crate::debug::log_cmd(cmd, param1);

        let buf = build_command_line(cmd, param1);
        self.send_all(&buf).await
    }
}

fn build_command_line(cmd: FtpCommand, param1: &str) -> Vec<u8> {
    let mut len = cmd.0.len() + 2;
    if !param1.is_empty() {
        len += 1 + param1.len();
    }
    let mut buf: Vec<u8> = Vec::with_capacity(len);
    buf.extend_from_slice(cmd.0.as_bytes());
    if !param1.is_empty() {
        buf.push(b' ');
        buf.extend_from_slice(param1.as_bytes());
    }
    buf.extend_from_slice(b"\r\n");
    buf
}
