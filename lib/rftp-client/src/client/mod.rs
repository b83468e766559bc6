/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::control::{FtpCommand, FtpControlChannel, FtpReplyKind, FtpResponse};
use crate::error::{FtpCommandError, FtpConnectError, FtpSessionOpenError};
use crate::transfer::{FtpStreamPump, PumpDirection};
use crate::{FtpClientConfig, FtpConnectionProvider, FtpServerAddr};

mod transfer;

/// One control session with its display sink.
///
/// Every reply read on the control channel is echoed to the display sink as
/// received. Operations take `&mut self`, so at most one transfer is running.
pub struct FtpClient<CP, S, E, D>
where
    CP: FtpConnectionProvider<S, E>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error,
    D: AsyncWrite + Unpin,
{
    config: Arc<FtpClientConfig>,
    server: FtpServerAddr,
    conn_provider: CP,
    control: FtpControlChannel<S>,
    display: D,
    _phantom: PhantomData<E>,
}

impl<CP, S, E, D> FtpClient<CP, S, E, D>
where
    CP: FtpConnectionProvider<S, E>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error + Send + Sync + 'static,
    D: AsyncWrite + Unpin,
{
    /// Open the control connection and check the `220` greeting.
    pub async fn connect_to(
        server: FtpServerAddr,
        mut conn_provider: CP,
        display: D,
        config: &Arc<FtpClientConfig>,
    ) -> Result<Self, FtpConnectError<E>> {
        let stream = match tokio::time::timeout(
            config.connect_timeout,
            conn_provider.new_control_connection(&server),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(FtpConnectError::ConnectIoError(e)),
            Err(_) => return Err(FtpConnectError::ConnectTimedOut),
        };

        let mut control = FtpControlChannel::new(stream, config.control.clone());
        let greeting =
            match tokio::time::timeout(config.greeting_timeout, control.wait_greetings()).await {
                Ok(Ok(reply)) => reply,
                Ok(Err(e)) => return Err(FtpConnectError::GreetingFailed(e.into())),
                Err(_) => return Err(FtpConnectError::GreetingTimedOut),
            };

        let mut client = FtpClient {
            config: Arc::clone(config),
            server,
            conn_provider,
            control,
            display,
            _phantom: PhantomData,
        };
        client.show_reply(&greeting).await;

        match greeting.kind() {
            FtpReplyKind::Ready => {
                debug!("connected to ftp server {}", client.server);
                Ok(client)
            }
            FtpReplyKind::Other(421) => Err(FtpConnectError::ServiceNotAvailable),
            kind => Err(FtpConnectError::InvalidReplyCode(kind.code())),
        }
    }

    #[inline]
    pub fn server(&self) -> &FtpServerAddr {
        &self.server
    }

    #[inline]
    pub fn config(&self) -> &FtpClientConfig {
        &self.config
    }

    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    async fn show_bytes(&mut self, buf: &[u8]) {
        if let Err(e) = self.display.write_all(buf).await {
            warn!("failed to write to display: {e}");
            return;
        }
        if let Err(e) = self.display.flush().await {
            warn!("failed to flush display: {e}");
        }
    }

    async fn show_reply(&mut self, reply: &FtpResponse) {
        debug!("reply {}: {}", reply.code(), reply.text());
        self.show_bytes(reply.as_bytes()).await;
    }

    /// Send one command, echo the reply and return it to the caller.
    pub async fn command(
        &mut self,
        cmd: FtpCommand,
        param1: &str,
    ) -> Result<FtpResponse, FtpCommandError> {
        let reply = self.control.execute(cmd, param1).await?;
        self.show_reply(&reply).await;
        Ok(reply)
    }

    /// Read the next reply without sending anything.
    async fn wait_reply(&mut self, stage: &'static str) -> Result<FtpResponse, FtpCommandError> {
        let reply = self.control.wait_reply(stage).await?;
        self.show_reply(&reply).await;
        Ok(reply)
    }

    /// Echo whatever else the server sent on the control channel until it is idle.
    async fn drain_control(&mut self) {
        let pending = self.control.take_pending();
        if !pending.is_empty() {
            self.show_bytes(&pending).await;
        }

        let pump = FtpStreamPump::from(&self.config.transfer);
        if let Err(e) = pump
            .drain(
                self.control.stream_mut(),
                &mut self.display,
                PumpDirection::Inbound,
            )
            .await
        {
            warn!("failed to drain control channel: {e}");
        }
    }

    /// `USER` followed by `PASS`.
    ///
    /// Anything but `331` to `USER` is fatal. The `PASS` reply is returned
    /// as is, along with the rest of the login banner echoed to the display.
    pub async fn new_user_session(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<FtpResponse, FtpSessionOpenError> {
        let cmd = FtpCommand::USER;
        let reply = self.command(cmd, username).await?;
        match reply.kind() {
            FtpReplyKind::NeedPassword => {}
            FtpReplyKind::Other(421) => return Err(FtpSessionOpenError::ServiceNotAvailable),
            FtpReplyKind::Other(530) => return Err(FtpSessionOpenError::NotLoggedIn),
            FtpReplyKind::Other(332) => return Err(FtpSessionOpenError::AccountIsNeeded),
            kind => {
                return Err(FtpCommandError::UnexpectedReplyCode(cmd, kind.code()).into());
            }
        }

        let reply = self.command(FtpCommand::PASS, password).await?;
        self.drain_control().await;
        if reply.kind() != FtpReplyKind::LoggedIn {
            warn!("login is not confirmed, reply code {}", reply.code());
        }
        Ok(reply)
    }

    pub async fn system_type(&mut self) -> Result<FtpResponse, FtpCommandError> {
        self.command(FtpCommand::SYST, "").await
    }

    pub async fn change_dir(&mut self, path: &str) -> Result<FtpResponse, FtpCommandError> {
        self.command(FtpCommand::CWD, path).await
    }

    pub async fn make_dir(&mut self, path: &str) -> Result<FtpResponse, FtpCommandError> {
        self.command(FtpCommand::MKD, path).await
    }

    pub async fn delete_file(&mut self, path: &str) -> Result<FtpResponse, FtpCommandError> {
        self.command(FtpCommand::DELE, path).await
    }

    /// Send `QUIT` and close the control connection.
    pub async fn quit_and_close(&mut self) -> Result<FtpResponse, FtpCommandError> {
        let reply = self.command(FtpCommand::QUIT, "").await?;
        if let Err(e) = self.control.shutdown().await {
            debug!("control connection shutdown error: {e}");
        }
        Ok(reply)
    }
}
