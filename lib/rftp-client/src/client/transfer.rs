/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::path::Path;

use log::{debug, warn};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::FtpClient;
use crate::control::{FtpCommand, FtpReplyKind, FtpResponse, PassiveEndpoint};
use crate::error::{FtpCommandError, FtpTransferError};
use crate::transfer::{
    FtpStreamPump, FtpTransferDirection, FtpTransferOutcome, FtpTransferProgress,
    FtpTransferRequest, FtpTransferStage, FtpTransferSummary, FtpTransferType, PumpSummary,
};
use crate::FtpConnectionProvider;

impl<CP, S, E, D> FtpClient<CP, S, E, D>
where
    CP: FtpConnectionProvider<S, E>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error + Send + Sync + 'static,
    D: AsyncWrite + Unpin,
{
    fn stream_pump(&self) -> FtpStreamPump {
        FtpStreamPump::from(&self.config.transfer)
    }

    async fn transfer_command(
        &mut self,
        progress: &FtpTransferProgress,
        cmd: FtpCommand,
        param1: &str,
    ) -> Result<FtpResponse, FtpTransferError> {
        self.command(cmd, param1)
            .await
            .map_err(|source| FtpTransferError::CommandFailed {
                stage: progress.stage(),
                source,
            })
    }

    async fn negotiate_passive(
        &mut self,
        progress: &FtpTransferProgress,
    ) -> Result<PassiveEndpoint, FtpTransferError> {
        let cmd = FtpCommand::PASV;
        let reply = self.transfer_command(progress, cmd, "").await?;
        let e = match reply.code() {
            227 => match reply.passive_endpoint() {
                Some(endpoint) => {
                    debug!("passive data endpoint: {endpoint}");
                    return Ok(endpoint);
                }
                None => FtpCommandError::InvalidReplySyntax(cmd, 227),
            },
            421 => FtpCommandError::ServiceNotAvailable,
            n => FtpCommandError::UnexpectedReplyCode(cmd, n),
        };
        Err(FtpTransferError::CommandFailed {
            stage: progress.stage(),
            source: e,
        })
    }

    async fn set_representation_type(
        &mut self,
        progress: &FtpTransferProgress,
        t: FtpTransferType,
    ) -> Result<(), FtpTransferError> {
        let reply = self.transfer_command(progress, t.command(), "").await?;
        if reply.code() != 200 {
            warn!("{} is not accepted, reply code {}", t.command(), reply.code());
        }
        Ok(())
    }

    async fn open_data_connection(
        &mut self,
        endpoint: &PassiveEndpoint,
    ) -> Result<S, FtpTransferError> {
        match tokio::time::timeout(
            self.config.transfer.data_connect_timeout,
            self.conn_provider.new_data_connection(endpoint),
        )
        .await
        {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(FtpTransferError::DataConnectFailed(Box::new(e))),
            Err(_) => Err(FtpTransferError::DataConnectTimedOut),
        }
    }

    /// PASV, optional TYPE, then the data connection.
    async fn prepare_data_channel(
        &mut self,
        request: &FtpTransferRequest,
        progress: &mut FtpTransferProgress,
    ) -> Result<S, FtpTransferError> {
        let endpoint = self.negotiate_passive(progress).await?;
        progress.enter(FtpTransferStage::PassiveNegotiated);

        if let Some(t) = request.representation_type() {
            self.set_representation_type(progress, t).await?;
        }

        let data = self.open_data_connection(&endpoint).await?;
        progress.enter(FtpTransferStage::DataOpen);
        Ok(data)
    }

    async fn close_data_channel(&mut self, mut data: S, progress: &mut FtpTransferProgress) {
        if let Err(e) = data.shutdown().await {
            debug!("data connection shutdown error: {e}");
        }
        drop(data);
        progress.enter(FtpTransferStage::DataClosed);
    }

    /// Read the reply that ends the transfer, if one is still to come.
    async fn finish_transfer(
        &mut self,
        ack: &FtpResponse,
        progress: &mut FtpTransferProgress,
    ) -> Result<Option<FtpResponse>, FtpTransferError> {
        let final_reply = if ack.is_preliminary() {
            let reply = self
                .wait_reply("wait transfer end")
                .await
                .map_err(|source| FtpTransferError::CommandFailed {
                    stage: progress.stage(),
                    source,
                })?;
            Some(reply)
        } else {
            debug!("no end reply expected after reply code {}", ack.code());
            None
        };
        progress.enter(FtpTransferStage::Idle);
        Ok(final_reply)
    }

    /// Close the data channel and collect the end reply, also when the data
    /// phase failed. The data phase error is returned in that case.
    async fn end_transfer(
        &mut self,
        data: S,
        ack: &FtpResponse,
        progress: &mut FtpTransferProgress,
        drained: Result<PumpSummary, FtpTransferError>,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        self.close_data_channel(data, progress).await;

        match drained {
            Ok(summary) => {
                let final_reply = self.finish_transfer(ack, progress).await?;
                Ok(FtpTransferOutcome::Completed(FtpTransferSummary::new(
                    summary,
                    final_reply,
                )))
            }
            Err(e) => {
                debug!("transfer failed in stage {}: {e}", e.stage());
                match self.finish_transfer(ack, progress).await {
                    Ok(Some(reply)) => {
                        debug!("end reply after failed transfer: {}", reply.code())
                    }
                    Ok(None) => {}
                    Err(fe) => warn!("no end reply after failed transfer: {fe}"),
                }
                Err(e)
            }
        }
    }

    async fn list_with<W>(
        &mut self,
        request: &FtpTransferRequest,
        sink: Option<&mut W>,
    ) -> Result<FtpTransferOutcome, FtpTransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut progress = FtpTransferProgress::new(FtpTransferDirection::List);
        let mut data = self.prepare_data_channel(request, &mut progress).await?;

        let ack = self
            .transfer_command(&progress, FtpCommand::LIST, request.remote_name())
            .await?;

        progress.enter(FtpTransferStage::Draining);
        let pump = self.stream_pump();
        let direction = request.direction().pump_direction();
        let drained = match sink {
            Some(sink) => pump.drain(&mut data, sink, direction).await,
            None => pump.drain(&mut data, &mut self.display, direction).await,
        };
        self.end_transfer(data, &ack, &mut progress, drained.map_err(From::from))
            .await
    }

    /// List `path` (or the current directory if empty) to the display sink.
    pub async fn list_directory(
        &mut self,
        path: &str,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        let request = FtpTransferRequest::list(path);
        self.list_with::<D>(&request, None).await
    }

    /// Like [`Self::list_directory`], but the listing goes to `sink`.
    pub async fn list_directory_into<W>(
        &mut self,
        path: &str,
        sink: &mut W,
    ) -> Result<FtpTransferOutcome, FtpTransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let request = FtpTransferRequest::list(path);
        self.list_with(&request, Some(sink)).await
    }

    async fn download(
        &mut self,
        request: &FtpTransferRequest,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        let mut progress = FtpTransferProgress::new(FtpTransferDirection::Download);
        let mut data = self.prepare_data_channel(request, &mut progress).await?;

        let ack = self
            .transfer_command(&progress, FtpCommand::RETR, request.remote_name())
            .await?;
        if ack.kind() == FtpReplyKind::NotFound {
            debug!("remote file {} not found", request.remote_name());
            self.close_data_channel(data, &mut progress).await;
            progress.enter(FtpTransferStage::Idle);
            return Ok(FtpTransferOutcome::RemoteFileNotFound);
        }

        let drained = match File::create(request.local_path()).await {
            Ok(mut file) => {
                progress.enter(FtpTransferStage::Draining);
                self.stream_pump()
                    .drain(&mut data, &mut file, request.direction().pump_direction())
                    .await
                    .map_err(FtpTransferError::from)
            }
            Err(e) => Err(FtpTransferError::LocalFileCreateFailed(e)),
        };
        self.end_transfer(data, &ack, &mut progress, drained).await
    }

    /// Retrieve `remote_name` into `local_path` in image mode.
    ///
    /// A `550` reply to `RETR` is reported as
    /// [`FtpTransferOutcome::RemoteFileNotFound`] and leaves `local_path`
    /// untouched.
    pub async fn download_file<P: AsRef<Path>>(
        &mut self,
        remote_name: &str,
        local_path: P,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        let request = FtpTransferRequest::download(remote_name, local_path);
        self.download(&request).await
    }

    async fn upload(
        &mut self,
        request: &FtpTransferRequest,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        let mut progress = FtpTransferProgress::new(FtpTransferDirection::Upload);
        let mut data = self.prepare_data_channel(request, &mut progress).await?;

        let ack = self
            .transfer_command(&progress, FtpCommand::STOR, request.remote_name())
            .await?;

        let pump = self.stream_pump();
        let direction = request.direction().pump_direction();
        let drained = match File::open(request.local_path()).await {
            Ok(mut file) => {
                progress.enter(FtpTransferStage::Draining);
                pump.drain(&mut file, &mut data, direction)
                    .await
                    .map_err(FtpTransferError::from)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "local file {} not found, an empty file will be stored",
                    request.local_path().display()
                );
                progress.enter(FtpTransferStage::Draining);
                pump.drain(&mut tokio::io::empty(), &mut data, direction)
                    .await
                    .map_err(FtpTransferError::from)
            }
            Err(e) => Err(FtpTransferError::LocalFileOpenFailed(e)),
        };
        self.end_transfer(data, &ack, &mut progress, drained).await
    }

    /// Store `local_path` as `remote_name` in image mode.
    ///
    /// A missing local file is sent as an empty one.
    pub async fn upload_file<P: AsRef<Path>>(
        &mut self,
        local_path: P,
        remote_name: &str,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        let request = FtpTransferRequest::upload(local_path, remote_name);
        self.upload(&request).await
    }

    /// Run a transfer request, listings go to the display sink.
    pub async fn execute_transfer(
        &mut self,
        request: &FtpTransferRequest,
    ) -> Result<FtpTransferOutcome, FtpTransferError> {
        match request.direction() {
            FtpTransferDirection::List => self.list_with::<D>(request, None).await,
            FtpTransferDirection::Download => self.download(request).await,
            FtpTransferDirection::Upload => self.upload(request).await,
        }
    }
}
