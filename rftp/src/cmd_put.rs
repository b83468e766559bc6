/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use clap::{Arg, ArgMatches, Command};
use log::info;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite};

use rftp_client::{FtpClient, FtpConnectionProvider, FtpTransferOutcome};

use crate::shell::ShellInput;

pub(super) const COMMAND: &str = "put";

const COMMAND_ARG_FILE: &str = "file";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Send one file")
        .arg(Arg::new(COMMAND_ARG_FILE).value_name("FILE").num_args(1))
}

/// Local and remote file names, asked for if not given on the command line.
async fn file_names<R, W>(
    shell: &mut ShellInput<R, W>,
    args: &ArgMatches,
) -> anyhow::Result<Option<(String, String)>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Some(file) = args.get_one::<String>(COMMAND_ARG_FILE) {
        return Ok(Some((file.clone(), file.clone())));
    }

    let Some(local) = shell.prompt_word("(local-file) ").await? else {
        return Ok(None);
    };
    let remote = shell
        .prompt_word("(remote-file) ")
        .await?
        .unwrap_or_else(|| local.clone());
    Ok(Some((local, remote)))
}

pub(super) async fn run<CP, S, E, D, R, W>(
    client: &mut FtpClient<CP, S, E, D>,
    shell: &mut ShellInput<R, W>,
    args: &ArgMatches,
) -> anyhow::Result<()>
where
    CP: FtpConnectionProvider<S, E>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error + Send + Sync + 'static,
    D: AsyncWrite + Unpin,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some((local, remote)) = file_names(shell, args).await? else {
        shell.print("usage: put local-file [remote-file]\n").await?;
        return Ok(());
    };

    if let FtpTransferOutcome::Completed(summary) = client.upload_file(&local, &remote).await? {
        info!("{} bytes sent as {remote}", summary.bytes());
    }
    Ok(())
}
