/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Instant;

use clap::{Arg, ArgMatches, Command};
use log::info;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite};

use rftp_client::{FtpClient, FtpConnectionProvider, FtpTransferOutcome};

use crate::shell::ShellInput;

pub(super) const COMMAND: &str = "get";

const COMMAND_ARG_FILE: &str = "file";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Receive file")
        .arg(Arg::new(COMMAND_ARG_FILE).value_name("FILE").num_args(1))
}

/// Remote and local file names, asked for if not given on the command line.
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

    let Some(remote) = shell.prompt_word("(remote-file) ").await? else {
        return Ok(None);
    };
    let local = shell
        .prompt_word("(local-file) ")
        .await?
        .unwrap_or_else(|| remote.clone());
    Ok(Some((remote, local)))
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
    let Some((remote, local)) = file_names(shell, args).await? else {
        shell.print("usage: get remote-file [local-file]\n").await?;
        return Ok(());
    };

    let time_start = Instant::now();
    let outcome = client.download_file(&remote, &local).await?;
    let elapsed = time_start.elapsed();

    if let FtpTransferOutcome::Completed(summary) = outcome {
        info!("{} bytes received into {local}", summary.bytes());
    }
    shell
        .print(&format!(
            "Elapsed Time: {:.6} seconds.\n",
            elapsed.as_secs_f64()
        ))
        .await
}
