/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use clap::{Arg, ArgMatches, Command};
use tokio::io::{AsyncRead, AsyncWrite};

use rftp_client::{FtpClient, FtpConnectionProvider};

pub(super) const COMMAND: &str = "dele";

const COMMAND_ARG_FILE: &str = "file";

pub(super) fn command() -> Command {
    Command::new(COMMAND).about("Delete remote file").arg(
        Arg::new(COMMAND_ARG_FILE)
            .value_name("FILE")
            .num_args(1)
            .required(true),
    )
}

pub(super) async fn run<CP, S, E, D>(
    client: &mut FtpClient<CP, S, E, D>,
    args: &ArgMatches,
) -> anyhow::Result<()>
where
    CP: FtpConnectionProvider<S, E>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error + Send + Sync + 'static,
    D: AsyncWrite + Unpin,
{
    if let Some(file) = args.get_one::<String>(COMMAND_ARG_FILE) {
        client.delete_file(file).await?;
    }
    Ok(())
}
