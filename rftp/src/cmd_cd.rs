/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use clap::{Arg, ArgMatches, Command};
use tokio::io::{AsyncRead, AsyncWrite};

use rftp_client::{FtpClient, FtpConnectionProvider};

pub(super) const COMMAND: &str = "cd";

const COMMAND_ARG_DIR: &str = "dir";

pub(super) fn command() -> Command {
    Command::new(COMMAND).about("Change remote working directory").arg(
        Arg::new(COMMAND_ARG_DIR)
            .value_name("DIRECTORY")
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
    if let Some(dir) = args.get_one::<String>(COMMAND_ARG_DIR) {
        client.change_dir(dir).await?;
    }
    Ok(())
}
