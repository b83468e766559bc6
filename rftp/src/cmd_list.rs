/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use clap::{Arg, ArgMatches, Command};
use log::info;
use tokio::io::{AsyncRead, AsyncWrite};

use rftp_client::{FtpClient, FtpConnectionProvider, FtpTransferOutcome};

pub(super) const COMMAND: &str = "ls";

const COMMAND_ARG_PATH: &str = "path";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("List remote directory")
        .arg(Arg::new(COMMAND_ARG_PATH).value_name("PATH").num_args(1))
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
    let path = args
        .get_one::<String>(COMMAND_ARG_PATH)
        .map(|s| s.as_str())
        .unwrap_or_default();

    if let FtpTransferOutcome::Completed(summary) = client.list_directory(path).await? {
        info!("{} bytes of listing received", summary.bytes());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_path() {
        let args = command().try_get_matches_from(["ls"]).unwrap();
        assert!(args.get_one::<String>(COMMAND_ARG_PATH).is_none());

        let args = command().try_get_matches_from(["ls", "pub/docs"]).unwrap();
        assert_eq!(
            args.get_one::<String>(COMMAND_ARG_PATH).map(|s| s.as_str()),
            Some("pub/docs")
        );
    }
}
