/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use clap_complete::Shell;
use log::{error, warn};
use tokio::io::BufReader;
use yaml_rust::YamlLoader;

use rftp_client::{FtpClient, FtpClientConfig, FtpServerAddr};

mod connection;
mod logger;
mod shell;

mod cmd_cd;
mod cmd_del;
mod cmd_get;
mod cmd_list;
mod cmd_mkd;
mod cmd_put;

use shell::{CLIENT_PROMPT, ShellInput};

const GLOBAL_ARG_COMPLETION: &str = "completion";
const GLOBAL_ARG_SERVER: &str = "server";
const GLOBAL_ARG_USERNAME: &str = "username";
const GLOBAL_ARG_PASSWORD: &str = "password";
const GLOBAL_ARG_CONFIG: &str = "config";
const GLOBAL_ARG_IDLE_TIMEOUT: &str = "idle-timeout";
const GLOBAL_ARG_SOURCE_IP: &str = "source-ip";
const GLOBAL_ARG_VERBOSE: &str = "verbose";

const COMMAND_CLOSE: &str = "close";
const COMMAND_QUIT: &str = "quit";

const DEFAULT_FTP_PORT: u16 = 21;

fn build_cli_args() -> Command {
    Command::new("rftp")
        .arg(
            Arg::new(GLOBAL_ARG_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_SERVER)
                .help("FTP server address")
                .num_args(1)
                .value_name("SERVER ADDRESS")
                .required_unless_present(GLOBAL_ARG_COMPLETION),
        )
        .arg(
            Arg::new(GLOBAL_ARG_USERNAME)
                .help("FTP username")
                .num_args(1)
                .value_name("USERNAME")
                .short('u'),
        )
        .arg(
            Arg::new(GLOBAL_ARG_PASSWORD)
                .help("FTP password")
                .num_args(1)
                .value_name("PASSWORD")
                .short('p'),
        )
        .arg(
            Arg::new(GLOBAL_ARG_CONFIG)
                .help("client config file in yaml format")
                .num_args(1)
                .value_name("CONFIG FILE")
                .value_parser(value_parser!(PathBuf))
                .long("config")
                .short('c'),
        )
        .arg(
            Arg::new(GLOBAL_ARG_IDLE_TIMEOUT)
                .help("stop waiting for transfer data after this idle time")
                .num_args(1)
                .value_name("TIMEOUT DURATION")
                .long(GLOBAL_ARG_IDLE_TIMEOUT),
        )
        .arg(
            Arg::new(GLOBAL_ARG_SOURCE_IP)
                .help("source ip address")
                .num_args(1)
                .value_name("IP ADDRESS")
                .value_parser(value_parser!(IpAddr))
                .long("source")
                .short('s'),
        )
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("show verbose message")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v'),
        )
}

/// Commands accepted at the `ftp> ` prompt.
fn build_shell_commands() -> Command {
    Command::new("ftp")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(cmd_list::command())
        .subcommand(cmd_get::command())
        .subcommand(cmd_put::command())
        .subcommand(cmd_cd::command())
        .subcommand(cmd_mkd::command())
        .subcommand(cmd_del::command())
        .subcommand(Command::new(COMMAND_CLOSE).about("Terminate ftp session and exit"))
        .subcommand(Command::new(COMMAND_QUIT).about("Terminate ftp session and exit"))
}

fn load_config(args: &ArgMatches) -> anyhow::Result<FtpClientConfig> {
    let mut config = match args.get_one::<PathBuf>(GLOBAL_ARG_CONFIG) {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .context(format!("failed to read config file {}", path.display()))?;
            let docs = YamlLoader::load_from_str(&content)
                .map_err(|e| anyhow!("invalid yaml file {}: {e}", path.display()))?;
            match docs.first() {
                Some(doc) => FtpClientConfig::parse_yaml(doc)
                    .context(format!("invalid client config in {}", path.display()))?,
                None => FtpClientConfig::default(),
            }
        }
        None => FtpClientConfig::default(),
    };

    if let Some(s) = args.get_one::<String>(GLOBAL_ARG_IDLE_TIMEOUT) {
        config.transfer.idle_timeout = humanize_rs::duration::parse(s)
            .map_err(|e| anyhow!("invalid idle timeout value {s}: {e}"))?;
    }
    Ok(config)
}

fn local_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_default()
}

/// Parse one shell input line, usage errors and help are printed here.
fn parse_shell_line(words: &[&str]) -> Option<ArgMatches> {
    match build_shell_commands().try_get_matches_from(words.iter().copied()) {
        Ok(args) => Some(args),
        Err(e) => {
            if let Err(pe) = e.print() {
                warn!("failed to print command error: {pe}");
            }
            None
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = build_cli_args().get_matches();

    if let Some(target) = args.get_one::<Shell>(GLOBAL_ARG_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let verbose_level = args
        .get_one::<u8>(GLOBAL_ARG_VERBOSE)
        .copied()
        .unwrap_or_default();
    let logger = logger::SyncLogger::new(verbose_level);
    logger
        .into_global_logger()
        .map_err(|e| anyhow!("failed to setup logger: {e}"))?;

    let Some(server_arg) = args.get_one::<String>(GLOBAL_ARG_SERVER) else {
        return Err(anyhow!("no server address set"));
    };
    let mut server = FtpServerAddr::from_str(server_arg)
        .map_err(|e| anyhow!("invalid server address {server_arg}: {e}"))?;
    if server.port() == 0 {
        server.set_port(DEFAULT_FTP_PORT);
    }

    let mut conn_provider = connection::LocalConnectionProvider::default();
    if let Some(ip) = args.get_one::<IpAddr>(GLOBAL_ARG_SOURCE_IP) {
        conn_provider.set_bind_ip(*ip);
    }

    let config = Arc::new(load_config(&args)?);

    let mut shell = ShellInput::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    let mut client = FtpClient::connect_to(
        server.clone(),
        conn_provider,
        tokio::io::stdout(),
        &config,
    )
    .await
    .map_err(|e| anyhow!("error connecting to server {server}: {e}"))?;

    let username = match args.get_one::<String>(GLOBAL_ARG_USERNAME) {
        Some(s) => s.to_string(),
        None => {
            let local_user = local_user();
            let msg = format!("Name ({}:{local_user}): ", server.host());
            shell.prompt_word(&msg).await?.unwrap_or(local_user)
        }
    };
    let password = match args.get_one::<String>(GLOBAL_ARG_PASSWORD) {
        Some(s) => s.to_string(),
        None => shell.prompt("Password: ").await?.unwrap_or_default(),
    };
    client
        .new_user_session(&username, &password)
        .await
        .context("login error")?;

    if let Err(e) = client.system_type().await {
        warn!("failed to get system type: {e}");
    }

    loop {
        let Some(line) = shell.prompt(CLIENT_PROMPT).await? else {
            // end of input
            client.quit_and_close().await?;
            break;
        };
        let words = shell::split_command_line(&line);
        if words.first().is_none_or(|s| s.is_empty()) {
            continue;
        }

        let Some(cmd_args) = parse_shell_line(&words) else {
            continue;
        };
        let Some((subcommand, args)) = cmd_args.subcommand() else {
            continue;
        };

        let ret = match subcommand {
            cmd_list::COMMAND => cmd_list::run(&mut client, args).await,
            cmd_get::COMMAND => cmd_get::run(&mut client, &mut shell, args).await,
            cmd_put::COMMAND => cmd_put::run(&mut client, &mut shell, args).await,
            cmd_cd::COMMAND => cmd_cd::run(&mut client, args).await,
            cmd_mkd::COMMAND => cmd_mkd::run(&mut client, args).await,
            cmd_del::COMMAND => cmd_del::run(&mut client, args).await,
            COMMAND_CLOSE | COMMAND_QUIT => {
                client.quit_and_close().await?;
                break;
            }
            cmd => Err(anyhow!("invalid command {cmd}")),
        };
        if let Err(e) = ret {
            error!("{subcommand}: {e:?}");
        }
    }

    Ok(())
}
