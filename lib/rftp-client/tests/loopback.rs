/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use rftp_client::{
    FtpClient, FtpClientConfig, FtpConnectionProvider, FtpServerAddr, FtpTransferOutcome,
    PassiveEndpoint,
};

/// A single session FTP server that keeps the stored files in memory.
async fn serve_one(listener: TcpListener) -> io::Result<()> {
    let (stream, _) = listener.accept().await?;
    let (r, mut w) = stream.into_split();
    let mut lines = BufReader::new(r).lines();
    let mut files: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    let mut passive: Option<TcpListener> = None;

    w.write_all(b"220 stub ftp server\r\n").await?;
    while let Some(line) = lines.next_line().await? {
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb.to_string(), arg.to_string()),
            None => (line.clone(), String::new()),
        };
        match verb.as_str() {
            "USER" => w.write_all(b"331 Please specify the password.\r\n").await?,
            "PASS" => w.write_all(b"230 Login successful.\r\n").await?,
            "SYST" => w.write_all(b"215 UNIX Type: L8\r\n").await?,
            "TYPE" => w.write_all(b"200 Switching to Binary mode.\r\n").await?,
            "CWD" => w.write_all(b"250 Directory successfully changed.\r\n").await?,
            "MKD" => {
                let msg = format!("257 \"/{arg}\" created\r\n");
                w.write_all(msg.as_bytes()).await?;
            }
            "DELE" => {
                if files.remove(&arg).is_some() {
                    w.write_all(b"250 Delete operation successful.\r\n").await?;
                } else {
                    w.write_all(b"550 Delete operation failed.\r\n").await?;
                }
            }
            "PASV" => {
                let l = TcpListener::bind("127.0.0.1:0").await?;
                let port = l.local_addr()?.port();
                let msg = format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{}).\r\n",
                    port / 256,
                    port % 256
                );
                passive = Some(l);
                w.write_all(msg.as_bytes()).await?;
            }
            "LIST" | "RETR" | "STOR" => {
                let Some(l) = passive.take() else {
                    w.write_all(b"425 Use PASV first.\r\n").await?;
                    continue;
                };
                let (mut data, _) = l.accept().await?;
                match verb.as_str() {
                    "LIST" => {
                        w.write_all(b"150 Here comes the directory listing.\r\n")
                            .await?;
                        for (name, content) in &files {
                            let entry = format!("-rw-r--r-- 1 ftp ftp {} {name}\r\n", content.len());
                            data.write_all(entry.as_bytes()).await?;
                        }
                    }
                    "RETR" => {
                        let Some(content) = files.get(&arg) else {
                            w.write_all(b"550 Failed to open file.\r\n").await?;
                            continue;
                        };
                        w.write_all(b"150 Opening BINARY mode data connection.\r\n")
                            .await?;
                        data.write_all(content).await?;
                    }
                    _ => {
                        w.write_all(b"150 Ok to send data.\r\n").await?;
                        let mut content = Vec::new();
                        data.read_to_end(&mut content).await?;
                        files.insert(arg, content);
                    }
                }
                data.shutdown().await?;
                drop(data);
                w.write_all(b"226 Transfer complete.\r\n").await?;
            }
            "QUIT" => {
                w.write_all(b"221 Goodbye.\r\n").await?;
                break;
            }
            _ => w.write_all(b"502 Command not implemented.\r\n").await?,
        }
    }
    Ok(())
}

struct TcpProvider;

#[async_trait]
impl FtpConnectionProvider<TcpStream, io::Error> for TcpProvider {
    async fn new_control_connection(&mut self, server: &FtpServerAddr) -> io::Result<TcpStream> {
        TcpStream::connect((server.host(), server.port())).await
    }

    async fn new_data_connection(&mut self, endpoint: &PassiveEndpoint) -> io::Result<TcpStream> {
        TcpStream::connect((endpoint.host(), endpoint.port())).await
    }
}

type LoopbackClient = FtpClient<TcpProvider, TcpStream, io::Error, Vec<u8>>;

async fn start_session() -> LoopbackClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Err(e) = serve_one(listener).await {
            eprintln!("stub server error: {e}");
        }
    });

    let mut config = FtpClientConfig::default();
    config.transfer.idle_timeout = Duration::from_millis(300);
    config.control.command_timeout = Duration::from_secs(5);

    let server = FtpServerAddr::new("127.0.0.1", addr.port());
    let mut client = FtpClient::connect_to(server, TcpProvider, Vec::new(), &Arc::new(config))
        .await
        .unwrap();
    let reply = client.new_user_session("anonymous", "guest").await.unwrap();
    assert_eq!(reply.code(), 230);
    client
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 253) as u8).collect()
}

#[tokio::test]
async fn upload_then_download() {
    let mut client = start_session().await;
    assert_eq!(client.system_type().await.unwrap().code(), 215);

    let dir = tempfile::tempdir().unwrap();
    for len in [0usize, 1, 1999, 2000, 2001, 7000] {
        let content = pattern(len);
        let src = dir.path().join(format!("src-{len}"));
        let dst = dir.path().join(format!("dst-{len}"));
        std::fs::write(&src, &content).unwrap();

        let remote = format!("file-{len}.bin");
        let outcome = client.upload_file(&src, &remote).await.unwrap();
        let FtpTransferOutcome::Completed(summary) = outcome else {
            panic!("upload of {len} bytes not completed");
        };
        assert_eq!(summary.bytes(), len as u64);
        assert_eq!(summary.final_reply().map(|r| r.code()), Some(226));

        let outcome = client.download_file(&remote, &dst).await.unwrap();
        let FtpTransferOutcome::Completed(summary) = outcome else {
            panic!("download of {len} bytes not completed");
        };
        assert_eq!(summary.bytes(), len as u64);
        assert_eq!(std::fs::read(&dst).unwrap(), content, "round trip of {len} bytes");
    }

    assert_eq!(client.quit_and_close().await.unwrap().code(), 221);
}

#[tokio::test]
async fn missing_files() {
    let mut client = start_session().await;
    let dir = tempfile::tempdir().unwrap();

    let local = dir.path().join("absent");
    let outcome = client.download_file("absent", &local).await.unwrap();
    assert!(matches!(outcome, FtpTransferOutcome::RemoteFileNotFound));
    assert!(!local.exists());

    // a missing local file is stored as an empty remote one
    client.upload_file(&local, "empty").await.unwrap();
    let fetched = dir.path().join("empty");
    let outcome = client.download_file("empty", &fetched).await.unwrap();
    assert!(matches!(outcome, FtpTransferOutcome::Completed(_)));
    assert_eq!(std::fs::metadata(&fetched).unwrap().len(), 0);

    assert_eq!(client.quit_and_close().await.unwrap().code(), 221);
}

#[tokio::test]
async fn list_is_stable() {
    let mut client = start_session().await;
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a.txt");
    std::fs::write(&src, b"some text\n").unwrap();
    client.upload_file(&src, "a.txt").await.unwrap();
    client.upload_file(&src, "b.txt").await.unwrap();

    let mut first = Vec::new();
    let mut second = Vec::new();
    client.list_directory_into("", &mut first).await.unwrap();
    client.list_directory_into("", &mut second).await.unwrap();
    assert_eq!(
        first,
        b"-rw-r--r-- 1 ftp ftp 10 a.txt\r\n-rw-r--r-- 1 ftp ftp 10 b.txt\r\n"
    );
    assert_eq!(first, second);

    assert_eq!(client.make_dir("docs").await.unwrap().code(), 257);
    assert_eq!(client.change_dir("docs").await.unwrap().code(), 250);
    assert_eq!(client.delete_file("a.txt").await.unwrap().code(), 250);
    assert_eq!(client.delete_file("a.txt").await.unwrap().code(), 550);
    assert_eq!(client.quit_and_close().await.unwrap().code(), 221);
}
