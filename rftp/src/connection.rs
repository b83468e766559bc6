/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use async_trait::async_trait;
use log::debug;
use tokio::net::{TcpSocket, TcpStream};

use rftp_client::{FtpConnectionProvider, FtpServerAddr, PassiveEndpoint};

fn new_socket_to(peer_ip: IpAddr, bind_ip: Option<IpAddr>) -> io::Result<TcpSocket> {
    let socket = match peer_ip {
        IpAddr::V4(_) => TcpSocket::new_v4()?,
        IpAddr::V6(_) => TcpSocket::new_v6()?,
    };
    if let Some(ip) = bind_ip {
        socket.bind(SocketAddr::new(ip, 0))?;
    }
    Ok(socket)
}

#[derive(Default)]
pub(crate) struct LocalConnectionProvider {
    bind_ip: Option<IpAddr>,
    remote_addr: Option<SocketAddr>,
}

impl LocalConnectionProvider {
    pub(crate) fn set_bind_ip(&mut self, ip: IpAddr) {
        self.bind_ip = Some(ip);
    }

    /// The address the data connection goes to.
    ///
    /// Servers behind NAT may announce an unspecified address in their PASV
    /// reply, the control peer is used instead then.
    fn data_addr(&self, endpoint: &PassiveEndpoint) -> io::Result<SocketAddr> {
        let announced = IpAddr::from_str(endpoint.host()).ok();
        let ip = match (announced, self.remote_addr) {
            (Some(ip), _) if !ip.is_unspecified() => ip,
            (_, Some(addr)) => addr.ip(),
            (_, None) => {
                return Err(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "no usable data connection address",
                ));
            }
        };
        Ok(SocketAddr::new(ip, endpoint.port()))
    }
}

#[async_trait]
impl FtpConnectionProvider<TcpStream, io::Error> for LocalConnectionProvider {
    async fn new_control_connection(&mut self, server: &FtpServerAddr) -> io::Result<TcpStream> {
        let mut err = io::Error::new(io::ErrorKind::AddrNotAvailable, "no addr resolved");
        for addr in tokio::net::lookup_host(server.to_string()).await? {
            let socket = new_socket_to(addr.ip(), self.bind_ip)?;
            match socket.connect(addr).await {
                Ok(stream) => {
                    debug!("control connection established to {addr}");
                    self.remote_addr = Some(addr);
                    return Ok(stream);
                }
                Err(e) => err = e,
            }
        }

        Err(err)
    }

    async fn new_data_connection(&mut self, endpoint: &PassiveEndpoint) -> io::Result<TcpStream> {
        let data_addr = self.data_addr(endpoint)?;
        let socket = new_socket_to(data_addr.ip(), self.bind_ip)?;
        let stream = socket.connect(data_addr).await?;
        debug!("data connection established to {data_addr}");
        Ok(stream)
    }
}
