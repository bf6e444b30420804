//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Telnet client connector

use crate::{ClientConfig, ClientError, Display, Result, Session, SessionHandle, SessionHandler};
use std::sync::Arc;
use tokio::io::{ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::info;

/// A session backed by a plain TCP transport.
pub type TcpSession<H> = Session<ReadHalf<TcpStream>, WriteHalf<TcpStream>, H>;

/// Connects Telnet sessions according to a [`ClientConfig`].
///
/// The client validates configuration, opens the TCP transport, and hands
/// back a [`Session`] ready to run; it holds no per-connection state itself,
/// so one client can open any number of consecutive sessions.
pub struct TelnetClient {
    config: ClientConfig,
}

impl TelnetClient {
    /// Creates a client for the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Opens a TCP connection and builds a session over it.
    ///
    /// Configuration errors are rejected here, before any connection
    /// attempt. The returned session has not started; drive it with
    /// [`Session::run`] while feeding input through the [`SessionHandle`].
    ///
    /// # Errors
    ///
    /// [`ClientError::Config`] for an invalid host or port,
    /// [`ClientError::ConnectionTimeout`] when the connect timer expires,
    /// and the mapped I/O error when the connection attempt fails.
    pub async fn connect<H: SessionHandler>(
        &self,
        display: Arc<dyn Display>,
        handler: Arc<H>,
    ) -> Result<(TcpSession<H>, SessionHandle)> {
        self.config.validate()?;

        let addr = self.config.address();
        info!("Connecting to {}...", addr);

        let stream = match timeout(self.config.connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(error)) => return Err(error.into()),
            Err(_) => return Err(ClientError::ConnectionTimeout),
        };

        info!("Connected to {}", stream.peer_addr()?);
        display.write(
            format!("connected to {} {}\r\n", self.config.host, self.config.port).as_bytes(),
        );

        let (reader, writer) = tokio::io::split(stream);
        Ok(Session::new(
            reader,
            writer,
            &self.config,
            display,
            handler,
        ))
    }
}
