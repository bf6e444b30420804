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

//! Client error types

use std::fmt;
use std::io;
use wiretel_telnetcodec::CodecError;

/// Client error type
///
/// Transport errors close the session and are surfaced to the display once;
/// protocol errors are diagnostic only (the codec recovers on its own); and
/// config errors are rejected synchronously before any connection attempt.
#[derive(Debug, Clone)]
pub enum ClientError {
    /// I/O error
    Io(String),

    /// Connection timeout
    ConnectionTimeout,

    /// Connection closed by server
    ConnectionClosed,

    /// Connection refused
    ConnectionRefused,

    /// Protocol error
    Protocol(String),

    /// Invalid configuration, rejected before connecting
    Config(String),

    /// Not connected
    NotConnected,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::ConnectionTimeout => write!(f, "Connection timeout"),
            Self::ConnectionClosed => write!(f, "Connection closed by server"),
            Self::ConnectionRefused => write!(f, "Connection refused"),
            Self::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            Self::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::NotConnected => write!(f, "Not connected"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::TimedOut => Self::ConnectionTimeout,
            io::ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            io::ErrorKind::ConnectionReset | io::ErrorKind::BrokenPipe => Self::ConnectionClosed,
            _ => Self::Io(error.to_string()),
        }
    }
}

impl From<CodecError> for ClientError {
    fn from(error: CodecError) -> Self {
        Self::Protocol(error.to_string())
    }
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;
