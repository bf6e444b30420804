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

//! # Wiretel Telnet Client
//!
//! Telnet client session layer: real option negotiation, a demultiplexed
//! inbound stream, and a local line-edit buffer, wired between a TCP
//! transport and a display collaborator.
//!
//! ## Architecture
//!
//! A [`TelnetClient`] opens the transport and builds one [`Session`] per
//! connection attempt. The session is the single consumption point: inbound
//! transport bytes and local input events are merged onto one loop, so
//! session state is never mutated concurrently. Decoded data bytes pass
//! straight through to the [`Display`] collaborator; negotiation runs in the
//! codec and surfaces to the [`SessionHandler`] as completed option changes.
//! A transport error closes the session with a single user-visible
//! notification; there is no reconnection.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wiretel_client::{ClientConfig, StdoutDisplay, TelnetClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("localhost", 23);
//!     let client = TelnetClient::new(config);
//!
//!     let (session, handle) = client
//!         .connect(Arc::new(StdoutDisplay), Arc::new(()))
//!         .await?;
//!
//!     // feed keystrokes from the UI side
//!     for byte in b"look\r" {
//!         handle.input(*byte)?;
//!     }
//!
//!     session.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod client;
mod config;
mod display;
mod error;
mod handler;
mod linebuffer;
mod session;

pub use client::{TcpSession, TelnetClient};
pub use config::ClientConfig;
pub use display::{Display, StdoutDisplay};
pub use error::{ClientError, Result};
pub use handler::SessionHandler;
pub use linebuffer::{KeyAction, LineBuffer};
pub use session::{Session, SessionHandle};

// Re-export protocol types callers see in handler signatures
pub use wiretel_telnetcodec::{TelnetEvent, TelnetOption, TelnetSide, naws::WindowSize};
