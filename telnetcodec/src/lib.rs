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

//! # Wiretel Telnet Protocol Codec
//!
//! This crate provides the Telnet protocol engine for the wiretel client: a
//! stateful, byte-oriented codec that demultiplexes the inbound stream into
//! plain data and IAC command sequences, and an
//! [RFC1143](https://tools.ietf.org/html/rfc1143) Q-method option
//! negotiation state machine. It is designed to work with asynchronous
//! networking libraries like Tokio.
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! The main codec structure, implementing [`tokio_util::codec::Decoder`]
//! (emitting [`TelnetEvent`]) and [`tokio_util::codec::Encoder`] for
//! [`TelnetFrame`], raw bytes, and string slices. The decoder feeds
//! negotiation verbs through the option state machine as they complete, and
//! queues the generated replies for the caller to drain with
//! [`TelnetCodec::take_pending_replies`].
//!
//! ### [`TelnetFrame`] and [`TelnetEvent`]
//!
//! `TelnetFrame` is the wire-level view: data bytes, control commands, the
//! DO/DONT/WILL/WONT verbs, and framed subnegotiations. `TelnetEvent` is the
//! consumer view: negotiation is surfaced only as completed
//! `OptionStatus(option, side, enabled)` transitions.
//!
//! ## Usage Example
//!
//! ```rust
//! use wiretel_telnetcodec::{TelnetCodec, TelnetEvent};
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut codec = TelnetCodec::new();
//!
//! // "A" + IAC WILL ECHO + "B"
//! let mut input = BytesMut::from(&[0x41, 0xFF, 0xFB, 0x01, 0x42][..]);
//! while let Some(event) = codec.decode(&mut input)? {
//!     match event {
//!         TelnetEvent::Data(byte) => println!("data: {}", byte as char),
//!         TelnetEvent::OptionStatus(option, side, enabled) => {
//!             println!("{:?} option {} on the {} side", option, enabled, side)
//!         }
//!         _ => {}
//!     }
//! }
//! // answer the negotiation on the wire
//! for reply in codec.take_pending_replies() {
//!     println!("send: {:?}", reply);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Protocol Details
//!
//! All Telnet commands start with the IAC byte (0xFF):
//!
//! - 2-byte commands: `IAC <command>` (e.g., `IAC NOP`)
//! - 3-byte negotiation: `IAC <DO|DONT|WILL|WONT> <option>`
//! - Subnegotiation: `IAC SB <option> <data...> IAC SE`
//!
//! A literal 0xFF data byte travels as `IAC IAC`, both in the main stream
//! and inside subnegotiation payloads.
//!
//! ## Error Handling
//!
//! Malformed input is never fatal: unknown command bytes are logged and
//! skipped, aborted subnegotiations are discarded, and scanning resumes at
//! the next byte. [`CodecError`] is reserved for genuine misuse such as
//! feeding a non-negotiation frame to the option machine.
//!
//! ## Thread Safety
//!
//! `TelnetCodec` is **not** thread-safe; each connection owns its own codec
//! instance, created with the connection and discarded with it.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 857: Telnet Echo Option
//! - RFC 858: Telnet Suppress Go Ahead Option
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1143: The Q Method of Implementing TELNET Option Negotiation

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

mod codec;
pub mod consts;
mod event;
mod frame;
mod options;
mod result;

pub mod naws;

pub use self::codec::TelnetCodec;
pub use self::consts as protocol;
pub use self::event::TelnetEvent;
pub use self::frame::TelnetFrame;
pub use self::options::{TelnetOption, TelnetOptions, TelnetSide};
pub use self::result::{CodecError, CodecResult};

#[cfg(test)]
mod tests {
    use super::{TelnetCodec, TelnetEvent, TelnetFrame, TelnetOption, consts};
    use crate::options::TelnetSide;
    use bytes::BytesMut;
    use tokio_util::codec::{Decoder, Encoder};

    #[test]
    fn telnet_decode() {
        let mut codec = TelnetCodec::new();
        let mut input_buffer = BytesMut::from("Terminated line\r\n");
        let expected: Vec<TelnetEvent> = b"Terminated line\r\n"
            .iter()
            .map(|byte| TelnetEvent::Data(*byte))
            .collect();
        let mut actual = Vec::new();
        while let Some(event) = codec.decode(&mut input_buffer).unwrap() {
            actual.push(event);
        }
        assert_eq!(expected, actual, "telnet_decode didn't match");
    }

    #[test]
    fn telnet_encode() {
        let mut codec = TelnetCodec::new();
        let expected = BytesMut::from(&b"Raw Ascii Data\r\n"[..]);
        let mut actual = BytesMut::with_capacity(20);
        for byte in b"Raw Ascii Data\r\n" {
            codec.encode(TelnetFrame::Data(*byte), &mut actual).unwrap();
        }
        assert_eq!(expected, actual, "telnet_encode didn't match");
    }

    #[test]
    fn decode_iac_activation() {
        let mut codec = TelnetCodec::new();
        let mut input_buffer = BytesMut::from(
            &[
                // Data
                b'L',
                b'o',
                b'g',
                b'i',
                b'n',
                b':',
                consts::CR,
                consts::LF,
                // Command Do Binary
                consts::IAC,
                consts::DO,
                consts::option::BINARY,
                // Data
                b'O',
                b'k',
                consts::CR,
                consts::LF,
                // Command Will Binary
                consts::IAC,
                consts::WILL,
                consts::option::BINARY,
            ][..],
        );
        let expected = vec![
            TelnetEvent::Data(b'L'),
            TelnetEvent::Data(b'o'),
            TelnetEvent::Data(b'g'),
            TelnetEvent::Data(b'i'),
            TelnetEvent::Data(b'n'),
            TelnetEvent::Data(b':'),
            TelnetEvent::Data(consts::CR),
            TelnetEvent::Data(consts::LF),
            // DO Binary accepted: local side enabled
            TelnetEvent::OptionStatus(TelnetOption::TransmitBinary, TelnetSide::Local, true),
            TelnetEvent::Data(b'O'),
            TelnetEvent::Data(b'k'),
            TelnetEvent::Data(consts::CR),
            TelnetEvent::Data(consts::LF),
            // WILL Binary accepted: remote side enabled
            TelnetEvent::OptionStatus(TelnetOption::TransmitBinary, TelnetSide::Remote, true),
        ];
        let mut actual = Vec::new();
        while let Some(event) = codec.decode(&mut input_buffer).unwrap() {
            actual.push(event);
        }
        assert_eq!(expected, actual);

        assert_eq!(
            codec.take_pending_replies(),
            vec![
                TelnetFrame::Will(TelnetOption::TransmitBinary),
                TelnetFrame::Do(TelnetOption::TransmitBinary),
            ]
        );
    }
}
