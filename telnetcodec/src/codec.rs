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

use super::{CodecError, TelnetEvent, TelnetFrame, TelnetOption, consts};
use crate::options::{TelnetOptions, TelnetSide};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

/// A codec for handling the Telnet protocol, providing functionality to
/// encode and decode Telnet messages.
///
/// `TelnetCodec` demultiplexes the inbound byte stream into plain data and
/// IAC command sequences, runs negotiation verbs through the option state
/// machine, and queues the replies the state machine generates. It is
/// stateful: a command split across reads is held until fully framed, so
/// one codec instance must be used per connection and discarded with it.
pub struct TelnetCodec {
    decoder_buffer: BytesMut,
    decoder_state: DecoderState,
    pending_replies: Vec<TelnetFrame>,
    options: TelnetOptions,
}

impl TelnetCodec {
    /// Creates a new `TelnetCodec` with every option disabled and the
    /// decoder in the plain-data state.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Checks if we support the given option locally
    pub fn is_supported_local(&self, option: TelnetOption) -> bool {
        self.options.is_supported_local(option)
    }

    /// Checks if we support the given option remotely
    pub fn is_supported_remote(&self, option: TelnetOption) -> bool {
        self.options.is_supported_remote(option)
    }

    /// Checks if a specific Telnet option is enabled locally.
    pub fn is_enabled_local(&self, option: TelnetOption) -> bool {
        self.options.local_enabled(option)
    }

    /// Checks if a specific Telnet option is enabled on the remote side.
    pub fn is_enabled_remote(&self, option: TelnetOption) -> bool {
        self.options.remote_enabled(option)
    }

    /// Request to enable a Telnet option locally (we will send WILL).
    ///
    /// Returns the negotiation frame to send, or `None` when no negotiation
    /// is needed (already enabled, in flight, or unsupported).
    pub fn enable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.enable_local(option)
    }

    /// Request to disable a Telnet option locally (we will send WONT).
    pub fn disable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.disable_local(option)
    }

    /// Request to enable a Telnet option on the remote side (we will send DO).
    pub fn enable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.enable_remote(option)
    }

    /// Request to disable a Telnet option on the remote side (we will send DONT).
    pub fn disable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.options.disable_remote(option)
    }

    /// Drains the negotiation replies generated while decoding.
    ///
    /// The decoder answers DO/DONT/WILL/WONT through the option state
    /// machine as commands complete; the replies accumulate here in
    /// generation order and must be encoded onto the wire by the caller
    /// after each decode batch.
    pub fn take_pending_replies(&mut self) -> Vec<TelnetFrame> {
        std::mem::take(&mut self.pending_replies)
    }

    /// Runs a completed negotiation verb through the option state machine,
    /// queueing any reply, and returns the `OptionStatus` event when the
    /// option toggled.
    fn negotiate(&mut self, frame: TelnetFrame, side: TelnetSide) -> Option<TelnetEvent> {
        let option = match frame {
            TelnetFrame::Do(option)
            | TelnetFrame::Dont(option)
            | TelnetFrame::Will(option)
            | TelnetFrame::Wont(option) => option,
            _ => return None,
        };
        let was_enabled = match side {
            TelnetSide::Local => self.options.local_enabled(option),
            TelnetSide::Remote => self.options.remote_enabled(option),
        };
        match self.options.handle_received(frame) {
            Ok(Some(reply)) => {
                debug!("negotiation reply queued: {:?}", reply);
                self.pending_replies.push(reply);
            }
            Ok(None) => {}
            Err(error) => {
                // decode only hands negotiation verbs to the machine
                warn!("negotiation failed: {}", error);
            }
        }
        let is_enabled = match side {
            TelnetSide::Local => self.options.local_enabled(option),
            TelnetSide::Remote => self.options.remote_enabled(option),
        };
        if is_enabled != was_enabled {
            Some(TelnetEvent::OptionStatus(option, side, is_enabled))
        } else {
            None
        }
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            decoder_buffer: BytesMut::new(),
            decoder_state: DecoderState::NormalData,
            pending_replies: Vec::new(),
            options: TelnetOptions::default(),
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    /// Decodes bytes from `src` into the next [`TelnetEvent`].
    ///
    /// The decoder consumes one byte at a time through an internal state
    /// machine. Plain bytes outside IAC sequences are emitted as
    /// `TelnetEvent::Data` immediately and in arrival order. An IAC byte
    /// starts a command: `IAC IAC` is a literal 0xFF data byte,
    /// `IAC <DO|DONT|WILL|WONT> <opt>` completes a negotiation (answered
    /// through the option state machine, surfaced as `OptionStatus` when the
    /// option toggles), `IAC SB <opt> ... IAC SE` accumulates a
    /// subnegotiation payload with `IAC IAC` unescaped inside it, and the
    /// two-byte control commands map to their events.
    ///
    /// Malformed sequences are never fatal: an unknown command byte is
    /// logged and skipped, and scanning resumes at the next byte. A command
    /// left incomplete at the end of `src` stays pending: no event and no
    /// reply is produced for it until the remaining bytes arrive.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        while src.remaining() > 0 {
            let byte = src.get_u8();
            match (self.decoder_state, byte) {
                (DecoderState::NormalData, consts::IAC) => {
                    self.decoder_state = DecoderState::InterpretAsCommand;
                }
                (DecoderState::NormalData, _) => {
                    return Ok(Some(TelnetEvent::Data(byte)));
                }
                (DecoderState::InterpretAsCommand, consts::NOP) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::NoOperation));
                }
                (DecoderState::InterpretAsCommand, consts::DM) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::DataMark));
                }
                (DecoderState::InterpretAsCommand, consts::BRK) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Break));
                }
                (DecoderState::InterpretAsCommand, consts::IP) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::InterruptProcess));
                }
                (DecoderState::InterpretAsCommand, consts::AO) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::AbortOutput));
                }
                (DecoderState::InterpretAsCommand, consts::AYT) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::AreYouThere));
                }
                (DecoderState::InterpretAsCommand, consts::EC) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::EraseCharacter));
                }
                (DecoderState::InterpretAsCommand, consts::EL) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::EraseLine));
                }
                (DecoderState::InterpretAsCommand, consts::GA) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::GoAhead));
                }
                (DecoderState::InterpretAsCommand, consts::IAC) => {
                    // escaped literal 0xFF
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Data(consts::IAC)));
                }
                (DecoderState::InterpretAsCommand, consts::DO) => {
                    self.decoder_state = DecoderState::NegotiateDo;
                }
                (DecoderState::InterpretAsCommand, consts::DONT) => {
                    self.decoder_state = DecoderState::NegotiateDont;
                }
                (DecoderState::InterpretAsCommand, consts::WILL) => {
                    self.decoder_state = DecoderState::NegotiateWill;
                }
                (DecoderState::InterpretAsCommand, consts::WONT) => {
                    self.decoder_state = DecoderState::NegotiateWont;
                }
                (DecoderState::InterpretAsCommand, consts::SB) => {
                    self.decoder_state = DecoderState::Subnegotiate;
                }
                (DecoderState::InterpretAsCommand, _) => {
                    // resilience over strictness: skip and resume scanning
                    warn!("Received Unknown Command {:#X}", byte);
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::NoOperation));
                }
                (DecoderState::NegotiateDo, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    let option = TelnetOption::from_u8(byte);
                    // DO concerns what we perform: the local side
                    if let Some(event) =
                        self.negotiate(TelnetFrame::Do(option), TelnetSide::Local)
                    {
                        return Ok(Some(event));
                    }
                    continue;
                }
                (DecoderState::NegotiateDont, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    let option = TelnetOption::from_u8(byte);
                    if let Some(event) =
                        self.negotiate(TelnetFrame::Dont(option), TelnetSide::Local)
                    {
                        return Ok(Some(event));
                    }
                    continue;
                }
                (DecoderState::NegotiateWill, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    let option = TelnetOption::from_u8(byte);
                    // WILL concerns what the peer performs: the remote side
                    if let Some(event) =
                        self.negotiate(TelnetFrame::Will(option), TelnetSide::Remote)
                    {
                        return Ok(Some(event));
                    }
                    continue;
                }
                (DecoderState::NegotiateWont, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    let option = TelnetOption::from_u8(byte);
                    if let Some(event) =
                        self.negotiate(TelnetFrame::Wont(option), TelnetSide::Remote)
                    {
                        return Ok(Some(event));
                    }
                    continue;
                }
                (DecoderState::Subnegotiate, _) => {
                    self.decoder_state = DecoderState::SubnegotiateArgument(byte);
                }
                (DecoderState::SubnegotiateArgument(option), consts::IAC) => {
                    self.decoder_state = DecoderState::SubnegotiateArgumentIAC(option);
                }
                (DecoderState::SubnegotiateArgument(_option), _) => {
                    self.decoder_buffer.put_u8(byte);
                }
                (DecoderState::SubnegotiateArgumentIAC(option), consts::IAC) => {
                    // IAC IAC inside a payload is a literal 0xFF
                    self.decoder_state = DecoderState::SubnegotiateArgument(option);
                    self.decoder_buffer.put_u8(consts::IAC);
                }
                (DecoderState::SubnegotiateArgumentIAC(option), consts::SE) => {
                    self.decoder_state = DecoderState::NormalData;
                    let option = TelnetOption::from_u8(option);
                    let payload = self.decoder_buffer.split().freeze();
                    return Ok(Some(TelnetEvent::Subnegotiate(option, payload)));
                }
                (DecoderState::SubnegotiateArgumentIAC(_), _) => {
                    self.decoder_state = DecoderState::NormalData;
                    self.decoder_buffer.clear();
                    warn!(
                        "Received Unknown or invalid Command during Subnegotiation {:#X}. Aborting",
                        byte
                    );
                    return Ok(Some(TelnetEvent::NoOperation));
                }
            }
        }
        Ok(None)
    }
}

impl Encoder<u8> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: u8, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(TelnetFrame::Data(item), dst)
    }
}

impl Encoder<&str> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        for byte in item.as_bytes() {
            self.encode(TelnetFrame::Data(*byte), dst)?;
        }
        Ok(())
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Encodes a [`TelnetFrame`] into its wire bytes.
    ///
    /// Data bytes with value 0xFF are escaped as `IAC IAC`. Control frames
    /// encode as `IAC <cmd>`, negotiation frames as `IAC <verb> <opt>`, and
    /// subnegotiation frames as `IAC SB <opt> <payload> IAC SE` with any
    /// 0xFF inside the payload doubled.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(ch) => {
                dst.reserve(2);
                if ch == consts::IAC {
                    dst.put_u8(consts::IAC);
                }
                dst.put_u8(ch);
            }
            TelnetFrame::NoOperation => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::NOP);
            }
            TelnetFrame::DataMark => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DM);
            }
            TelnetFrame::Break => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::BRK);
            }
            TelnetFrame::InterruptProcess => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::IP);
            }
            TelnetFrame::AbortOutput => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::AO);
            }
            TelnetFrame::AreYouThere => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::AYT);
            }
            TelnetFrame::EraseCharacter => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::EC);
            }
            TelnetFrame::EraseLine => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::EL);
            }
            TelnetFrame::GoAhead => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::GA);
            }
            TelnetFrame::Do(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DO);
                dst.put_u8(option.into());
            }
            TelnetFrame::Dont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Will(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option.into());
            }
            TelnetFrame::Wont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Subnegotiate(option, payload) => {
                dst.reserve(5 + payload.len());
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option.to_u8());
                for byte in &payload {
                    if *byte == consts::IAC {
                        dst.put_u8(consts::IAC);
                    }
                    dst.put_u8(*byte);
                }
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

///
/// Represents the internal state of the Telnet decoder between bytes.
///
/// The decoder is restartable across partial reads: whatever state it is in
/// when `src` runs dry is the state the next `decode` call resumes from, so
/// a command split across reads is assembled without ever responding to a
/// half-framed command.
///
#[derive(Clone, Copy, Debug)]
enum DecoderState {
    /// Normal Data
    NormalData,
    /// Received IAC, Next byte is Command
    InterpretAsCommand,
    /// Received DO Command, Next Byte is the option code
    NegotiateDo,
    /// Received DONT Command, Next Byte is the option code
    NegotiateDont,
    /// Received WILL Command, Next Byte is the option code
    NegotiateWill,
    /// Received WONT Command, Next Byte is the option code
    NegotiateWont,
    /// Received Subnegotiate Command, Next Byte is the option code
    Subnegotiate,
    /// Received Subnegotiate Option, Next Bytes are the payload
    SubnegotiateArgument(u8),
    /// Received IAC during Subnegotiation, Next Byte is command
    SubnegotiateArgumentIAC(u8),
}
