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

use super::TelnetOption;
use bytes::Bytes;

///
/// `TelnetFrame` represents a single wire-level Telnet frame: one data byte,
/// a two-byte control command, a three-byte negotiation command, or a framed
/// subnegotiation sequence.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TelnetFrame {
    /// Telnet Data Byte
    Data(u8),
    /// No Operation
    NoOperation,
    /// End of urgent Data Stream
    DataMark,
    /// Operator pressed the Break key or the Attention key.
    Break,
    /// Interrupt current process.
    InterruptProcess,
    /// Cancel output from the current process.
    AbortOutput,
    /// Request acknowledgment.
    AreYouThere,
    /// Request that the operator erase the previous character.
    EraseCharacter,
    /// Request that the operator erase the previous line.
    EraseLine,
    /// End of input for half-duplex connections.
    GoAhead,
    /// Request the peer enable an option.
    Do(TelnetOption),
    /// Demand the peer disable an option.
    Dont(TelnetOption),
    /// Offer to enable an option locally.
    Will(TelnetOption),
    /// Refuse or disable an option locally.
    Wont(TelnetOption),
    /// Subnegotiation sequence with raw payload (IAC escaping removed).
    Subnegotiate(TelnetOption, Bytes),
}
