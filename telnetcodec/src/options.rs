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

use crate::{CodecError, CodecResult, TelnetFrame, consts};
use std::fmt::Formatter;

///
/// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
///
/// Only the options a plain interactive client negotiates are named here;
/// every other code round-trips through `Unknown` and is refused by the
/// negotiation engine.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::BINARY`] Telnet Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Telnet Status Option [RFC859](http://www.iana.org/go/rfc859)
    Status,
    /// [`consts::option::TM`] Telnet Timing Mark Option [RFC860](http://www.iana.org/go/rfc860)
    TimingMark,
    /// [`consts::option::TTYPE`] Terminal Type [RFC1091](http://www.iana.org/go/rfc1091)
    TTYPE,
    /// [`consts::option::EOR`] End of Record [RFC885](http://www.iana.org/go/rfc885)
    EOR,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](http://www.iana.org/go/rfc1073)
    NAWS,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    Linemode,
    /// [`consts::option::EXOPL`] Extended-Options-List [RFC861](http://www.iana.org/go/rfc861)
    EXOPL,
    /// Unknown Option
    Unknown(u8),
}

impl TelnetOption {
    /// Converts a `TelnetOption` into its wire option code.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TM,
            TelnetOption::TTYPE => consts::option::TTYPE,
            TelnetOption::EOR => consts::option::EOR,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::EXOPL => consts::option::EXOPL,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Converts a wire option code into the corresponding `TelnetOption`.
    /// Unregistered codes map to `TelnetOption::Unknown(byte)`.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TM => TelnetOption::TimingMark,
            consts::option::TTYPE => TelnetOption::TTYPE,
            consts::option::EOR => TelnetOption::EOR,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::EXOPL => TelnetOption::EXOPL,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// Whether we support this option from us -> them.
    pub fn supported_local(&self) -> bool {
        matches!(
            self,
            TelnetOption::TransmitBinary | TelnetOption::SuppressGoAhead | TelnetOption::NAWS
        )
    }

    /// Whether we support this option from them -> us.
    pub fn supported_remote(&self) -> bool {
        matches!(
            self,
            TelnetOption::TransmitBinary | TelnetOption::Echo | TelnetOption::SuppressGoAhead
        )
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::TransmitBinary => write!(f, "TransmitBinary"),
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::Status => write!(f, "Status"),
            TelnetOption::TimingMark => write!(f, "TimingMark"),
            TelnetOption::TTYPE => write!(f, "TTYPE"),
            TelnetOption::EOR => write!(f, "EOR"),
            TelnetOption::NAWS => write!(f, "NAWS"),
            TelnetOption::Linemode => write!(f, "Linemode"),
            TelnetOption::EXOPL => write!(f, "EXOPL"),
            TelnetOption::Unknown(option) => write!(f, "Unknown({option})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// Per-option negotiation state for the whole option space.
///
/// Tracks, for each of the 256 option codes, whether the option is supported
/// in each direction and where its two [RFC1143](https://tools.ietf.org/html/rfc1143)
/// Q-method state machines currently stand. Options start disabled in both
/// directions and only move through the negotiation protocol; there is no
/// direct external mutation of option state.
#[derive(Clone, Debug)]
pub struct TelnetOptions {
    config: [SupportState; 256],
    state: [OptionState; 256],
}

impl TelnetOptions {
    /// Checks if we support the given option locally
    pub fn is_supported_local(&self, option: TelnetOption) -> bool {
        self.config[option.to_u8() as usize].local
    }

    /// Checks if we support the given option remotely
    pub fn is_supported_remote(&self, option: TelnetOption) -> bool {
        self.config[option.to_u8() as usize].remote
    }

    /// Gets the local QState for an option
    pub(crate) fn local_qstate(&self, option: TelnetOption) -> QState {
        self.state[option.to_u8() as usize].local
    }

    /// Gets the remote QState for an option
    pub(crate) fn remote_qstate(&self, option: TelnetOption) -> QState {
        self.state[option.to_u8() as usize].remote
    }

    /// Whether the option is currently enabled on our side.
    ///
    /// An option mid-disable (`WantNo`) still counts as enabled; it stays in
    /// force until the peer acknowledges.
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        matches!(
            self.state[option.to_u8() as usize].local,
            QState::Yes | QState::WantNo | QState::WantNoOpposite
        )
    }

    /// Whether the option is currently enabled on the peer's side.
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        matches!(
            self.state[option.to_u8() as usize].remote,
            QState::Yes | QState::WantNo | QState::WantNoOpposite
        )
    }

    /// Request that *we* enable the option (send WILL).
    ///
    /// Returns the negotiation frame to put on the wire, or `None` when no
    /// negotiation is needed (already enabled, in progress, or unsupported).
    pub fn enable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.request_will(option)
    }

    /// Request that *we* disable the option (send WONT).
    pub fn disable_local(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.request_wont(option)
    }

    /// Request the peer enable the option (send DO).
    pub fn enable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.request_do(option)
    }

    /// Request the peer disable the option (send DONT).
    pub fn disable_remote(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        self.request_dont(option)
    }

    /// Run a received negotiation verb through the state machine.
    ///
    /// Returns the reply frame to send, or `None` when the protocol demands
    /// silence (loop avoidance). Any non-negotiation frame is a
    /// [`CodecError::NegotiationError`].
    pub fn handle_received(&mut self, frame: TelnetFrame) -> CodecResult<Option<TelnetFrame>> {
        match frame {
            TelnetFrame::Do(option) => Ok(self.recv_do(option)),
            TelnetFrame::Dont(option) => Ok(self.recv_dont(option)),
            TelnetFrame::Will(option) => Ok(self.recv_will(option)),
            TelnetFrame::Wont(option) => Ok(self.recv_wont(option)),
            _ => Err(CodecError::NegotiationError {
                reason: "Unsupported frame type".into(),
                frame_type: Some(format!("{:?}", frame)),
            }),
        }
    }

    // #### Outgoing requests (what we initiate) ################################

    fn request_will(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        if !self.config[option.to_u8() as usize].local {
            return None;
        }
        match self.state[option.to_u8() as usize].local {
            QState::Yes | QState::WantYes | QState::WantYesOpposite => {
                // already enabled or in-progress to enable
                None
            }
            QState::No => {
                self.state[option.to_u8() as usize].local = QState::WantYes;
                Some(TelnetFrame::Will(option))
            }
            QState::WantNo => {
                // collision: disable in flight, caller now wants enable
                self.state[option.to_u8() as usize].local = QState::WantYesOpposite;
                Some(TelnetFrame::Will(option))
            }
            QState::WantNoOpposite => {
                self.state[option.to_u8() as usize].local = QState::WantYes;
                Some(TelnetFrame::Will(option))
            }
        }
    }

    fn request_wont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        match self.state[option.to_u8() as usize].local {
            QState::No | QState::WantNo | QState::WantNoOpposite => None,
            QState::Yes => {
                self.state[option.to_u8() as usize].local = QState::WantNo;
                Some(TelnetFrame::Wont(option))
            }
            QState::WantYes => {
                self.state[option.to_u8() as usize].local = QState::WantNoOpposite;
                Some(TelnetFrame::Wont(option))
            }
            QState::WantYesOpposite => {
                self.state[option.to_u8() as usize].local = QState::WantNo;
                Some(TelnetFrame::Wont(option))
            }
        }
    }

    fn request_do(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        if !self.config[option.to_u8() as usize].remote {
            return None;
        }
        match self.state[option.to_u8() as usize].remote {
            QState::Yes | QState::WantYes | QState::WantYesOpposite => None,
            QState::No => {
                self.state[option.to_u8() as usize].remote = QState::WantYes;
                Some(TelnetFrame::Do(option))
            }
            QState::WantNo => {
                self.state[option.to_u8() as usize].remote = QState::WantYesOpposite;
                Some(TelnetFrame::Do(option))
            }
            QState::WantNoOpposite => {
                self.state[option.to_u8() as usize].remote = QState::WantYes;
                Some(TelnetFrame::Do(option))
            }
        }
    }

    fn request_dont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        match self.state[option.to_u8() as usize].remote {
            QState::No | QState::WantNo | QState::WantNoOpposite => None,
            QState::Yes => {
                self.state[option.to_u8() as usize].remote = QState::WantNo;
                Some(TelnetFrame::Dont(option))
            }
            QState::WantYes => {
                self.state[option.to_u8() as usize].remote = QState::WantNoOpposite;
                Some(TelnetFrame::Dont(option))
            }
            QState::WantYesOpposite => {
                self.state[option.to_u8() as usize].remote = QState::WantNo;
                Some(TelnetFrame::Dont(option))
            }
        }
    }

    // #### Incoming processing (peer sent us DO/DONT/WILL/WONT) ##################

    /// Peer announces WILL: they offer to perform the option.
    fn recv_will(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let option_idx = option.to_u8() as usize;
        if !self.config[option_idx].remote {
            // unsupported from them -> us, refuse
            return Some(TelnetFrame::Dont(option));
        }
        match self.state[option_idx].remote {
            QState::No => {
                // unsolicited offer for a supported option: accept
                self.state[option_idx].remote = QState::Yes;
                Some(TelnetFrame::Do(option))
            }
            QState::Yes => {
                // already yes -> no response, avoids negotiation loops
                None
            }
            QState::WantNo => {
                // peer contradicts our DONT; RFC1143: WANTNO + WILL -> opposite
                self.state[option_idx].remote = QState::WantNoOpposite;
                Some(TelnetFrame::Dont(option))
            }
            QState::WantNoOpposite => {
                self.state[option_idx].remote = QState::Yes;
                None
            }
            QState::WantYes => {
                // our DO confirmed
                self.state[option_idx].remote = QState::Yes;
                None
            }
            QState::WantYesOpposite => {
                self.state[option_idx].remote = QState::Yes;
                None
            }
        }
    }

    /// Peer announces WONT: they refuse or stop performing the option.
    /// A refusal resolves to the peer's stated value with no counter-reply.
    fn recv_wont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let option_idx = option.to_u8() as usize;
        match self.state[option_idx].remote {
            QState::No => None, // already no, idempotent
            QState::Yes => {
                // peer stops performing an active option: acknowledge
                self.state[option_idx].remote = QState::No;
                Some(TelnetFrame::Dont(option))
            }
            QState::WantNo
            | QState::WantNoOpposite
            | QState::WantYes
            | QState::WantYesOpposite => {
                // our request resolved, or the peer refused: no counter-reply
                self.state[option_idx].remote = QState::No;
                None
            }
        }
    }

    /// Peer sends DO: they ask us to perform the option.
    fn recv_do(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let option_idx = option.to_u8() as usize;
        if !self.config[option_idx].local {
            // unsupported from us -> them, refuse and stay disabled
            return Some(TelnetFrame::Wont(option));
        }
        match self.state[option_idx].local {
            QState::No => {
                self.state[option_idx].local = QState::Yes;
                Some(TelnetFrame::Will(option))
            }
            QState::Yes => None,
            QState::WantNo => {
                self.state[option_idx].local = QState::WantNoOpposite;
                Some(TelnetFrame::Will(option))
            }
            QState::WantNoOpposite => {
                self.state[option_idx].local = QState::Yes;
                None
            }
            QState::WantYes => {
                self.state[option_idx].local = QState::Yes;
                None
            }
            QState::WantYesOpposite => {
                self.state[option_idx].local = QState::Yes;
                None
            }
        }
    }

    /// Peer sends DONT: they ask us to stop performing the option.
    fn recv_dont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let option_idx = option.to_u8() as usize;
        match self.state[option_idx].local {
            QState::No => None,
            QState::Yes => {
                self.state[option_idx].local = QState::No;
                Some(TelnetFrame::Wont(option))
            }
            QState::WantNo
            | QState::WantNoOpposite
            | QState::WantYes
            | QState::WantYesOpposite => {
                self.state[option_idx].local = QState::No;
                None
            }
        }
    }
}

impl Default for TelnetOptions {
    fn default() -> Self {
        TelnetOptions {
            config: core::array::from_fn(|idx| {
                let option = TelnetOption::from_u8(idx as u8);
                SupportState {
                    local: option.supported_local(),
                    remote: option.supported_remote(),
                }
            }),
            state: core::array::from_fn(|_| OptionState::default()),
        }
    }
}

/// Which side of the connection an option state change concerns.
///
/// Every option runs two independent Q-method state machines: the local path
/// (what *we* perform, negotiated with WILL/WONT against DO/DONT replies) and
/// the remote path (what the *peer* performs, negotiated with DO/DONT against
/// WILL/WONT replies). `TelnetSide` names the path an [`crate::TelnetEvent::OptionStatus`]
/// event refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetSide {
    /// The local side of the Telnet connection (what we perform)
    Local,
    /// The remote side of the Telnet connection (what the peer performs)
    Remote,
}

impl std::fmt::Display for TelnetSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetSide::Local => write!(f, "Local"),
            TelnetSide::Remote => write!(f, "Remote"),
        }
    }
}

/// Local and remote Q-method state for one option.
#[derive(Clone, Copy, Debug, Default)]
struct OptionState {
    pub local: QState,
    pub remote: QState,
}

/// [RFC1143](https://tools.ietf.org/html/rfc1143) Q-method negotiation states.
///
/// `No` and `Yes` are the settled poles; `WantNo`/`WantYes` mean our
/// DONT/WONT resp. DO/WILL is in flight; the `Opposite` variants carry the
/// queue bit for a request made while the opposite negotiation was pending.
#[derive(Copy, Clone, Debug, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub(crate) enum QState {
    ///
    #[default]
    No,
    ///
    WantNo,
    ///
    WantNoOpposite,
    ///
    Yes,
    ///
    WantYes,
    ///
    WantYesOpposite,
}

impl std::fmt::Display for QState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QState::No => write!(f, "No"),
            QState::WantNo => write!(f, "WantNo"),
            QState::WantNoOpposite => write!(f, "WantNoOpposite"),
            QState::Yes => write!(f, "Yes"),
            QState::WantYes => write!(f, "WantYes"),
            QState::WantYesOpposite => write!(f, "WantYesOpposite"),
        }
    }
}

/// Directional support flags for one option.
#[derive(Clone, Copy, Debug, Default)]
struct SupportState {
    /// Whether we support this option from us -> them.
    pub local: bool,
    /// Whether we support this option from them -> us.
    pub remote: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_state_default() {
        let state = OptionState::default();
        assert_eq!(state.local, QState::No);
        assert_eq!(state.remote, QState::No);
    }

    // ============================================================================
    // Local Option Enable Tests (We send WILL, they send DO)
    // ============================================================================

    #[test]
    fn local_enable_from_no_to_wantyes() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        assert_eq!(opts.local_qstate(opt), QState::No);
        assert!(!opts.local_enabled(opt));

        let frame = opts.enable_local(opt);
        assert_eq!(frame, Some(TelnetFrame::Will(opt)));
        assert_eq!(opts.local_qstate(opt), QState::WantYes);
        assert!(!opts.local_enabled(opt)); // not enabled until confirmed
    }

    #[test]
    fn local_enable_recv_do_completes_to_yes() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        opts.enable_local(opt);
        let response = opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        assert_eq!(response, None); // confirmation needs no reply
        assert_eq!(opts.local_qstate(opt), QState::Yes);
        assert!(opts.local_enabled(opt));
    }

    #[test]
    fn local_enable_idempotent_when_yes() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        opts.enable_local(opt);
        opts.handle_received(TelnetFrame::Do(opt)).unwrap();

        let frame = opts.enable_local(opt);
        assert_eq!(frame, None);
        assert_eq!(opts.local_qstate(opt), QState::Yes);
    }

    #[test]
    fn local_enable_idempotent_when_wantyes() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        opts.enable_local(opt);
        let frame = opts.enable_local(opt);
        assert_eq!(frame, None);
        assert_eq!(opts.local_qstate(opt), QState::WantYes);
    }

    #[test]
    fn local_enable_unsupported_option_sends_nothing() {
        let mut opts = TelnetOptions::default();
        let frame = opts.enable_local(TelnetOption::Linemode);
        assert_eq!(frame, None);
        assert_eq!(opts.local_qstate(TelnetOption::Linemode), QState::No);
    }

    // ============================================================================
    // Local Option Disable Tests (We send WONT, they send DONT)
    // ============================================================================

    #[test]
    fn local_disable_from_yes_to_wantno() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        opts.enable_local(opt);
        opts.handle_received(TelnetFrame::Do(opt)).unwrap();

        let frame = opts.disable_local(opt);
        assert_eq!(frame, Some(TelnetFrame::Wont(opt)));
        assert_eq!(opts.local_qstate(opt), QState::WantNo);
        assert!(opts.local_enabled(opt)); // still enabled until confirmed
    }

    #[test]
    fn local_disable_recv_dont_completes_to_no() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        opts.enable_local(opt);
        opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        opts.disable_local(opt);

        let response = opts.handle_received(TelnetFrame::Dont(opt)).unwrap();
        assert_eq!(response, None);
        assert_eq!(opts.local_qstate(opt), QState::No);
        assert!(!opts.local_enabled(opt));
    }

    #[test]
    fn local_disable_idempotent_when_no() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        let frame = opts.disable_local(opt);
        assert_eq!(frame, None);
        assert_eq!(opts.local_qstate(opt), QState::No);
    }

    // ============================================================================
    // Remote Option Tests (We send DO/DONT, they send WILL/WONT)
    // ============================================================================

    #[test]
    fn remote_enable_from_no_to_wantyes() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo;

        let frame = opts.enable_remote(opt);
        assert_eq!(frame, Some(TelnetFrame::Do(opt)));
        assert_eq!(opts.remote_qstate(opt), QState::WantYes);
        assert!(!opts.remote_enabled(opt));
    }

    #[test]
    fn remote_enable_recv_will_completes_to_yes() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo;

        opts.enable_remote(opt);
        let response = opts.handle_received(TelnetFrame::Will(opt)).unwrap();
        assert_eq!(response, None);
        assert_eq!(opts.remote_qstate(opt), QState::Yes);
        assert!(opts.remote_enabled(opt));
    }

    #[test]
    fn remote_disable_recv_wont_completes_to_no() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo;

        opts.enable_remote(opt);
        opts.handle_received(TelnetFrame::Will(opt)).unwrap();
        opts.disable_remote(opt);

        let response = opts.handle_received(TelnetFrame::Wont(opt)).unwrap();
        assert_eq!(response, None);
        assert_eq!(opts.remote_qstate(opt), QState::No);
        assert!(!opts.remote_enabled(opt));
    }

    // ============================================================================
    // Unsolicited Negotiation Tests
    // ============================================================================

    #[test]
    fn unsolicited_will_supported_option_accepted_with_do() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo;

        let response = opts.handle_received(TelnetFrame::Will(opt)).unwrap();
        assert_eq!(response, Some(TelnetFrame::Do(opt)));
        assert!(opts.remote_enabled(opt));
    }

    #[test]
    fn unsolicited_will_unsupported_option_refused_with_dont() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Linemode;

        let response = opts.handle_received(TelnetFrame::Will(opt)).unwrap();
        assert_eq!(response, Some(TelnetFrame::Dont(opt)));
        assert!(!opts.remote_enabled(opt));
    }

    #[test]
    fn unsolicited_do_supported_option_accepted_with_will() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::SuppressGoAhead;

        let response = opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        assert_eq!(response, Some(TelnetFrame::Will(opt)));
        assert!(opts.local_enabled(opt));
    }

    #[test]
    fn unsolicited_do_unsupported_option_refused_with_wont() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo; // we never perform Echo ourselves

        let response = opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        assert_eq!(response, Some(TelnetFrame::Wont(opt)));
        assert!(!opts.local_enabled(opt));
    }

    #[test]
    fn unsolicited_do_unknown_option_refused_with_wont() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Unknown(200);

        let response = opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        assert_eq!(response, Some(TelnetFrame::Wont(opt)));
    }

    // ============================================================================
    // Loop Avoidance / Idempotence Tests
    // ============================================================================

    #[test]
    fn dont_for_disabled_option_produces_no_response() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        let response = opts.handle_received(TelnetFrame::Dont(opt)).unwrap();
        assert_eq!(response, None);
        assert_eq!(opts.local_qstate(opt), QState::No);
    }

    #[test]
    fn wont_for_disabled_option_produces_no_response() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo;

        let response = opts.handle_received(TelnetFrame::Wont(opt)).unwrap();
        assert_eq!(response, None);
        assert_eq!(opts.remote_qstate(opt), QState::No);
    }

    #[test]
    fn repeated_do_never_repeats_affirmative_reply() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::SuppressGoAhead;

        let first = opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        assert_eq!(first, Some(TelnetFrame::Will(opt)));

        // second identical request without any state-changing request between
        let second = opts.handle_received(TelnetFrame::Do(opt)).unwrap();
        assert_eq!(second, None);
    }

    #[test]
    fn no_loop_under_arbitrary_verb_sequences() {
        // For a burst of verbs on one option the machine must never emit the
        // same affirmative reply twice in a row without an intervening
        // state-changing request from the peer.
        let verbs: [fn(TelnetOption) -> TelnetFrame; 4] = [
            TelnetFrame::Do,
            TelnetFrame::Dont,
            TelnetFrame::Will,
            TelnetFrame::Wont,
        ];
        let opt = TelnetOption::TransmitBinary;
        // walk every length-4 verb sequence
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let mut opts = TelnetOptions::default();
                        let mut last_affirmative: Option<TelnetFrame> = None;
                        for idx in [a, b, c, d] {
                            let received = verbs[idx](opt);
                            let state_changing = !matches!(
                                (&received, opts.local_qstate(opt), opts.remote_qstate(opt)),
                                (TelnetFrame::Do(_), QState::Yes, _)
                                    | (TelnetFrame::Dont(_), QState::No, _)
                                    | (TelnetFrame::Will(_), _, QState::Yes)
                                    | (TelnetFrame::Wont(_), _, QState::No)
                            );
                            let reply = opts.handle_received(received).unwrap();
                            if let Some(reply) = reply {
                                let affirmative = matches!(
                                    reply,
                                    TelnetFrame::Will(_) | TelnetFrame::Do(_)
                                );
                                if affirmative {
                                    assert!(
                                        state_changing
                                            || last_affirmative.as_ref() != Some(&reply),
                                        "duplicate affirmative reply {:?}",
                                        reply
                                    );
                                    last_affirmative = Some(reply);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    // ============================================================================
    // Collision Tests (RFC 1143 queue bit)
    // ============================================================================

    #[test]
    fn disable_during_pending_enable_queues_opposite() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::TransmitBinary;

        opts.enable_local(opt);
        let frame = opts.disable_local(opt);
        assert_eq!(frame, Some(TelnetFrame::Wont(opt)));
        assert_eq!(opts.local_qstate(opt), QState::WantNoOpposite);
    }

    #[test]
    fn contradicting_reply_resolves_to_peer_value_without_counter() {
        let mut opts = TelnetOptions::default();
        let opt = TelnetOption::Echo;

        // we ask the peer to enable, peer refuses
        opts.enable_remote(opt);
        let response = opts.handle_received(TelnetFrame::Wont(opt)).unwrap();
        assert_eq!(response, None); // no counter-reply, loop prevention
        assert_eq!(opts.remote_qstate(opt), QState::No);
    }

    #[test]
    fn handle_received_rejects_non_negotiation_frames() {
        let mut opts = TelnetOptions::default();
        let err = opts.handle_received(TelnetFrame::Data(b'x'));
        assert!(matches!(
            err,
            Err(CodecError::NegotiationError { .. })
        ));
    }
}
