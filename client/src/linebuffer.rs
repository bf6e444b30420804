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

//! Local line-edit buffer

/// Visual sequence that erases the previous character cell: backspace
/// followed by CSI P (delete character).
const ERASE_VISUAL: &[u8] = b"\x08\x1b[P";

/// Carriage return, the line terminator.
const TERMINATOR: u8 = b'\r';

/// What the session should do with one unit of local input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyAction {
    /// Echo these bytes to the display; nothing goes on the wire.
    Echo(Vec<u8>),
    /// Send the completed line to the transport, then echo the terminator.
    Send {
        /// Line payload including the terminator byte.
        line: Vec<u8>,
        /// Bytes to echo to the display.
        echo: Vec<u8>,
    },
    /// Ring the display bell; the buffer was already empty.
    Bell,
    /// Close the session, bypassing the terminator path.
    Close,
}

/// Accumulates keystrokes into a line until a terminator triggers a send.
///
/// One input unit per call; the buffer applies erase editing locally and
/// only releases bytes to the transport on carriage return. The interrupt
/// key drops any buffered input and closes the session.
#[derive(Debug)]
pub struct LineBuffer {
    buffer: Vec<u8>,
    erase_key: u8,
    interrupt_key: u8,
}

impl LineBuffer {
    /// Creates an empty line buffer with the given editing keys.
    pub fn new(erase_key: u8, interrupt_key: u8) -> Self {
        LineBuffer {
            buffer: Vec::new(),
            erase_key,
            interrupt_key,
        }
    }

    /// Feeds one input unit through the buffer.
    pub fn key(&mut self, byte: u8) -> KeyAction {
        if byte == TERMINATOR {
            let mut line = std::mem::take(&mut self.buffer);
            line.push(TERMINATOR);
            KeyAction::Send {
                line,
                echo: vec![TERMINATOR],
            }
        } else if byte == self.interrupt_key {
            self.buffer.clear();
            KeyAction::Close
        } else if byte == self.erase_key {
            if self.buffer.pop().is_some() {
                KeyAction::Echo(ERASE_VISUAL.to_vec())
            } else {
                KeyAction::Bell
            }
        } else {
            self.buffer.push(byte);
            KeyAction::Echo(vec![byte])
        }
    }

    /// Number of buffered input units.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer holds no input.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> LineBuffer {
        LineBuffer::new(0x7F, 0x18)
    }

    #[test]
    fn printable_input_is_buffered_and_echoed() {
        let mut buf = buffer();
        assert_eq!(buf.key(b'h'), KeyAction::Echo(vec![b'h']));
        assert_eq!(buf.key(b'i'), KeyAction::Echo(vec![b'i']));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn terminator_releases_line_with_cr() {
        let mut buf = buffer();
        buf.key(b'h');
        buf.key(b'i');
        assert_eq!(
            buf.key(b'\r'),
            KeyAction::Send {
                line: b"hi\r".to_vec(),
                echo: vec![b'\r'],
            }
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_line_terminator_sends_bare_cr() {
        let mut buf = buffer();
        assert_eq!(
            buf.key(b'\r'),
            KeyAction::Send {
                line: b"\r".to_vec(),
                echo: vec![b'\r'],
            }
        );
    }

    #[test]
    fn erase_pops_last_unit_and_echoes_visual() {
        let mut buf = buffer();
        buf.key(b'a');
        buf.key(b'b');
        assert_eq!(buf.key(0x7F), KeyAction::Echo(ERASE_VISUAL.to_vec()));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn erase_on_empty_buffer_rings_bell() {
        let mut buf = buffer();
        assert_eq!(buf.key(0x7F), KeyAction::Bell);
        assert!(buf.is_empty());
    }

    #[test]
    fn interrupt_drops_buffered_input_and_closes() {
        let mut buf = buffer();
        buf.key(b'x');
        assert_eq!(buf.key(0x18), KeyAction::Close);
        assert!(buf.is_empty());
    }

    #[test]
    fn configured_keys_are_honored() {
        // Ctrl-H erase, Ctrl-C interrupt
        let mut buf = LineBuffer::new(0x08, 0x03);
        buf.key(b'a');
        assert_eq!(buf.key(0x08), KeyAction::Echo(ERASE_VISUAL.to_vec()));
        assert_eq!(buf.key(0x03), KeyAction::Close);
        // the defaults no longer edit
        buf.key(0x7F);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn edited_line_sends_final_content() {
        // "abc" erase "d" CR -> "abd\r"
        let mut buf = buffer();
        let mut display = Vec::new();
        for byte in [b'a', b'b', b'c', 0x7F, b'd', b'\r'] {
            match buf.key(byte) {
                KeyAction::Echo(echo) => display.extend(echo),
                KeyAction::Send { line, echo } => {
                    assert_eq!(line, b"abd\r");
                    display.extend(echo);
                }
                other => panic!("unexpected action {:?}", other),
            }
        }
        // display saw the typed text, the erase visual, then the rest
        let mut expected = Vec::new();
        expected.extend(b"abc");
        expected.extend(ERASE_VISUAL);
        expected.extend(b"d\r");
        assert_eq!(display, expected);
    }
}
