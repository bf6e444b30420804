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

//! Negotiate About Window Size ([RFC1073](https://tools.ietf.org/html/rfc1073))

use crate::{CodecError, CodecResult};
use byteorder::{BigEndian, WriteBytesExt};
use bytes::{Buf, BufMut};

/// The Negotiate About Window Size (NAWS) subnegotiation payload.
///
/// Four bytes on the wire, big-endian: 2 bytes of columns followed by
/// 2 bytes of rows. Window size announcements are advisory; the peer never
/// acknowledges them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of columns (characters) in the terminal window
    pub cols: u16,
    /// The number of rows (lines) in the terminal window
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Encodes this `WindowSize` into a byte buffer in big-endian order.
    ///
    /// The caller is responsible for IAC-escaping when embedding the payload
    /// in a subnegotiation frame; dimension bytes of value 0xFF are legal.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes this `WindowSize` to a writer, returning the bytes written.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u16::<BigEndian>(self.cols)?;
        writer.write_u16::<BigEndian>(self.rows)?;
        Ok(4)
    }

    /// Decodes a `WindowSize` from an unescaped subnegotiation payload.
    ///
    /// # Errors
    /// Returns `CodecError::SubnegotiationError` when fewer than 4 bytes are
    /// available.
    pub fn decode<T: Buf>(src: &mut T) -> CodecResult<WindowSize> {
        // NAWS format: WIDTH-HIGH WIDTH-LOW HEIGHT-HIGH HEIGHT-LOW
        if src.remaining() >= 4 {
            Ok(WindowSize {
                cols: src.get_u16(),
                rows: src.get_u16(),
            })
        } else {
            Err(CodecError::SubnegotiationError {
                option: Some(crate::consts::option::NAWS),
                reason: format!(
                    "insufficient data (required: 4, available: {})",
                    src.remaining()
                ),
            })
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_is_big_endian() {
        let size = WindowSize::new(80, 24);
        let mut buf = BytesMut::new();
        let written = size.encode(&mut buf).unwrap();
        assert_eq!(written, 4);
        assert_eq!(&buf[..], &[0x00, 0x50, 0x00, 0x18]);
    }

    #[test]
    fn decode_round_trip() {
        let size = WindowSize::new(132, 43);
        let mut buf = BytesMut::new();
        size.encode(&mut buf).unwrap();
        let decoded = WindowSize::decode(&mut buf).unwrap();
        assert_eq!(decoded, size);
    }

    #[test]
    fn decode_short_payload_is_an_error() {
        let mut buf = BytesMut::from(&[0x00, 0x50, 0x00][..]);
        let err = WindowSize::decode(&mut buf);
        assert!(matches!(
            err,
            Err(CodecError::SubnegotiationError { option: Some(31), .. })
        ));
    }

    #[test]
    fn dimensions_with_ff_bytes_survive() {
        // 0xFF00 columns exercises the IAC-valued dimension byte
        let size = WindowSize::new(0xFF00, 24);
        let mut buf = BytesMut::new();
        size.encode(&mut buf).unwrap();
        assert_eq!(&buf[..], &[0xFF, 0x00, 0x00, 0x18]);
        assert_eq!(WindowSize::decode(&mut buf).unwrap(), size);
    }
}
