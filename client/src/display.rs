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

//! Display collaborator boundary

/// The terminal display collaborator.
///
/// The session pushes raw bytes through unmodified; the display is assumed
/// to interpret any terminal escape sequences itself. Implementations are
/// registered on the session at construction and dropped with it.
pub trait Display: Send + Sync + 'static {
    /// Write raw bytes to the display.
    fn write(&self, bytes: &[u8]);

    /// Sound the terminal bell.
    fn bell(&self);

    /// Clear the display.
    fn clear(&self);
}

/// A display that forwards everything to standard output.
///
/// Bell and clear are rendered as their conventional control sequences, on
/// the assumption that stdout is an ANSI-capable terminal.
#[derive(Debug, Default)]
pub struct StdoutDisplay;

impl Display for StdoutDisplay {
    fn write(&self, bytes: &[u8]) {
        use std::io::Write;
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }

    fn bell(&self) {
        self.write(b"\x07");
    }

    fn clear(&self) {
        self.write(b"\x1b[2J\x1b[1;1H");
    }
}
