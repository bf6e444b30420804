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

//! Client configuration

use crate::{ClientError, Result};
use std::time::Duration;
use wiretel_telnetcodec::naws::WindowSize;

/// Telnet client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Key that erases the last buffered input unit (ASCII DEL by default)
    pub erase_key: u8,

    /// Key that closes the session, bypassing the line buffer (Ctrl-X by default)
    pub interrupt_key: u8,

    /// Terminal dimensions announced through NAWS
    pub window_size: WindowSize,

    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 23,
            erase_key: 0x7F,
            interrupt_key: 0x18,
            window_size: WindowSize::default(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the erase key
    pub fn with_erase_key(mut self, key: u8) -> Self {
        self.erase_key = key;
        self
    }

    /// Set the interrupt key
    pub fn with_interrupt_key(mut self, key: u8) -> Self {
        self.interrupt_key = key;
        self
    }

    /// Set the terminal size announced through NAWS
    pub fn with_window_size(mut self, cols: u16, rows: u16) -> Self {
        self.window_size = WindowSize::new(cols, rows);
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Checks the configuration before any connection attempt is made.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ClientError::Config("host must not be empty".into()));
        }
        if self.host.chars().any(char::is_whitespace) {
            return Err(ClientError::Config(format!(
                "host {:?} contains whitespace",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(ClientError::Config("port must be non-zero".into()));
        }
        Ok(())
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_match_terminal_conventions() {
        let config = ClientConfig::default();
        assert_eq!(config.erase_key, 127); // DEL
        assert_eq!(config.interrupt_key, 24); // Ctrl-X
    }

    #[test]
    fn address_renders_host_and_port() {
        let config = ClientConfig::new("mud.example.net", 4000);
        assert_eq!(config.address(), "mud.example.net:4000");
    }

    #[test]
    fn validate_accepts_sane_config() {
        assert!(ClientConfig::new("localhost", 23).validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_host() {
        let config = ClientConfig::new("", 23);
        assert!(matches!(
            config.validate(),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_whitespace_host() {
        let config = ClientConfig::new("bad host", 23);
        assert!(matches!(
            config.validate(),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_port_zero() {
        let config = ClientConfig::new("localhost", 0);
        assert!(matches!(
            config.validate(),
            Err(ClientError::Config(_))
        ));
    }
}
