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

//! Session event handler trait

use crate::ClientError;
use async_trait::async_trait;
use wiretel_telnetcodec::{TelnetOption, TelnetSide};

/// Session lifecycle and negotiation observer.
///
/// Implement this trait to be notified of session events. All methods are
/// async and have default implementations that do nothing; data bytes are
/// not routed here; they go straight to the [`crate::Display`]
/// collaborator.
#[async_trait]
pub trait SessionHandler: Send + Sync + 'static {
    /// Called once when the session starts running.
    async fn on_connect(&self) {}

    /// Called once when the session has closed, on every exit path.
    async fn on_disconnect(&self) {}

    /// Called when a Telnet option negotiation completes.
    ///
    /// # Arguments
    ///
    /// * `option` - The Telnet option that changed
    /// * `side` - Whether the local or the remote side changed
    /// * `enabled` - `true` if the option was enabled, `false` if disabled
    async fn on_option_changed(
        &self,
        _option: TelnetOption,
        _side: TelnetSide,
        _enabled: bool,
    ) {
    }

    /// Called at most once, when a transport error closes the session.
    async fn on_error(&self, _error: &ClientError) {}
}

/// The do-nothing handler, for callers that only care about the display.
#[async_trait]
impl SessionHandler for () {}
