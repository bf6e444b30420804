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

//! The Telnet session loop

use crate::linebuffer::{KeyAction, LineBuffer};
use crate::{ClientConfig, ClientError, Display, Result, SessionHandler};
use bytes::BytesMut;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, info, warn};
use wiretel_telnetcodec::naws::WindowSize;
use wiretel_telnetcodec::{TelnetCodec, TelnetEvent, TelnetFrame, TelnetOption, TelnetSide};

const RECV_BUFFER_SIZE: usize = 8192;

/// Input events fed into the session from the UI side.
#[derive(Debug)]
enum SessionInput {
    Key(u8),
    Resize(u16, u16),
    Close,
}

/// Clone-able handle for feeding local input into a running [`Session`].
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionInput>,
}

impl SessionHandle {
    /// Feeds one input unit (a keystroke) into the session.
    pub fn input(&self, byte: u8) -> Result<()> {
        self.tx
            .send(SessionInput::Key(byte))
            .map_err(|_| ClientError::NotConnected)
    }

    /// Notifies the session of a terminal size change.
    ///
    /// Advisory: the new size is announced through NAWS when that option is
    /// active and silently recorded otherwise.
    pub fn resize(&self, cols: u16, rows: u16) -> Result<()> {
        self.tx
            .send(SessionInput::Resize(cols, rows))
            .map_err(|_| ClientError::NotConnected)
    }

    /// Asks the session to close.
    pub fn close(&self) -> Result<()> {
        self.tx
            .send(SessionInput::Close)
            .map_err(|_| ClientError::NotConnected)
    }
}

/// One Telnet session over one transport connection.
///
/// The session owns the transport halves, the protocol codec, and the line
/// buffer; it is created per connection attempt and releases the transport
/// on every exit path. All transport receive processing and all local input
/// processing are serialized onto the single [`Session::run`] loop, so no
/// session state is ever mutated concurrently.
pub struct Session<R, W, H> {
    reader: Option<R>,
    writer: W,
    codec: TelnetCodec,
    line_buffer: LineBuffer,
    display: Arc<dyn Display>,
    handler: Arc<H>,
    input_rx: Option<mpsc::UnboundedReceiver<SessionInput>>,
    window_size: WindowSize,
    remote_echo: bool,
    connected: bool,
}

impl<R, W, H> Session<R, W, H>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    H: SessionHandler,
{
    /// Creates a session over the given transport halves.
    ///
    /// The display and handler collaborators are registered here and held
    /// until the session closes. Returns the session together with the
    /// [`SessionHandle`] the UI side uses to feed input.
    pub fn new(
        reader: R,
        writer: W,
        config: &ClientConfig,
        display: Arc<dyn Display>,
        handler: Arc<H>,
    ) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session {
            reader: Some(reader),
            writer,
            codec: TelnetCodec::new(),
            line_buffer: LineBuffer::new(config.erase_key, config.interrupt_key),
            display,
            handler,
            input_rx: Some(rx),
            window_size: config.window_size,
            remote_echo: false,
            connected: false,
        };
        (session, SessionHandle { tx })
    }

    /// Runs the session to completion.
    ///
    /// Returns `Ok(())` when the session ends by user close or server EOF,
    /// and the transport error when one closes the session. Either way the
    /// transport is released and the handler sees exactly one
    /// `on_disconnect`.
    pub async fn run(mut self) -> Result<()> {
        let mut reader = self.reader.take().ok_or(ClientError::NotConnected)?;
        let mut input_rx = self.input_rx.take().ok_or(ClientError::NotConnected)?;

        self.connected = true;
        self.handler.on_connect().await;

        // opening negotiation: full-duplex via SGA, window size announcements
        let mut opening = Vec::new();
        opening.extend(self.codec.enable_remote(TelnetOption::SuppressGoAhead));
        opening.extend(self.codec.enable_local(TelnetOption::SuppressGoAhead));
        opening.extend(self.codec.enable_local(TelnetOption::NAWS));
        if let Err(error) = self.send_frames(opening).await {
            return self.fail(error).await;
        }

        let mut inbound = BytesMut::with_capacity(RECV_BUFFER_SIZE);
        loop {
            tokio::select! {
                read = reader.read_buf(&mut inbound) => match read {
                    Ok(0) => {
                        info!("Server closed connection");
                        self.display.write(b"\r\nconnection closed by remote host\r\n");
                        break;
                    }
                    Ok(_) => {
                        if let Err(error) = self.process_inbound(&mut inbound).await {
                            return self.fail(error).await;
                        }
                    }
                    Err(error) => {
                        return self.fail(error.into()).await;
                    }
                },
                input = input_rx.recv() => match input {
                    Some(SessionInput::Key(byte)) => {
                        match self.process_key(byte).await {
                            Ok(true) => {}
                            Ok(false) => {
                                // interrupt key: reset the display like a
                                // dropped call, then leave
                                self.display.clear();
                                break;
                            }
                            Err(error) => return self.fail(error).await,
                        }
                    }
                    Some(SessionInput::Resize(cols, rows)) => {
                        if let Err(error) = self.process_resize(cols, rows).await {
                            return self.fail(error).await;
                        }
                    }
                    Some(SessionInput::Close) | None => break,
                },
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Decodes everything the transport delivered, in order: data bytes are
    /// batched to the display, negotiation outcomes go to the handler, and
    /// the replies the codec queued are flushed to the wire afterwards.
    async fn process_inbound(&mut self, inbound: &mut BytesMut) -> Result<()> {
        let mut data = Vec::new();
        loop {
            match self.codec.decode(inbound) {
                Ok(Some(TelnetEvent::Data(byte))) => data.push(byte),
                Ok(Some(event)) => {
                    // flush buffered data first to preserve stream order
                    if !data.is_empty() {
                        self.display.write(&data);
                        data.clear();
                    }
                    self.handle_event(event).await?;
                }
                Ok(None) => break,
                Err(error) => return Err(error.into()),
            }
        }
        if !data.is_empty() {
            self.display.write(&data);
        }
        self.flush_negotiation().await
    }

    async fn handle_event(&mut self, event: TelnetEvent) -> Result<()> {
        match event {
            TelnetEvent::OptionStatus(option, side, enabled) => {
                debug!("option {} {} on the {} side", option, enabled, side);
                if option == TelnetOption::Echo && side == TelnetSide::Remote {
                    // remote echo active: stop echoing locally
                    self.remote_echo = enabled;
                }
                if option == TelnetOption::NAWS && side == TelnetSide::Local && enabled {
                    self.send_window_size().await?;
                }
                self.handler.on_option_changed(option, side, enabled).await;
            }
            TelnetEvent::Subnegotiate(option, payload) => {
                debug!(
                    "ignoring {} subnegotiation ({} bytes)",
                    option,
                    payload.len()
                );
            }
            other => {
                debug!("unhandled telnet event: {:?}", other);
            }
        }
        Ok(())
    }

    async fn process_key(&mut self, byte: u8) -> Result<bool> {
        match self.line_buffer.key(byte) {
            KeyAction::Echo(echo) => {
                if !self.remote_echo {
                    self.display.write(&echo);
                }
            }
            KeyAction::Send { line, echo } => {
                let mut wire = BytesMut::with_capacity(line.len() + 1);
                for byte in line {
                    self.codec.encode(TelnetFrame::Data(byte), &mut wire)?;
                }
                self.writer.write_all(&wire).await?;
                self.writer.flush().await?;
                if !self.remote_echo {
                    self.display.write(&echo);
                }
            }
            KeyAction::Bell => self.display.bell(),
            KeyAction::Close => return Ok(false),
        }
        Ok(true)
    }

    async fn process_resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        self.window_size = WindowSize::new(cols, rows);
        if self.codec.is_enabled_local(TelnetOption::NAWS) {
            self.send_window_size().await?;
        }
        Ok(())
    }

    async fn send_window_size(&mut self) -> Result<()> {
        let mut payload = BytesMut::new();
        self.window_size.encode(&mut payload)?;
        debug!("announcing window size {}", self.window_size);
        self.send_frames(vec![TelnetFrame::Subnegotiate(
            TelnetOption::NAWS,
            payload.freeze(),
        )])
        .await
    }

    async fn flush_negotiation(&mut self) -> Result<()> {
        let replies = self.codec.take_pending_replies();
        self.send_frames(replies).await
    }

    async fn send_frames(&mut self, frames: Vec<TelnetFrame>) -> Result<()> {
        if frames.is_empty() {
            return Ok(());
        }
        let mut wire = BytesMut::with_capacity(frames.len() * 3);
        for frame in frames {
            self.codec.encode(frame, &mut wire)?;
        }
        self.writer.write_all(&wire).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Transport failure path: one user-visible notification, then close.
    /// No retry, no further sends.
    async fn fail(mut self, error: ClientError) -> Result<()> {
        warn!("session error: {}", error);
        self.display
            .write(format!("\r\nwiretel: {}\r\n", error).as_bytes());
        self.handler.on_error(&error).await;
        self.shutdown().await;
        Err(error)
    }

    async fn shutdown(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        if let Err(error) = self.writer.shutdown().await {
            debug!("transport shutdown failed: {}", error);
        }
        self.handler.on_disconnect().await;
    }
}
