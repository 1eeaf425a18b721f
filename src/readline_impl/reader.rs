/*
 *   Copyright (c) 2024 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! The line reader session: one [LineReader] per prompt invocation, one
//! [LineReader::read_line] call per prompt iteration.

use crate::{AskError, EchoFilter, InputDevice, LineState, LineStateControl, OutputDevice,
            RawModeGuard};

/// How one [LineReader::read_line] call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadLineEvent {
    /// The user pressed Enter. Carries the (unechoed-if-masked) line.
    Line(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// Owns the input and output devices for the duration of one prompt invocation, plus
/// the raw mode guard when the real terminal is wired up. Dropping the reader restores
/// the terminal; [LineReader::close] does the same thing earlier and is idempotent.
pub struct LineReader {
    question: String,
    hidden: bool,
    input_device: InputDevice,
    output_device: OutputDevice,
    raw_mode_guard: RawModeGuard,
}

impl LineReader {
    pub fn new(
        question: String,
        hidden: bool,
        input_device: InputDevice,
        output_device: OutputDevice,
        raw_mode_guard: RawModeGuard,
    ) -> Self {
        Self {
            question,
            hidden,
            input_device,
            output_device,
            raw_mode_guard,
        }
    }

    /// Display the question and read one line of input.
    ///
    /// Cancel safe at the event boundary: this future only suspends inside
    /// [InputDevice::next_event], so dropping it (eg when a timeout wins a
    /// [tokio::select!] race) loses no typed events.
    pub async fn read_line(&mut self) -> Result<ReadLineEvent, AskError> {
        // Masking needs a terminal to re-render on; captured output gets no echo at
        // all, so there is nothing to mask.
        let masked = self.hidden && self.output_device.is_interactive;
        let echo = EchoFilter::new(masked, &self.question);
        let mut line_state = LineState::new(
            &self.question,
            echo,
            self.output_device.is_interactive,
            self.raw_mode_guard.is_active(),
        );

        {
            let mut term = self.output_device.resource.lock().unwrap();
            line_state.render_question(&mut *term)?;
        }

        loop {
            let Some(event_result) = self.input_device.next_event().await else {
                return Err(AskError::ClosedInputStream);
            };
            let event = event_result?;

            let control = {
                let mut term = self.output_device.resource.lock().unwrap();
                line_state.apply_event(&event, &mut *term)?
            };

            match control {
                LineStateControl::Continue => continue,
                LineStateControl::Resolved(line) => return Ok(ReadLineEvent::Line(line)),
                LineStateControl::Interrupted => return Ok(ReadLineEvent::Interrupted),
                LineStateControl::Eof => return Ok(ReadLineEvent::Eof),
            }
        }
    }

    /// Restore the terminal (take it out of raw mode). Safe to call more than once;
    /// [Drop] calls it as a safety net.
    pub fn close(&mut self) { self.raw_mode_guard.disable(); }
}

impl Drop for LineReader {
    fn drop(&mut self) { self.close(); }
}
