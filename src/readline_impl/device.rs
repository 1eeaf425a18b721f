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

//! Input and output devices for the line reader, via dependency injection.
//!
//! The prompt engine only ever sees these two structs. The default constructors wire up
//! the real terminal (`stdin` events via [crossterm::event::EventStream], `stdout` for
//! rendering); the [crate::test_fixtures] module provides mock constructors so that
//! everything above this layer can be tested without a terminal.

use std::{io::IsTerminal, sync::Arc};

use futures_util::StreamExt;

use crate::{CrosstermEventResult, PinnedInputStream, SafeRawTerminal, StdMutex};

/// Where the prompt renders. `is_interactive` gates both masked echo and character echo
/// in general: a piped / captured output gets the question text and nothing else.
#[derive(Clone)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_interactive: bool,
}

impl OutputDevice {
    /// The process's `stdout`. Interactive when it is attached to a terminal, rather
    /// than piped or redirected.
    pub fn new_stdout() -> Self {
        Self {
            is_interactive: std::io::stdout().is_terminal(),
            resource: Arc::new(StdMutex::new(std::io::stdout())),
        }
    }
}

/// Where key events come from. This is a pinned async stream so that tests can inject
/// scripted events (with or without delays) in place of the real terminal.
pub struct InputDevice {
    pub resource: PinnedInputStream<CrosstermEventResult>,
}

impl InputDevice {
    /// The process's `stdin`, parsed into key events by crossterm. The terminal should
    /// be in raw mode for this to deliver events per keypress.
    pub fn new_event_stream() -> Self {
        Self {
            resource: Box::pin(crossterm::event::EventStream::new()),
        }
    }

    /// Cancel safe: dropping the future mid-wait loses no events.
    pub async fn next_event(&mut self) -> Option<CrosstermEventResult> {
        self.resource.next().await
    }
}

/// Puts the terminal into raw mode on creation and takes it back out on [Drop], or on
/// an explicit [RawModeGuard::disable] - whichever comes first. The inactive variant
/// is used whenever the output is not the real interactive terminal (mocks, pipes),
/// where touching the terminal state would be wrong.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn try_enable() -> std::io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    pub fn inactive() -> Self { Self { active: false } }

    pub fn is_active(&self) -> bool { self.active }

    pub fn disable(&mut self) {
        if self.active {
            self.active = false;
            let _ = crossterm::terminal::disable_raw_mode();
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) { self.disable(); }
}
