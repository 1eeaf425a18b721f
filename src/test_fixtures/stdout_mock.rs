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

use std::sync::Arc;

use crate::{OutputDevice, StdMutex};

/// A [std::io::Write] that captures everything into a shared buffer. Clones share the
/// buffer, so tests can hand one clone to the prompt and inspect another.
#[derive(Clone)]
pub struct StdoutMock {
    pub buffer: Arc<StdMutex<Vec<u8>>>,
}

impl Default for StdoutMock {
    fn default() -> Self {
        Self {
            buffer: Arc::new(StdMutex::new(Vec::new())),
        }
    }
}

impl StdoutMock {
    pub fn get_copy_of_buffer(&self) -> Vec<u8> { self.buffer.lock().unwrap().clone() }

    pub fn get_copy_of_buffer_as_string(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer_data).to_string()
    }

    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        let output = String::from_utf8_lossy(&buffer_data).to_string();
        strip_ansi_escapes::strip_str(output)
    }
}

impl std::io::Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

/// Mock constructors for [OutputDevice]. Both return the device plus a handle to the
/// captured buffer.
pub trait OutputDeviceExt {
    /// A captured, non-interactive output (like piped stdout). The prompt writes the
    /// question and nothing else to it.
    fn new_mock() -> (OutputDevice, StdoutMock);

    /// A captured output that claims to be a terminal, so echo (and masking) render
    /// into the buffer.
    fn new_interactive_mock() -> (OutputDevice, StdoutMock);
}

impl OutputDeviceExt for OutputDevice {
    fn new_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
            is_interactive: false,
        };
        (this, stdout_mock)
    }

    fn new_interactive_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
            is_interactive: true,
        };
        (this, stdout_mock)
    }
}
