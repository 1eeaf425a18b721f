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

//! Reusable mocks for testing prompting code without a terminal: a captured output
//! device, scripted key-event input streams (with optional per-event delays for
//! timeout tests on a paused tokio clock), and key-event constructors.
//!
//! These ship in the library (not behind `cfg(test)`) so that crates depending on this
//! one can test their own prompt flows the same way.

// Attach sources.
pub mod async_stream_mock;
pub mod key_events;
pub mod stdout_mock;

// Re-export.
pub use async_stream_mock::*;
pub use key_events::*;
pub use stdout_mock::*;
