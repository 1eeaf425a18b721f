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

//! The `ask_async` library asks a question on the terminal, reads one line of input
//! asynchronously, and resolves with a typed answer. It is a replacement for the
//! "print a prompt, call [std::io::BufRead::read_line], hope for the best" pattern,
//! with the parts that pattern always ends up needing bolted on properly:
//!
//! 1. **Retries** - an answer handler decides, per answer, whether to accept it,
//!    substitute another value, reject it (ask again), or abandon the prompt. A retry
//!    limit caps how many times the question is asked.
//! 2. **Timeouts** - an independent countdown races against the user. If it expires
//!    first, the prompt resolves with a configured default answer, or fails if you ask
//!    it to. The countdown restarts on every new prompt iteration, so a wrong answer
//!    resets the clock.
//! 3. **Type coercion** - `"42"` comes back as an integer, `"y"` / `"yes"` / `"n"` /
//!    `"no"` come back as booleans, everything else stays a string. Disable it and you
//!    get the raw line back, byte for byte.
//! 4. **Hidden input** - when the output is an interactive terminal, typed characters
//!    are echoed as `*`. Masking is purely a rendering concern: the line buffer (and
//!    therefore the resolved answer) is never touched.
//!
//! # Why async?
//!
//! Because [`std::io::Stdin::read_line`] is blocking, and there is no way to get it
//! unblocked once it is blocked - which makes a timeout racing against user input
//! impossible without spawning throwaway threads. Here, waiting for a line, waiting for
//! an async answer handler, and the timeout countdown are all cooperative suspension
//! points on the tokio runtime, so a [tokio::select!] can race them cleanly and cancel
//! the loser.
//!
//! # How to use this crate
//!
//! The simplest entry point is [`ask()`]:
//!
//! ```no_run
//! async fn simplest() -> Result<(), ask_async::AskError> {
//!     let answer = ask_async::ask("Continue?").await?;
//!     println!("you said: {answer}");
//!     Ok(())
//! }
//! ```
//!
//! For everything else there is [`AskOptions`] and [`ask_with()`]:
//!
//! ```no_run
//! use ask_async::{ask_with, Answer, AskOptions, HandlerVerdict};
//!
//! async fn guessing_game() -> Result<(), ask_async::AskError> {
//!     let options = AskOptions::new("What is 6 x 7?")
//!         .limit(3)
//!         .timeout_secs(30)
//!         .default_answer("42")
//!         .on_answer(|answer, _attempt| {
//!             Ok(match answer {
//!                 Answer::Int(42) => HandlerVerdict::Accept,
//!                 _ => HandlerVerdict::Reject,
//!             })
//!         });
//!     let answer = ask_with(options).await?;
//!     println!("the answer is: {answer}");
//!     Ok(())
//! }
//! ```
//!
//! # Dependency injection
//!
//! The prompt engine never reaches for `stdin` / `stdout` on its own. The public API
//! layer wires [`InputDevice::new_event_stream()`] (a
//! [`crossterm::event::EventStream`]) and [`OutputDevice::new_stdout()`] only when you
//! don't inject your own devices via [`AskOptions::input_device`] and
//! [`AskOptions::output_device`]. The [`test_fixtures`] module provides a mock output
//! device and async input-stream generators, so every prompt scenario - including
//! timeouts, on a paused tokio clock - can be tested without a terminal.
//!
//! # Modules
//!
//! - [`public_api`]: the `ask*` entry points and tracing setup.
//! - [`ask_impl`]: options, answer coercion, and the prompt cycle engine.
//! - [`readline_impl`]: the line reader session, line editing state, masked echo
//!   filter, and the input/output devices.
//! - [`test_fixtures`]: reusable mocks for testing code that prompts.

// Attach sources.
pub mod ask_impl;
pub mod public_api;
pub mod readline_impl;
pub mod test_fixtures;

// Re-export the public API.
pub use ask_impl::*;
pub use public_api::*;
pub use readline_impl::*;

// Type aliases.
use std::{io::Error, pin::Pin, sync::Arc};

use crossterm::event::Event;
use futures_core::Stream;

pub type StdMutex<T> = std::sync::Mutex<T>;

pub type SendRawTerminal = dyn std::io::Write + Send;
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub type CrosstermEventResult = Result<Event, Error>;
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

// Constants.
pub const DEFAULT_QUESTION: &str = "Press \"ENTER\" to continue... ";
pub const MASK_CHAR: char = '*';
