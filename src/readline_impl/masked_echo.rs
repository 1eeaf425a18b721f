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

//! Masked ("hidden") character echo for password-style input.
//!
//! Masking is purely a terminal rendering concern. The line buffer that the reader
//! resolves with is never touched; only what the user sees changes. Every text fragment
//! the line editor would write to the terminal flows through [EchoFilter], which either
//! passes it through ([EchoFilter::Visible]) or re-renders it as mask characters
//! ([EchoFilter::Masked]).

use std::io::{self, Write};

use crossterm::{cursor::MoveLeft,
                terminal::{Clear, ClearType},
                QueueableCommand};

use crate::{SendRawTerminal, MASK_CHAR};

/// Session-scoped echo policy. Built once per prompt invocation, never shared across
/// invocations.
pub enum EchoFilter {
    Visible,
    Masked(MaskFilter),
}

impl EchoFilter {
    pub fn new(masked: bool, question: &str) -> Self {
        match masked {
            true => EchoFilter::Masked(MaskFilter::new(question)),
            false => EchoFilter::Visible,
        }
    }

    pub fn is_masked(&self) -> bool { matches!(self, EchoFilter::Masked(_)) }

    /// Write one text fragment, `line_len` being the current buffered line length in
    /// graphemes.
    pub fn write_fragment(
        &mut self,
        fragment: &str,
        line_len: usize,
        term: &mut SendRawTerminal,
    ) -> io::Result<()> {
        match self {
            EchoFilter::Visible => term.write_all(fragment.as_bytes()),
            EchoFilter::Masked(mask_filter) => {
                mask_filter.write_fragment(fragment, line_len, term)
            }
        }
    }
}

/// Re-renders typed characters as [MASK_CHAR]. The state is two integers' worth:
/// whether any fragment has been written yet, and the buffered line length seen by the
/// previous fragment.
pub struct MaskFilter {
    question: String,
    prev_len: usize,
    first: bool,
}

impl MaskFilter {
    pub fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
            prev_len: 0,
            first: true,
        }
    }

    /// Decide what (if anything) reaches the terminal for this fragment:
    ///
    /// 1. The very first fragment, and every newline variant, pass through unmodified.
    ///    This preserves the initial question text and the final line break.
    /// 2. A fragment that begins with the question text is a full-line redraw
    ///    (backspace / delete): re-emit the question followed by one mask character per
    ///    buffered character.
    /// 3. Otherwise compare the buffered line length to the previously recorded one:
    ///    grew by one → one mask character; shrank by one → move the cursor back one
    ///    column and clear to the end of the line; any other delta → emit nothing
    ///    (conservative no-op for multi-character paste and the like).
    pub fn write_fragment(
        &mut self,
        fragment: &str,
        line_len: usize,
        term: &mut SendRawTerminal,
    ) -> io::Result<()> {
        if self.first || is_newline(fragment) {
            self.first = false;
            return term.write_all(fragment.as_bytes());
        }

        if fragment.starts_with(self.question.as_str()) {
            // Full-line redraw, eg after backspace or delete.
            write!(term, "{}", self.question)?;
            write!(term, "{}", String::from(MASK_CHAR).repeat(line_len))?;
        } else {
            let diff = line_len as isize - self.prev_len as isize;
            if diff == 1 {
                write!(term, "{MASK_CHAR}")?;
            } else if diff == -1 {
                term.queue(MoveLeft(1))?;
                term.queue(Clear(ClearType::UntilNewLine))?;
            }
        }

        self.prev_len = line_len;
        Ok(())
    }
}

fn is_newline(fragment: &str) -> bool { matches!(fragment, "\n" | "\r\n" | "\r") }
