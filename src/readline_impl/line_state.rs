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

//! Per-line editing state: the buffered line, the cursor, and the translation of key
//! events into terminal output (routed through the echo filter).

use crossterm::{cursor::{MoveLeft, MoveRight, MoveToColumn},
                event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
                terminal::{Clear, ClearType},
                QueueableCommand};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{EchoFilter, SendRawTerminal};

/// What one key event did to the line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineStateControl {
    /// Keep reading.
    Continue,
    /// The user pressed Enter. Carries the buffered line.
    Resolved(String),
    /// Ctrl+C.
    Interrupted,
    /// Ctrl+D.
    Eof,
}

/// One line's worth of editing state. Created per prompt iteration; resolving, Ctrl+C
/// and Ctrl+D all consume it.
///
/// Rendering rules:
/// - Non-interactive output (piped, captured): the question is written once and nothing
///   else is ever echoed. Tests rely on the captured output being exactly the question.
/// - Interactive output: characters echo as typed (or masked), edits redraw the line in
///   place.
pub struct LineState {
    line: String,
    /// Grapheme-cluster index into `line`, not a byte offset.
    cursor: usize,
    question: String,
    echo: EchoFilter,
    is_interactive: bool,
    /// Raw mode terminals need `\r\n`; cooked mode gets `\n`.
    uses_crlf: bool,
}

impl LineState {
    pub fn new(question: &str, echo: EchoFilter, is_interactive: bool, uses_crlf: bool) -> Self {
        Self {
            line: String::new(),
            cursor: 0,
            question: question.to_string(),
            echo,
            is_interactive,
            uses_crlf,
        }
    }

    pub fn line(&self) -> &str { &self.line }

    fn grapheme_count(&self) -> usize { self.line.graphemes(true).count() }

    /// Byte offset of the grapheme boundary at `index`.
    fn byte_offset(&self, index: usize) -> usize {
        self.line
            .grapheme_indices(true)
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.line.len())
    }

    /// Display columns occupied by the graphemes from `index` to the end of the line.
    fn tail_width(&self, index: usize) -> u16 {
        self.line[self.byte_offset(index)..].width() as u16
    }

    /// Write the question. Called once per iteration, before any key event.
    pub fn render_question(&mut self, term: &mut SendRawTerminal) -> std::io::Result<()> {
        let question = self.question.clone();
        self.echo.write_fragment(&question, 0, term)?;
        term.flush()
    }

    /// Apply one key event: update the buffer, render the consequence, and report
    /// whether the line resolved.
    pub fn apply_event(
        &mut self,
        event: &Event,
        term: &mut SendRawTerminal,
    ) -> std::io::Result<LineStateControl> {
        let Event::Key(key_event) = event else {
            return Ok(LineStateControl::Continue);
        };
        // Windows delivers both Press and Release.
        if key_event.kind == KeyEventKind::Release {
            return Ok(LineStateControl::Continue);
        }

        let control = self.apply_key_event(key_event, term)?;
        term.flush()?;
        Ok(control)
    }

    fn apply_key_event(
        &mut self,
        key_event: &KeyEvent,
        term: &mut SendRawTerminal,
    ) -> std::io::Result<LineStateControl> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            match key_event.code {
                KeyCode::Char('c') => return Ok(LineStateControl::Interrupted),
                KeyCode::Char('d') => return Ok(LineStateControl::Eof),
                _ => return Ok(LineStateControl::Continue),
            }
        }

        match key_event.code {
            KeyCode::Enter => {
                if self.is_interactive {
                    let newline = if self.uses_crlf { "\r\n" } else { "\n" };
                    let line_len = self.grapheme_count();
                    self.echo.write_fragment(newline, line_len, term)?;
                }
                Ok(LineStateControl::Resolved(std::mem::take(&mut self.line)))
            }
            KeyCode::Char(character) => {
                self.insert(character, term)?;
                Ok(LineStateControl::Continue)
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let offset = self.byte_offset(self.cursor - 1);
                    let end = self.byte_offset(self.cursor);
                    self.line.replace_range(offset..end, "");
                    self.cursor -= 1;
                    self.redraw(term)?;
                }
                Ok(LineStateControl::Continue)
            }
            KeyCode::Delete => {
                if self.cursor < self.grapheme_count() {
                    let offset = self.byte_offset(self.cursor);
                    let end = self.byte_offset(self.cursor + 1);
                    self.line.replace_range(offset..end, "");
                    self.redraw(term)?;
                }
                Ok(LineStateControl::Continue)
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    let width = self.line[self.byte_offset(self.cursor - 1)
                        ..self.byte_offset(self.cursor)]
                        .width() as u16;
                    self.cursor -= 1;
                    self.move_cursor_visibly(term, |t| t.queue(MoveLeft(width.max(1))))?;
                }
                Ok(LineStateControl::Continue)
            }
            KeyCode::Right => {
                if self.cursor < self.grapheme_count() {
                    let width = self.line[self.byte_offset(self.cursor)
                        ..self.byte_offset(self.cursor + 1)]
                        .width() as u16;
                    self.cursor += 1;
                    self.move_cursor_visibly(term, |t| t.queue(MoveRight(width.max(1))))?;
                }
                Ok(LineStateControl::Continue)
            }
            KeyCode::Home => {
                if self.cursor > 0 {
                    let width = self.tail_width(0) - self.tail_width(self.cursor);
                    self.cursor = 0;
                    if width > 0 {
                        self.move_cursor_visibly(term, |t| t.queue(MoveLeft(width)))?;
                    }
                }
                Ok(LineStateControl::Continue)
            }
            KeyCode::End => {
                let end = self.grapheme_count();
                if self.cursor < end {
                    let width = self.tail_width(self.cursor);
                    self.cursor = end;
                    if width > 0 {
                        self.move_cursor_visibly(term, |t| t.queue(MoveRight(width)))?;
                    }
                }
                Ok(LineStateControl::Continue)
            }
            _ => Ok(LineStateControl::Continue),
        }
    }

    fn insert(
        &mut self,
        character: char,
        term: &mut SendRawTerminal,
    ) -> std::io::Result<()> {
        let at_end = self.cursor == self.grapheme_count();
        let offset = self.byte_offset(self.cursor);
        self.line.insert(offset, character);
        self.cursor += 1;

        if !self.is_interactive {
            return Ok(());
        }
        if at_end {
            // Fast path: the character echoes (possibly masked) at the cursor.
            let line_len = self.grapheme_count();
            let fragment = character.to_string();
            self.echo.write_fragment(&fragment, line_len, term)
        } else {
            self.redraw(term)
        }
    }

    /// Clear the prompt line and rewrite question + line, then put the cursor back
    /// where editing left it.
    fn redraw(&mut self, term: &mut SendRawTerminal) -> std::io::Result<()> {
        if !self.is_interactive {
            return Ok(());
        }
        term.queue(MoveToColumn(0))?;
        term.queue(Clear(ClearType::UntilNewLine))?;

        let fragment = format!("{}{}", self.question, self.line);
        let line_len = self.grapheme_count();
        self.echo.write_fragment(&fragment, line_len, term)?;

        // Masked output renders one column per grapheme; visible output renders true
        // widths.
        let back = if self.echo.is_masked() {
            (line_len - self.cursor) as u16
        } else {
            self.tail_width(self.cursor)
        };
        if back > 0 {
            term.queue(MoveLeft(back))?;
        }
        Ok(())
    }

    fn move_cursor_visibly<F>(
        &mut self,
        term: &mut SendRawTerminal,
        queue_fn: F,
    ) -> std::io::Result<()>
    where
        F: FnOnce(&mut SendRawTerminal) -> std::io::Result<&mut SendRawTerminal>,
    {
        if self.is_interactive {
            queue_fn(term)?;
        }
        Ok(())
    }
}
