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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::CrosstermEventResult;

/// One key press with no modifiers.
pub fn key(code: KeyCode) -> CrosstermEventResult {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

/// One Ctrl+`character` key press.
pub fn ctrl(character: char) -> CrosstermEventResult {
    Ok(Event::Key(KeyEvent::new(
        KeyCode::Char(character),
        KeyModifiers::CONTROL,
    )))
}

/// Key presses that type `text`, with `'\n'` translated to Enter. So `"hi\n"` is
/// `h`, `i`, Enter.
pub fn keys_for(text: &str) -> Vec<CrosstermEventResult> {
    text.chars()
        .map(|character| match character {
            '\n' => key(KeyCode::Enter),
            other => key(KeyCode::Char(other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_keys_for_translates_newline_to_enter() {
        let events = keys_for("a\n");
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].as_ref().unwrap(),
            &Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE))
        );
        assert_eq!(
            events[1].as_ref().unwrap(),
            &Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        );
    }
}
