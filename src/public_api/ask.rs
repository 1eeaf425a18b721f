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

//! The `ask*` entry points. This layer does the wiring the engine refuses to do
//! itself: pick real or injected devices, decide whether raw mode is appropriate, and
//! make sure the terminal is restored however the prompt ends.

use crate::{run_prompt_cycle, Answer, AnswerHandler, AskError, AskOptions, HandlerVerdict,
            InputDevice, LineReader, OutputDevice, RawModeGuard};

/// Ask `question`, accept the first line typed, resolve with it (coerced).
///
/// Equivalent to [ask_with] with default options. The question gets a trailing space if
/// it doesn't already end in whitespace.
pub async fn ask(question: impl AsRef<str>) -> Result<Answer, AskError> {
    ask_with(AskOptions::new(question)).await
}

/// Ask with full [AskOptions] control. Uses the stored [AskOptions::on_answer] handler,
/// or accepts every answer when none is stored.
pub async fn ask_with(mut options: AskOptions) -> Result<Answer, AskError> {
    let handler = options.on_answer.take().unwrap_or_else(accept_all_handler);
    ask_with_handler(options, handler).await
}

/// Ask with an explicitly supplied handler. The explicit handler always wins: any
/// handler stored in [AskOptions::on_answer] is ignored.
pub async fn ask_with_handler(
    mut options: AskOptions,
    mut handler: AnswerHandler,
) -> Result<Answer, AskError> {
    let question = options.effective_question();

    // Raw mode belongs to the real terminal only. When the caller injects an output
    // device they own the terminal state, whatever that device happens to be.
    let wire_real_terminal = options.output_device.is_none();
    let output_device = options
        .output_device
        .take()
        .unwrap_or_else(OutputDevice::new_stdout);
    let input_device = options
        .input_device
        .take()
        .unwrap_or_else(InputDevice::new_event_stream);

    let raw_mode_guard = match wire_real_terminal && output_device.is_interactive {
        true => RawModeGuard::try_enable()?,
        false => RawModeGuard::inactive(),
    };

    tracing::debug!(
        question = %question.trim_end(),
        raw_mode = raw_mode_guard.is_active(),
        "prompt starting"
    );

    let mut reader = LineReader::new(
        question,
        options.hidden,
        input_device,
        output_device,
        raw_mode_guard,
    );

    let result = run_prompt_cycle(&options, &mut handler, &mut reader).await;

    // The reader's Drop would do this too; closing here restores the terminal before
    // the caller sees the result.
    reader.close();

    result
}

fn accept_all_handler() -> AnswerHandler {
    Box::new(|_answer, _attempt| Box::pin(async { Ok(HandlerVerdict::Accept) }))
}
