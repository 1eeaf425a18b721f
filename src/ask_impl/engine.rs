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

//! The prompt cycle: ask, read (racing the timeout), coerce, consult the handler,
//! repeat or resolve.

use crate::{Answer, AnswerHandler, AskOptions, HandlerVerdict, LineReader, ReadLineEvent};

/// Everything that can go wrong while asking. Timeout expiry is only an error when
/// [crate::AskOptions::throw_on_timeout] is set; otherwise the prompt resolves with the
/// default answer.
#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The input stream ended before a full line was read. Happens with piped or mock
    /// input, never with a live terminal.
    #[error("input stream closed before a line was read")]
    ClosedInputStream,

    /// The user pressed Ctrl+C.
    #[error("interrupted")]
    Interrupted,

    /// The user pressed Ctrl+D.
    #[error("end of input")]
    Eof,

    #[error("No Answer Timeout ({seconds} seconds)")]
    Timeout { seconds: u64 },

    /// The answer handler failed. Fatal to the invocation; carries the handler's error
    /// unchanged.
    #[error("{0}")]
    Handler(miette::Report),
}

/// Run prompt iterations against `reader` until one of them resolves.
///
/// Resolution rules, in the order they apply per iteration:
/// 1. The timeout (when configured) races the line read. It restarts on every
///    iteration, and only covers waiting for input, never the handler. On expiry:
///    error if `throw_on_timeout`, otherwise the default answer.
/// 2. Ctrl+C / Ctrl+D / a closed input stream end the invocation with an error.
/// 3. The attempt counter advances for every line read, including empty lines that
///    `is_required` rejects without consulting the handler.
/// 4. The handler's verdict: `Accept` resolves with the answer (or the default when
///    the answer is empty); `Replace` resolves with the substitute; `Abandon` resolves
///    with the default immediately; `Reject` asks again, unless the retry limit is
///    reached, in which case the default wins.
///
/// The default answer is the configured string as-is (empty when unconfigured); it is
/// never coerced.
pub async fn run_prompt_cycle(
    options: &AskOptions,
    handler: &mut AnswerHandler,
    reader: &mut LineReader,
) -> Result<Answer, AskError> {
    let default_answer = Answer::Text(options.default_answer.clone().unwrap_or_default());
    let mut attempt: usize = 0;

    loop {
        let read_event = match options.timeout {
            Some(timeout) => {
                tokio::select! {
                    read_result = reader.read_line() => read_result?,
                    _ = tokio::time::sleep(timeout) => {
                        tracing::debug!(?timeout, attempt, "prompt timed out");
                        return match options.throw_on_timeout {
                            true => Err(AskError::Timeout { seconds: timeout.as_secs() }),
                            false => Ok(default_answer),
                        };
                    }
                }
            }
            None => reader.read_line().await?,
        };

        let raw_line = match read_event {
            ReadLineEvent::Line(line) => line,
            ReadLineEvent::Interrupted => return Err(AskError::Interrupted),
            ReadLineEvent::Eof => return Err(AskError::Eof),
        };

        attempt += 1;

        let answer = match options.convert {
            true => Answer::parse(&raw_line),
            false => Answer::Text(raw_line),
        };

        let verdict = if options.is_required && answer.is_empty() {
            HandlerVerdict::Reject
        } else {
            handler(answer.clone(), attempt)
                .await
                .map_err(AskError::Handler)?
        };
        tracing::debug!(attempt, %verdict, "handler verdict");

        match verdict {
            HandlerVerdict::Accept => {
                return Ok(match answer.is_empty() {
                    true => default_answer,
                    false => answer,
                });
            }
            HandlerVerdict::Replace(replacement) => return Ok(replacement),
            HandlerVerdict::Abandon => return Ok(default_answer),
            HandlerVerdict::Reject => {
                if options.limit > 0 && attempt >= options.limit {
                    tracing::debug!(limit = options.limit, "retry limit reached");
                    return Ok(default_answer);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::{Arc, Mutex},
              time::Duration};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{test_fixtures::{gen_input_stream, gen_input_stream_with_delay, keys_for,
                                OutputDeviceExt},
                InputDevice, OutputDevice, RawModeGuard};

    fn reader_for(input: Vec<crate::CrosstermEventResult>) -> LineReader {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        LineReader::new(
            "Question? ".into(),
            false,
            InputDevice {
                resource: gen_input_stream(input),
            },
            output_device,
            RawModeGuard::inactive(),
        )
    }

    fn reader_with_delay(
        input: Vec<crate::CrosstermEventResult>,
        delay: Duration,
    ) -> LineReader {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        LineReader::new(
            "Question? ".into(),
            false,
            InputDevice {
                resource: gen_input_stream_with_delay(input, delay),
            },
            output_device,
            RawModeGuard::inactive(),
        )
    }

    fn accept_all() -> AnswerHandler {
        Box::new(|_answer, _attempt| Box::pin(async { Ok(HandlerVerdict::Accept) }))
    }

    #[tokio::test]
    async fn test_first_answer_is_coerced_and_accepted() {
        let options = AskOptions::default();
        let mut reader = reader_for(keys_for("42\n"));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        assert_eq!(answer, Answer::Int(42));
    }

    #[tokio::test]
    async fn test_convert_can_be_disabled() {
        let options = AskOptions::default().convert(false);
        let mut reader = reader_for(keys_for("42\n"));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        assert_eq!(answer, Answer::Text("42".into()));
    }

    #[tokio::test]
    async fn test_yes_and_no_become_booleans() {
        let options = AskOptions::default();
        let mut reader = reader_for(keys_for("yes\n"));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        assert_eq!(answer, Answer::Bool(true));

        let mut reader = reader_for(keys_for("N\n"));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        assert_eq!(answer, Answer::Bool(false));
    }

    #[tokio::test]
    async fn test_reject_asks_again_with_advancing_attempt_numbers() {
        let attempts_seen = Arc::new(Mutex::new(Vec::<usize>::new()));
        let attempts_clone = attempts_seen.clone();
        let mut handler: AnswerHandler = Box::new(move |answer, attempt| {
            attempts_clone.lock().unwrap().push(attempt);
            Box::pin(async move {
                Ok(match answer {
                    Answer::Text(text) if text == "good" => HandlerVerdict::Accept,
                    _ => HandlerVerdict::Reject,
                })
            })
        });

        let options = AskOptions::default();
        let mut reader = reader_for(keys_for("bad\nworse\ngood\n"));
        let answer = run_prompt_cycle(&options, &mut handler, &mut reader)
            .await
            .unwrap();

        assert_eq!(answer, Answer::Text("good".into()));
        assert_eq!(*attempts_seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_retry_limit_resolves_with_the_default() {
        let call_count = Arc::new(Mutex::new(0));
        let call_count_clone = call_count.clone();
        let mut handler: AnswerHandler = Box::new(move |_answer, _attempt| {
            *call_count_clone.lock().unwrap() += 1;
            Box::pin(async { Ok(HandlerVerdict::Reject) })
        });

        let options = AskOptions::default().limit(3).default_answer("fallback");
        // Four answers queued; only three attempts should happen.
        let mut reader = reader_for(keys_for("a\nb\nc\nd\n"));
        let answer = run_prompt_cycle(&options, &mut handler, &mut reader)
            .await
            .unwrap();

        assert_eq!(answer, Answer::Text("fallback".into()));
        assert_eq!(*call_count.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_replace_substitutes_the_final_answer() {
        let mut handler: AnswerHandler = Box::new(|_answer, _attempt| {
            Box::pin(async { Ok(HandlerVerdict::Replace(Answer::Int(99))) })
        });

        let options = AskOptions::default();
        let mut reader = reader_for(keys_for("anything\n"));
        let answer = run_prompt_cycle(&options, &mut handler, &mut reader)
            .await
            .unwrap();

        assert_eq!(answer, Answer::Int(99));
    }

    #[tokio::test]
    async fn test_abandon_resolves_with_the_default_immediately() {
        let call_count = Arc::new(Mutex::new(0));
        let call_count_clone = call_count.clone();
        let mut handler: AnswerHandler = Box::new(move |_answer, _attempt| {
            *call_count_clone.lock().unwrap() += 1;
            Box::pin(async { Ok(HandlerVerdict::Abandon) })
        });

        let options = AskOptions::default().default_answer("gave up");
        // More answers remain in the stream; none of them should be consulted.
        let mut reader = reader_for(keys_for("first\nsecond\n"));
        let answer = run_prompt_cycle(&options, &mut handler, &mut reader)
            .await
            .unwrap();

        assert_eq!(answer, Answer::Text("gave up".into()));
        assert_eq!(*call_count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_handler_error_propagates_unchanged() {
        let mut handler: AnswerHandler = Box::new(|_answer, _attempt| {
            Box::pin(async { Err(miette::miette!("the database is on fire")) })
        });

        let options = AskOptions::default();
        let mut reader = reader_for(keys_for("whatever\n"));
        let result = run_prompt_cycle(&options, &mut handler, &mut reader).await;

        match result {
            Err(AskError::Handler(report)) => {
                assert_eq!(report.to_string(), "the database is on fire");
            }
            other => panic!("expected handler error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_is_required_skips_the_handler_for_empty_answers() {
        let attempts_seen = Arc::new(Mutex::new(Vec::<usize>::new()));
        let attempts_clone = attempts_seen.clone();
        let mut handler: AnswerHandler = Box::new(move |_answer, attempt| {
            attempts_clone.lock().unwrap().push(attempt);
            Box::pin(async { Ok(HandlerVerdict::Accept) })
        });

        let options = AskOptions::default().is_required(true);
        // Two empty lines, then a real answer. Empty lines still consume attempts.
        let mut reader = reader_for(keys_for("\n\nok\n"));
        let answer = run_prompt_cycle(&options, &mut handler, &mut reader)
            .await
            .unwrap();

        assert_eq!(answer, Answer::Text("ok".into()));
        assert_eq!(*attempts_seen.lock().unwrap(), vec![3]);
    }

    #[tokio::test]
    async fn test_is_required_counts_empty_answers_against_the_limit() {
        let options = AskOptions::default()
            .is_required(true)
            .limit(2)
            .default_answer("none");
        let mut reader = reader_for(keys_for("\n\nignored\n"));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        assert_eq!(answer, Answer::Text("none".into()));
    }

    #[tokio::test]
    async fn test_accepted_empty_answer_becomes_the_default() {
        let options = AskOptions::default().default_answer("y");
        let mut reader = reader_for(keys_for("\n"));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        // The default is substituted raw, never coerced.
        assert_eq!(answer, Answer::Text("y".into()));
    }

    #[tokio::test]
    async fn test_ctrl_c_fails_the_prompt() {
        let options = AskOptions::default();
        let mut reader = reader_for(vec![crate::test_fixtures::ctrl('c')]);
        let result = run_prompt_cycle(&options, &mut accept_all(), &mut reader).await;
        assert!(matches!(result, Err(AskError::Interrupted)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_resolves_with_the_default() {
        let options = AskOptions::default()
            .timeout(Duration::from_secs(1))
            .default_answer("timed out");
        let mut reader =
            reader_with_delay(keys_for("late\n"), Duration::from_secs(3600));
        let answer = run_prompt_cycle(&options, &mut accept_all(), &mut reader)
            .await
            .unwrap();
        assert_eq!(answer, Answer::Text("timed out".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_can_fail_instead() {
        let options = AskOptions::default()
            .timeout(Duration::from_secs(1))
            .throw_on_timeout(true);
        let mut reader =
            reader_with_delay(keys_for("late\n"), Duration::from_secs(3600));
        let result = run_prompt_cycle(&options, &mut accept_all(), &mut reader).await;

        match result {
            Err(error @ AskError::Timeout { seconds: 1 }) => {
                assert_eq!(error.to_string(), "No Answer Timeout (1 seconds)");
            }
            other => panic!("expected timeout error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_restarts_on_every_iteration() {
        let mut handler: AnswerHandler = Box::new(|_answer, attempt| {
            Box::pin(async move {
                Ok(match attempt {
                    1 => HandlerVerdict::Reject,
                    _ => HandlerVerdict::Accept,
                })
            })
        });

        // Each iteration reads one key plus Enter at 600ms apiece (1.2s per line),
        // under the 2s timeout. A non-restarting timer would expire at 2s, in the
        // middle of the second iteration.
        let options = AskOptions::default()
            .timeout(Duration::from_secs(2))
            .default_answer("expired");
        let mut reader =
            reader_with_delay(keys_for("a\nb\n"), Duration::from_millis(600));
        let answer = run_prompt_cycle(&options, &mut handler, &mut reader)
            .await
            .unwrap();

        assert_eq!(answer, Answer::Text("b".into()));
    }
}
