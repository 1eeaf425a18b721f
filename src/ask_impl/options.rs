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

//! Configuration for one prompt invocation, and the answer-handler contract.

use std::{future::Future, pin::Pin, time::Duration};

use crate::{ask_impl::answer::normalize_trailing_space, Answer, InputDevice, OutputDevice,
            DEFAULT_QUESTION};

/// What the answer handler decided about one answer.
#[derive(Debug, Clone, PartialEq, strum_macros::Display)]
pub enum HandlerVerdict {
    /// Accept the current answer as the final one. Accepting an empty answer resolves
    /// with the configured default instead.
    Accept,
    /// Accept, but substitute this value as the final answer.
    Replace(Answer),
    /// Reject the answer. The question is asked again if attempts remain.
    Reject,
    /// Stop asking immediately, even if attempts remain. The prompt resolves with the
    /// configured default.
    Abandon,
}

/// The boxed future an [AnswerHandler] returns. A handler error is fatal to the
/// invocation: it propagates to the caller unchanged, with no retry.
pub type HandlerFuture = Pin<Box<dyn Future<Output = miette::Result<HandlerVerdict>> + Send>>;

/// Caller-supplied function deciding accept / reject / abandon for each answer. Called
/// with the (coerced) answer and the 1-based attempt number. Handlers for successive
/// attempts run strictly sequentially: attempt N+1 never begins before attempt N's
/// verdict has been interpreted.
///
/// Most callers never name this type; they use [AskOptions::on_answer] (sync) or
/// [AskOptions::on_answer_async] instead.
pub type AnswerHandler = Box<dyn FnMut(Answer, usize) -> HandlerFuture + Send>;

/// Configuration for one prompt invocation. Build it fluently, then hand it to
/// [crate::ask_with] (or [crate::ask_with_handler] if the handler is supplied
/// separately - an explicit handler argument always wins over [AskOptions::on_answer]).
///
/// ```no_run
/// use ask_async::AskOptions;
///
/// let options = AskOptions::new("Delete everything?")
///     .is_required(true)
///     .limit(3)
///     .timeout_secs(10)
///     .default_answer("n");
/// ```
pub struct AskOptions {
    /// The question text. Normalized with a trailing space (unless
    /// [AskOptions::trailing_space] disables that) when the invocation starts.
    pub question: String,

    /// Maximum number of prompt cycles. `0` means unlimited retries.
    pub limit: usize,

    /// Auto-reject empty answers without invoking the handler.
    pub is_required: bool,

    /// Coerce raw input into [Answer::Int] / [Answer::Bool] where it exactly matches.
    /// Defaults to `true`.
    pub convert: bool,

    /// Echo typed characters as [crate::MASK_CHAR]. Only effective when the output
    /// device is an interactive terminal.
    pub hidden: bool,

    /// Countdown racing against each prompt iteration. The clock restarts on every new
    /// iteration. [None] means wait forever.
    pub timeout: Option<Duration>,

    /// What the prompt resolves to on timeout, retry exhaustion, abandonment, or an
    /// accepted empty answer. Defaults to the empty string.
    pub default_answer: Option<String>,

    /// Fail with [crate::AskError::Timeout] on expiry instead of resolving with the
    /// default answer.
    pub throw_on_timeout: bool,

    /// Apply the trailing-space normalization to the question. Defaults to `true`.
    pub trailing_space: bool,

    /// Stored answer handler. An explicit handler passed to
    /// [crate::ask_with_handler] overrides this.
    pub on_answer: Option<AnswerHandler>,

    /// Injected input device. [None] wires up a crossterm event stream over `stdin`.
    pub input_device: Option<InputDevice>,

    /// Injected output device. [None] wires up `stdout`.
    pub output_device: Option<OutputDevice>,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            question: DEFAULT_QUESTION.to_string(),
            limit: 0,
            is_required: false,
            convert: true,
            hidden: false,
            timeout: None,
            default_answer: None,
            throw_on_timeout: false,
            trailing_space: true,
            on_answer: None,
            input_device: None,
            output_device: None,
        }
    }
}

impl AskOptions {
    pub fn new(question: impl AsRef<str>) -> Self {
        Self {
            question: question.as_ref().to_string(),
            ..Self::default()
        }
    }

    /// The question as it will be displayed, after trailing-space normalization.
    pub fn effective_question(&self) -> String {
        if self.trailing_space {
            normalize_trailing_space(&self.question)
        } else {
            self.question.clone()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn is_required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (timeout > Duration::ZERO).then_some(timeout);
        self
    }

    pub fn timeout_secs(self, seconds: u64) -> Self {
        self.timeout(Duration::from_secs(seconds))
    }

    pub fn default_answer(mut self, default_answer: impl AsRef<str>) -> Self {
        self.default_answer = Some(default_answer.as_ref().to_string());
        self
    }

    pub fn throw_on_timeout(mut self, throw_on_timeout: bool) -> Self {
        self.throw_on_timeout = throw_on_timeout;
        self
    }

    pub fn trailing_space(mut self, trailing_space: bool) -> Self {
        self.trailing_space = trailing_space;
        self
    }

    /// Store a synchronous answer handler.
    pub fn on_answer<F>(mut self, mut handler_fn: F) -> Self
    where
        F: FnMut(Answer, usize) -> miette::Result<HandlerVerdict> + Send + 'static,
    {
        self.on_answer = Some(Box::new(move |answer, attempt| {
            let verdict = handler_fn(answer, attempt);
            Box::pin(async move { verdict })
        }));
        self
    }

    /// Store an asynchronous answer handler. The engine awaits its result before
    /// starting the next attempt.
    pub fn on_answer_async<F, Fut>(mut self, mut handler_fn: F) -> Self
    where
        F: FnMut(Answer, usize) -> Fut + Send + 'static,
        Fut: Future<Output = miette::Result<HandlerVerdict>> + Send + 'static,
    {
        self.on_answer = Some(Box::new(move |answer, attempt| {
            Box::pin(handler_fn(answer, attempt))
        }));
        self
    }

    /// Convenience alias for the common yes/no validation shape: `true` accepts the
    /// answer as-is, `false` rejects it (ask again).
    pub fn validate<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&Answer) -> bool + Send + 'static,
    {
        self.on_answer(move |answer, _attempt| {
            Ok(match predicate(&answer) {
                true => HandlerVerdict::Accept,
                false => HandlerVerdict::Reject,
            })
        })
    }

    pub fn input_device(mut self, input_device: InputDevice) -> Self {
        self.input_device = Some(input_device);
        self
    }

    pub fn output_device(mut self, output_device: OutputDevice) -> Self {
        self.output_device = Some(output_device);
        self
    }
}
