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

//! A typed answer and the conservative coercion rules that produce one from a raw line
//! of input.

/// The resolved value of one prompt invocation. Coercion (when enabled via
/// [crate::AskOptions::convert]) is deliberately conservative: it never fails, it only
/// recognizes exact integers and a handful of yes/no spellings, and everything else
/// stays [Answer::Text] unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl Answer {
    /// Coerce one raw line of input into a typed answer.
    ///
    /// - If the string, reparsed as a base-10 integer and re-stringified, is exactly
    ///   equal to the original, it is an [Answer::Int]. This means `"042"` and `"+5"`
    ///   stay text.
    /// - `"y"` / `"Y"` / `"yes"` (any case) become `true`; `"n"` / `"N"` / `"no"` (any
    ///   case) become `false`.
    /// - Anything else is returned unchanged as [Answer::Text].
    pub fn parse(raw: &str) -> Answer {
        if let Ok(number) = raw.parse::<i64>() {
            if number.to_string() == raw {
                return Answer::Int(number);
            }
        }

        match yes_no_boolean(raw) {
            Some(flag) => Answer::Bool(flag),
            None => Answer::Text(raw.to_string()),
        }
    }

    /// An empty-text answer. This is what `is_required` rejects, and what retry
    /// exhaustion resolves to when no default answer is configured.
    pub fn is_empty(&self) -> bool {
        matches!(self, Answer::Text(text) if text.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Text(text) => write!(f, "{text}"),
            Answer::Int(number) => write!(f, "{number}"),
            Answer::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self { Answer::Text(text.to_string()) }
}

impl From<String> for Answer {
    fn from(text: String) -> Self { Answer::Text(text) }
}

/// `Y`/`N` single characters, and the words `yes` / `no`, case insensitive. Everything
/// else is [None].
fn yes_no_boolean(raw: &str) -> Option<bool> {
    match raw.len() {
        1 => match raw.chars().next()?.to_ascii_uppercase() {
            'Y' => Some(true),
            'N' => Some(false),
            _ => None,
        },
        2 if raw.eq_ignore_ascii_case("no") => Some(false),
        3 if raw.eq_ignore_ascii_case("yes") => Some(true),
        _ => None,
    }
}

/// Append a single space to the question unless it already ends in a space or a newline
/// variant. Questions read better with a gap between them and the echoed answer.
pub fn normalize_trailing_space(question: &str) -> String {
    if question.ends_with([' ', '\n', '\r']) {
        question.to_string()
    } else {
        format!("{question} ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(Answer::parse("42"), Answer::Int(42));
        assert_eq!(Answer::parse("-7"), Answer::Int(-7));
        assert_eq!(Answer::parse("0"), Answer::Int(0));
    }

    #[test]
    fn test_parse_integer_requires_exact_round_trip() {
        assert_eq!(Answer::parse("042"), Answer::Text("042".into()));
        assert_eq!(Answer::parse("+5"), Answer::Text("+5".into()));
        assert_eq!(Answer::parse("42abc"), Answer::Text("42abc".into()));
        assert_eq!(Answer::parse("4.2"), Answer::Text("4.2".into()));
    }

    #[test]
    fn test_parse_yes_no() {
        for yes in ["y", "Y", "yes", "YES", "Yes"] {
            assert_eq!(Answer::parse(yes), Answer::Bool(true), "{yes}");
        }
        for no in ["n", "N", "no", "NO", "No"] {
            assert_eq!(Answer::parse(no), Answer::Bool(false), "{no}");
        }
    }

    #[test]
    fn test_parse_leaves_everything_else_alone() {
        assert_eq!(Answer::parse("yep"), Answer::Text("yep".into()));
        assert_eq!(Answer::parse("nope"), Answer::Text("nope".into()));
        assert_eq!(Answer::parse(""), Answer::Text("".into()));
        assert_eq!(Answer::parse("God"), Answer::Text("God".into()));
    }

    #[test]
    fn test_is_empty() {
        assert!(Answer::Text("".into()).is_empty());
        assert!(!Answer::Text("x".into()).is_empty());
        assert!(!Answer::Int(0).is_empty());
        assert!(!Answer::Bool(false).is_empty());
    }

    #[test]
    fn test_normalize_trailing_space() {
        assert_eq!(normalize_trailing_space("is it?"), "is it? ");
        assert_eq!(normalize_trailing_space("is it? "), "is it? ");
        assert_eq!(normalize_trailing_space("is it?\n"), "is it?\n");
        assert_eq!(normalize_trailing_space("is it?\r"), "is it?\r");
    }
}
