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

//! Run with `cargo run --example play`. Asks a required yes/no question with up to ten
//! attempts; anything other than a "yes" is rejected with a nudge.

use ask_async::{ask_with, Answer, AskOptions, DisplayPreference, HandlerVerdict,
                try_initialize_global_subscriber};
use miette::IntoDiagnostic;

#[tokio::main]
async fn main() -> miette::Result<()> {
    try_initialize_global_subscriber(DisplayPreference::Stderr)?;

    let options = AskOptions::new("Do you?")
        .limit(10)
        .is_required(true)
        .default_answer("Yes")
        .on_answer(|answer, _attempt| {
            Ok(match answer {
                Answer::Bool(true) => HandlerVerdict::Accept,
                _ => {
                    println!("nope");
                    HandlerVerdict::Reject
                }
            })
        });

    let answer = ask_with(options).await.into_diagnostic()?;
    println!("the answer is: {answer}");

    Ok(())
}
