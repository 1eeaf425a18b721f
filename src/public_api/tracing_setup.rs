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

//! Optional tracing subscriber setup for binaries that use this crate. Libraries
//! should not install a subscriber; the demos call this from `main`.

use tracing_subscriber::EnvFilter;

/// Where the subscriber writes. A prompt owns stdout while it is running, so stderr is
/// the sensible default for anything that logs while a question is pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, strum_macros::Display)]
pub enum DisplayPreference {
    Stdout,
    #[default]
    Stderr,
}

/// Install the global tracing subscriber. Filtering comes from `RUST_LOG` when set,
/// otherwise `info`. Fails if a subscriber is already installed.
pub fn try_initialize_global_subscriber(preference: DisplayPreference) -> miette::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .compact();

    match preference {
        DisplayPreference::Stdout => builder.with_writer(std::io::stdout).try_init(),
        DisplayPreference::Stderr => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(|error| miette::miette!("could not install tracing subscriber: {error}"))?;

    tracing::debug!(%preference, "tracing initialized");
    Ok(())
}

/// `RUST_LOG`-independent convenience used by tests that want a subscriber without
/// caring whether one is already installed.
pub fn initialize_for_test() {
    let _unused = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .without_time()
        .with_test_writer()
        .try_init();
}
