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

use std::time::Duration;

use async_stream::stream;

use crate::{CrosstermEventResult, InputDevice, PinnedInputStream};

/// Turn a `Vec` of items into a pinned async stream that yields them in order, then
/// ends.
pub fn gen_input_stream<T>(items: Vec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in items {
            yield item;
        }
    };
    Box::pin(it)
}

/// Like [gen_input_stream], but sleeps for `delay` before yielding each item. Combine
/// with `#[tokio::test(start_paused = true)]` to drive timeout races deterministically:
/// the paused clock auto-advances, so the test runs instantly regardless of the delays.
pub fn gen_input_stream_with_delay<T>(items: Vec<T>, delay: Duration) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in items {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// Mock constructors for [InputDevice].
pub trait InputDeviceExt {
    fn new_mock(events: Vec<CrosstermEventResult>) -> InputDevice;

    fn new_mock_with_delay(events: Vec<CrosstermEventResult>, delay: Duration) -> InputDevice;
}

impl InputDeviceExt for InputDevice {
    fn new_mock(events: Vec<CrosstermEventResult>) -> InputDevice {
        InputDevice {
            resource: gen_input_stream(events),
        }
    }

    fn new_mock_with_delay(
        events: Vec<CrosstermEventResult>,
        delay: Duration,
    ) -> InputDevice {
        InputDevice {
            resource: gen_input_stream_with_delay(events, delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_gen_input_stream_yields_in_order() {
        let mut stream = gen_input_stream(vec![1, 2, 3]);
        let mut collected = vec![];
        while let Some(item) = stream.next().await {
            collected.push(item);
        }
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gen_input_stream_with_delay_waits_between_items() {
        let start = tokio::time::Instant::now();
        let mut stream =
            gen_input_stream_with_delay(vec![1, 2], Duration::from_millis(100));

        stream.next().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        stream.next().await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }
}
