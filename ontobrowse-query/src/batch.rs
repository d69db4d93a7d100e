// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Sequential batch execution
//!
//! Batches run strictly one after another so a single page request never
//! has more than one query in flight against the store. Each batch yields
//! its own `Result`; a failed batch does not stop the ones after it.

use std::future::Future;
use std::time::Instant;
use tracing::debug;

/// Split `items` into chunks of at most `size` (a size of 0 is treated as 1).
pub fn chunked<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

/// Outcome of one batch
#[derive(Debug)]
pub struct BatchOutcome<'a, T, R, E> {
    pub index: usize,
    pub items: &'a [T],
    pub result: Result<R, E>,
}

/// Run `op` over each chunk of `items`, awaiting each before starting the next.
pub async fn run_sequential<'a, T, R, E, F, Fut>(
    items: &'a [T],
    size: usize,
    mut op: F,
) -> Vec<BatchOutcome<'a, T, R, E>>
where
    F: FnMut(usize, &'a [T]) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let mut outcomes = Vec::with_capacity(items.len() / size.max(1) + 1);

    for (index, batch) in chunked(items, size).enumerate() {
        let start = Instant::now();
        let result = op(index, batch).await;
        debug!(
            "Batch {} ({} items) finished in {}ms, ok={}",
            index,
            batch.len(),
            start.elapsed().as_millis(),
            result.is_ok()
        );
        outcomes.push(BatchOutcome {
            index,
            items: batch,
            result,
        });
    }

    outcomes
}
