//! Ordered fallback over candidate values.

use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
/// First candidate that was accepted, with the attempt result.
pub struct ResolvedCandidate<T> {
    pub index: usize,
    pub value: T,
}

impl<T> ResolvedCandidate<T> {
    pub fn attempts(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Every candidate was rejected. `last_error` is `None` only for an empty list.
pub struct CandidatesExhausted<E> {
    pub attempts: usize,
    pub last_error: Option<E>,
}

/// Tries `attempt` on each candidate strictly in order and stops at the first success.
pub async fn resolve_ordered_candidates<C, T, E, F, Fut>(
    candidates: &[C],
    mut attempt: F,
) -> Result<ResolvedCandidate<T>, CandidatesExhausted<E>>
where
    F: FnMut(usize, &C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;
    for (index, candidate) in candidates.iter().enumerate() {
        match attempt(index, candidate).await {
            Ok(value) => return Ok(ResolvedCandidate { index, value }),
            Err(error) => last_error = Some(error),
        }
    }
    Err(CandidatesExhausted {
        attempts: candidates.len(),
        last_error,
    })
}
