//! Always-renderable results for calls to the external model.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

/// Awaits `call`; on error logs it under `label` and returns `fallback` instead.
///
/// Matching, proposal drafting and gig ideation all go through this, so a model
/// failure never reaches the HTTP layer as an error.
pub async fn try_or_default<T, E, F>(label: &str, call: F, fallback: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    try_or_fallback(label, call, fallback).await.0
}

/// Like [`try_or_default`], but also reports whether `fallback` was substituted.
///
/// The flag comes from the call's outcome, so a genuine result that happens to equal
/// the fallback value is still reported as generated.
pub async fn try_or_fallback<T, E, F>(label: &str, call: F, fallback: T) -> (T, bool)
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match call.await {
        Ok(value) => (value, false),
        Err(err) => {
            warn!(call = label, "AI call failed, using fallback: {err}");
            (fallback, true)
        }
    }
}
