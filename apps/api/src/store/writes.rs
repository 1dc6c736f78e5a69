//! Optimistic writes: the caller may detach a write instead of awaiting it.
//! Failures of detached writes go to the injected [`WriteErrorSink`].

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::error;

use crate::store::WriteError;

/// Receives failures of writes nobody is waiting on.
pub trait WriteErrorSink: Send + Sync {
    fn report(&self, error: &WriteError);
}

/// Default sink: one structured error log line per failed write.
pub struct TracingErrorSink;

impl WriteErrorSink for TracingErrorSink {
    fn report(&self, err: &WriteError) {
        error!(path = err.path(), "Detached write failed: {err}");
    }
}

/// Runs `write` in the background. The returned handle may be dropped.
pub fn detach_write<F>(write: F, sink: Arc<dyn WriteErrorSink>) -> JoinHandle<()>
where
    F: Future<Output = Result<(), WriteError>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = write.await {
            sink.report(&err);
        }
    })
}
