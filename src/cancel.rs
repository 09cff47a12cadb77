//! Cancellation helpers shared by every suspension point.

use std::future::Future;

use guideart_common::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Await `fut`, aborting with [`Error::Cancelled`] if `cancel` fires first.
///
/// A token that is already cancelled wins over a future that is ready on its
/// first poll, so cancelling before any I/O completes always surfaces as
/// [`Error::Cancelled`].
pub async fn cancellable<F, T>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        res = fut => res,
    }
}
