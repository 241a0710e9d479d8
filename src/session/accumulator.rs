//! Follow continuation cursors and gather every page of a result set.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::spotify::{ApiError, Page};

/// Items gathered by [`accumulate_pages`].
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulated<T> {
    /// Every item received, in page arrival order
    pub items: Vec<T>,
    /// Number of pages received (including the first)
    pub pages: usize,
    /// Why accumulation stopped early, if it did
    pub error: Option<ApiError>,
}

impl<T> Accumulated<T> {
    /// Whether every page was fetched
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Append `first` and every following page until the cursor runs out.
///
/// `fetch_next` is called with each continuation URL. `on_page` sees every
/// page's items (first page included) before the next fetch starts.
///
/// A failed fetch or a cancellation stops the loop; items gathered so far
/// are kept and the reason is returned in [`Accumulated::error`].
pub async fn accumulate_pages<T, F, Fut, H, HFut>(
    first: Page<T>,
    mut fetch_next: F,
    mut on_page: H,
    cancel: &CancellationToken,
) -> Accumulated<T>
where
    T: Clone,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
    H: FnMut(Vec<T>) -> HFut,
    HFut: Future<Output = ()>,
{
    // `total` comes from the server; only trust items actually received
    let mut acc = Accumulated {
        items: Vec::with_capacity(first.items.len()),
        pages: 0,
        error: None,
    };
    let mut page = first;

    loop {
        acc.pages += 1;
        on_page(page.items.clone()).await;
        acc.items.extend(page.items);

        let Some(next) = page.next else {
            break;
        };

        if cancel.is_cancelled() {
            acc.error = Some(ApiError::Cancelled);
            break;
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = fetch_next(next) => result,
        };

        match fetched {
            Ok(next_page) => page = next_page,
            Err(ApiError::Cancelled) => {
                tracing::debug!("Pagination cancelled after {} pages", acc.pages);
                acc.error = Some(ApiError::Cancelled);
                break;
            }
            Err(e) => {
                tracing::warn!(
                    "Stopped paging after {} pages ({} items): {}",
                    acc.pages,
                    acc.items.len(),
                    e
                );
                acc.error = Some(e);
                break;
            }
        }
    }

    acc
}
