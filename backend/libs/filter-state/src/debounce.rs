use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::warn;

use crate::error::FilterError;
use crate::sync::{FilterSync, FilterUpdate, Navigation};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Collapses bursts of values into the last one.
///
/// A value is committed once no newer value has arrived for `delay`.
/// Dropping every handle flushes the pending value and stops the task.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(delay: Duration, mut commit: F) -> (Self, JoinHandle<()>)
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let handle = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    Some(value) => match timeout(delay, rx.recv()).await {
                        Ok(Some(newer)) => pending = Some(newer),
                        Ok(None) => {
                            commit(value);
                            break;
                        }
                        Err(_) => commit(value),
                    },
                }
            }
        });

        (Self { tx }, handle)
    }

    pub fn push(&self, value: T) -> Result<(), FilterError> {
        self.tx.send(value).map_err(|_| FilterError::DebouncerClosed)
    }
}

/// Debounced search box: each settled term is written through `sync` and the
/// resulting navigation handed to `navigate`.
pub fn search_input<N>(
    sync: Arc<Mutex<FilterSync>>,
    delay: Duration,
    mut navigate: N,
) -> (Debouncer<String>, JoinHandle<()>)
where
    N: FnMut(Navigation) + Send + 'static,
{
    Debouncer::spawn(delay, move |term: String| {
        let result = match sync.lock() {
            Ok(mut sync) => sync.update(FilterUpdate::new().search(term)),
            Err(_) => {
                warn!("Filter state lock poisoned, dropping search update");
                return;
            }
        };

        match result {
            Ok(nav) => navigate(nav),
            Err(e) => warn!(error = %e, "Search update rejected"),
        }
    })
}
