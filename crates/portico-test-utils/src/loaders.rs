// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loaders with observable behavior.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use portico_core::PorticoError;
use portico_plugin::Loader;

/// A loader that counts how many times it has been invoked.
pub struct CountingLoader<T> {
    value: T,
    calls: Arc<AtomicUsize>,
}

impl<T: Clone + Send + Sync + 'static> CountingLoader<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A loader sharing this counter.
    pub fn loader(&self) -> Loader<T> {
        let value = self.value.clone();
        let calls = Arc::clone(&self.calls);
        Loader::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A loader that always fails with an internal error carrying `message`.
pub fn failing_loader<T: Send + 'static>(message: &str) -> Loader<T> {
    let message = message.to_string();
    Loader::new(move || {
        let message = message.clone();
        async move { Err(PorticoError::Internal(message)) }
    })
}

/// A loader that resolves to `value` after `delay`.
pub fn delayed_loader<T: Clone + Send + Sync + 'static>(value: T, delay: Duration) -> Loader<T> {
    Loader::new(move || {
        let value = value.clone();
        async move {
            tokio::time::sleep(delay).await;
            Ok(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counting_loader_counts_each_load() {
        let counting = CountingLoader::new(3u8);
        let loader = counting.loader();
        assert_eq!(counting.calls(), 0);
        loader.load().await.unwrap();
        loader.load().await.unwrap();
        assert_eq!(counting.calls(), 2);
    }

    #[tokio::test]
    async fn failing_loader_reports_message() {
        let err = failing_loader::<u8>("boom").load().await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_loader_waits() {
        let started = tokio::time::Instant::now();
        let value = delayed_loader("v", Duration::from_secs(3)).load().await.unwrap();
        assert_eq!(value, "v");
        assert!(started.elapsed() >= Duration::from_secs(3));
    }
}
