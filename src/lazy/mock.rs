//! Deterministic loader for tests.
//!
//! Serves phrases from an in-memory dictionary, optionally after a simulated
//! network delay, and records every request so tests can assert on caching.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::dictionary::{Dictionary, Template};
use crate::error::{LocaleError, LocaleResult};
use crate::lazy::loader::PhraseLoader;
use crate::path::{Path, PathSegment, display_path};

/// How a [`MockLoader`] answers
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Serve whatever `get_deep` finds in the dictionary; absent paths are misses
    Dictionary(Dictionary),

    /// Every path is a miss
    Miss,

    /// Every load fails with this reason
    Error(String),
}

#[derive(Debug)]
pub struct MockLoader {
    mode: MockMode,
    /// Simulated network delay (in milliseconds)
    delay_ms: u64,
    requests: Mutex<Vec<Path>>,
}

impl MockLoader {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Loader that sleeps `delay_ms` before answering each request
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of `load` calls so far
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Paths requested so far, in call order
    pub fn requested_paths(&self) -> Vec<Path> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl PhraseLoader for MockLoader {
    async fn load(&self, path: &[PathSegment]) -> LocaleResult<Option<Template>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_vec());

        self.apply_delay().await;

        match &self.mode {
            MockMode::Dictionary(dictionary) => Ok(dictionary.get_deep(path)),
            MockMode::Miss => Ok(None),
            MockMode::Error(reason) => Err(LocaleError::Load {
                path: display_path(path),
                reason: reason.clone(),
            }),
        }
    }

    fn loader_name(&self) -> &str {
        "mock"
    }
}
