use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, trace};

use crate::deferred::extract_path;
use crate::dictionary::Dictionary;
use crate::error::{LocaleError, LocaleResult};
use crate::generator::{Generator, IntoResolution};
use crate::lazy::loader::PhraseLoader;
use crate::path::{PathSegment, display_path};
use crate::translator::resolve_safely;

/// Translator over a partial dictionary that fills itself in on demand.
///
/// Each `translate` call extracts the selector's path, loads that one leaf
/// if the cache does not have it, merges it into a new cache snapshot and
/// then resolves the selector as [`Translator`](crate::Translator) would.
///
/// Loaded leaves are kept for the lifetime of the translator. Concurrent
/// requests for the same uncached path are not deduplicated: each one calls
/// the loader.
pub struct LazyTranslator<L> {
    loader: L,
    cache: ArcSwap<Dictionary>,
}

impl<L: PhraseLoader> LazyTranslator<L> {
    /// Create a lazy translator with an empty cache
    ///
    /// # Arguments
    ///
    /// * `loader` - Source of phrases that are not cached yet
    ///
    /// # Example
    ///
    /// ```ignore
    /// let translator = LazyTranslator::new(MockLoader::new(MockMode::Dictionary(en)));
    /// ```
    pub fn new(loader: L) -> Self {
        Self::with_initial(loader, Dictionary::new())
    }

    /// Create a lazy translator whose cache starts with `initial`
    ///
    /// # Arguments
    ///
    /// * `loader` - Source of phrases that are not cached yet
    /// * `initial` - Phrases available without calling the loader
    ///
    /// # Example
    ///
    /// ```ignore
    /// let translator = LazyTranslator::with_initial(
    ///     loader_fn(fetch_phrase),
    ///     dictionary! { "hello" => "Hello" },
    /// );
    /// // Only paths outside `initial` reach `fetch_phrase`
    /// ```
    pub fn with_initial(loader: L, initial: Dictionary) -> Self {
        LazyTranslator {
            loader,
            cache: ArcSwap::from_pointee(initial),
        }
    }

    /// The loader this translator fetches through
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The cache as it is right now. Later loads do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<Dictionary> {
        self.cache.load_full()
    }

    /// Resolve `selector`, loading its leaf first if needed.
    ///
    /// # Errors
    ///
    /// `LocaleError::Load` when the loader fails. Any other failure (missing
    /// path, loader miss) degrades to the empty string.
    pub async fn translate<F, R>(&self, selector: F) -> LocaleResult<String>
    where
        F: Fn(Generator) -> R,
        R: IntoResolution,
    {
        let path = extract_path(&selector);
        self.ensure_loaded(&path).await?;

        let dictionary = self.snapshot();
        let selector = |generator: Generator| selector(generator).into_resolution();
        Ok(resolve_safely(&selector, Generator::new(&dictionary)).unwrap_or_default())
    }

    async fn ensure_loaded(&self, path: &[PathSegment]) -> LocaleResult<()> {
        if path.is_empty() {
            return Ok(());
        }
        let cache = self.cache.load();
        if cache.get_deep(path).is_some() {
            trace!(path = %display_path(path), "phrase cache hit");
            return Ok(());
        }
        // A cached leaf on the way down can never have children
        if (1..path.len()).any(|depth| {
            cache
                .get_deep(&path[..depth])
                .is_some_and(|template| template.is_leaf())
        }) {
            debug!(path = %display_path(path), "path descends through a cached phrase, not loading");
            return Ok(());
        }
        drop(cache);

        debug!(
            path = %display_path(path),
            loader = self.loader.loader_name(),
            "phrase cache miss, loading"
        );
        let loaded = self.loader.load(path).await.map_err(|err| match err {
            LocaleError::Load { .. } => err,
            other => LocaleError::Load {
                path: display_path(path),
                reason: other.to_string(),
            },
        })?;

        match loaded {
            Some(template) => {
                self.cache
                    .rcu(|current| current.update_deep(template.clone(), path));
                debug!(path = %display_path(path), "merged loaded phrase into cache");
            }
            None => debug!(path = %display_path(path), "loader has no phrase for path"),
        }
        Ok(())
    }
}
