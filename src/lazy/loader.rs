//! Loader abstraction for the lazy translator.

use std::future::Future;

use async_trait::async_trait;

use crate::dictionary::Template;
use crate::error::LocaleResult;
use crate::path::{Path, PathSegment};

/// Source of phrases for a [`LazyTranslator`](super::LazyTranslator).
///
/// Implementations fetch exactly one leaf per call, already resolved for the
/// caller's locale.
///
/// # Miss convention
///
/// - `Ok(Some(template))` is merged into the cache permanently
/// - `Ok(None)` means the leaf does not exist; nothing is cached and the
///   selector resolves against the cache as it is (normally to `""`)
/// - `Err(_)` is returned to the caller of `translate`
#[async_trait]
pub trait PhraseLoader: Send + Sync {
    /// Fetch the leaf at `path`
    async fn load(&self, path: &[PathSegment]) -> LocaleResult<Option<Template>>;

    /// Name of this loader, used in logs
    fn loader_name(&self) -> &str;
}

/// A [`PhraseLoader`] backed by an async closure. Built by [`loader_fn`].
pub struct FnLoader<F> {
    name: String,
    load: F,
}

impl<F> std::fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnLoader").field("name", &self.name).finish()
    }
}

impl<F> FnLoader<F> {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Adapt an async closure into a [`PhraseLoader`].
///
/// ```
/// use typed_locale::{LocaleResult, Template};
/// use typed_locale::lazy::{LazyTranslator, loader_fn};
///
/// let loader = loader_fn(|path| async move {
///     let loaded: LocaleResult<_> = Ok(Some(Template::from(format!("loaded {}", path.len()))));
///     loaded
/// });
/// let translator = LazyTranslator::new(loader);
/// # let _ = translator;
/// ```
pub fn loader_fn<F, Fut>(load: F) -> FnLoader<F>
where
    F: Fn(Path) -> Fut + Send + Sync,
    Fut: Future<Output = LocaleResult<Option<Template>>> + Send + 'static,
{
    FnLoader {
        name: "fn".to_string(),
        load,
    }
}

#[async_trait]
impl<F, Fut> PhraseLoader for FnLoader<F>
where
    F: Fn(Path) -> Fut + Send + Sync,
    Fut: Future<Output = LocaleResult<Option<Template>>> + Send + 'static,
{
    async fn load(&self, path: &[PathSegment]) -> LocaleResult<Option<Template>> {
        (self.load)(path.to_vec()).await
    }

    fn loader_name(&self) -> &str {
        &self.name
    }
}
