//! Generation session state shared with a front-end.
//!
//! A session tracks the current question list, where it came from, and
//! whether a run is in flight. Extraction failures leave the current list
//! alone; generation failures replace it with fallback questions.
//!
//! URL validation is the caller's job (see [`normalize_article_url`]).
//!
//! [`normalize_article_url`]: crate::input::normalize_article_url

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use content_extractor::ContentExtractor;
use tracing::info;

use crate::error::{McqError, Result};
use crate::generator::McqGenerator;
use crate::types::{GenerationSettings, Mcq};

/// Where the current content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Text(String),
}

#[derive(Debug, Default)]
struct SessionState {
    mcqs: Vec<Mcq>,
    source: Option<Source>,
    in_flight: usize,
}

/// Marks a run as in flight until dropped.
struct LoadingGuard {
    state: Arc<RwLock<SessionState>>,
}

impl LoadingGuard {
    fn start(state: &Arc<RwLock<SessionState>>) -> Self {
        write(state).in_flight += 1;
        Self {
            state: Arc::clone(state),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut state = write(&self.state);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

fn write(state: &RwLock<SessionState>) -> RwLockWriteGuard<'_, SessionState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

fn read(state: &RwLock<SessionState>) -> RwLockReadGuard<'_, SessionState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

/// Extract-then-generate workflow with observable state.
#[derive(Clone)]
pub struct McqSession {
    extractor: ContentExtractor,
    generator: McqGenerator,
    state: Arc<RwLock<SessionState>>,
}

impl McqSession {
    pub fn new(extractor: ContentExtractor, generator: McqGenerator) -> Self {
        Self {
            extractor,
            generator,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Current question list (empty until the first run completes).
    pub fn mcqs(&self) -> Vec<Mcq> {
        read(&self.state).mcqs.clone()
    }

    pub fn source(&self) -> Option<Source> {
        read(&self.state).source.clone()
    }

    /// Whether any run is in flight.
    pub fn is_loading(&self) -> bool {
        read(&self.state).in_flight > 0
    }

    /// Fetch `url`, then generate questions from its text.
    ///
    /// On extraction failure the current list is kept. On generation
    /// failure the fallback list is installed and the error carries it.
    pub async fn generate_from_url(
        &self,
        url: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>> {
        settings.validate()?;
        let _loading = LoadingGuard::start(&self.state);
        write(&self.state).source = Some(Source::Url(url.to_string()));

        let content = self.extractor.extract(url).await?;
        info!(url = %url, chars = content.chars().count(), "Extracted article content");

        self.run_generation(&content, settings).await
    }

    /// Generate questions from pasted text.
    pub async fn generate_from_text(
        &self,
        text: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Mcq>> {
        settings.validate()?;
        if text.trim().is_empty() {
            return Err(McqError::EmptyContent);
        }
        let _loading = LoadingGuard::start(&self.state);
        write(&self.state).source = Some(Source::Text(text.to_string()));

        self.run_generation(text, settings).await
    }

    async fn run_generation(&self, content: &str, settings: &GenerationSettings) -> Result<Vec<Mcq>> {
        match self.generator.generate(content, settings).await {
            Ok(mcqs) => {
                write(&self.state).mcqs = mcqs.clone();
                Ok(mcqs)
            }
            Err(failure) => {
                write(&self.state).mcqs = failure.fallback.clone();
                Err(failure.into())
            }
        }
    }
}
