#![allow(dead_code)]

use async_trait::async_trait;
use dictionary::editor::{ActiveEditor, NoActiveEditor};
use dictionary::store::MemoryStore;
use dictionary::translator::{TranslationError, Translator};
use dictionary::{DictionaryError, LanguagePair, Reconciler, Settings};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Dictionary-backed translator that records every request.
#[derive(Default)]
pub struct MockTranslator {
    words: HashMap<String, String>,
    calls: Mutex<Vec<(LanguagePair, String)>>,
    fail_on: Option<String>,
    delay: Option<Duration>,
    not_ready: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    /// Replaces the note's content once the first request arrives.
    interfere: Option<(Arc<MemoryStore>, String, String)>,
    /// Deletes the note once the first request arrives.
    vanish: Option<(Arc<MemoryStore>, String)>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word(mut self, from: &str, to: &str) -> Self {
        self.words.insert(from.to_string(), to.to_string());
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn not_ready(mut self) -> Self {
        self.not_ready = true;
        self
    }

    pub fn interfering(mut self, store: Arc<MemoryStore>, path: &str, content: &str) -> Self {
        self.interfere = Some((store, path.to_string(), content.to_string()));
        self
    }

    pub fn vanishing(mut self, store: Arc<MemoryStore>, path: &str) -> Self {
        self.vanish = Some((store, path.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn pairs(&self) -> Vec<LanguagePair> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(pair, _)| pair.clone())
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslationError> {
        self.calls
            .lock()
            .unwrap()
            .push((pair.clone(), text.to_string()));

        if let Some((store, path, content)) = &self.interfere {
            store.insert(path.as_str(), content.as_str());
        }
        if let Some((store, path)) = &self.vanish {
            store.remove(Path::new(path));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            // Shorter texts take longer, so completion order differs from line order.
            let factor = 10u32.saturating_sub(text.len().min(9) as u32);
            tokio::time::sleep(delay * factor / 10).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.as_deref() == Some(text) {
            return Err(TranslationError::Rejected {
                status: 403,
                message: "quota exceeded".into(),
            });
        }

        Ok(self
            .words
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("<{}:{}>", pair.to, text)))
    }

    fn check_ready(&self) -> dictionary::Result<()> {
        if self.not_ready {
            return Err(DictionaryError::Configuration("no API key configured".into()));
        }
        Ok(())
    }
}

pub fn reconciler(
    translator: Arc<MockTranslator>,
    store: Arc<MemoryStore>,
    editor: Arc<dyn ActiveEditor>,
) -> Reconciler {
    reconciler_with(&Settings::default(), translator, store, editor)
}

pub fn reconciler_with(
    settings: &Settings,
    translator: Arc<MockTranslator>,
    store: Arc<MemoryStore>,
    editor: Arc<dyn ActiveEditor>,
) -> Reconciler {
    Reconciler::new(settings, translator, store, editor)
}

pub fn no_editor() -> Arc<dyn ActiveEditor> {
    Arc::new(NoActiveEditor)
}
