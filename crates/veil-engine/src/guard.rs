//! Paste, copy and live-detection orchestration

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;
use veil_config::{SettingsProvider, load_settings};
use veil_core::{DetectionResult, FieldStatus, Settings};
use veil_security::{Detector, mask_detected, mask_detected_with_restore, restore};
use veil_storage::{RestoreMapStore, SessionStore};

use crate::debounce::Debouncer;
use crate::field::{FieldId, FieldRegistry, FieldState};

/// Emitted whenever a field's detection result changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub field: FieldId,
    pub status: FieldStatus,
    pub count: usize,
}

/// Text to put into the page after a paste or mask request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskOutcome {
    pub text: String,
    pub replacements: usize,
    /// A restore map was stored for the host
    pub restorable: bool,
}

impl MaskOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            replacements: 0,
            restorable: false,
        }
    }

    pub fn is_masked(&self) -> bool {
        self.replacements > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RestoreStatus {
    Restored { text: String, applied: usize },
    /// None of the stored tokens were found
    NoOp,
    /// Restoration is disabled or settings could not be reached
    Unavailable,
}

struct Inner<P, S: SessionStore> {
    settings: P,
    maps: RestoreMapStore<S>,
    fields: FieldRegistry,
    debouncer: Debouncer<FieldId>,
    debounce: Duration,
    events: mpsc::UnboundedSender<FieldEvent>,
}

/// Watches input fields on behalf of a page and masks what leaves them
pub struct Guard<P, S: SessionStore> {
    inner: Arc<Inner<P, S>>,
}

impl<P, S: SessionStore> Clone for Guard<P, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, S> Guard<P, S>
where
    P: SettingsProvider + 'static,
    S: SessionStore + 'static,
{
    pub fn new(
        settings: P,
        store: S,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FieldEvent>) {
        Self::with_maps(settings, RestoreMapStore::new(store), debounce)
    }

    pub fn with_maps(
        settings: P,
        maps: RestoreMapStore<S>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FieldEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let guard = Self {
            inner: Arc::new(Inner {
                settings,
                maps,
                fields: FieldRegistry::new(),
                debouncer: Debouncer::new(),
                debounce,
                events,
            }),
        };
        (guard, rx)
    }

    pub fn restore_maps(&self) -> &RestoreMapStore<S> {
        &self.inner.maps
    }

    pub fn attach(&self) -> FieldId {
        let field = self.inner.fields.attach();
        debug!(%field, "field attached");
        field
    }

    pub fn detach(&self, field: FieldId) {
        self.inner.debouncer.cancel(&field);
        if self.inner.fields.detach(field).is_some() {
            debug!(%field, "field detached");
        }
    }

    pub fn field(&self, field: FieldId) -> Option<FieldState> {
        self.inner.fields.get(field)
    }

    /// Number of fields with a rescan waiting on the debounce timer
    pub fn pending_scans(&self) -> usize {
        self.inner.debouncer.pending()
    }

    /// Queue a rescan of `field`; typing again before the quiet period ends
    /// replaces it.
    pub fn on_input(&self, field: FieldId, text: impl Into<String>) {
        if !self.inner.fields.contains(field) {
            debug!(%field, "input for unknown field ignored");
            return;
        }

        let text = text.into();
        let guard = self.clone();
        self.inner
            .debouncer
            .schedule(field, self.inner.debounce, async move {
                guard.detect_now(field, &text).await;
            });
    }

    /// Rescan immediately, updating the field and emitting a [`FieldEvent`]
    pub async fn detect_now(&self, field: FieldId, text: &str) -> Option<DetectionResult> {
        let settings = load_settings(&self.inner.settings).await.settings;
        let detection = detect(&settings, text);

        let status = self.inner.fields.update(field, |state| {
            state.status = FieldStatus::classify(&detection, state.is_masked);
            state.last_detection = Some(detection.clone());
            state.status
        })?;

        self.emit(field, status, detection.count);
        Some(detection)
    }

    /// Mask pasted text before it lands in the page
    pub async fn on_paste(&self, host: &str, text: &str) -> anyhow::Result<MaskOutcome> {
        let settings = load_settings(&self.inner.settings).await.settings;
        let (outcome, _) = self.mask(&settings, host, text).await?;
        Ok(outcome)
    }

    /// Mask the current content of a field on request
    pub async fn mask_field(
        &self,
        field: FieldId,
        host: &str,
        text: &str,
    ) -> anyhow::Result<Option<MaskOutcome>> {
        if !self.inner.fields.contains(field) {
            return Ok(None);
        }

        let settings = load_settings(&self.inner.settings).await.settings;
        let (outcome, detection) = self.mask(&settings, host, text).await?;

        let status = self.inner.fields.update(field, |state| {
            if outcome.is_masked() {
                state.original_value = Some(text.to_string());
                state.is_masked = true;
            }
            state.status = if state.is_masked {
                FieldStatus::Secured
            } else {
                FieldStatus::classify(&detection, false)
            };
            state.last_detection = Some(detection.clone());
            state.status
        });

        if let Some(status) = status {
            self.emit(field, status, detection.count);
        }
        Ok(Some(outcome))
    }

    /// Put the originals back into a masked field
    pub async fn restore_field(
        &self,
        field: FieldId,
        host: &str,
        text: &str,
    ) -> anyhow::Result<RestoreStatus> {
        let loaded = load_settings(&self.inner.settings).await;
        if !loaded.available || !loaded.settings.enable_restoration {
            return Ok(RestoreStatus::Unavailable);
        }
        if !self.inner.fields.contains(field) {
            return Ok(RestoreStatus::NoOp);
        }

        let map = self.inner.maps.get(host).await?;
        let outcome = restore(text, &map);
        if outcome.is_noop() {
            return Ok(RestoreStatus::NoOp);
        }

        let detection = detect(&loaded.settings, &outcome.restored);
        let status = self.inner.fields.update(field, |state| {
            state.original_value = None;
            state.is_masked = false;
            state.status = FieldStatus::classify(&detection, false);
            state.last_detection = Some(detection.clone());
            state.status
        });
        if let Some(status) = status {
            self.emit(field, status, detection.count);
        }

        Ok(RestoreStatus::Restored {
            text: outcome.restored,
            applied: outcome.applied_count,
        })
    }

    /// Text to place on the clipboard when the user copies from `host`
    pub async fn on_copy(&self, host: &str, text: &str) -> anyhow::Result<String> {
        let loaded = load_settings(&self.inner.settings).await;
        if !loaded.available || !loaded.settings.enable_restoration {
            return Ok(text.to_string());
        }

        let map = self.inner.maps.get(host).await?;
        if map.is_empty() {
            return Ok(text.to_string());
        }

        let outcome = restore(text, &map);
        debug!(host, applied = outcome.applied_count, "restored copied text");
        Ok(outcome.restored)
    }

    async fn mask(
        &self,
        settings: &Settings,
        host: &str,
        text: &str,
    ) -> anyhow::Result<(MaskOutcome, DetectionResult)> {
        if !settings.enabled {
            return Ok((MaskOutcome::unchanged(text), DetectionResult::empty()));
        }

        let detection = detect(settings, text);
        if detection.is_empty() {
            return Ok((MaskOutcome::unchanged(text), detection));
        }

        let outcome = if settings.enable_restoration {
            let masked = mask_detected_with_restore(text, &detection);
            self.inner.maps.save(host, &masked.restore_map).await?;
            MaskOutcome {
                text: masked.masked,
                replacements: masked.replacements,
                restorable: true,
            }
        } else {
            let masked = mask_detected(text, &detection);
            MaskOutcome {
                text: masked.masked,
                replacements: masked.replacements,
                restorable: false,
            }
        };

        debug!(host, replacements = outcome.replacements, "masked text");
        Ok((outcome, detection))
    }

    fn emit(&self, field: FieldId, status: FieldStatus, count: usize) {
        // Nobody listening is fine
        let _ = self.inner.events.send(FieldEvent {
            field,
            status,
            count,
        });
    }
}

fn detect(settings: &Settings, text: &str) -> DetectionResult {
    if !settings.enabled {
        return DetectionResult::empty();
    }
    Detector::builtin().detect(text, Some(&settings.categories), &settings.custom_patterns)
}
