//! Library state controller.
//!
//! `LibraryController` owns the in-memory list shown to the signed-in user and
//! drives the generate pipeline:
//!
//! ```text
//! Idle -> Validating -> Requesting -> Persisting -> Idle
//! ```
//!
//! Persistence is write-through: the record is prepended whether or not the
//! repository acknowledged it, and `CreativeRecord::confirmed` tells the two
//! cases apart. No lock is held while the generator or repository is awaited.

use crate::error::LibraryError;
use crate::notice::{LibraryNotice, NoticeCallback};
use adcraft_core::creative::{
    CreativeForm, CreativeKind, CreativeQuery, CreativeRecord, CreativeRepository,
    DEFAULT_QUERY_LIMIT,
};
use adcraft_core::generation::{DEFAULT_MAX_OUTPUT_TOKENS, TextGenerator};
use adcraft_core::library::{GenerationPhase, LibraryState};
use adcraft_core::normalizer::normalize;
use adcraft_core::prompt;
use adcraft_core::session::{SessionGate, SessionTransition, UserIdentity};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Result of a successful `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// The new record; `confirmed` reflects the durable write.
    pub record: CreativeRecord,
    /// `false` when the signed-in user changed before the generation
    /// resolved, so the record was not added to the visible list.
    pub listed: bool,
}

#[derive(Debug, Default)]
struct Shared {
    library: LibraryState,
    /// User whose records `library` currently holds.
    owner: Option<String>,
    /// Bumped whenever `owner` changes or the list is reset.
    epoch: u64,
}

impl Shared {
    fn set_owner(&mut self, owner: Option<String>) {
        self.library.clear();
        self.owner = owner;
        self.epoch += 1;
    }
}

/// Coordinates generation, persistence and the per-user library list.
pub struct LibraryController {
    repository: Arc<dyn CreativeRepository>,
    generator: Arc<dyn TextGenerator>,
    shared: RwLock<Shared>,
    max_output_tokens: u32,
    query_limit: usize,
    notice_callback: Option<NoticeCallback>,
}

impl LibraryController {
    pub fn new(repository: Arc<dyn CreativeRepository>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            repository,
            generator,
            shared: RwLock::new(Shared::default()),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            query_limit: DEFAULT_QUERY_LIMIT,
            notice_callback: None,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_query_limit(mut self, query_limit: usize) -> Self {
        self.query_limit = query_limit;
        self
    }

    /// Sets a callback invoked for every [`LibraryNotice`].
    pub fn with_notice_callback(mut self, callback: NoticeCallback) -> Self {
        self.notice_callback = Some(callback);
        self
    }

    /// Cloned view of the current state for rendering.
    pub async fn snapshot(&self) -> LibraryState {
        self.shared.read().await.library.clone()
    }

    pub async fn records(&self) -> Vec<CreativeRecord> {
        self.shared.read().await.library.records.clone()
    }

    pub async fn is_generating(&self) -> bool {
        self.shared.read().await.library.is_generating
    }

    /// Id of the user whose records are currently held.
    pub async fn owner(&self) -> Option<String> {
        self.shared.read().await.owner.clone()
    }

    /// Replaces the list with `user`'s newest records.
    ///
    /// Does nothing when `user` is `None`. On query failure the list is
    /// emptied and a `LoadFailed` notice is emitted.
    pub async fn load(&self, user: Option<&UserIdentity>) -> Result<(), LibraryError> {
        let Some(user) = user else {
            tracing::debug!(target: "library", "No signed-in user; skipping load");
            return Ok(());
        };

        self.adopt_owner(&user.id).await;

        let query = CreativeQuery::for_owner(&user.id, self.query_limit);
        match self.repository.query(&query).await {
            Ok(raw) => {
                let records = normalize(raw);
                let mut shared = self.shared.write().await;
                if shared.owner.as_deref() == Some(user.id.as_str()) {
                    tracing::info!(target: "library", user = %user.id, count = records.len(), "Library loaded");
                    shared.library.replace(records);
                } else {
                    tracing::debug!(target: "library", user = %user.id, "Discarding load for a user no longer signed in");
                }
                Ok(())
            }
            Err(err) => {
                tracing::error!(target: "library", user = %user.id, "Failed to load library: {}", err);
                {
                    let mut shared = self.shared.write().await;
                    if shared.owner.as_deref() == Some(user.id.as_str()) {
                        shared.library.clear();
                    }
                }
                self.notify(LibraryNotice::LoadFailed {
                    message: err.to_string(),
                });
                Err(LibraryError::Load(err))
            }
        }
    }

    /// Generates a creative of `kind` from `form` for `user`.
    ///
    /// On success the record is at index 0 of the list (unless the user
    /// changed meanwhile) and `is_generating` is back to `false`. Failures
    /// leave `records` untouched; if `user` is not the list's owner, the list
    /// only switches to `user` once a record is ready.
    pub async fn generate(
        &self,
        user: Option<&UserIdentity>,
        kind: CreativeKind,
        form: &CreativeForm,
    ) -> Result<GenerationOutcome, LibraryError> {
        tracing::debug!(target: "library", phase = %GenerationPhase::Validating, %kind);
        let request = match form.validate(kind) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(target: "library", "{}", err);
                self.notify(LibraryNotice::ValidationFailed {
                    missing: err.missing.clone(),
                });
                return Err(err.into());
            }
        };

        let Some(user) = user else {
            let err = LibraryError::Unauthenticated;
            self.notify(LibraryNotice::GenerationFailed {
                message: err.to_string(),
            });
            return Err(err);
        };

        let epoch = self.begin_generation().await;

        let built = match prompt::build(&request) {
            Ok(built) => built,
            Err(err) => {
                tracing::error!(target: "library", "{}", err);
                return Err(self.fail_generation(err.into()).await);
            }
        };

        tracing::debug!(
            target: "library",
            phase = %GenerationPhase::Requesting,
            %kind,
            model = self.generator.model(),
            prompt_len = built.text.len()
        );
        let content = match self
            .generator
            .generate(&built.text, self.max_output_tokens)
            .await
        {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(
                    target: "library",
                    retryable = err.is_retryable(),
                    "Generation failed: {}",
                    err
                );
                return Err(self.fail_generation(err.into()).await);
            }
        };

        let record =
            CreativeRecord::from_generation(&request, built.title, content, &user.id, Utc::now());

        tracing::debug!(
            target: "library",
            phase = %GenerationPhase::Persisting,
            id = %record.id,
            content_len = record.content.len()
        );
        let record = match self.repository.create(&record).await {
            Ok(()) => record.into_confirmed(),
            Err(err) => {
                tracing::warn!(target: "library", id = %record.id, "Creative not saved: {}", err);
                self.notify(LibraryNotice::PersistenceFailed {
                    record_id: record.id.clone(),
                    message: err.to_string(),
                });
                record
            }
        };

        let listed = {
            let mut shared = self.shared.write().await;
            shared.library.is_generating = false;
            let owner_changed = shared.epoch != epoch;
            let is_owner = shared.owner.as_deref() == Some(user.id.as_str());
            let listed = is_owner || !owner_changed;
            if listed {
                if !is_owner {
                    shared.set_owner(Some(user.id.clone()));
                }
                shared.library.prepend(record.clone());
            } else {
                tracing::info!(
                    target: "library",
                    id = %record.id,
                    "Signed-in user changed during generation; record not listed"
                );
            }
            listed
        };

        tracing::info!(
            target: "library",
            phase = %GenerationPhase::Idle,
            %kind,
            id = %record.id,
            confirmed = record.confirmed,
            "{}",
            kind.success_label()
        );
        self.notify(LibraryNotice::Generated {
            kind,
            label: kind.success_label(),
            title: record.title.clone(),
            confirmed: record.confirmed,
        });

        Ok(GenerationOutcome { record, listed })
    }

    /// Clears the list and forgets its owner.
    pub async fn reset(&self) {
        self.shared.write().await.set_owner(None);
        tracing::debug!(target: "library", "Library reset");
        self.notify(LibraryNotice::Reset);
    }

    /// Reacts to a change of signed-in user: reset, then load the new user's
    /// records if someone is signed in.
    pub async fn handle_transition(&self, transition: SessionTransition) {
        match transition {
            SessionTransition::Unchanged => {}
            SessionTransition::SignedOut => self.reset().await,
            SessionTransition::SignedIn(user) | SessionTransition::Switched { to: user, .. } => {
                self.reset().await;
                if let Err(err) = self.load(Some(&user)).await {
                    tracing::debug!(target: "library", "Load after sign-in failed: {}", err);
                }
            }
        }
    }

    /// Spawns a task that follows `gate` for as long as it publishes.
    ///
    /// The currently signed-in user, if any, is loaded immediately.
    pub fn watch_session(self: &Arc<Self>, gate: &dyn SessionGate) -> JoinHandle<()> {
        let mut receiver = gate.subscribe();
        let controller = Arc::clone(self);

        tokio::spawn(async move {
            let mut current = receiver.borrow_and_update().clone();
            controller
                .handle_transition(SessionTransition::between(None, current.as_ref()))
                .await;

            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                let transition = SessionTransition::between(current.as_ref(), next.as_ref());
                tracing::debug!(target: "session", ?transition, "Session changed");
                controller.handle_transition(transition).await;
                current = next;
            }

            tracing::debug!(target: "session", "Session gate closed");
        })
    }

    async fn adopt_owner(&self, user_id: &str) {
        let mut shared = self.shared.write().await;
        if shared.owner.as_deref() != Some(user_id) {
            shared.set_owner(Some(user_id.to_string()));
        }
    }

    /// Raises the in-flight flag and returns the epoch the call started in.
    async fn begin_generation(&self) -> u64 {
        let mut shared = self.shared.write().await;
        shared.library.is_generating = true;
        shared.epoch
    }

    async fn fail_generation(&self, err: LibraryError) -> LibraryError {
        self.shared.write().await.library.is_generating = false;
        self.notify(LibraryNotice::GenerationFailed {
            message: err.to_string(),
        });
        err
    }

    fn notify(&self, notice: LibraryNotice) {
        if let Some(callback) = &self.notice_callback {
            callback(notice);
        }
    }
}
