/// Build-once handle around the [`DefinitionIndex`].
///
/// The index is built in the background after startup.  The handle tracks
/// the build as a small state machine on a `tokio::sync::watch` channel, so
/// requests can wait for it to finish:
///
/// ```text
/// Unstarted ──start──▶ Building ──publish──▶ Ready(index) | Failed(error)
/// ```
///
/// Only the first `start` wins and only a building handle accepts a
/// result, so the index is written exactly once and shared read-only
/// through an `Arc` afterwards.
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{DefinitionIndex, IndexError};
use crate::locator::LocatedStylesheet;

#[derive(Debug, Clone)]
pub enum IndexState {
    Unstarted,
    Building,
    Ready(Arc<DefinitionIndex>),
    Failed(Arc<IndexError>),
}

impl IndexState {
    pub fn is_building(&self) -> bool {
        matches!(self, IndexState::Building)
    }
}

#[derive(Debug)]
pub struct IndexHandle {
    state: watch::Sender<IndexState>,
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexHandle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(IndexState::Unstarted);
        Self { state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> IndexState {
        self.state.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), IndexState::Ready(_))
    }

    /// The index, if the build has completed successfully.
    pub fn current(&self) -> Option<Arc<DefinitionIndex>> {
        match &*self.state.borrow() {
            IndexState::Ready(index) => Some(Arc::clone(index)),
            _ => None,
        }
    }

    /// Move from `Unstarted` to `Building`.  Returns `false` when a build
    /// was already started.
    pub fn start(&self) -> bool {
        self.state.send_if_modified(|state| {
            if matches!(state, IndexState::Unstarted) {
                *state = IndexState::Building;
                true
            } else {
                false
            }
        })
    }

    /// Record the outcome of the build started with [`start`](Self::start).
    pub fn publish(&self, result: Result<DefinitionIndex, IndexError>) {
        self.state.send_if_modified(|state| {
            if !state.is_building() {
                tracing::warn!("Ignoring index result: no build in progress");
                return false;
            }
            *state = match result {
                Ok(index) => IndexState::Ready(Arc::new(index)),
                Err(e) => IndexState::Failed(Arc::new(e)),
            };
            true
        });
    }

    /// Wait for an in-progress build to finish and return the index.
    ///
    /// Returns immediately when no build was ever started, and `None` when
    /// the build failed.
    pub async fn ready(&self) -> Option<Arc<DefinitionIndex>> {
        let mut rx = self.state.subscribe();
        let state = rx.wait_for(|state| !state.is_building()).await.ok()?;
        match &*state {
            IndexState::Ready(index) => Some(Arc::clone(index)),
            _ => None,
        }
    }

    /// Parse `css` on the blocking pool and publish the result.
    ///
    /// The caller reads the stylesheet beforehand; only parsing happens in
    /// the background.  Returns `None` when a build was already started.
    pub fn spawn_build(
        self: &Arc<Self>,
        stylesheet: LocatedStylesheet,
        css: String,
    ) -> Option<JoinHandle<()>> {
        if !self.start() {
            return None;
        }

        let handle = Arc::clone(self);
        Some(tokio::spawn(async move {
            let result =
                tokio::task::spawn_blocking(move || DefinitionIndex::parse(stylesheet, &css))
                    .await
                    .unwrap_or_else(|e| Err(IndexError::Interrupted(e.to_string())));

            match &result {
                Ok(index) => tracing::info!(
                    "Indexed {} Tachyons classes from {}",
                    index.len(),
                    index.stylesheet().path.display()
                ),
                Err(e) => tracing::warn!("Tachyons index build failed: {}", e),
            }
            handle.publish(result);
        }))
    }

    /// Mark the build as failed before any parsing could happen (e.g. the
    /// stylesheet could not be located or read).
    pub fn fail(&self, error: IndexError) {
        if self.start() || self.state.borrow().is_building() {
            self.publish(Err(error));
        }
    }
}
