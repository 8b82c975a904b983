use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};

use crate::asr::AsrBackend;

/// Load state of the ASR backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Unloaded,
    Loading,
    Ready,
}

struct GateInner {
    state: EngineState,
    backend: Option<Arc<dyn AsrBackend>>,
}

/// Readiness cell shared by every request.
///
/// Moves `Unloaded -> Loading -> Ready` once at startup. A failed load
/// returns to `Unloaded`. The backend handle is only handed out while `Ready`.
pub struct EngineGate {
    inner: RwLock<GateInner>,
}

impl EngineGate {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(GateInner {
                state: EngineState::Unloaded,
                backend: None,
            }),
        }
    }

    /// A gate that is already `Ready` with `backend`.
    pub fn ready(backend: Arc<dyn AsrBackend>) -> Self {
        Self {
            inner: RwLock::new(GateInner {
                state: EngineState::Ready,
                backend: Some(backend),
            }),
        }
    }

    pub fn state(&self) -> EngineState {
        self.inner.read().state
    }

    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Ready
    }

    /// `Unloaded -> Loading`. Returns false if a load already started.
    pub fn begin_loading(&self) -> bool {
        let mut inner = self.inner.write();
        if inner.state != EngineState::Unloaded {
            warn!(state = ?inner.state, "Ignoring load request, engine not unloaded");
            return false;
        }
        inner.state = EngineState::Loading;
        info!("Engine loading");
        true
    }

    /// `Loading -> Ready`. Returns false (and drops `backend`) from any other state.
    pub fn mark_ready(&self, backend: Arc<dyn AsrBackend>) -> bool {
        let mut inner = self.inner.write();
        if inner.state != EngineState::Loading {
            warn!(state = ?inner.state, "Ignoring ready transition, engine not loading");
            return false;
        }
        info!(backend = %backend.name(), "Engine ready");
        inner.backend = Some(backend);
        inner.state = EngineState::Ready;
        true
    }

    /// `Loading -> Unloaded` after a failed load.
    pub fn mark_failed(&self) {
        let mut inner = self.inner.write();
        if inner.state == EngineState::Loading {
            inner.state = EngineState::Unloaded;
            warn!("Engine load failed, back to unloaded");
        }
    }

    /// The backend, if the gate is `Ready`.
    pub fn backend(&self) -> Option<Arc<dyn AsrBackend>> {
        let inner = self.inner.read();
        match inner.state {
            EngineState::Ready => inner.backend.clone(),
            _ => None,
        }
    }
}

impl Default for EngineGate {
    fn default() -> Self {
        Self::new()
    }
}
