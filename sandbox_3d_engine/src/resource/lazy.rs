/// Deferred GPU allocation for resources.
///
/// A `LazyGpu<T>` starts `Unloaded` and moves exactly once to either
/// `Loaded(T)` or `Failed(reason)`; both are terminal. The only transition
/// point is `ensure_loaded`, so every accessor that needs the GPU object
/// (`use`, `load`, `id`) funnels through it.
///
/// The cell is `!Sync`: loading touches graphics-context state and must stay
/// on the render thread that owns the context.

use std::cell::OnceCell;
use crate::error::{Error, Result};

/// Observable state of a lazily allocated GPU object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Descriptor only, no GPU object yet
    Unloaded,
    /// GPU object allocated
    Loaded,
    /// Allocation failed; the resource is shown as a placeholder
    Failed,
}

/// Interior state machine holding a GPU object created on first use
pub struct LazyGpu<T> {
    cell: OnceCell<std::result::Result<T, String>>,
}

impl<T> LazyGpu<T> {
    /// New, unloaded cell
    pub fn new() -> Self {
        Self { cell: OnceCell::new() }
    }

    /// Run `load` on first call and cache its outcome
    ///
    /// Later calls never run `load` again: a loaded object is returned as is,
    /// a failure is reported as `Error::ResourceLoadFailed` with the original reason.
    pub fn ensure_loaded<F>(&self, load: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        match self.cell.get_or_init(|| load().map_err(|e| e.to_string())) {
            Ok(value) => Ok(value),
            Err(reason) => Err(Error::ResourceLoadFailed(reason.clone())),
        }
    }

    /// The loaded object, without triggering a load
    pub fn get(&self) -> Option<&T> {
        self.cell.get().and_then(|state| state.as_ref().ok())
    }

    /// Current state
    pub fn state(&self) -> LoadState {
        match self.cell.get() {
            None => LoadState::Unloaded,
            Some(Ok(_)) => LoadState::Loaded,
            Some(Err(_)) => LoadState::Failed,
        }
    }

    /// Whether the GPU object exists
    pub fn is_allocated(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Whether loading was attempted and failed
    pub fn is_failed(&self) -> bool {
        self.state() == LoadState::Failed
    }

    /// Failure reason, if loading failed
    pub fn failure(&self) -> Option<&str> {
        self.cell.get().and_then(|state| state.as_ref().err()).map(String::as_str)
    }
}

impl<T> Default for LazyGpu<T> {
    fn default() -> Self {
        Self::new()
    }
}
