//! One-shot "atlas uploaded" signal
//!
//! The host usually shows a placeholder until the box texture is on the GPU.
//! [`UploadSignal`] lives in the renderer and fires exactly once; any number
//! of [`UploadWatch`] handles can poll it from other threads, and a single
//! callback can be registered to run on the firing thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

type Callback = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Shared {
    fired: AtomicBool,
    callback: Mutex<Option<Callback>>,
}

/// Firing side, owned by the renderer.
#[derive(Clone, Default)]
pub struct UploadSignal {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for UploadSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSignal")
            .field("fired", &self.is_fired())
            .finish()
    }
}

impl UploadSignal {
    /// Create an unfired signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Polling handle
    pub fn watch(&self) -> UploadWatch {
        UploadWatch {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Register the callback run on firing. Replaces any earlier one; runs
    /// immediately if the signal already fired.
    pub fn on_fire(&self, callback: impl FnOnce() + Send + 'static) {
        if self.is_fired() {
            callback();
            return;
        }
        *self.shared.callback.lock() = Some(Box::new(callback));
        // Fired between the check and the store
        if self.is_fired() {
            if let Some(cb) = self.shared.callback.lock().take() {
                cb();
            }
        }
    }

    /// Fire the signal. Returns `false` if it had already fired.
    pub fn fire(&self) -> bool {
        if self.shared.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        let callback = self.shared.callback.lock().take();
        if let Some(cb) = callback {
            cb();
        }
        true
    }

    /// Whether the signal has fired
    pub fn is_fired(&self) -> bool {
        self.shared.fired.load(Ordering::Acquire)
    }
}

/// Read-only view of an [`UploadSignal`].
#[derive(Clone)]
pub struct UploadWatch {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for UploadWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadWatch")
            .field("fired", &self.is_fired())
            .finish()
    }
}

impl UploadWatch {
    /// Whether the atlas upload has completed
    pub fn is_fired(&self) -> bool {
        self.shared.fired.load(Ordering::Acquire)
    }
}
