// ── Font resource table ───────────────────────────────────────────────────────
//
// Every font injected into a dialog is recorded here under the dialog's
// window id until the dialog is destroyed (or its hook session ends).  The
// table must be empty again after each `show` call returns.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::host::{FontHandle, WindowId};

/// Process-wide instance used by the Win32 path.
static GLOBAL: FontTable = FontTable::new();

/// Mapping from dialog identity to the font created for it.
///
/// Guarded by a mutex so that read-modify-write sequences stay exclusive even
/// if a host delivers lifecycle events on another thread.
#[derive(Debug, Default)]
pub struct FontTable {
    fonts: Mutex<BTreeMap<WindowId, FontHandle>>,
}

impl FontTable {
    pub const fn new() -> Self {
        Self {
            fonts: Mutex::new(BTreeMap::new()),
        }
    }

    /// The process-wide table, empty at process start.
    pub fn global() -> &'static FontTable {
        &GLOBAL
    }

    // A panic while the lock was held cannot leave the map half-updated, so a
    // poisoned lock is simply taken over.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<WindowId, FontHandle>> {
        self.fonts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `font` for `dialog`.
    ///
    /// Returns the handle previously stored under the same id.  Live ids are
    /// unique, so a displaced handle means a stale entry; the caller owns it
    /// and must release it.
    pub fn put(&self, dialog: WindowId, font: FontHandle) -> Option<FontHandle> {
        self.lock().insert(dialog, font)
    }

    pub fn get(&self, dialog: WindowId) -> Option<FontHandle> {
        self.lock().get(&dialog).copied()
    }

    pub fn take(&self, dialog: WindowId) -> Option<FontHandle> {
        self.lock().remove(&dialog)
    }

    /// Remove the entry for `dialog` and hand its font to `release`.
    ///
    /// Returns `false` (and does nothing) when no entry exists.  The lock is
    /// released before `release` runs.
    pub fn take_and_release(&self, dialog: WindowId, release: impl FnOnce(FontHandle)) -> bool {
        match self.take(dialog) {
            Some(font) => {
                release(font);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
