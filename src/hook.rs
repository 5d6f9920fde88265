// ── Hook session & callback boundary ──────────────────────────────────────────
//
// A `HookSession` is the scoped capability for "this thread's dialogs are
// being customized".  It installs the intercept once, and `release` (run
// explicitly or from `Drop`) uninstalls it and frees any font whose Destroy
// event never arrived.
//
// The OS callback carries no user data, so session state lives in a
// thread-local stack of frames.  Nested `show` calls on one thread push their
// own frame.  A dialog belongs to the frame that was innermost when it first
// activated; every later Activate or Destroy for it goes to that frame, even
// while a nested session is open.
//
// `hook_proc` is the whole callback body.  It decodes the event, runs the
// customizer behind `catch_unwind`, and always hands the event to the next
// hook in the chain.

use std::{
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::{debug, error, warn};

use crate::{
    customizer::{self, Activation, Customization},
    font_table::FontTable,
    host::{DialogHost, HookHandle, WindowId},
};

/// `HCBT_DESTROYWND`: wparam is the window about to be destroyed.
pub const HCBT_DESTROYWND: i32 = 4;
/// `HCBT_ACTIVATE`: wparam is the window about to be activated.
pub const HCBT_ACTIVATE: i32 = 5;

/// A lifecycle notification relevant to dialog customization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Activate(WindowId),
    Destroy(WindowId),
}

impl HookEvent {
    /// Decode a CBT hook call.  Negative codes must be passed on untouched.
    pub fn decode(code: i32, wparam: usize) -> Option<HookEvent> {
        let window = WindowId(wparam as isize);
        match code {
            HCBT_ACTIVATE => Some(HookEvent::Activate(window)),
            HCBT_DESTROYWND => Some(HookEvent::Destroy(window)),
            _ => None,
        }
    }
}

// ── Per-thread session frames ─────────────────────────────────────────────────

struct SessionFrame {
    id: u64,
    table: &'static FontTable,
    customization: Customization,
    /// Dialogs this session claimed on their first Activate and that have not
    /// been destroyed yet.  Their fonts are this session's to release.
    owned: Vec<WindowId>,
}

thread_local! {
    static FRAMES: RefCell<Vec<SessionFrame>> = const { RefCell::new(Vec::new()) };
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Number of sessions currently open on the calling thread.
pub fn open_sessions() -> usize {
    FRAMES.with(|frames| frames.try_borrow().map(|f| f.len()).unwrap_or(0))
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Scoped interception of the calling thread's window lifecycle events.
///
/// Holds at most one `HookHandle`.  Dropping the session releases it.
pub struct HookSession<'h, H: DialogHost> {
    host: &'h H,
    id: u64,
    table: &'static FontTable,
    handle: Option<HookHandle>,
    open: bool,
}

impl<'h, H: DialogHost> HookSession<'h, H> {
    /// Open a session and install the intercept.
    ///
    /// Installation failure is logged, not returned: the session then runs
    /// uninstalled and dialogs appear unmodified.
    pub fn acquire(
        host: &'h H,
        table: &'static FontTable,
        customization: Customization,
    ) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        FRAMES.with(|frames| {
            frames.borrow_mut().push(SessionFrame {
                id,
                table,
                customization,
                owned: Vec::new(),
            })
        });

        let handle = match host.install_hook() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(session = id, error = %e, "dialog hook unavailable; showing unmodified dialog");
                None
            }
        };

        Self {
            host,
            id,
            table,
            handle,
            open: true,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.handle.is_some()
    }

    /// Uninstall the intercept and release fonts left behind by dialogs that
    /// were never reported destroyed.  Safe to call any number of times.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.host.uninstall_hook(handle) {
                warn!(session = self.id, error = %e, "failed to uninstall dialog hook");
            }
        }

        if !std::mem::replace(&mut self.open, false) {
            return;
        }

        let leftovers = FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            frames
                .iter()
                .position(|f| f.id == self.id)
                .map(|pos| frames.remove(pos).owned)
                .unwrap_or_default()
        });

        for dialog in leftovers {
            let host = self.host;
            if self.table.take_and_release(dialog, |font| host.delete_font(font)) {
                warn!(
                    session = self.id,
                    window = dialog.0,
                    "dialog ended without a destroy event; font released at session end"
                );
            }
        }
    }
}

impl<H: DialogHost> Drop for HookSession<'_, H> {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Callback body ─────────────────────────────────────────────────────────────

/// Body of the CBT hook procedure.
///
/// Never unwinds and never skips the chain: whatever happens while
/// customizing, the return value is the next hook's.
pub fn hook_proc<H: DialogHost>(host: &H, code: i32, wparam: usize, lparam: isize) -> isize {
    if let Some(event) = HookEvent::decode(code, wparam) {
        if panic::catch_unwind(AssertUnwindSafe(|| dispatch(host, event))).is_err() {
            error!(?event, "panic while customizing dialog; event passed on unchanged");
        }
    }
    host.call_next_hook(code, wparam, lparam)
}

/// Route one event to the customizer.
///
/// Frame borrows are never held across host calls: customizing a dialog can
/// synchronously raise further hook events on this thread.
pub fn dispatch<H: DialogHost>(host: &H, event: HookEvent) {
    match event {
        HookEvent::Activate(dialog) => {
            let Some((session, table, customization)) = claim(dialog) else {
                return;
            };
            let outcome = customizer::on_activate(host, table, &customization, dialog);
            if outcome == Activation::Ignored {
                FRAMES.with(|frames| {
                    if let Ok(mut frames) = frames.try_borrow_mut() {
                        if let Some(frame) = frames.iter_mut().find(|f| f.id == session) {
                            frame.owned.retain(|&w| w != dialog);
                        }
                    }
                });
            }
        }
        HookEvent::Destroy(dialog) => {
            let table = FRAMES.with(|frames| {
                let mut frames = frames.try_borrow_mut().ok()?;
                match frames.iter().rposition(|f| f.owned.contains(&dialog)) {
                    Some(pos) => {
                        frames[pos].owned.retain(|&w| w != dialog);
                        Some(frames[pos].table)
                    }
                    None => frames.last().map(|f| f.table),
                }
            });
            if let Some(table) = table {
                if customizer::on_destroy(host, table, dialog) {
                    debug!(window = dialog.0, "destroy handled");
                }
            }
        }
    }
}

/// Frame that customizes `dialog`: the session that first saw it activate,
/// or the innermost session for a dialog seen for the first time, which then
/// claims it.  The claim is recorded before any font is created so that the
/// claiming session's cleanup covers whatever the customizer leaves behind.
fn claim(dialog: WindowId) -> Option<(u64, &'static FontTable, Customization)> {
    FRAMES.with(|frames| {
        let mut frames = frames.try_borrow_mut().ok()?;
        let pos = match frames.iter().rposition(|f| f.owned.contains(&dialog)) {
            Some(pos) => pos,
            None => {
                let top = frames.len().checked_sub(1)?;
                frames[top].owned.push(dialog);
                top
            }
        };
        let frame = &frames[pos];
        Some((frame.id, frame.table, frame.customization.clone()))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
