// ── Native window-system seam ─────────────────────────────────────────────────
//
// `DialogHost` lists every OS primitive the customizer, hook session and show
// orchestrator consume.  The production implementation lives in
// `platform::win32`; tests drive the same logic through a simulated host.
// No `unsafe` here.

use crate::{error::Result, font::FontDescriptor};

/// Opaque native window identifier (an `HWND` on Windows).
///
/// Valid only while the window lives; used as a lookup key, never
/// dereferenced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub isize);

/// Opaque native font object (an `HFONT` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontHandle(pub isize);

/// Token for an installed, thread-scoped lifecycle intercept (an `HHOOK`).
#[derive(Debug, PartialEq, Eq)]
pub struct HookHandle(pub(crate) isize);

impl HookHandle {
    pub fn raw(&self) -> isize {
        self.0
    }
}

/// Window class of the system's standard dialog box.
pub const DIALOG_CLASS: &str = "#32770";
/// Window class of push buttons.
pub const BUTTON_CLASS: &str = "Button";
/// Window class of static text (and the icon) inside the dialog.
pub const STATIC_CLASS: &str = "Static";

/// The window system as seen by the dialog customization logic.
///
/// All methods are called on the thread that owns the dialog.  Mutating
/// primitives that the OS treats as fire-and-forget return `()`; the rest
/// report failure so that callers can log it.
pub trait DialogHost {
    // ── Lifecycle intercept ───────────────────────────────────────────────────

    /// Install an activate/destroy intercept for windows of the calling thread.
    fn install_hook(&self) -> Result<HookHandle>;

    fn uninstall_hook(&self, handle: HookHandle) -> Result<()>;

    /// Pass the event on to the next handler in the interception chain.
    fn call_next_hook(&self, code: i32, wparam: usize, lparam: isize) -> isize;

    // ── Window queries ────────────────────────────────────────────────────────

    fn class_name(&self, window: WindowId) -> Option<String>;

    fn window_text(&self, window: WindowId) -> Option<String>;

    /// Every descendant control of `parent`, in z-order.
    fn children(&self, parent: WindowId) -> Vec<WindowId>;

    /// Dialog control identifier of `window` (0 when it has none).
    fn control_id(&self, window: WindowId) -> i32;

    /// Find the control with identifier `id` inside `dialog`.
    fn dlg_item(&self, dialog: WindowId, id: i32) -> Option<WindowId> {
        self.children(dialog)
            .into_iter()
            .find(|&child| self.control_id(child) == id)
    }

    // ── Window mutations ──────────────────────────────────────────────────────

    fn set_text(&self, window: WindowId, text: &str) -> Result<()>;

    fn set_font(&self, window: WindowId, font: FontHandle);

    fn set_foreground(&self, window: WindowId) -> Result<()>;

    /// Make control `id` the dialog-level default button.
    fn set_default_id(&self, dialog: WindowId, id: i32);

    /// Give `button` the default push-button visual style.
    fn set_default_style(&self, button: WindowId);

    fn set_focus(&self, window: WindowId) -> Result<()>;

    /// Clear the "hide focus / accelerator cues" UI state on `window`.
    fn clear_focus_cues(&self, window: WindowId);

    // ── Fonts ─────────────────────────────────────────────────────────────────

    /// Vertical DPI of the current display, if it can be queried.
    fn vertical_dpi(&self) -> Option<u32>;

    fn create_font(&self, descriptor: &FontDescriptor) -> Result<FontHandle>;

    fn delete_font(&self, font: FontHandle);

    // ── Modal call ────────────────────────────────────────────────────────────

    /// Run the native message box and block until the user dismisses it.
    ///
    /// `style` is the raw `MB_*` flag word.  Returns the control id of the
    /// button the user activated.
    fn message_box(
        &self,
        owner: Option<WindowId>,
        text: &str,
        caption: &str,
        style: u32,
    ) -> Result<i32>;
}
