// ── Window message constants ──────────────────────────────────────────────────
//
// Source of truth: WinUser.h.  Only the subset the dialog customizer sends is
// listed here.  All values are sent via SendMessageW(hwnd, MSG, wparam, lparam).

// ── Fonts ─────────────────────────────────────────────────────────────────────

/// Set a control's font.  WPARAM=HFONT; LPARAM=redraw flag.
pub(super) const WM_SETFONT: u32 = 0x0030;

// ── Default button ────────────────────────────────────────────────────────────

/// Set the dialog's default push button.  WPARAM=control id.
pub(super) const DM_SETDEFID: u32 = 0x0401;
/// Change a button's style.  WPARAM=style; LPARAM=redraw flag.
pub(super) const BM_SETSTYLE: u32 = 0x00F4;
/// Push button drawn with the heavy "default" border.
pub(super) const BS_DEFPUSHBUTTON: usize = 0x0000_0001;

// ── Keyboard cues ─────────────────────────────────────────────────────────────

/// Change UI state.  WPARAM=MAKEWPARAM(action, flags).
pub(super) const WM_CHANGEUISTATE: u32 = 0x0127;
/// `UIS_CLEAR` action: remove the given flags.
pub(super) const UIS_CLEAR: usize = 2;
/// Focus rectangles hidden.
pub(super) const UISF_HIDEFOCUS: usize = 0x1;
/// Keyboard accelerators hidden.
pub(super) const UISF_HIDEACCEL: usize = 0x2;

/// `MAKEWPARAM(UIS_CLEAR, UISF_HIDEFOCUS | UISF_HIDEACCEL)`.
pub(super) const SHOW_FOCUS_CUES: usize = UIS_CLEAR | ((UISF_HIDEFOCUS | UISF_HIDEACCEL) << 16);
