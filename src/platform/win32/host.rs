// ── Win32 dialog host ─────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Install / remove the thread-scoped WH_CBT hook.
//   • The `extern "system"` hook procedure, which forwards to
//     `hook::hook_proc` and therefore always calls CallNextHookEx.
//   • user32 / gdi32 primitives the customizer drives through `DialogHost`.
//   • The blocking MessageBoxW call.
//
// Window and font ids cross into the platform-neutral core as plain integers;
// they are only turned back into handles here.

use std::ffi::c_void;

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{GetLastError, BOOL, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        Graphics::Gdi::{
            CreateFontIndirectW, DeleteObject, FONT_CHARSET, FONT_CLIP_PRECISION,
            FONT_OUTPUT_PRECISION, FONT_QUALITY, HGDIOBJ, LOGFONTW,
        },
        System::Threading::GetCurrentThreadId,
        UI::{
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                CallNextHookEx, EnumChildWindows, GetClassNameW, GetDlgCtrlID,
                GetWindowTextLengthW, GetWindowTextW, MessageBoxW, SendMessageW,
                SetForegroundWindow, SetWindowTextW, SetWindowsHookExW, UnhookWindowsHookEx,
                HHOOK, MESSAGEBOX_STYLE, WH_CBT,
            },
        },
    },
};

use super::{
    dpi,
    messages::{BM_SETSTYLE, BS_DEFPUSHBUTTON, DM_SETDEFID, SHOW_FOCUS_CUES, WM_CHANGEUISTATE, WM_SETFONT},
};
use crate::{
    error::{DialogError, Result},
    font::FontDescriptor,
    hook,
    host::{DialogHost, FontHandle, HookHandle, WindowId},
};

/// Class-name buffer length; registered class names are at most 256 chars.
const CLASS_NAME_LEN: usize = 256;

/// The real window system of the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Host;

// ── Handle conversion ─────────────────────────────────────────────────────────

fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut c_void)
}

fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0 as isize)
}

/// Null-terminated UTF-16 copy of `s`.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Capture the current Win32 last-error code and wrap it in a `DialogError`.
///
/// Call immediately after a Win32 function that signals failure; `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> DialogError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    // It is always safe to call and never fails.
    let code = unsafe { GetLastError() };
    DialogError::Win32 {
        function,
        code: code.0,
    }
}

/// Map a `windows::core::Error` through its `DialogError` conversion and
/// name the function that failed.
fn failed(function: &'static str) -> impl FnOnce(windows::core::Error) -> DialogError {
    move |e| match DialogError::from(e) {
        DialogError::Win32 { code, .. } => DialogError::Win32 { function, code },
        other => other,
    }
}

// ── Hook procedure ────────────────────────────────────────────────────────────

// SAFETY: registered with SetWindowsHookExW(WH_CBT) for the current thread
// only, so Windows calls it synchronously on that thread.  wparam is the HWND
// of the window being activated / destroyed and is valid for this call only;
// `hook::hook_proc` never stores it beyond the window's lifetime and never
// unwinds.
unsafe extern "system" fn cbt_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    LRESULT(hook::hook_proc(&Win32Host, code, wparam.0, lparam.0))
}

// SAFETY: called by EnumChildWindows with the LPARAM we passed, which points
// at a live `Vec<WindowId>` owned by `children()` for the whole enumeration.
unsafe extern "system" fn collect_child(child: HWND, lparam: LPARAM) -> BOOL {
    let out = &mut *(lparam.0 as *mut Vec<WindowId>);
    out.push(window_id(child));
    BOOL::from(true)
}

// ── DialogHost ────────────────────────────────────────────────────────────────

impl DialogHost for Win32Host {
    fn install_hook(&self) -> Result<HookHandle> {
        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread = unsafe { GetCurrentThreadId() };
        // SAFETY: cbt_proc lives in this module for the process lifetime.  A
        // null module handle is valid for a thread-local hook whose procedure
        // is in the calling process.
        let hook = unsafe { SetWindowsHookExW(WH_CBT, Some(cbt_proc), HINSTANCE::default(), thread) }
            .map_err(failed("SetWindowsHookExW"))?;
        Ok(HookHandle(hook.0 as isize))
    }

    fn uninstall_hook(&self, handle: HookHandle) -> Result<()> {
        // SAFETY: the handle came from install_hook and is released exactly
        // once (HookSession takes it out of its Option first).
        unsafe { UnhookWindowsHookEx(HHOOK(handle.raw() as *mut c_void)) }
            .map_err(failed("UnhookWindowsHookEx"))
    }

    fn call_next_hook(&self, code: i32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: forwards the exact arguments Windows passed to cbt_proc.
        // The hook handle parameter is ignored by the system.
        unsafe { CallNextHookEx(HHOOK::default(), code, WPARAM(wparam), LPARAM(lparam)) }.0
    }

    fn class_name(&self, window: WindowId) -> Option<String> {
        let mut buf = [0u16; CLASS_NAME_LEN];
        // SAFETY: buf is a writable buffer; GetClassNameW writes at most
        // buf.len() units including the terminator and returns the length.
        let len = unsafe { GetClassNameW(hwnd(window), &mut buf) };
        let len = usize::try_from(len).ok().filter(|&n| n > 0)?;
        Some(String::from_utf16_lossy(&buf[..len]))
    }

    fn window_text(&self, window: WindowId) -> Option<String> {
        // SAFETY: GetWindowTextLengthW only reads the window's text length.
        let len = unsafe { GetWindowTextLengthW(hwnd(window)) };
        let len = usize::try_from(len).ok()?;
        let mut buf = vec![0u16; len + 1];
        // SAFETY: buf holds len + 1 units, enough for the text and terminator.
        let copied = unsafe { GetWindowTextW(hwnd(window), &mut buf) };
        let copied = usize::try_from(copied).ok()?;
        Some(String::from_utf16_lossy(&buf[..copied.min(len)]))
    }

    fn children(&self, parent: WindowId) -> Vec<WindowId> {
        let mut out: Vec<WindowId> = Vec::new();
        // SAFETY: collect_child only writes through the LPARAM, which points
        // at `out`; `out` outlives the synchronous enumeration.
        unsafe {
            let _ = EnumChildWindows(
                hwnd(parent),
                Some(collect_child),
                LPARAM(&mut out as *mut Vec<WindowId> as isize),
            );
        }
        out
    }

    fn control_id(&self, window: WindowId) -> i32 {
        // SAFETY: GetDlgCtrlID returns 0 for invalid or top-level windows.
        unsafe { GetDlgCtrlID(hwnd(window)) }
    }

    fn set_text(&self, window: WindowId, text: &str) -> Result<()> {
        let text = wide(text);
        // SAFETY: text is null-terminated and outlives the call.
        unsafe { SetWindowTextW(hwnd(window), PCWSTR(text.as_ptr())) }
            .map_err(failed("SetWindowTextW"))
    }

    fn set_font(&self, window: WindowId, font: FontHandle) {
        // SAFETY: font is a live HFONT owned by the font table; LPARAM=1
        // redraws the control immediately.
        unsafe {
            SendMessageW(hwnd(window), WM_SETFONT, WPARAM(font.0 as usize), LPARAM(1));
        }
    }

    fn set_foreground(&self, window: WindowId) -> Result<()> {
        // SAFETY: SetForegroundWindow tolerates any HWND; failure is reported
        // through the return value.
        if unsafe { SetForegroundWindow(hwnd(window)) }.as_bool() {
            Ok(())
        } else {
            Err(DialogError::Win32 {
                function: "SetForegroundWindow",
                code: 0,
            })
        }
    }

    fn set_default_id(&self, dialog: WindowId, id: i32) {
        // SAFETY: DM_SETDEFID takes the control id in WPARAM and no pointers.
        unsafe {
            SendMessageW(hwnd(dialog), DM_SETDEFID, WPARAM(id as usize), LPARAM(0));
        }
    }

    fn set_default_style(&self, button: WindowId) {
        // SAFETY: BM_SETSTYLE takes the style in WPARAM and a redraw flag.
        unsafe {
            SendMessageW(hwnd(button), BM_SETSTYLE, WPARAM(BS_DEFPUSHBUTTON), LPARAM(1));
        }
    }

    fn set_focus(&self, window: WindowId) -> Result<()> {
        // SAFETY: the window belongs to the calling thread (it is a child of
        // the dialog being activated), so SetFocus is permitted.
        unsafe { SetFocus(hwnd(window)) }
            .map(|_| ())
            .map_err(failed("SetFocus"))
    }

    fn clear_focus_cues(&self, window: WindowId) {
        // SAFETY: WM_CHANGEUISTATE carries only flag bits.
        unsafe {
            SendMessageW(hwnd(window), WM_CHANGEUISTATE, WPARAM(SHOW_FOCUS_CUES), LPARAM(0));
        }
    }

    fn vertical_dpi(&self) -> Option<u32> {
        dpi::vertical_screen_dpi()
    }

    fn create_font(&self, d: &FontDescriptor) -> Result<FontHandle> {
        let logfont = LOGFONTW {
            lfHeight: d.height,
            lfWidth: d.width,
            lfEscapement: d.escapement,
            lfOrientation: d.orientation,
            lfWeight: d.weight,
            lfItalic: u8::from(d.italic),
            lfUnderline: u8::from(d.underline),
            lfStrikeOut: u8::from(d.strike_out),
            lfCharSet: FONT_CHARSET(d.char_set),
            lfOutPrecision: FONT_OUTPUT_PRECISION(d.out_precision),
            lfClipPrecision: FONT_CLIP_PRECISION(d.clip_precision),
            lfQuality: FONT_QUALITY(d.quality),
            lfPitchAndFamily: d.pitch_and_family,
            lfFaceName: d.face_name_utf16(),
        };

        // SAFETY: logfont is fully initialised and outlives the call; the
        // face name is null-terminated within its fixed buffer.
        let font = unsafe { CreateFontIndirectW(&logfont) };
        if font.is_invalid() {
            return Err(last_error("CreateFontIndirectW"));
        }
        Ok(FontHandle(font.0 as isize))
    }

    fn delete_font(&self, font: FontHandle) {
        // SAFETY: the handle was created by create_font and is removed from
        // the font table before this call, so it is deleted exactly once.
        unsafe {
            let _ = DeleteObject(HGDIOBJ(font.0 as *mut c_void));
        }
    }

    fn message_box(
        &self,
        owner: Option<WindowId>,
        text: &str,
        caption: &str,
        style: u32,
    ) -> Result<i32> {
        let text = wide(text);
        let caption = wide(caption);
        let owner = owner.map_or(HWND::default(), hwnd);

        // SAFETY: text and caption are valid null-terminated UTF-16 strings
        // that remain allocated for the duration of the MessageBoxW call.
        // A null owner means the dialog has no owner window.
        let pressed = unsafe {
            MessageBoxW(
                owner,
                PCWSTR(text.as_ptr()),
                PCWSTR(caption.as_ptr()),
                MESSAGEBOX_STYLE(style),
            )
        };

        if pressed.0 == 0 {
            return Err(last_error("MessageBoxW"));
        }
        Ok(pressed.0)
    }
}
