use windows::Win32::{
    Foundation::HWND,
    Graphics::Gdi::{GetDC, GetDeviceCaps, ReleaseDC, LOGPIXELSY},
};

/// Vertical DPI of the screen device context, the value dialog fonts are
/// scaled with.  Returns `None` when it cannot be queried.
pub(crate) fn vertical_screen_dpi() -> Option<u32> {
    // SAFETY: GetDC(null) returns the DC for the whole screen, or a null HDC
    // on failure; a non-null DC is released below.
    let hdc = unsafe { GetDC(HWND::default()) };
    if hdc.is_invalid() {
        return None;
    }

    // SAFETY: hdc is the valid screen DC obtained above.
    let v = unsafe { GetDeviceCaps(hdc, LOGPIXELSY) };

    // SAFETY: hdc came from GetDC(null) on this thread and is released once.
    unsafe {
        ReleaseDC(HWND::default(), hdc);
    }

    u32::try_from(v).ok().filter(|&dpi| dpi > 0)
}
