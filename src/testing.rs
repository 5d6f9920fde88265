// ── Simulated window system for tests ─────────────────────────────────────────
//
// `SimHost` models just enough of the Win32 behaviour the crate relies on: a
// window tree with classes, control ids and captions; a per-thread CBT hook
// chain; GDI font lifetimes (with double-free detection); and a scripted
// modal message box that delivers Activate/Destroy through the installed
// hooks, in normal or abnormal order.  Closing a nested message box
// reactivates the one underneath, as the system does.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, VecDeque},
};

use crate::{
    buttons::{ButtonRole, Buttons},
    error::{DialogError, Result},
    font::FontDescriptor,
    hook::{self, HCBT_ACTIVATE, HCBT_DESTROYWND},
    host::{
        DialogHost, FontHandle, HookHandle, WindowId, BUTTON_CLASS, DIALOG_CLASS, STATIC_CLASS,
    },
};

/// Control id of the message text inside a system message box.
const MESSAGE_TEXT_ID: i32 = 0xFFFF;
/// Control id of the icon static inside a system message box.
const ICON_ID: i32 = 20;

/// How the simulated user dismisses the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UserAction {
    /// Click the button with this role.
    Click(ButtonRole),
    /// Press Enter: activates the current default button.
    Enter,
}

/// Order in which the simulated OS reports the dialog's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Teardown {
    /// Activate on show, Destroy on dismissal.
    Normal,
    /// Activate on show, no Destroy at all.
    MissingDestroy,
    /// Destroy reported before Activate.
    DestroyBeforeActivate,
}

/// Arguments of the last `message_box` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MessageBoxCall {
    pub(crate) owner: Option<WindowId>,
    pub(crate) text: String,
    pub(crate) caption: String,
    pub(crate) style: u32,
}

#[derive(Debug)]
struct SimWindow {
    class: String,
    text: String,
    parent: Option<WindowId>,
    control_id: i32,
    font: Option<FontHandle>,
    default_style: bool,
    cues_hidden: bool,
}

type NestedShow = Box<dyn FnOnce(&SimHost)>;

struct SimState {
    next_window: isize,
    windows: BTreeMap<WindowId, SimWindow>,
    default_ids: BTreeMap<WindowId, i32>,
    focus: Option<WindowId>,
    foreground: Option<WindowId>,
    text_writes: usize,
    panic_on_class_query: bool,
    panic_on_set_font: bool,

    hooks: Vec<isize>,
    next_hook: isize,
    deny_hooks: bool,
    uninstall_calls: usize,
    forwarded: usize,

    dpi: Option<u32>,
    fail_fonts: bool,
    next_font: isize,
    live_fonts: BTreeSet<FontHandle>,
    fonts_created: usize,
    fonts_deleted: usize,
    double_frees: usize,
    last_descriptor: Option<FontDescriptor>,

    actions: VecDeque<UserAction>,
    teardown: Teardown,
    dialog_class: String,
    nested: Option<NestedShow>,
    last_call: Option<MessageBoxCall>,
    dialogs_shown: Vec<WindowId>,
    /// Message boxes currently up, innermost last.
    showing: Vec<WindowId>,
}

pub(crate) struct SimHost {
    state: RefCell<SimState>,
}

impl SimHost {
    /// Value returned by the simulated next hook in the chain.
    pub(crate) const NEXT_HOOK_RESULT: isize = 0x5EED;

    pub(crate) fn new() -> Self {
        Self {
            state: RefCell::new(SimState {
                next_window: 0x100,
                windows: BTreeMap::new(),
                default_ids: BTreeMap::new(),
                focus: None,
                foreground: None,
                text_writes: 0,
                panic_on_class_query: false,
                panic_on_set_font: false,
                hooks: Vec::new(),
                next_hook: 0x7000,
                deny_hooks: false,
                uninstall_calls: 0,
                forwarded: 0,
                dpi: Some(96),
                fail_fonts: false,
                next_font: 0x9000,
                live_fonts: BTreeSet::new(),
                fonts_created: 0,
                fonts_deleted: 0,
                double_frees: 0,
                last_descriptor: None,
                actions: VecDeque::new(),
                teardown: Teardown::Normal,
                dialog_class: DIALOG_CLASS.to_owned(),
                nested: None,
                last_call: None,
                dialogs_shown: Vec::new(),
                showing: Vec::new(),
            }),
        }
    }

    // ── Scripting ─────────────────────────────────────────────────────────────

    pub(crate) fn push_action(&self, action: UserAction) {
        self.state.borrow_mut().actions.push_back(action);
    }

    pub(crate) fn set_teardown(&self, teardown: Teardown) {
        self.state.borrow_mut().teardown = teardown;
    }

    pub(crate) fn set_dialog_class(&self, class: &str) {
        self.state.borrow_mut().dialog_class = class.to_owned();
    }

    /// Run `f` while the next message box is up (after Activate).
    pub(crate) fn while_shown(&self, f: impl FnOnce(&SimHost) + 'static) {
        self.state.borrow_mut().nested = Some(Box::new(f));
    }

    pub(crate) fn set_dpi(&self, dpi: Option<u32>) {
        self.state.borrow_mut().dpi = dpi;
    }

    pub(crate) fn fail_font_creation(&self, fail: bool) {
        self.state.borrow_mut().fail_fonts = fail;
    }

    pub(crate) fn deny_hooks(&self, deny: bool) {
        self.state.borrow_mut().deny_hooks = deny;
    }

    pub(crate) fn panic_on_class_query(&self, panic: bool) {
        self.state.borrow_mut().panic_on_class_query = panic;
    }

    pub(crate) fn panic_on_set_font(&self, panic: bool) {
        self.state.borrow_mut().panic_on_set_font = panic;
    }

    // ── Window construction ───────────────────────────────────────────────────

    fn insert_window(&self, class: &str, parent: Option<WindowId>, control_id: i32, text: &str) -> WindowId {
        let mut s = self.state.borrow_mut();
        let id = WindowId(s.next_window);
        s.next_window += 1;
        s.windows.insert(
            id,
            SimWindow {
                class: class.to_owned(),
                text: text.to_owned(),
                parent,
                control_id,
                font: None,
                default_style: false,
                cues_hidden: true,
            },
        );
        id
    }

    pub(crate) fn spawn_window(&self, class: &str) -> WindowId {
        self.insert_window(class, None, 0, "")
    }

    pub(crate) fn spawn_titled_window(&self, class: &str, title: &str) -> WindowId {
        self.insert_window(class, None, 0, title)
    }

    pub(crate) fn spawn_child(&self, parent: WindowId, class: &str, control_id: i32) -> WindowId {
        self.insert_window(class, Some(parent), control_id, "")
    }

    /// A standard dialog with the buttons of `buttons` and a message static.
    pub(crate) fn spawn_dialog(&self, buttons: Buttons) -> WindowId {
        self.build_dialog(DIALOG_CLASS, buttons, "", "", false)
    }

    fn build_dialog(&self, class: &str, buttons: Buttons, caption: &str, text: &str, icon: bool) -> WindowId {
        let dlg = self.insert_window(class, None, 0, caption);
        if icon {
            self.insert_window(STATIC_CLASS, Some(dlg), ICON_ID, "");
        }
        self.insert_window(STATIC_CLASS, Some(dlg), MESSAGE_TEXT_ID, text);
        for role in buttons.roles() {
            self.insert_window(BUTTON_CLASS, Some(dlg), role.control_id(), &format!("{role:?}"));
        }
        dlg
    }

    fn remove_tree(&self, root: WindowId) {
        let doomed: Vec<WindowId> = std::iter::once(root).chain(self.children(root)).collect();
        let mut s = self.state.borrow_mut();
        for w in doomed {
            s.windows.remove(&w);
            s.default_ids.remove(&w);
        }
    }

    fn deliver(&self, code: i32, window: WindowId) {
        let hooks = self.state.borrow().hooks.len();
        for _ in 0..hooks {
            hook::hook_proc(self, code, window.0 as usize, 0);
        }
    }

    // ── Observations ──────────────────────────────────────────────────────────

    pub(crate) fn button_text(&self, dialog: WindowId, role: ButtonRole) -> Option<String> {
        let button = self.dlg_item(dialog, role.control_id())?;
        self.window_text(button)
    }

    pub(crate) fn font_of(&self, window: WindowId) -> Option<FontHandle> {
        self.state.borrow().windows.get(&window).and_then(|w| w.font)
    }

    pub(crate) fn last_font_descriptor(&self) -> Option<FontDescriptor> {
        self.state.borrow().last_descriptor.clone()
    }

    /// Role of the dialog's default button, if the dialog-level default id and
    /// the button's visual style agree.
    pub(crate) fn default_button(&self, dialog: WindowId) -> Option<ButtonRole> {
        let id = *self.state.borrow().default_ids.get(&dialog)?;
        let button = self.dlg_item(dialog, id)?;
        let styled = self
            .state
            .borrow()
            .windows
            .get(&button)
            .is_some_and(|w| w.default_style);
        if styled {
            ButtonRole::from_control_id(id)
        } else {
            None
        }
    }

    pub(crate) fn focused_role(&self, dialog: WindowId) -> Option<ButtonRole> {
        let s = self.state.borrow();
        let focus = s.focus?;
        let w = s.windows.get(&focus)?;
        if w.parent != Some(dialog) {
            return None;
        }
        ButtonRole::from_control_id(w.control_id)
    }

    pub(crate) fn is_foreground(&self, window: WindowId) -> bool {
        self.state.borrow().foreground == Some(window)
    }

    pub(crate) fn focus_cues_visible(&self, window: WindowId) -> bool {
        self.state
            .borrow()
            .windows
            .get(&window)
            .is_some_and(|w| !w.cues_hidden)
    }

    pub(crate) fn text_writes(&self) -> usize {
        self.state.borrow().text_writes
    }

    pub(crate) fn installed_hooks(&self) -> usize {
        self.state.borrow().hooks.len()
    }

    pub(crate) fn uninstall_calls(&self) -> usize {
        self.state.borrow().uninstall_calls
    }

    pub(crate) fn forwarded(&self) -> usize {
        self.state.borrow().forwarded
    }

    pub(crate) fn fonts_created(&self) -> usize {
        self.state.borrow().fonts_created
    }

    pub(crate) fn fonts_deleted(&self) -> usize {
        self.state.borrow().fonts_deleted
    }

    pub(crate) fn live_fonts(&self) -> usize {
        self.state.borrow().live_fonts.len()
    }

    pub(crate) fn double_frees(&self) -> usize {
        self.state.borrow().double_frees
    }

    pub(crate) fn last_call(&self) -> Option<MessageBoxCall> {
        self.state.borrow().last_call.clone()
    }

    pub(crate) fn dialogs_shown(&self) -> Vec<WindowId> {
        self.state.borrow().dialogs_shown.clone()
    }
}

impl DialogHost for SimHost {
    fn install_hook(&self) -> Result<HookHandle> {
        let mut s = self.state.borrow_mut();
        if s.deny_hooks {
            return Err(DialogError::Win32 {
                function: "SetWindowsHookExW",
                code: 5,
            });
        }
        let raw = s.next_hook;
        s.next_hook += 1;
        s.hooks.push(raw);
        Ok(HookHandle(raw))
    }

    fn uninstall_hook(&self, handle: HookHandle) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.uninstall_calls += 1;
        let before = s.hooks.len();
        s.hooks.retain(|&h| h != handle.raw());
        if s.hooks.len() == before {
            return Err(DialogError::Win32 {
                function: "UnhookWindowsHookEx",
                code: 1404,
            });
        }
        Ok(())
    }

    fn call_next_hook(&self, _code: i32, _wparam: usize, _lparam: isize) -> isize {
        self.state.borrow_mut().forwarded += 1;
        Self::NEXT_HOOK_RESULT
    }

    fn class_name(&self, window: WindowId) -> Option<String> {
        if self.state.borrow().panic_on_class_query {
            panic!("simulated failure inside the window system");
        }
        self.state.borrow().windows.get(&window).map(|w| w.class.clone())
    }

    fn window_text(&self, window: WindowId) -> Option<String> {
        self.state.borrow().windows.get(&window).map(|w| w.text.clone())
    }

    fn children(&self, parent: WindowId) -> Vec<WindowId> {
        let s = self.state.borrow();
        let mut out = Vec::new();
        let mut pending = vec![parent];
        while let Some(p) = pending.pop() {
            for (&id, w) in &s.windows {
                if w.parent == Some(p) {
                    out.push(id);
                    pending.push(id);
                }
            }
        }
        out
    }

    fn control_id(&self, window: WindowId) -> i32 {
        self.state
            .borrow()
            .windows
            .get(&window)
            .map_or(0, |w| w.control_id)
    }

    fn set_text(&self, window: WindowId, text: &str) -> Result<()> {
        let mut s = self.state.borrow_mut();
        let w = s
            .windows
            .get_mut(&window)
            .ok_or(DialogError::Missing("window"))?;
        w.text = text.to_owned();
        s.text_writes += 1;
        Ok(())
    }

    fn set_font(&self, window: WindowId, font: FontHandle) {
        if self.state.borrow().panic_on_set_font {
            panic!("simulated failure while applying a font");
        }
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window) {
            w.font = Some(font);
        }
    }

    fn set_foreground(&self, window: WindowId) -> Result<()> {
        self.state.borrow_mut().foreground = Some(window);
        Ok(())
    }

    fn set_default_id(&self, dialog: WindowId, id: i32) {
        let previous = self.state.borrow_mut().default_ids.insert(dialog, id);
        if let Some(old) = previous.filter(|&old| old != id) {
            if let Some(button) = self.dlg_item(dialog, old) {
                if let Some(w) = self.state.borrow_mut().windows.get_mut(&button) {
                    w.default_style = false;
                }
            }
        }
    }

    fn set_default_style(&self, button: WindowId) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&button) {
            w.default_style = true;
        }
    }

    fn set_focus(&self, window: WindowId) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if !s.windows.contains_key(&window) {
            return Err(DialogError::Missing("focus target"));
        }
        s.focus = Some(window);
        Ok(())
    }

    fn clear_focus_cues(&self, window: WindowId) {
        if let Some(w) = self.state.borrow_mut().windows.get_mut(&window) {
            w.cues_hidden = false;
        }
    }

    fn vertical_dpi(&self) -> Option<u32> {
        self.state.borrow().dpi
    }

    fn create_font(&self, descriptor: &FontDescriptor) -> Result<FontHandle> {
        let mut s = self.state.borrow_mut();
        if s.fail_fonts {
            return Err(DialogError::Win32 {
                function: "CreateFontIndirectW",
                code: 0,
            });
        }
        let font = FontHandle(s.next_font);
        s.next_font += 1;
        s.live_fonts.insert(font);
        s.fonts_created += 1;
        s.last_descriptor = Some(descriptor.clone());
        Ok(font)
    }

    fn delete_font(&self, font: FontHandle) {
        let mut s = self.state.borrow_mut();
        if s.live_fonts.remove(&font) {
            s.fonts_deleted += 1;
        } else {
            s.double_frees += 1;
        }
    }

    fn message_box(
        &self,
        owner: Option<WindowId>,
        text: &str,
        caption: &str,
        style: u32,
    ) -> Result<i32> {
        let buttons = match style & 0xF {
            0 => Buttons::Ok,
            1 => Buttons::OkCancel,
            3 => Buttons::YesNoCancel,
            4 => Buttons::YesNo,
            _ => return Err(DialogError::Missing("button layout")),
        };
        // Claimed up front so that dialogs opened while this one is up take
        // the actions queued after it.
        let action = self
            .state
            .borrow_mut()
            .actions
            .pop_front()
            .unwrap_or(UserAction::Enter);
        let icon = style & 0xF0 != 0;
        let class = self.state.borrow().dialog_class.clone();
        let dlg = self.build_dialog(&class, buttons, caption, text, icon);

        // MB_DEFBUTTONn selects the initial default.
        let default_index = ((style >> 8) & 0xF) as usize;
        let initial = buttons.roles().get(default_index).copied().unwrap_or(buttons.natural_default());
        self.set_default_id(dlg, initial.control_id());
        if let Some(button) = self.dlg_item(dlg, initial.control_id()) {
            self.set_default_style(button);
        }

        let teardown = {
            let mut s = self.state.borrow_mut();
            s.last_call = Some(MessageBoxCall {
                owner,
                text: text.to_owned(),
                caption: caption.to_owned(),
                style,
            });
            s.dialogs_shown.push(dlg);
            s.showing.push(dlg);
            s.teardown
        };

        if teardown == Teardown::DestroyBeforeActivate {
            self.deliver(HCBT_DESTROYWND, dlg);
        }
        self.deliver(HCBT_ACTIVATE, dlg);

        let nested = self.state.borrow_mut().nested.take();
        if let Some(f) = nested {
            f(self);
        }

        let pressed = match action {
            UserAction::Click(role) => self
                .dlg_item(dlg, role.control_id())
                .map(|_| role.control_id())
                .ok_or(DialogError::Missing("clicked button")),
            UserAction::Enter => self
                .state
                .borrow()
                .default_ids
                .get(&dlg)
                .copied()
                .ok_or(DialogError::Missing("default button")),
        };

        if teardown == Teardown::Normal {
            self.deliver(HCBT_DESTROYWND, dlg);
            for child in self.children(dlg) {
                self.deliver(HCBT_DESTROYWND, child);
            }
        }
        self.remove_tree(dlg);

        // The system hands activation back to the dialog underneath, while the
        // caller's session is still open.
        let outer = {
            let mut s = self.state.borrow_mut();
            s.showing.pop();
            s.showing.last().copied()
        };
        if let Some(outer) = outer {
            self.deliver(HCBT_ACTIVATE, outer);
        }

        pressed
    }
}
