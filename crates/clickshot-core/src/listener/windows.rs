//! Windows low-level mouse hook
//!
//! Installs a `WH_MOUSE_LL` hook on a dedicated Win32 message-loop thread and
//! forwards button events over a channel. The hook callback does nothing but
//! translate and send; all pipeline work happens on the listener thread, so
//! the callback stays well under the OS hook timeout.
//!
//! # Safety
//!
//! `unsafe` is used exclusively for Win32 FFI calls; every block carries a
//! `// SAFETY:` comment.

#![cfg(target_os = "windows")]

use std::ptr;
use std::sync::OnceLock;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use windows_sys::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::Threading::GetCurrentThreadId;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, HC_ACTION, MSG, MSLLHOOKSTRUCT,
    PostThreadMessageW, SetWindowsHookExW, UnhookWindowsHookEx, WH_MOUSE_LL, WM_LBUTTONDOWN,
    WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_QUIT, WM_RBUTTONDOWN, WM_RBUTTONUP,
    WM_XBUTTONDOWN, WM_XBUTTONUP,
};

use super::{EventSource, PointerButton, PointerEvent};
use crate::error::{CaptureError, CaptureResult};

/// Global sender used by the hook callback to deliver events.
/// Initialized once by [`HookEventSource::start`].
static EVENT_SENDER: OnceLock<Sender<PointerEvent>> = OnceLock::new();

/// Thread id of the hook message loop, for posting WM_QUIT on stop.
static HOOK_THREAD_ID: OnceLock<u32> = OnceLock::new();

/// Production [`EventSource`] backed by `WH_MOUSE_LL`
///
/// Only one instance may be started per process; the hook callback reports
/// into process-wide state.
#[derive(Debug, Default)]
pub struct HookEventSource {
    _private: (),
}

impl HookEventSource {
    /// Creates a new (unstarted) source
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for HookEventSource {
    fn start(&self) -> CaptureResult<Receiver<PointerEvent>> {
        let (tx, rx) = mpsc::channel::<PointerEvent>();

        EVENT_SENDER
            .set(tx)
            .map_err(|_| CaptureError::HookInstallFailed {
                reason: "event sender already initialized, only one hook may run".to_string(),
            })?;

        // The hook must be installed on the thread that runs the message
        // loop. Installation happens there and the result is reported back
        // before start() returns.
        let (install_tx, install_rx) = mpsc::channel::<Result<u32, String>>();
        thread::Builder::new()
            .name("clickshot-hook-loop".to_string())
            .spawn(move || run_hook_message_loop(install_tx))
            .map_err(|e| CaptureError::HookInstallFailed {
                reason: e.to_string(),
            })?;

        match install_rx.recv() {
            Ok(Ok(thread_id)) => {
                let _ = HOOK_THREAD_ID.set(thread_id);
                Ok(rx)
            }
            Ok(Err(reason)) => Err(CaptureError::HookInstallFailed { reason }),
            Err(_) => Err(CaptureError::HookInstallFailed {
                reason: "hook thread exited before reporting".to_string(),
            }),
        }
    }

    fn stop(&self) {
        if let Some(&thread_id) = HOOK_THREAD_ID.get() {
            // SAFETY: Posting WM_QUIT to a thread id is always safe; it fails
            // harmlessly if the thread is already gone.
            unsafe {
                PostThreadMessageW(thread_id, WM_QUIT, 0, 0);
            }
        }
    }
}

/// Entry point for the dedicated Win32 message-loop thread
fn run_hook_message_loop(install_tx: Sender<Result<u32, String>>) {
    // SAFETY: A null module handle is valid for low-level hooks; the callback
    // runs in this process, not via injection.
    let hook = unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), ptr::null_mut(), 0) };
    if hook.is_null() {
        let _ = install_tx.send(Err("SetWindowsHookExW(WH_MOUSE_LL) failed".to_string()));
        return;
    }

    // SAFETY: GetCurrentThreadId takes no arguments and cannot fail.
    let thread_id = unsafe { GetCurrentThreadId() };
    let _ = install_tx.send(Ok(thread_id));

    // Standard Win32 message loop; blocks until WM_QUIT is posted.
    // SAFETY: msg is a valid out-pointer for GetMessageW.
    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while GetMessageW(&mut msg, ptr::null_mut(), 0, 0) > 0 {
            DispatchMessageW(&msg);
        }
        UnhookWindowsHookEx(hook);
    }
    tracing::debug!("Mouse hook thread exited");
}

/// Low-level mouse hook callback
///
/// Called by Windows on the hook thread; must return quickly to avoid hook
/// removal by the OS. Events are always passed on to the next hook, the
/// capture is an observer only.
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: CallNextHookEx must be called when n_code < 0.
        return unsafe { CallNextHookEx(ptr::null_mut(), n_code, w_param, l_param) };
    }

    // SAFETY: l_param points to an MSLLHOOKSTRUCT when n_code == HC_ACTION.
    let info = unsafe { &*(l_param as *const MSLLHOOKSTRUCT) };

    let (button, pressed) = match w_param as u32 {
        WM_LBUTTONDOWN => (PointerButton::Primary, true),
        WM_LBUTTONUP => (PointerButton::Primary, false),
        WM_RBUTTONDOWN => (PointerButton::Secondary, true),
        WM_RBUTTONUP => (PointerButton::Secondary, false),
        WM_MBUTTONDOWN => (PointerButton::Middle, true),
        WM_MBUTTONUP => (PointerButton::Middle, false),
        WM_XBUTTONDOWN => (PointerButton::Other, true),
        WM_XBUTTONUP => (PointerButton::Other, false),
        _ => {
            // Moves and wheel events are not capture triggers
            return unsafe { CallNextHookEx(ptr::null_mut(), n_code, w_param, l_param) };
        }
    };

    if let Some(sender) = EVENT_SENDER.get() {
        // Send errors mean the listener is shutting down; nothing to do here
        let _ = sender.send(PointerEvent {
            button,
            pressed,
            x: info.pt.x,
            y: info.pt.y,
        });
    }

    // SAFETY: Forward to the next hook in the chain.
    unsafe { CallNextHookEx(ptr::null_mut(), n_code, w_param, l_param) }
}
