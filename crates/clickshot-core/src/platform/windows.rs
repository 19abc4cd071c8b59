//! Win32 foreground-window metadata
//!
//! Window mode needs the title, class name, owning executable, and pixel
//! rectangle of the window that currently has input focus. All of that comes
//! from Win32 via `windows-sys`; the pixel capture itself still goes through
//! the shared region grabber.

#![cfg(target_os = "windows")]

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::ptr;

use windows_sys::Win32::Foundation::{CloseHandle, HWND, RECT};
use windows_sys::Win32::System::ProcessStatus::GetModuleBaseNameW;
use windows_sys::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetClassNameW, GetForegroundWindow, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId,
};

use crate::error::{CaptureError, CaptureResult};
use crate::model::WindowDescriptor;

/// Reads the current foreground window
///
/// Returns `Ok(None)` when nothing has focus (desktop, lock screen). The
/// executable name may be empty when the owning process cannot be opened;
/// classification then falls back to the window class alone.
pub fn query_foreground_window() -> CaptureResult<Option<WindowDescriptor>> {
    // SAFETY: GetForegroundWindow takes no arguments and returns null when
    // no window has focus.
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_null() {
        return Ok(None);
    }

    let mut rect = RECT {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
    // SAFETY: hwnd was just returned by GetForegroundWindow; rect is a valid
    // out-pointer.
    if unsafe { GetWindowRect(hwnd, &mut rect) } == 0 {
        return Err(CaptureError::ForegroundQueryFailed {
            reason: "GetWindowRect failed".to_string(),
        });
    }

    Ok(Some(WindowDescriptor {
        handle: hwnd as isize,
        title: window_title(hwnd),
        class: window_class(hwnd),
        exe: process_executable(hwnd),
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }))
}

/// Reads the window title
///
/// GetWindowTextLengthW returns the length WITHOUT the null terminator; the
/// buffer passed to GetWindowTextW must hold `len + 1` UTF-16 units. The
/// length is capped to keep a hostile window from forcing an unbounded
/// allocation.
fn window_title(hwnd: HWND) -> String {
    const MAX_TITLE_LEN: i32 = 32768;
    unsafe {
        let len = GetWindowTextLengthW(hwnd).min(MAX_TITLE_LEN);
        if len == 0 {
            return String::new();
        }

        let mut buffer: Vec<u16> = vec![0; (len + 1) as usize];
        let copied = GetWindowTextW(hwnd, buffer.as_mut_ptr(), buffer.len() as i32);
        if copied == 0 {
            return String::new();
        }

        buffer.truncate(copied as usize);
        OsString::from_wide(&buffer).to_string_lossy().into_owned()
    }
}

/// Reads the window class name
fn window_class(hwnd: HWND) -> String {
    unsafe {
        let mut buffer: Vec<u16> = vec![0; 256];
        let len = GetClassNameW(hwnd, buffer.as_mut_ptr(), buffer.len() as i32);
        if len == 0 {
            return String::new();
        }

        buffer.truncate(len as usize);
        OsString::from_wide(&buffer).to_string_lossy().into_owned()
    }
}

/// Resolves the executable name of the window's owning process
///
/// Returns an empty string when the process cannot be opened (insufficient
/// rights, process exited); callers treat that as "identity unknown" rather
/// than an error.
fn process_executable(hwnd: HWND) -> String {
    unsafe {
        let mut pid: u32 = 0;
        GetWindowThreadProcessId(hwnd, &mut pid);
        if pid == 0 {
            return String::new();
        }

        let process = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, 0, pid);
        if process.is_null() {
            return String::new();
        }

        // MAX_PATH-sized buffer; base names are short
        let mut buffer: Vec<u16> = vec![0; 260];
        let len = GetModuleBaseNameW(
            process,
            ptr::null_mut(), // null module = main executable
            buffer.as_mut_ptr(),
            buffer.len() as u32,
        );

        CloseHandle(process);

        if len == 0 {
            return String::new();
        }

        buffer.truncate(len as usize);
        OsString::from_wide(&buffer).to_string_lossy().into_owned()
    }
}
