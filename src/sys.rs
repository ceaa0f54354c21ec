//! Platform probes: page size and the blocking hold.

use std::thread;
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Bytes per virtual-memory page, queried once. `None` when the host will
/// not say.
pub fn page_size() -> Option<usize> {
    static PAGE: OnceCell<Option<usize>> = OnceCell::new();
    *PAGE.get_or_init(probe_page_size)
}

#[cfg(unix)]
fn probe_page_size() -> Option<usize> {
    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if raw > 0 { Some(raw as usize) } else { None }
}

#[cfg(not(unix))]
fn probe_page_size() -> Option<usize> {
    None
}

/// Block for `seconds`, or forever when `seconds` is zero. The indefinite
/// wait only ends when a signal terminates the process.
pub fn hold(seconds: u64) {
    if seconds > 0 {
        thread::sleep(Duration::from_secs(seconds));
    } else {
        wait_forever();
    }
}

#[cfg(unix)]
fn wait_forever() -> ! {
    loop {
        unsafe {
            libc::pause();
        }
    }
}

#[cfg(not(unix))]
fn wait_forever() -> ! {
    loop {
        thread::sleep(Duration::from_secs(60 * 60 * 24));
    }
}
