//! SIGINT/SIGTERM handling so an interrupted run still restores the display.
use std::io;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

static CANCELLED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_signal(_signum: libc::c_int) {
    CANCELLED.store(true, Ordering::SeqCst);
}

/// Route SIGINT and SIGTERM into the process-wide cancellation flag.
pub fn install() -> io::Result<()> {
    // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
        libc::sigemptyset(&mut action.sa_mask);

        for signum in [libc::SIGINT, libc::SIGTERM] {
            if libc::sigaction(signum, &action, ptr::null_mut()) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
    }
    Ok(())
}

/// Cheap handle checked between frames.
#[derive(Debug, Clone, Copy)]
pub struct CancelToken {
    flag: &'static AtomicBool,
}

impl CancelToken {
    pub const fn new(flag: &'static AtomicBool) -> Self {
        Self { flag }
    }

    /// Token tied to the signal handlers installed by [`install`].
    pub fn from_signals() -> Self {
        Self::new(&CANCELLED)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_clear() {
        let flag: &'static AtomicBool = Box::leak(Box::new(AtomicBool::new(false)));
        let token = CancelToken::new(flag);
        assert!(!token.is_cancelled());

        let copy = token;
        copy.cancel();
        assert!(token.is_cancelled());
    }
}
