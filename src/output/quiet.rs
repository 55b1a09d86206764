//! Scoped redirection of the process's stderr to the null device.
//!
//! Audio backends (ALSA, JACK, PortAudio) print probing noise straight to
//! file descriptor 2 while a device is opened or closed. [`quietly`] mutes
//! fd 2 for the duration of one call and restores it afterwards, including
//! when the call fails or panics.

use std::io::{self, Write};

/// Run `f` with stderr muted when `enabled` is set.
///
/// If muting cannot be set up, `f` still runs with stderr untouched.
pub fn quietly<T>(enabled: bool, f: impl FnOnce() -> T) -> T {
    if !enabled {
        return f();
    }
    let _guard = match StderrSilencer::engage() {
        Ok(guard) => Some(guard),
        Err(err) => {
            tracing::debug!(error = %err, "could not mute stderr");
            None
        }
    };
    f()
}

/// Holds stderr redirected to the null device until dropped.
#[derive(Debug)]
pub struct StderrSilencer {
    #[cfg(unix)]
    saved: libc::c_int,
    #[cfg(unix)]
    null: libc::c_int,
}

#[cfg(unix)]
impl StderrSilencer {
    pub fn engage() -> io::Result<Self> {
        let _ = io::stderr().flush();

        // SAFETY: plain fd syscalls; every descriptor opened here is either
        // stored in the guard or closed before returning.
        unsafe {
            let saved = libc::dup(libc::STDERR_FILENO);
            if saved < 0 {
                return Err(io::Error::last_os_error());
            }

            let null = libc::open(c"/dev/null".as_ptr(), libc::O_WRONLY);
            if null < 0 {
                let err = io::Error::last_os_error();
                libc::close(saved);
                return Err(err);
            }

            if libc::dup2(null, libc::STDERR_FILENO) < 0 {
                let err = io::Error::last_os_error();
                libc::close(null);
                libc::close(saved);
                return Err(err);
            }

            Ok(Self { saved, null })
        }
    }
}

#[cfg(unix)]
impl Drop for StderrSilencer {
    fn drop(&mut self) {
        // SAFETY: `saved` and `null` are descriptors owned by this guard.
        unsafe {
            libc::dup2(self.saved, libc::STDERR_FILENO);
            libc::close(self.saved);
            libc::close(self.null);
        }
    }
}

#[cfg(not(unix))]
impl StderrSilencer {
    pub fn engage() -> io::Result<Self> {
        Ok(Self {})
    }
}
