use std::fmt;
use std::io::{self, Write};

/// Where user-facing lines go.
///
/// Informational lines (`Playing …`, `Pausing …`, `Done`) go to `out` unless
/// the console is silent; diagnostics always go to `err`, prefixed with
/// `Error: `. A [`TonePlayer`](super::TonePlayer) sets silence from its
/// [`PlayerConfig`](crate::config::PlayerConfig).
pub struct Console {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    silent: bool,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            err,
            silent: false,
        }
    }

    /// Process stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn info(&mut self, args: fmt::Arguments<'_>) {
        if self.silent {
            return;
        }
        // Write failures (closed pipe) are ignored.
        let _ = writeln!(self.out, "{args}");
        let _ = self.out.flush();
    }

    pub fn error(&mut self, err: &dyn fmt::Display) {
        let _ = writeln!(self.err, "Error: {err}");
        let _ = self.err.flush();
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("silent", &self.silent)
            .finish_non_exhaustive()
    }
}
