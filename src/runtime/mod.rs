//! The line loop: read notes, play them, report what was skipped.
//!
//! # Example
//!
//! ```ignore
//! use std::io::BufReader;
//! use musical_beeps::{config::PlayerConfig, player::{Console, TonePlayer}, runtime};
//!
//! let mut player = TonePlayer::open(PlayerConfig::default(), Console::stdio())?;
//! runtime::play_lines(BufReader::new(std::io::stdin()), &mut player)?;
//! player.close()?;
//! ```

use std::io::BufRead;

use crate::error::{LineError, PlayerError};
use crate::output::AudioSink;
use crate::player::TonePlayer;
use crate::sequencing::{parse_line, RequestKind};

/// What happened over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tones: usize,
    pub pauses: usize,
    pub skipped: usize,
}

/// Play every line of `input` through `player`.
///
/// Lines that fail to parse, including lines that are not UTF-8, are reported
/// as `Error: …` and skipped. Reading errors and device failures end the run.
/// Once input is exhausted the player is drained and `Done` is printed
/// (unless the console is silent).
pub fn play_lines<R, S>(mut input: R, player: &mut TonePlayer<S>) -> Result<RunSummary, PlayerError>
where
    R: BufRead,
    S: AudioSink,
{
    let mut summary = RunSummary::default();
    let mut raw = Vec::new();
    let mut number = 0usize;

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        number += 1;

        let parsed = match std::str::from_utf8(&raw) {
            Ok(line) => parse_line(line),
            Err(_) => Err(LineError::InvalidText(
                String::from_utf8_lossy(&raw).trim_end().to_string(),
            )),
        };
        let request = match parsed {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => {
                tracing::debug!(line = number, error = %err, "skipping line");
                player.console_mut().error(&err);
                summary.skipped += 1;
                continue;
            }
        };

        player.play_note(&request)?;
        match request.kind() {
            RequestKind::Tone => summary.tones += 1,
            RequestKind::Pause => summary.pauses += 1,
        }
    }

    player.drain()?;
    player.console_mut().info(format_args!("Done"));
    tracing::debug!(?summary, "input exhausted");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::dsp::SAMPLE_RATE;
    use crate::output::MemorySink;
    use crate::player::{capture::Captured, Console};
    use std::io::{self, BufReader, Cursor, Read};

    fn player(silent: bool) -> (TonePlayer<MemorySink>, Captured, Captured) {
        let (out, err) = (Captured::default(), Captured::default());
        let console = Console::new(Box::new(out.clone()), Box::new(err.clone()));
        let player = TonePlayer::with_sink(
            PlayerConfig::default().with_silent(silent),
            MemorySink::new(SAMPLE_RATE),
            console,
        )
        .unwrap();
        (player, out, err)
    }

    fn run(input: impl AsRef<[u8]>, silent: bool) -> (RunSummary, String, String, usize) {
        let (mut player, out, err) = player(silent);
        let summary = play_lines(Cursor::new(input.as_ref()), &mut player).unwrap();
        let written = player.sink().played().len();
        player.close().unwrap();
        (summary, out.text(), err.text(), written)
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (summary, out, err, written) = run("A:0.01\nH:0.01\nA:x\n\nC:0.01\n", false);

        assert_eq!(
            summary,
            RunSummary {
                tones: 2,
                pauses: 0,
                skipped: 2
            }
        );
        assert_eq!(written, 2);
        assert_eq!(
            err,
            "Error: invalid note: 'H'\nError: invalid duration: 'x'\n"
        );
        assert!(out.ends_with("Done\n"));
    }

    #[test]
    fn silent_run_prints_only_diagnostics() {
        let (_, out, err, _) = run("A:0.01\nA9:0.01\n", true);
        assert_eq!(out, "");
        assert_eq!(err, "Error: invalid octave: '9' in 'A9'\n");
    }

    #[test]
    fn empty_input_still_finishes() {
        let (summary, out, err, written) = run("", false);
        assert_eq!(summary, RunSummary::default());
        assert_eq!(out, "Done\n");
        assert_eq!(err, "");
        assert_eq!(written, 0);
    }

    #[test]
    fn huge_durations_are_skipped_not_fatal() {
        let (summary, out, err, written) = run("pause:1e20\nA:1e20\nA:0.01\n", false);

        assert_eq!(
            summary,
            RunSummary {
                tones: 1,
                pauses: 0,
                skipped: 2
            }
        );
        assert_eq!(written, 1);
        assert_eq!(
            err,
            "Error: invalid duration: '1e20'\nError: invalid duration: '1e20'\n"
        );
        assert!(out.ends_with("Done\n"));
    }

    #[test]
    fn non_utf8_line_is_skipped() {
        let input: &[u8] = &[b'A', b':', b'0', b'\n', 0xff, 0xfe, b'\n', b'C', b':', b'0', b'\n'];
        let (summary, out, err, written) = run(input, false);

        assert_eq!(summary.tones, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(written, 2);
        assert_eq!(err, "Error: invalid text: '\u{FFFD}\u{FFFD}'\n");
        assert!(out.ends_with("Done\n"));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (summary, _, err, _) = run("A:0.01\r\npause:0\r\n", true);
        assert_eq!(summary.tones, 1);
        assert_eq!(summary.pauses, 1);
        assert_eq!(err, "");
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn read_errors_are_fatal() {
        let (mut player, out, _err) = player(false);
        let result = play_lines(BufReader::new(BrokenPipe), &mut player);

        assert!(matches!(result, Err(PlayerError::Io(_))));
        assert_eq!(out.text(), "");
    }
}
