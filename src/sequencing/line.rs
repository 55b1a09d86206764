use super::request::{is_valid_duration, PlaybackRequest};
use crate::error::LineError;
use crate::notes::parse_note;

/// Separates the note token from its duration.
pub const DELIMITER: char = ':';

/// Duration used when a line carries none, in seconds.
pub const DEFAULT_DURATION: f64 = 0.5;

/// Turn one input line into a playback request.
///
/// Returns `Ok(None)` for blank lines. A line with exactly one `:` is
/// `note:duration`; any other line is taken whole as the note, played for
/// [`DEFAULT_DURATION`]. The duration is checked before the note.
pub fn parse_line(line: &str) -> Result<Option<PlaybackRequest>, LineError> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(None);
    }

    let (token, seconds) = match line.split_once(DELIMITER) {
        Some((token, duration)) if !duration.contains(DELIMITER) => {
            (token, parse_duration(duration)?)
        }
        _ => (line, DEFAULT_DURATION),
    };

    let pitch = parse_note(token)?;
    PlaybackRequest::new(token, pitch, seconds).map(Some)
}

fn parse_duration(raw: &str) -> Result<f64, LineError> {
    match raw.trim().parse::<f64>() {
        Ok(seconds) if is_valid_duration(seconds) => Ok(seconds),
        _ => Err(LineError::InvalidDuration(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;
    use crate::notes::Pitch;
    use crate::sequencing::RequestKind;

    fn request(line: &str) -> PlaybackRequest {
        parse_line(line).unwrap().expect("expected a request")
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \n"), Ok(None));
    }

    #[test]
    fn note_with_duration() {
        let req = request("A5#:1.5\n");
        assert_eq!(req.token(), "A5#");
        assert_eq!(req.seconds(), 1.5);
        assert_eq!(req.kind(), RequestKind::Tone);
    }

    #[test]
    fn missing_duration_uses_default() {
        let req = request("C");
        assert_eq!(req.seconds(), DEFAULT_DURATION);
        assert_eq!(req.frequency(), Some(16.351_6 * 16.0));
    }

    #[test]
    fn pause_line() {
        let req = request("pause:2");
        assert_eq!(req.pitch(), Pitch::Rest);
        assert_eq!(req.seconds(), 2.0);

        assert_eq!(request("pause").seconds(), DEFAULT_DURATION);
    }

    #[test]
    fn duration_tolerates_surrounding_spaces() {
        assert_eq!(request("A: 0.25").seconds(), 0.25);
    }

    #[test]
    fn bad_duration() {
        assert_eq!(
            parse_line("A:abc"),
            Err(LineError::InvalidDuration("abc".into()))
        );
        assert_eq!(parse_line("A:"), Err(LineError::InvalidDuration("".into())));
        assert_eq!(
            parse_line("A:-1"),
            Err(LineError::InvalidDuration("-1".into()))
        );
        assert!(matches!(
            parse_line("A:nan"),
            Err(LineError::InvalidDuration(_))
        ));
    }

    #[test]
    fn huge_durations_are_rejected() {
        assert_eq!(
            parse_line("pause:1e20"),
            Err(LineError::InvalidDuration("1e20".into()))
        );
        assert_eq!(
            parse_line("A:1e20"),
            Err(LineError::InvalidDuration("1e20".into()))
        );
        assert_eq!(
            parse_line("A:601"),
            Err(LineError::InvalidDuration("601".into()))
        );
        assert_eq!(request("pause:600").seconds(), 600.0);
    }

    #[test]
    fn duration_is_checked_before_note() {
        assert_eq!(
            parse_line("H:abc"),
            Err(LineError::InvalidDuration("abc".into()))
        );
    }

    #[test]
    fn extra_delimiters_make_the_whole_line_the_note() {
        assert_eq!(
            parse_line("A:1:2"),
            Err(LineError::Note(NoteError::InvalidNoteFormat {
                token: "A:1:2".into()
            }))
        );
    }

    #[test]
    fn bad_note_is_reported() {
        assert!(matches!(
            parse_line("badnote:1"),
            Err(LineError::Note(NoteError::InvalidNoteFormat { .. }))
        ));
    }
}
