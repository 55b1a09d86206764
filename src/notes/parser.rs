use super::{Accidental, Letter, DEFAULT_OCTAVE, MAX_OCTAVE, PAUSE};
use crate::error::NoteError;

/// Result of parsing a note token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    /// Silence: the token was the pause keyword.
    Rest,
    /// An audible tone at the given frequency (Hz).
    Tone(f64),
}

impl Pitch {
    pub fn frequency(&self) -> Option<f64> {
        match self {
            Pitch::Rest => None,
            Pitch::Tone(freq) => Some(*freq),
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Pitch::Rest)
    }
}

/// A fully parsed, audible note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteName {
    pub letter: Letter,
    pub octave: u8,
    pub accidental: Option<Accidental>,
}

impl NoteName {
    /// Parse `letter [octave] [accidental]`.
    ///
    /// Stages run in reading order and stop at the first invalid one, so a
    /// bad letter is reported even when the octave is also wrong.
    pub fn parse(token: &str) -> Result<Self, NoteError> {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return Err(NoteError::InvalidNoteFormat {
                token: token.to_string(),
            });
        };

        let letter = Letter::from_char(first).ok_or_else(|| NoteError::InvalidNoteLetter {
            letter: first.to_string(),
            token: token.to_string(),
        })?;

        let rest: Vec<char> = chars.collect();
        let (octave, accidental) = match rest.as_slice() {
            [] => (DEFAULT_OCTAVE, None),
            [c] => match Accidental::from_char(*c) {
                Some(accidental) => (DEFAULT_OCTAVE, Some(accidental)),
                None => (parse_octave(*c, token)?, None),
            },
            [o, a] => {
                let octave = parse_octave(*o, token)?;
                (octave, Some(parse_accidental(*a, token)?))
            }
            _ => {
                return Err(NoteError::InvalidNoteFormat {
                    token: token.to_string(),
                })
            }
        };

        Ok(Self {
            letter,
            octave,
            accidental,
        })
    }

    /// Equal-tempered frequency in Hz.
    pub fn frequency(&self) -> f64 {
        let freq = self.letter.base_frequency() * 2f64.powi(self.octave as i32);
        match self.accidental {
            Some(accidental) => accidental.apply(freq),
            None => freq,
        }
    }
}

fn parse_octave(c: char, token: &str) -> Result<u8, NoteError> {
    match c.to_digit(10) {
        Some(d) if d <= MAX_OCTAVE as u32 => Ok(d as u8),
        _ => Err(NoteError::InvalidOctave {
            octave: c.to_string(),
            token: token.to_string(),
        }),
    }
}

fn parse_accidental(c: char, token: &str) -> Result<Accidental, NoteError> {
    Accidental::from_char(c).ok_or_else(|| NoteError::InvalidAccidental {
        symbol: c.to_string(),
        token: token.to_string(),
    })
}

/// Convert a note token into a [`Pitch`].
///
/// `pause` yields [`Pitch::Rest`]; anything else must be a valid note.
pub fn parse_note(token: &str) -> Result<Pitch, NoteError> {
    if token == PAUSE {
        return Ok(Pitch::Rest);
    }
    NoteName::parse(token).map(|note| Pitch::Tone(note.frequency()))
}
