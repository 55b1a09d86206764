/*
Note Names and Frequencies
==========================

A note token names a pitch in scientific pitch notation:

    A5#
    │││
    ││└─ accidental (optional): '#' sharp, 'b' flat
    │└── octave (optional): 0-8, default 4
    └─── letter: A-G, case-insensitive

The letter selects a base frequency from the octave-0 table below. Each
octave doubles it, and an accidental shifts it by one equal-tempered
semitone:

    freq = base(letter) * 2^octave * 2^(±1/12)

Example: A5# = 27.5 * 32 * 1.05946 ≈ 932.33 Hz

Note the table starts each "octave" at its letter, so A0 (27.5 Hz) is higher
than C0 (16.35 Hz). A4 lands on 440 Hz, the tuning reference.

The word `pause` is reserved and yields a rest instead of a tone.
*/

mod parser;

pub use parser::{parse_note, NoteName, Pitch};

/// Token that requests silence instead of a tone.
pub const PAUSE: &str = "pause";

/// Octave used when a token carries none.
pub const DEFAULT_OCTAVE: u8 = 4;

/// Highest octave the notation accepts.
pub const MAX_OCTAVE: u8 = 8;

/// Ratio between two adjacent equal-tempered semitones.
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3; // 2^(1/12)

/// The seven natural note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    /// Case-insensitive lookup.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            _ => None,
        }
    }

    /// Frequency of this letter in octave 0, in Hz.
    pub fn base_frequency(self) -> f64 {
        match self {
            Letter::A => 27.5,
            Letter::B => 30.867_71,
            Letter::C => 16.351_6,
            Letter::D => 18.354_05,
            Letter::E => 20.601_72,
            Letter::F => 21.826_76,
            Letter::G => 24.499_71,
        }
    }
}

/// Semitone modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    /// Only `#` and lowercase `b` are accidentals; `B` is always a letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn apply(self, frequency: f64) -> f64 {
        match self {
            Accidental::Sharp => frequency * SEMITONE_RATIO,
            Accidental::Flat => frequency / SEMITONE_RATIO,
        }
    }
}
