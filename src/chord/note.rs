use serde::Serialize;
use std::fmt;

/// Natural note letters. `H` (German/Nordic B) is read as `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

const LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

impl Letter {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' | 'H' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn pitch_class(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn index(self) -> usize {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// The letter `steps` diatonic steps above this one.
    fn up(self, steps: usize) -> Self {
        LETTERS[(self.index() + steps) % 7]
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(Accidental::Natural),
            "b" | "♭" => Some(Accidental::Flat),
            "#" | "♯" => Some(Accidental::Sharp),
            "bb" => Some(Accidental::DoubleFlat),
            "##" => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn offset(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub fn is_flat(self) -> bool {
        matches!(self, Accidental::Flat | Accidental::DoubleFlat)
    }

    fn as_str(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

/// A spelled note: letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Note {
    pub fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Parse a letter and accidental pair as captured from a chord token.
    pub fn from_parts(letter: &str, accidental: &str) -> Option<Self> {
        let mut chars = letter.chars();
        let letter = Letter::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(letter, Accidental::parse(accidental)?))
    }

    pub fn pitch_class(self) -> i32 {
        (self.letter.pitch_class() + self.accidental.offset()).rem_euclid(12)
    }

    /// Spell a pitch class from the fixed chromatic table.
    ///
    /// Only the five black keys depend on `prefer_flats`; letter-name
    /// overflows like `Fb` or `B#` never come out of this table.
    pub fn from_pitch_class(pitch_class: i32, prefer_flats: bool) -> Self {
        use Accidental::{Flat, Natural, Sharp};
        let (letter, accidental) = match pitch_class.rem_euclid(12) {
            0 => (Letter::C, Natural),
            1 => if prefer_flats { (Letter::D, Flat) } else { (Letter::C, Sharp) },
            2 => (Letter::D, Natural),
            3 => if prefer_flats { (Letter::E, Flat) } else { (Letter::D, Sharp) },
            4 => (Letter::E, Natural),
            5 => (Letter::F, Natural),
            6 => if prefer_flats { (Letter::G, Flat) } else { (Letter::F, Sharp) },
            7 => (Letter::G, Natural),
            8 => if prefer_flats { (Letter::A, Flat) } else { (Letter::G, Sharp) },
            9 => (Letter::A, Natural),
            10 => if prefer_flats { (Letter::B, Flat) } else { (Letter::A, Sharp) },
            _ => (Letter::B, Natural),
        };
        Self::new(letter, accidental)
    }

    /// Spell the chord tone `semitones` above `self` that sits on scale
    /// `degree` (1-based, compound degrees allowed).
    pub fn interval(self, degree: u8, semitones: i32) -> Self {
        let letter = self.letter.up(usize::from(degree.saturating_sub(1)));
        let target = self.pitch_class() + semitones;
        let offset = (target - letter.pitch_class()).rem_euclid(12);
        let offset = if offset > 6 { offset - 12 } else { offset };
        match Accidental::from_offset(offset) {
            Some(accidental) => Self::new(letter, accidental),
            None => Self::from_pitch_class(target, self.accidental.is_flat()),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.as_str())
    }
}
