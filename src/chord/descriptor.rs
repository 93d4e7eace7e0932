//! Chord quality/extension grammar: everything between the root and the
//! slash bass (`m7b5` in `Cm7b5/Gb`).

use serde::Serialize;

/// Degrees that may carry a `b`/`#` (or legacy `-`/`+`) alteration.
const ALTERABLE: [u8; 6] = [4, 5, 6, 9, 11, 13];
/// Degrees accepted after `add`.
const ADDABLE: [u8; 6] = [2, 4, 6, 9, 11, 13];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Quality {
    #[default]
    Major,
    Minor,
    Diminished,
    Augmented,
    Power,
}

/// A flattened or sharpened chord degree (`b9`, `#11`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Alteration {
    pub degree: u8,
    pub sharp: bool,
}

/// Parsed chord descriptor.
///
/// Equivalent spellings (`7(b9,#9)`, `7b9#9`, `7-9+9`) produce equal
/// descriptors, which is what makes [`Descriptor::render`] canonical.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Descriptor {
    pub quality: Quality,
    pub major_seventh: bool,
    /// Highest stacked extension: 7, 9, 11 or 13.
    pub extension: Option<u8>,
    pub sixth: bool,
    pub suspension: Option<u8>,
    pub added: Vec<u8>,
    pub alterations: Vec<Alteration>,
}

/// One chord tone relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub name: String,
    pub degree: u8,
    pub semitones: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Maj,
    Minor,
    Dim,
    Aug,
    Sus,
    Add,
    Flat,
    Sharp,
    Minus,
    Plus,
    Number(u8),
}

/// Rewrite the spelling variants the tokenizer does not handle directly.
fn preprocess(descriptor: &str) -> String {
    let mut s: String = descriptor
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ',' | ' '))
        .collect();
    s = s.replace('°', "dim").replace('ø', "m7b5");
    for ext in ["13", "11", "9"] {
        s = s.replace(&format!("7/{ext}"), ext);
    }
    s.replace("6/9", "69")
}

fn tokenize(descriptor: &str) -> Option<Vec<Token>> {
    const WORDS: [(&str, Token); 10] = [
        ("maj", Token::Maj),
        ("Maj", Token::Maj),
        ("MAJ", Token::Maj),
        ("min", Token::Minor),
        ("dim", Token::Dim),
        ("aug", Token::Aug),
        ("sus", Token::Sus),
        ("add", Token::Add),
        ("mi", Token::Minor),
        ("M", Token::Maj),
    ];
    const NUMBERS: [(&str, u8); 8] = [
        ("13", 13),
        ("11", 11),
        ("9", 9),
        ("7", 7),
        ("6", 6),
        ("5", 5),
        ("4", 4),
        ("2", 2),
    ];

    let mut tokens = Vec::new();
    let mut rest = descriptor;
    'scan: while !rest.is_empty() {
        for (word, token) in WORDS {
            if rest.starts_with(word) {
                tokens.push(token);
                rest = &rest[word.len()..];
                continue 'scan;
            }
        }
        // `ma7` is major, but `madd9` is minor followed by `add`.
        if rest.starts_with("ma") && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
            tokens.push(Token::Maj);
            rest = &rest[2..];
            continue;
        }
        for (digits, value) in NUMBERS {
            if rest.starts_with(digits) {
                tokens.push(Token::Number(value));
                rest = &rest[digits.len()..];
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        let token = match chars.next()? {
            'm' => Token::Minor,
            'b' | '♭' => Token::Flat,
            '#' | '♯' => Token::Sharp,
            '-' => Token::Minus,
            '+' => Token::Plus,
            _ => return None,
        };
        tokens.push(token);
        rest = chars.as_str();
    }
    Some(tokens)
}

fn degree_semitones(degree: u8) -> i32 {
    match degree {
        2 => 2,
        3 => 4,
        4 => 5,
        5 => 7,
        6 => 9,
        7 => 11,
        9 => 14,
        11 => 17,
        13 => 21,
        _ => 0,
    }
}

impl Descriptor {
    /// Parse a descriptor; `None` when any part is outside the grammar.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let tokens = tokenize(&preprocess(descriptor))?;
        if tokens == [Token::Number(5)] {
            return Some(Self {
                quality: Quality::Power,
                ..Self::default()
            });
        }

        let mut d = Self::default();
        let mut i = 0;
        while i < tokens.len() {
            let next = tokens.get(i + 1).copied();
            let next_number = match next {
                Some(Token::Number(n)) => Some(n),
                _ => None,
            };
            let alterable = next_number.filter(|n| ALTERABLE.contains(n));

            match tokens[i] {
                Token::Minor if i == 0 => d.quality = Quality::Minor,
                Token::Minor => return None,
                Token::Maj => {
                    if let Some(n @ (7 | 9 | 11 | 13)) = next_number {
                        d.major_seventh = true;
                        d.extend(n);
                        i += 1;
                    }
                }
                Token::Dim if d.quality == Quality::Major => {
                    d.quality = Quality::Diminished;
                    if next_number == Some(7) {
                        d.extend(7);
                        i += 1;
                    }
                }
                Token::Aug if d.quality == Quality::Major => d.quality = Quality::Augmented,
                Token::Dim | Token::Aug => return None,
                Token::Sus => match next_number {
                    Some(n @ (2 | 4)) => {
                        d.suspension = Some(n);
                        i += 1;
                    }
                    _ => d.suspension = Some(4),
                },
                Token::Add => match (next, tokens.get(i + 2).copied()) {
                    (Some(Token::Number(n)), _) if ADDABLE.contains(&n) => {
                        d.add(n);
                        i += 1;
                    }
                    (Some(Token::Flat | Token::Sharp), Some(Token::Number(n)))
                        if ALTERABLE.contains(&n) =>
                    {
                        d.alter(n, next == Some(Token::Sharp));
                        i += 2;
                    }
                    _ => return None,
                },
                Token::Flat | Token::Sharp => {
                    let degree = alterable?;
                    d.alter(degree, tokens[i] == Token::Sharp);
                    i += 1;
                }
                // Legacy `-5`/`+9`; a bare sign is minor/augmented.
                Token::Minus => match alterable {
                    Some(degree) => {
                        d.alter(degree, false);
                        i += 1;
                    }
                    None if i == 0 => d.quality = Quality::Minor,
                    None => return None,
                },
                Token::Plus => match alterable {
                    Some(degree) => {
                        d.alter(degree, true);
                        i += 1;
                    }
                    None if d.quality == Quality::Major => d.quality = Quality::Augmented,
                    None => return None,
                },
                Token::Number(6) => d.sixth = true,
                Token::Number(9) if d.sixth && d.extension.is_none() => d.add(9),
                Token::Number(n @ (7 | 9 | 11 | 13)) => d.extend(n),
                Token::Number(2) => d.add(9),
                Token::Number(4) => d.suspension = Some(4),
                Token::Number(_) => return None,
            }
            i += 1;
        }
        Some(d)
    }

    fn extend(&mut self, n: u8) {
        self.extension = Some(self.extension.map_or(n, |e| e.max(n)));
    }

    fn add(&mut self, degree: u8) {
        if !self.added.contains(&degree) {
            self.added.push(degree);
            self.added.sort_unstable();
        }
    }

    fn alter(&mut self, degree: u8, sharp: bool) {
        let alteration = Alteration { degree, sharp };
        if !self.alterations.contains(&alteration) {
            self.alterations.push(alteration);
            self.alterations.sort_unstable();
        }
    }

    /// A plain major triad with only an added 9th, which `simplify` writes as `2`.
    fn is_plain_add9(&self) -> bool {
        self.quality == Quality::Major
            && !self.sixth
            && self.extension.is_none()
            && self.suspension.is_none()
            && self.alterations.is_empty()
            && self.added == [9]
    }

    /// Chord tones relative to the root, ascending by semitone.
    pub fn intervals(&self) -> Vec<Interval> {
        fn tone(name: &str, degree: u8, semitones: i32) -> Interval {
            Interval {
                name: name.to_string(),
                degree,
                semitones,
            }
        }

        let mut tones = match self.quality {
            Quality::Major => vec![tone("1", 1, 0), tone("3", 3, 4), tone("5", 5, 7)],
            Quality::Minor => vec![tone("1", 1, 0), tone("b3", 3, 3), tone("5", 5, 7)],
            Quality::Diminished => vec![tone("1", 1, 0), tone("b3", 3, 3), tone("b5", 5, 6)],
            Quality::Augmented => vec![tone("1", 1, 0), tone("3", 3, 4), tone("#5", 5, 8)],
            Quality::Power => return vec![tone("1", 1, 0), tone("5", 5, 7)],
        };

        if let Some(sus) = self.suspension {
            if let Some(third) = tones.iter_mut().find(|t| t.degree == 3) {
                *third = tone(&sus.to_string(), sus, degree_semitones(sus));
            }
        }
        if self.sixth {
            tones.push(tone("6", 6, 9));
        }
        if let Some(ext) = self.extension {
            tones.push(if self.major_seventh {
                tone("7", 7, 11)
            } else if self.quality == Quality::Diminished && ext == 7 {
                tone("bb7", 7, 9)
            } else {
                tone("b7", 7, 10)
            });
            if ext >= 9 {
                tones.push(tone("9", 9, 14));
            }
            if ext == 11 {
                tones.push(tone("11", 11, 17));
            }
            if ext == 13 {
                tones.push(tone("13", 13, 21));
            }
        }
        for &degree in &self.added {
            if !tones.iter().any(|t| t.degree == degree) {
                tones.push(tone(&degree.to_string(), degree, degree_semitones(degree)));
            }
        }
        for alt in &self.alterations {
            let (sign, shift) = if alt.sharp { ("#", 1) } else { ("b", -1) };
            let altered = tone(
                &format!("{sign}{}", alt.degree),
                alt.degree,
                degree_semitones(alt.degree) + shift,
            );
            let natural = alt.degree.to_string();
            match tones.iter_mut().find(|t| t.name == natural) {
                Some(existing) => *existing = altered,
                None => tones.push(altered),
            }
        }

        tones.sort_by_key(|t| t.semitones);
        tones
    }

    /// Canonical spelling: `m`, `dim`, `aug`, then `6`, `Maj7`/`7`..`13`,
    /// `sus`, `add`, and alterations ordered by degree. Alterations with
    /// nothing in front of them are parenthesized (`(b5)`).
    pub fn render(&self, simplify: bool) -> String {
        if self.quality == Quality::Power {
            return "5".to_string();
        }
        if simplify && self.is_plain_add9() {
            return "2".to_string();
        }

        let mut s = String::new();
        s.push_str(match self.quality {
            Quality::Minor => "m",
            Quality::Diminished => "dim",
            Quality::Augmented => "aug",
            Quality::Major | Quality::Power => "",
        });

        let six_nine = self.sixth && self.extension.is_none() && self.added.contains(&9);
        if self.sixth {
            s.push('6');
            if six_nine {
                s.push('9');
            }
        }
        if let Some(ext) = self.extension {
            if self.major_seventh {
                s.push_str("Maj");
            }
            s.push_str(&ext.to_string());
        }
        if let Some(sus) = self.suspension {
            s.push_str("sus");
            s.push_str(&sus.to_string());
        }
        for &degree in &self.added {
            if !(six_nine && degree == 9) {
                s.push_str("add");
                s.push_str(&degree.to_string());
            }
        }
        let alterations: Vec<String> = self
            .alterations
            .iter()
            .map(|alt| format!("{}{}", if alt.sharp { '#' } else { 'b' }, alt.degree))
            .collect();
        // Bare `b5`/`#9` right after the root would read as its accidental.
        if s.is_empty() && !alterations.is_empty() {
            s = format!("({})", alterations.join(","));
        } else {
            s.push_str(&alterations.concat());
        }
        s
    }
}
