//! Integration tests for the chord sheet engine
//!
//! Tests the full pipeline from sheet text through parsing, transposition and
//! formatting.

use chordsheet::chord::{Chord, RenderOptions};
use chordsheet::{
    convert, distinct_chords, parse_song, transpose, validate, ChordSheetError, Dialect, Format,
    FormatOptions,
};

const CHORDPRO: &str = r#"{title: Let It Be}
{artist: The Beatles}
# intro strummed
{start_of_verse: 1}
When I find myself in [C]times of [G]trouble
[Am]Mother Mary [F]comes to me
{end_of_verse}

{soc}
Let it [CM7]be, let it [G/B]be
{eoc}
{sot}
e|--[C]--{x}--|
  G|---0---0---|
{eot}
[XYZ123]weird"#;

const TEXT: &str = r#"---
title: Let It Be
capo: 2
---
[Verse 1]
        C          G
When I find myself in times of trouble
Am          F
Mother Mary comes to me

[Chorus]
      CM7       G/B
Let it be, let it be
H   F#   Hadd9/F

e|---0---3---|
B|---1---0---|
G|---0---0---|
D|---2---0---|
A|---3---2---|
E|-------3---|
after the tab"#;

const RAW: &str = r#"[Intro]
[tab][ch]Am[/ch]   [ch]XYZ123[/ch]
Hello world[/tab]
[Verse 1]
[ch]C[/ch]      [ch]G[/ch]  (x2)
Let it be, let it be
[tab]e|---0---|
B|---1---|[/tab]"#;

fn options() -> FormatOptions {
    FormatOptions::default()
}

fn assert_fixed_point(source: &str, dialect: Dialect, format: Format) {
    let once = convert(source, dialect, format, &options()).unwrap();
    let twice = convert(&once, dialect, format, &options()).unwrap();
    assert_eq!(once, twice, "second pass changed the output");
}

#[test]
fn test_chordpro_round_trip_is_a_fixed_point() {
    assert_fixed_point(CHORDPRO, Dialect::ChordPro, Format::ChordPro);
}

#[test]
fn test_text_round_trip_is_a_fixed_point() {
    assert_fixed_point(TEXT, Dialect::ChordsOverWords, Format::Text);
}

#[test]
fn test_raw_round_trip_through_text_is_a_fixed_point() {
    let text = convert(RAW, Dialect::Raw, Format::Text, &options()).unwrap();
    assert_fixed_point(&text, Dialect::ChordsOverWords, Format::Text);
}

#[test]
fn test_every_dialect_produces_valid_sections() {
    for (source, dialect) in [
        (CHORDPRO, Dialect::ChordPro),
        (TEXT, Dialect::ChordsOverWords),
        (RAW, Dialect::Raw),
    ] {
        let song = parse_song(source, dialect).unwrap();
        assert_eq!(validate(&song), Ok(()), "{} produced bad nesting", dialect);
    }
}

#[test]
fn test_transpose_by_zero_repairs_spelling() {
    let output = convert("[CM7]la", Dialect::ChordPro, Format::ChordPro, &options()).unwrap();
    assert_eq!(output, "[CMaj7]la");
    assert_ne!(output, "[CM7]la");
}

#[test]
fn test_transpose_is_additive_by_pitch_class() {
    let source = "[C]a [F#m7]b [Bb7sus4]c [Ebmaj7/G]d [G#dim]e [Dm7b5]f [A13]g [E7(b9,#9)]h";
    let signature = |symbol: &str| {
        let chord = Chord::parse(symbol).unwrap();
        (
            chord.root_pitch_class(0),
            chord.bass.map(|b| b.pitch_class()),
            chord.descriptor.render(false),
        )
    };

    for (a, b) in [(3, 4), (-5, 2), (11, 1), (7, -7), (0, 0)] {
        let song = parse_song(source, Dialect::ChordPro).unwrap();
        let stepwise = transpose(
            transpose(song.clone(), a, RenderOptions::default()),
            b,
            RenderOptions::default(),
        );
        let direct = transpose(song, a + b, RenderOptions::default());

        let stepwise: Vec<_> = stepwise.chord_texts().map(signature).collect();
        let direct: Vec<_> = direct.chord_texts().map(signature).collect();
        assert_eq!(stepwise, direct, "transpose {} then {}", a, b);
    }
}

#[test]
fn test_tab_content_passes_through_untouched() {
    let shifted = FormatOptions {
        transpose: 5,
        ..options()
    };

    let chordpro = convert(CHORDPRO, Dialect::ChordPro, Format::ChordPro, &shifted).unwrap();
    assert!(chordpro.contains("{start_of_tab}\ne|--[C]--{x}--|\n  G|---0---0---|\n{end_of_tab}"));

    let text = convert(TEXT, Dialect::ChordsOverWords, Format::Text, &shifted).unwrap();
    assert!(text.contains(
        "e|---0---3---|\nB|---1---0---|\nG|---0---0---|\nD|---2---0---|\nA|---3---2---|\nE|-------3---|"
    ));

    let raw = convert(RAW, Dialect::Raw, Format::Text, &shifted).unwrap();
    assert!(raw.contains("e|---0---|\nB|---1---|"));
}

#[test]
fn test_tabs_can_be_left_out() {
    let without = FormatOptions {
        include_tabs: false,
        ..options()
    };
    let output = convert(TEXT, Dialect::ChordsOverWords, Format::Text, &without).unwrap();
    assert!(!output.contains("|---"));
    assert!(output.ends_with("after the tab"));
}

#[test]
fn test_unparseable_chord_passes_through() {
    let shifted = FormatOptions {
        transpose: 3,
        ..options()
    };
    let output = convert("[XYZ123]la [C]lo", Dialect::ChordPro, Format::ChordPro, &shifted).unwrap();
    assert_eq!(output, "[XYZ123]la [D#]lo");

    let raw = convert(RAW, Dialect::Raw, Format::ChordPro, &shifted).unwrap();
    assert!(raw.contains("[XYZ123]"));
    assert!(raw.contains("[C]Hello"));
}

#[test]
fn test_cmaj7_resolves_and_renders_up_a_tone() {
    let chord = Chord::parse("Cmaj7").unwrap();
    assert_eq!(chord.root.to_string(), "C");
    assert_eq!(chord.intervals, vec!["1", "3", "5", "7"]);
    assert_eq!(chord.semitones, vec![0, 4, 7, 11]);
    assert_eq!(chord.render(2, RenderOptions::default()), "DMaj7");
}

#[test]
fn test_chords_ahead_of_lyrics_keep_their_column() {
    let output = convert(
        "  Ab      \nI hold my head",
        Dialect::ChordsOverWords,
        Format::Text,
        &options(),
    )
    .unwrap();
    let mut lines = output.lines();
    let chords = lines.next().unwrap();
    let lyrics = lines.next().unwrap();
    assert_eq!(chords.find("Ab"), lyrics.find("hold"));
    assert_eq!(output, "  Ab\nI hold my head");
}

#[test]
fn test_german_notation_chord_line() {
    let simplified = FormatOptions {
        simplify: true,
        ..options()
    };
    let output = convert("H   F#   Hadd9/F", Dialect::ChordsOverWords, Format::Text, &simplified).unwrap();
    assert_eq!(output, "B   F#   B2/F");

    let output = convert("H   F#   Hadd9/F", Dialect::ChordsOverWords, Format::Text, &options()).unwrap();
    assert_eq!(output, "B   F#   Badd9/F");
}

#[test]
fn test_text_to_chordpro() {
    let output = convert(TEXT, Dialect::ChordsOverWords, Format::ChordPro, &options()).unwrap();
    assert!(output.starts_with("{title: Let It Be}\n{capo: 2}\n{start_of_verse: 1}\n"));
    assert!(output.contains("{start_of_chorus}"));
    assert!(output.contains("[CMaj7]"));
}

#[test]
fn test_chordpro_to_html() {
    let html = convert(CHORDPRO, Dialect::ChordPro, Format::Html, &options()).unwrap();
    assert!(html.starts_with("<h1 class=\"title\">Let It Be</h1>\n<h2 class=\"artist\">The Beatles</h2>\n"));
    assert!(html.contains("<div class=\"paragraph verse\">"));
    assert!(html.contains("<div class=\"chord\">CMaj7</div>"));
    assert!(html.contains("<pre class=\"literal\">e|--[C]--{x}--|</pre>"));
}

#[test]
fn test_distinct_chords_in_order_of_appearance() {
    let song = parse_song(TEXT, Dialect::ChordsOverWords).unwrap();
    assert_eq!(
        distinct_chords(&song),
        vec!["C", "G", "Am", "F", "CMaj7", "G/B", "B", "F#", "Badd9/F"]
    );
}

#[test]
fn test_whole_song_failures() {
    for dialect in [Dialect::ChordPro, Dialect::ChordsOverWords, Dialect::Raw] {
        assert_eq!(parse_song("\n  \n", dialect), Err(ChordSheetError::EmptyInput));
    }
    assert!(matches!(
        parse_song("---\n- a\n- b\n---\nC\nla", Dialect::ChordsOverWords),
        Err(ChordSheetError::Frontmatter(_))
    ));
    assert!(matches!(
        Format::Html.dialect(),
        Err(ChordSheetError::UnsupportedDialect(_))
    ));
}

#[test]
fn test_bare_alteration_survives_transpose() {
    let shifted = FormatOptions {
        transpose: 2,
        ..options()
    };
    let output = convert("[C-5]la", Dialect::ChordPro, Format::ChordPro, &shifted).unwrap();
    assert_eq!(output, "[D(b5)]la");
    let repaired = convert("[C+5]la [C(#9)]lo", Dialect::ChordPro, Format::ChordPro, &options()).unwrap();
    assert_eq!(repaired, "[C(#5)]la [C(#9)]lo");
    assert_fixed_point("[C-5]la [Cadd#11]lo", Dialect::ChordPro, Format::ChordPro);
}

#[test]
fn test_lone_chord_line_adds_no_lyrics() {
    let output = convert("G   C", Dialect::ChordsOverWords, Format::ChordPro, &options()).unwrap();
    assert_eq!(output, "[G][C]");
    let text = convert("G   C", Dialect::ChordsOverWords, Format::Text, &options()).unwrap();
    assert_eq!(text, "G   C");
}

#[test]
fn test_stuttered_lyric_keeps_following_chords_live() {
    let shifted = FormatOptions {
        transpose: 2,
        ..options()
    };
    let source = "[Verse]\nG          C\nB-b-b-baby you just ain't seen\nnothing yet\nD\nhere's something";
    let output = convert(source, Dialect::ChordsOverWords, Format::ChordPro, &shifted).unwrap();
    assert!(!output.contains("start_of_tab"));
    assert!(output.contains("[A]B-b-b-baby [D]you just ain't seen"));
    assert!(output.contains("[E]here's something"));
}

#[test]
fn test_numeric_front_matter_stays_numeric() {
    let output = convert(TEXT, Dialect::ChordsOverWords, Format::Text, &options()).unwrap();
    assert!(output.starts_with("---\ntitle: Let It Be\ncapo: 2\n---\n"));
}
