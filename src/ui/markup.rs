// SPDX-License-Identifier: MPL-2.0
//! Parsing for the HTML-subset markup used in dialog messages.
//!
//! Only inline formatting is honored: `<b>`/`<strong>`, `<i>`/`<em>`, `<u>`
//! and `<br/>`. Any other tag is stripped while its text content is kept, so
//! markup from an untrusted caller can never inject anything beyond styled
//! text. Input that is not well formed degrades to a single plain segment
//! rather than failing the render.

use quick_xml::events::Event;
use quick_xml::Reader;

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Segment {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Parses markup into styled segments.
///
/// Malformed input is returned verbatim as one plain segment.
#[must_use]
pub fn parse(markup: &str) -> Vec<Segment> {
    try_parse(markup).unwrap_or_else(|| vec![Segment::plain(markup)])
}

/// Concatenates the text content of `markup`, dropping all styling. Used
/// where only a plain-text rendition fits (window captions, summaries).
#[must_use]
pub fn plain_text(markup: &str) -> String {
    parse(markup)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

fn try_parse(markup: &str) -> Option<Vec<Segment>> {
    // The message is a fragment; wrap it so the reader sees one document.
    let wrapped = format!("<msg>{}</msg>", markup);
    // Default reader config: no whitespace trimming, end-name checking on,
    // which is what makes malformed fragments fall out as parse errors.
    let mut reader = Reader::from_str(&wrapped);

    let mut segments = Vec::new();
    let mut bold = 0_usize;
    let mut italic = 0_usize;
    let mut underline = 0_usize;

    loop {
        match reader.read_event().ok()? {
            Event::Start(e) => match e.name().as_ref().to_ascii_lowercase().as_slice() {
                b"b" | b"strong" => bold += 1,
                b"i" | b"em" => italic += 1,
                b"u" => underline += 1,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref().to_ascii_lowercase().as_slice() {
                b"b" | b"strong" => bold = bold.checked_sub(1)?,
                b"i" | b"em" => italic = italic.checked_sub(1)?,
                b"u" => underline = underline.checked_sub(1)?,
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref().to_ascii_lowercase().as_slice() == b"br" {
                    segments.push(Segment::plain("\n"));
                }
            }
            Event::Text(t) => {
                let text = t.unescape().ok()?.into_owned();
                if !text.is_empty() {
                    segments.push(Segment {
                        text,
                        bold: bold > 0,
                        italic: italic > 0,
                        underline: underline > 0,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_is_one_segment() {
        let segments = parse("Pay now?");
        assert_eq!(segments, vec![Segment::plain("Pay now?")]);
    }

    #[test]
    fn bold_tag_styles_its_content() {
        let segments = parse("<b>Pay now?</b>");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Pay now?");
        assert!(segments[0].bold);
        assert!(!segments[0].italic);
    }

    #[test]
    fn styles_nest_and_unnest() {
        let segments = parse("a<b>b<i>c</i>d</b>e");
        let flags: Vec<(bool, bool)> = segments.iter().map(|s| (s.bold, s.italic)).collect();
        assert_eq!(
            flags,
            vec![
                (false, false),
                (true, false),
                (true, true),
                (true, false),
                (false, false),
            ]
        );
    }

    #[test]
    fn strong_and_em_are_synonyms() {
        let segments = parse("<strong>x</strong><em>y</em>");
        assert!(segments[0].bold);
        assert!(segments[1].italic);
    }

    #[test]
    fn br_becomes_a_newline_segment() {
        let segments = parse("one<br/>two");
        assert_eq!(segments[1].text, "\n");
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn unknown_tags_are_stripped_but_text_kept() {
        let segments = parse("<span>kept</span>");
        assert_eq!(segments, vec![Segment::plain("kept")]);
    }

    #[test]
    fn entities_are_unescaped() {
        let segments = parse("fees &amp; limits");
        assert_eq!(segments[0].text, "fees & limits");
    }

    #[test]
    fn malformed_markup_falls_back_to_plain_text() {
        let input = "5 < 6 <b>oops";
        let segments = parse(input);
        assert_eq!(segments, vec![Segment::plain(input)]);
    }

    #[test]
    fn stray_closing_tag_falls_back_to_plain_text() {
        let input = "text</b>";
        assert_eq!(parse(input), vec![Segment::plain(input)]);
    }

    #[test]
    fn plain_text_joins_segments() {
        assert_eq!(plain_text("<b>Pay</b> now"), "Pay now");
        assert_eq!(plain_text("one<br/>two"), "one\ntwo");
    }

    #[test]
    fn empty_markup_yields_no_segments() {
        assert!(parse("").is_empty());
    }
}
