//! Reader of slash-tagged text.
//!
//! Each line is a sentence of space-separated `word/tag` tokens, e.g. `子/n 曰/v`. The word is
//! split at the first `/`. Tokens without `/` are ignored.

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use crate::TaggedSentence;

/// Tag of the slash-tagged corpus.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SlashTag {
    /// Adjective.
    A,
    /// Conjunction.
    C,
    /// Adverb.
    D,
    /// Locative.
    F,
    /// Combined word.
    J,
    /// Numeral.
    M,
    /// Noun.
    N,
    /// Personal name.
    Nr,
    /// Place name.
    Ns,
    /// Preposition.
    P,
    /// Classifier.
    Q,
    /// Pronoun.
    R,
    /// Onomatopoeia.
    S,
    /// Time word.
    T,
    /// Auxiliary.
    U,
    /// Verb.
    V,
    /// Punctuation.
    W,
    /// Modal particle.
    Y,
    /// Any other tag.
    Other,
}

impl SlashTag {
    /// All slash tags in their canonical order.
    pub const ALL: [Self; 19] = [
        Self::A,
        Self::C,
        Self::D,
        Self::F,
        Self::J,
        Self::M,
        Self::N,
        Self::Nr,
        Self::Ns,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::Y,
        Self::Other,
    ];

    /// Parses a tag symbol. Returns `None` if the symbol is unknown.
    pub fn parse(tag: &str) -> Option<Self> {
        Some(match tag {
            "a" => Self::A,
            "c" => Self::C,
            "d" => Self::D,
            "f" => Self::F,
            "j" => Self::J,
            "m" => Self::M,
            "n" => Self::N,
            "nr" => Self::Nr,
            "ns" => Self::Ns,
            "p" => Self::P,
            "q" => Self::Q,
            "r" => Self::R,
            "s" => Self::S,
            "t" => Self::T,
            "u" => Self::U,
            "v" => Self::V,
            "w" => Self::W,
            "y" => Self::Y,
            "other" => Self::Other,
            _ => return None,
        })
    }

    /// Parses a tag symbol, collapsing unknown symbols into [`SlashTag::Other`].
    pub fn parse_or_other(tag: &str) -> Self {
        Self::parse(tag).unwrap_or(Self::Other)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::C => "c",
            Self::D => "d",
            Self::F => "f",
            Self::J => "j",
            Self::M => "m",
            Self::N => "n",
            Self::Nr => "nr",
            Self::Ns => "ns",
            Self::P => "p",
            Self::Q => "q",
            Self::R => "r",
            Self::S => "s",
            Self::T => "t",
            Self::U => "u",
            Self::V => "v",
            Self::W => "w",
            Self::Y => "y",
            Self::Other => "other",
        }
    }

    /// Converts the tag into a universal part-of-speech tag. Several slash tags share one
    /// universal tag.
    pub const fn universal(self) -> &'static str {
        match self {
            Self::U => "AUX",
            Self::A | Self::D | Self::Y => "ADV",
            Self::C => "CCONJ",
            Self::F | Self::N | Self::Q | Self::T => "NOUN",
            Self::J => "PART",
            Self::M => "NUM",
            Self::Nr | Self::Ns => "PROPN",
            Self::P => "ADP",
            Self::R => "PRON",
            Self::S => "INTJ",
            Self::V => "VERB",
            Self::W => "SYM",
            Self::Other => "X",
        }
    }
}

impl FromStr for SlashTag {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or("Unknown slash tag.")
    }
}

impl fmt::Display for SlashTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one line into a sentence.
///
/// # Arguments
///
/// * `line` - Space-separated `word/tag` tokens.
/// * `universal` - Converts tags into universal tags.
pub fn parse_line(line: &str, universal: bool) -> TaggedSentence {
    let mut sent = TaggedSentence::new();
    for token in line.split(' ') {
        let Some((word, tag)) = token.split_once('/') else {
            if !token.is_empty() {
                log::debug!("token without a tag skipped: {token:?}");
            }
            continue;
        };
        let tag = SlashTag::parse_or_other(tag);
        let tag = if universal {
            tag.universal()
        } else {
            tag.as_str()
        };
        sent.push(word, tag);
    }
    sent
}

/// Reads sentences from slash-tagged text. Lines without any token are dropped.
///
/// # Errors
///
/// I/O errors of `rdr` are returned as is.
pub fn read<R>(rdr: R, universal: bool) -> io::Result<Vec<TaggedSentence>>
where
    R: BufRead,
{
    let mut sents = vec![];
    for line in rdr.lines() {
        let sent = parse_line(line?.trim_end_matches('\r'), universal);
        if !sent.is_empty() {
            sents.push(sent);
        }
    }
    Ok(sents)
}
