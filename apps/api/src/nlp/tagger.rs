//! Part-of-speech tagging — lexicon lookup for closed-class words, gazetteer
//! hints for proper nouns, suffix rules for everything else.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::nlp::resources::LanguageResources;
use crate::nlp::tokenize::{is_punctuation, Token};

/// Penn Treebank tags, restricted to the ones the tagger can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Determiner,
    Predeterminer,
    Preposition,
    Conjunction,
    Pronoun,
    PossessivePronoun,
    WhDeterminer,
    WhPronoun,
    WhPossessive,
    WhAdverb,
    Existential,
    Modal,
    To,
    Number,
    Adjective,
    Adverb,
    Noun,
    PluralNoun,
    ProperNoun,
    Verb,
    VerbPast,
    VerbGerund,
    VerbParticiple,
    VerbPresent,
    VerbThirdPerson,
    Possessive,
    Punctuation,
}

#[derive(Debug, Error)]
#[error("unknown part-of-speech tag '{0}'")]
pub struct UnknownTag(pub String);

const PENN_CODES: &[(PosTag, &str)] = &[
    (PosTag::Determiner, "DT"),
    (PosTag::Predeterminer, "PDT"),
    (PosTag::Preposition, "IN"),
    (PosTag::Conjunction, "CC"),
    (PosTag::Pronoun, "PRP"),
    (PosTag::PossessivePronoun, "PRP$"),
    (PosTag::WhDeterminer, "WDT"),
    (PosTag::WhPronoun, "WP"),
    (PosTag::WhPossessive, "WP$"),
    (PosTag::WhAdverb, "WRB"),
    (PosTag::Existential, "EX"),
    (PosTag::Modal, "MD"),
    (PosTag::To, "TO"),
    (PosTag::Number, "CD"),
    (PosTag::Adjective, "JJ"),
    (PosTag::Adverb, "RB"),
    (PosTag::Noun, "NN"),
    (PosTag::PluralNoun, "NNS"),
    (PosTag::ProperNoun, "NNP"),
    (PosTag::Verb, "VB"),
    (PosTag::VerbPast, "VBD"),
    (PosTag::VerbGerund, "VBG"),
    (PosTag::VerbParticiple, "VBN"),
    (PosTag::VerbPresent, "VBP"),
    (PosTag::VerbThirdPerson, "VBZ"),
    (PosTag::Possessive, "POS"),
    (PosTag::Punctuation, "."),
];

impl PosTag {
    pub fn penn_code(self) -> &'static str {
        PENN_CODES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, code)| *code)
            .unwrap_or(".")
    }
}

impl FromStr for PosTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PENN_CODES
            .iter()
            .find(|(_, code)| *code == s)
            .map(|(tag, _)| *tag)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.penn_code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    pub text: &'a str,
    pub tag: PosTag,
    pub starts_sentence: bool,
}

const SENTENCE_ENDERS: &[&str] = &[".", "!", "?", ":", ";"];

pub fn pos_tag<'a>(tokens: &[Token<'a>], resources: &LanguageResources) -> Vec<TaggedToken<'a>> {
    let mut tagged: Vec<TaggedToken<'a>> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let starts_sentence = token.starts_line
            || tagged.last().map_or(true, |prev| {
                SENTENCE_ENDERS.contains(&prev.text)
                    // bullets and dashes that open a line open the sentence too
                    || (prev.tag == PosTag::Punctuation && prev.starts_sentence)
            });
        tagged.push(TaggedToken {
            text: token.text,
            tag: tag_word(token.text, starts_sentence, resources),
            starts_sentence,
        });
    }
    tagged
}

fn tag_word(word: &str, starts_sentence: bool, resources: &LanguageResources) -> PosTag {
    if is_punctuation(word) {
        return PosTag::Punctuation;
    }
    if let Some(clitic) = word.strip_prefix(&['\'', '’'][..]) {
        return if clitic.eq_ignore_ascii_case("s") {
            PosTag::Possessive
        } else {
            PosTag::VerbPresent
        };
    }
    if is_numeric(word) {
        return PosTag::Number;
    }

    let lower = word.to_lowercase();
    let capitalized = word.chars().next().is_some_and(char::is_uppercase);

    if !capitalized {
        return resources
            .lexicon_tag(&lower)
            .unwrap_or_else(|| suffix_tag(&lower));
    }

    if !starts_sentence {
        // "The", "I", "And" inside a title still read as function words
        if resources.is_stop_word(&lower) {
            return resources.lexicon_tag(&lower).unwrap_or(PosTag::Noun);
        }
        return PosTag::ProperNoun;
    }

    if let Some(tag) = resources.lexicon_tag(&lower) {
        if tag != PosTag::Adjective || resources.is_stop_word(&lower) {
            return tag;
        }
    }
    if resources.is_first_name(&lower)
        || resources.is_place_head(&lower)
        || resources.is_organization(&lower)
        || resources.is_org_cue(&lower)
        || is_acronym(word)
    {
        return PosTag::ProperNoun;
    }
    match suffix_tag(&lower) {
        PosTag::Noun => PosTag::ProperNoun,
        tag => tag,
    }
}

fn suffix_tag(lower: &str) -> PosTag {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        PosTag::VerbGerund
    } else if len > 3 && lower.ends_with("ed") {
        PosTag::VerbPast
    } else if len > 3 && lower.ends_with("ly") {
        PosTag::Adverb
    } else if len > 4
        && ["ous", "ful", "able", "ible", "ive", "al"]
            .iter()
            .any(|s| lower.ends_with(s))
    {
        PosTag::Adjective
    } else if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
        PosTag::PluralNoun
    } else {
        PosTag::Noun
    }
}

fn is_numeric(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Two to five letters, all uppercase: `IBM`, `NASA`.
pub(crate) fn is_acronym(word: &str) -> bool {
    let len = word.chars().count();
    (2..=5).contains(&len) && word.chars().all(|c| c.is_uppercase())
}
