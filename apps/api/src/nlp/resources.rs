//! Language resource bundle — stop words, POS lexicon, gazetteers, skills.
//!
//! Loaded once per process through `ensure_resources_loaded*` and read-only
//! afterwards. Nothing is loaded as a side effect of using the crate; the
//! first successful call populates the process-wide cell and every later
//! call (from any source) returns that same bundle. A failed load leaves the
//! cell empty so a subsequent call can retry.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::errors::ScreenError;
use crate::nlp::tagger::PosTag;

pub const STOP_WORDS_FILE: &str = "stopwords.txt";
pub const LEXICON_FILE: &str = "lexicon.txt";
pub const FIRST_NAMES_FILE: &str = "first_names.txt";
pub const PLACES_FILE: &str = "places.txt";
pub const ORG_CUES_FILE: &str = "org_cues.txt";
pub const ORGANIZATIONS_FILE: &str = "organizations.txt";
pub const SKILLS_FILE: &str = "skills.txt";

const EMBEDDED: &[(&str, &str)] = &[
    (STOP_WORDS_FILE, include_str!("data/stopwords.txt")),
    (LEXICON_FILE, include_str!("data/lexicon.txt")),
    (FIRST_NAMES_FILE, include_str!("data/first_names.txt")),
    (PLACES_FILE, include_str!("data/places.txt")),
    (ORG_CUES_FILE, include_str!("data/org_cues.txt")),
    (ORGANIZATIONS_FILE, include_str!("data/organizations.txt")),
    (SKILLS_FILE, include_str!("data/skills.txt")),
];

static RESOURCES: OnceCell<LanguageResources> = OnceCell::new();

/// Where the resource files come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceSource {
    /// Files compiled into the binary.
    #[default]
    Embedded,
    /// A directory holding files with the same names as the embedded ones.
    Directory(PathBuf),
}

/// Loads the embedded bundle on first use; returns the cached one afterwards.
pub fn ensure_resources_loaded() -> Result<&'static LanguageResources, ScreenError> {
    ensure_resources_loaded_from(&ResourceSource::Embedded)
}

/// Like `ensure_resources_loaded`, but the first load reads from `source`.
pub fn ensure_resources_loaded_from(
    source: &ResourceSource,
) -> Result<&'static LanguageResources, ScreenError> {
    RESOURCES.get_or_try_init(|| {
        let resources = LanguageResources::load(source)?;
        info!(
            ?source,
            stop_words = resources.stop_words.len(),
            skills = resources.skills.len(),
            "Language resources loaded"
        );
        Ok(resources)
    })
}

#[derive(Debug)]
pub struct LanguageResources {
    stop_words: HashSet<String>,
    lexicon: HashMap<String, PosTag>,
    first_names: HashSet<String>,
    places: HashSet<String>,
    /// First word of every place, so multi-word names can be recognised
    /// while a proper-noun run is still being built.
    place_heads: HashSet<String>,
    org_cues: HashSet<String>,
    organizations: HashSet<String>,
    skills: Vec<String>,
}

impl LanguageResources {
    /// Reads and validates every resource file from `source`.
    pub fn load(source: &ResourceSource) -> Result<Self, ScreenError> {
        let places = parse_list(PLACES_FILE, &read_resource(source, PLACES_FILE)?)?;
        let place_heads = places
            .iter()
            .filter_map(|p| p.split_whitespace().next())
            .map(str::to_string)
            .collect();

        let mut skills = parse_list(SKILLS_FILE, &read_resource(source, SKILLS_FILE)?)?;
        skills.sort();
        skills.dedup();

        Ok(Self {
            stop_words: parse_list(STOP_WORDS_FILE, &read_resource(source, STOP_WORDS_FILE)?)?
                .into_iter()
                .collect(),
            lexicon: parse_lexicon(&read_resource(source, LEXICON_FILE)?)?,
            first_names: parse_list(FIRST_NAMES_FILE, &read_resource(source, FIRST_NAMES_FILE)?)?
                .into_iter()
                .collect(),
            places: places.into_iter().collect(),
            place_heads,
            org_cues: parse_list(ORG_CUES_FILE, &read_resource(source, ORG_CUES_FILE)?)?
                .into_iter()
                .collect(),
            organizations: parse_list(
                ORGANIZATIONS_FILE,
                &read_resource(source, ORGANIZATIONS_FILE)?,
            )?
            .into_iter()
            .collect(),
            skills,
        })
    }

    /// Expects a lowercase word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn lexicon_tag(&self, word: &str) -> Option<PosTag> {
        self.lexicon.get(word).copied()
    }

    pub fn is_first_name(&self, word: &str) -> bool {
        self.first_names.contains(word)
    }

    /// `name` is a lowercase, space-joined place name.
    pub fn is_place(&self, name: &str) -> bool {
        self.places.contains(name)
    }

    pub fn is_place_head(&self, word: &str) -> bool {
        self.place_heads.contains(word)
    }

    pub fn is_org_cue(&self, word: &str) -> bool {
        self.org_cues.contains(word)
    }

    pub fn is_organization(&self, name: &str) -> bool {
        self.organizations.contains(name)
    }

    /// Sorted, lowercase skills lexicon.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }
}

fn read_resource(source: &ResourceSource, name: &str) -> Result<Cow<'static, str>, ScreenError> {
    match source {
        ResourceSource::Embedded => EMBEDDED
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, content)| Cow::Borrowed(*content))
            .ok_or_else(|| init_error(name, "not bundled with this build")),
        ResourceSource::Directory(dir) => {
            let path = dir.join(name);
            std::fs::read_to_string(&path)
                .map(Cow::Owned)
                .map_err(|e| init_error(name, format!("cannot read {}: {e}", path.display())))
        }
    }
}

fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_list(name: &str, content: &str) -> Result<Vec<String>, ScreenError> {
    let entries: Vec<String> = content_lines(content)
        .map(|(_, line)| line.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .collect();
    if entries.is_empty() {
        return Err(init_error(name, "resource is empty"));
    }
    Ok(entries)
}

fn parse_lexicon(content: &str) -> Result<HashMap<String, PosTag>, ScreenError> {
    let mut lexicon = HashMap::new();
    for (line_no, line) in content_lines(content) {
        let mut parts = line.split_whitespace();
        let (Some(word), Some(tag), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(init_error(
                LEXICON_FILE,
                format!("line {line_no}: expected 'word TAG', got '{line}'"),
            ));
        };
        let tag = PosTag::from_str(tag)
            .map_err(|e| init_error(LEXICON_FILE, format!("line {line_no}: {e}")))?;
        lexicon.insert(word.to_lowercase(), tag);
    }
    if lexicon.is_empty() {
        return Err(init_error(LEXICON_FILE, "resource is empty"));
    }
    Ok(lexicon)
}

fn init_error(resource: &str, reason: impl Into<String>) -> ScreenError {
    ScreenError::Initialization {
        resource: resource.to_string(),
        reason: reason.into(),
    }
}
