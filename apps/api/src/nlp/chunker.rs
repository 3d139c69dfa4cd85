use crate::nlp::resources::LanguageResources;
use crate::nlp::tagger::{is_acronym, PosTag, TaggedToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkLabel {
    Person,
    Organization,
    Gpe,
    /// A proper-noun run no rule could classify.
    Unlabeled,
}

/// A run of adjacent tokens grouped into one named-entity candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub label: ChunkLabel,
    pub tokens: Vec<&'a str>,
}

impl Chunk<'_> {
    /// Member tokens joined with single spaces.
    pub fn surface(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Tokens that may sit inside an organization name: "Bank of America",
/// "Procter & Gamble".
const ORG_CONNECTORS: &[&str] = &["of", "&"];

/// Groups maximal runs of proper nouns into chunks and labels each run.
///
/// A run ends at a sentence or line start, so a name on one line never
/// merges with an employer on the next.
pub fn ne_chunk<'a>(tagged: &[TaggedToken<'a>], resources: &LanguageResources) -> Vec<Chunk<'a>> {
    let mut chunks = Vec::new();
    let mut run: Vec<&'a str> = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        let token = &tagged[i];

        if token.tag == PosTag::ProperNoun {
            if token.starts_sentence && !run.is_empty() {
                chunks.push(label_run(std::mem::take(&mut run), resources));
            }
            run.push(token.text);
            i += 1;
            continue;
        }

        let joins_org = ORG_CONNECTORS.contains(&token.text)
            && run.iter().any(|w| resources.is_org_cue(&w.to_lowercase()))
            && tagged
                .get(i + 1)
                .is_some_and(|next| next.tag == PosTag::ProperNoun && !next.starts_sentence);
        if joins_org {
            run.push(token.text);
            i += 1;
            continue;
        }

        if !run.is_empty() {
            chunks.push(label_run(std::mem::take(&mut run), resources));
        }
        i += 1;
    }

    if !run.is_empty() {
        chunks.push(label_run(run, resources));
    }
    chunks
}

fn label_run<'a>(tokens: Vec<&'a str>, resources: &LanguageResources) -> Chunk<'a> {
    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let joined = lowered.join(" ");

    let label = if lowered.iter().any(|w| resources.is_org_cue(w))
        || resources.is_organization(&joined)
    {
        ChunkLabel::Organization
    } else if resources.is_place(&joined) {
        ChunkLabel::Gpe
    } else if tokens.len() <= 3 && resources.is_first_name(&lowered[0]) {
        ChunkLabel::Person
    } else if tokens.len() == 1 && is_acronym(tokens[0]) {
        ChunkLabel::Organization
    } else {
        ChunkLabel::Unlabeled
    };

    Chunk { label, tokens }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::resources::{LanguageResources, ResourceSource};
    use crate::nlp::tagger::pos_tag;
    use crate::nlp::tokenize::tokenize;

    fn chunks(text: &str) -> Vec<(ChunkLabel, String)> {
        let resources = LanguageResources::load(&ResourceSource::Embedded).unwrap();
        let tokens = tokenize(text);
        let tagged = pos_tag(&tokens, &resources);
        ne_chunk(&tagged, &resources)
            .into_iter()
            .map(|c| (c.label, c.surface()))
            .collect()
    }

    #[test]
    fn test_person_org_place() {
        let c = chunks("John Smith worked at Google in London.");
        assert_eq!(
            c,
            vec![
                (ChunkLabel::Person, "John Smith".to_string()),
                (ChunkLabel::Organization, "Google".to_string()),
                (ChunkLabel::Gpe, "London".to_string()),
            ]
        );
    }

    #[test]
    fn test_org_cue_and_multiword_place() {
        let c = chunks("Graduated from Stanford University and moved to New York.");
        assert!(c.contains(&(ChunkLabel::Organization, "Stanford University".to_string())));
        assert!(c.contains(&(ChunkLabel::Gpe, "New York".to_string())));
    }

    #[test]
    fn test_of_joins_organization_names() {
        let c = chunks("Analyst at Bank of America since 2019");
        assert!(
            c.contains(&(ChunkLabel::Organization, "Bank of America".to_string())),
            "chunks: {c:?}"
        );
    }

    #[test]
    fn test_line_break_splits_runs() {
        let c = chunks("Maria Garcia\nMicrosoft");
        assert_eq!(
            c,
            vec![
                (ChunkLabel::Person, "Maria Garcia".to_string()),
                (ChunkLabel::Organization, "Microsoft".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_run_is_unlabeled() {
        let c = chunks("Worked on Project Zephyr daily");
        assert_eq!(c, vec![(ChunkLabel::Unlabeled, "Project Zephyr".to_string())]);
    }

    #[test]
    fn test_no_proper_nouns_no_chunks() {
        assert!(chunks("wrote tests and fixed bugs").is_empty());
        assert!(chunks("").is_empty());
    }
}
