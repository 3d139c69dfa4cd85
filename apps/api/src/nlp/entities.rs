use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::ScreenError;
use crate::nlp::chunker::{ne_chunk, ChunkLabel};
use crate::nlp::resources::{ensure_resources_loaded, LanguageResources};
use crate::nlp::tagger::pos_tag;
use crate::nlp::tokenize::tokenize;

/// Distinct entity surface forms per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    #[serde(rename = "PERSON")]
    pub person: BTreeSet<String>,
    #[serde(rename = "ORGANIZATION")]
    pub organization: BTreeSet<String>,
    #[serde(rename = "GPE")]
    pub gpe: BTreeSet<String>,
}

impl EntityBundle {
    pub fn is_empty(&self) -> bool {
        self.person.is_empty() && self.organization.is_empty() && self.gpe.is_empty()
    }
}

/// Extracts entities using the process-wide language resources.
pub fn extract_entities(text: &str) -> Result<EntityBundle, ScreenError> {
    let resources = ensure_resources_loaded()?;
    Ok(extract_entities_with(text, resources))
}

/// Tokenize → tag → chunk, keeping only person, organization and GPE chunks.
pub fn extract_entities_with(text: &str, resources: &LanguageResources) -> EntityBundle {
    let tokens = tokenize(text);
    let tagged = pos_tag(&tokens, resources);

    let mut bundle = EntityBundle::default();
    for chunk in ne_chunk(&tagged, resources) {
        let set = match chunk.label {
            ChunkLabel::Person => &mut bundle.person,
            ChunkLabel::Organization => &mut bundle.organization,
            ChunkLabel::Gpe => &mut bundle.gpe,
            ChunkLabel::Unlabeled => continue,
        };
        set.insert(chunk.surface());
    }
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::resources::ResourceSource;

    fn resources() -> LanguageResources {
        LanguageResources::load(&ResourceSource::Embedded).unwrap()
    }

    #[test]
    fn test_empty_text_yields_empty_sets() {
        let bundle = extract_entities_with("", &resources());
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_entities_by_category() {
        let text = "Sarah Johnson\nSoftware Engineer at Microsoft, Seattle.\n\
                    Previously interned at Amazon in Berlin.";
        let bundle = extract_entities_with(text, &resources());
        assert!(bundle.person.contains("Sarah Johnson"), "{bundle:?}");
        assert!(bundle.organization.contains("Microsoft"), "{bundle:?}");
        assert!(bundle.organization.contains("Amazon"), "{bundle:?}");
        assert!(bundle.gpe.contains("Seattle"), "{bundle:?}");
        assert!(bundle.gpe.contains("Berlin"), "{bundle:?}");
    }

    #[test]
    fn test_duplicates_collapse() {
        let bundle = extract_entities_with(
            "Worked at Google. Then returned to Google in London. London again.",
            &resources(),
        );
        assert_eq!(bundle.organization.iter().filter(|o| *o == "Google").count(), 1);
        assert_eq!(bundle.gpe.len(), 1);
    }

    #[test]
    fn test_unlabeled_chunks_are_dropped() {
        let bundle = extract_entities_with("Led Project Zephyr rollout", &resources());
        assert!(bundle.is_empty(), "{bundle:?}");
    }

    #[test]
    fn test_serializes_with_category_keys() {
        let mut bundle = EntityBundle::default();
        bundle.person.insert("Ada Lovelace".to_string());
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["PERSON"][0], "Ada Lovelace");
        assert!(json["ORGANIZATION"].as_array().unwrap().is_empty());
        assert!(json["GPE"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_global_resources_path() {
        let bundle = extract_entities("Emma Brown lives in Paris").unwrap();
        assert!(bundle.person.contains("Emma Brown"));
        assert!(bundle.gpe.contains("Paris"));
    }
}
