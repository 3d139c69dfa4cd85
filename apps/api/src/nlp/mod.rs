//! Language processing: resources, tokenizer, tagger, named-entity chunker,
//! keyword extraction.

pub mod chunker;
pub mod entities;
pub mod keywords;
pub mod resources;
pub mod tagger;
pub mod tokenize;

pub use entities::{extract_entities, extract_entities_with, EntityBundle};
pub use keywords::{extract_keywords, preprocess_text};
pub use resources::{
    ensure_resources_loaded, ensure_resources_loaded_from, LanguageResources, ResourceSource,
};
