//! Resume screening: extract text from PDF/DOCX resumes, compute document
//! statistics and named entities, and rank resumes by relevance to a job
//! description.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod nlp;
pub mod routes;
pub mod scoring;
pub mod screening;
pub mod state;
pub mod stats;
