//! Collaborator storage: labeled corpus files and trained model artifacts.

pub mod artifact;
pub mod corpus;

pub use artifact::{ArtifactStore, FileArtifactStore, MemoryArtifactStore};
pub use corpus::{append_corpus, read_corpus, read_corpus_from, write_corpus, write_corpus_to};
