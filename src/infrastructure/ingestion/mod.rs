//! Document ingestion: header parsing, chunking and loading into the vector store

mod loader;
mod service;
mod splitter;

pub use loader::{extract_metadata_from_content, load_directory, load_text_file, DEFAULT_INGEST_YEAR};
pub use service::{IngestReport, IngestionService, MetadataOverrides};
pub use splitter::{TextSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
