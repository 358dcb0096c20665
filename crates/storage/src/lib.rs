pub mod documents;
pub mod object;
pub mod suggestions;

pub use documents::{DocumentFilter, DocumentRecord, DocumentStore};
pub use object::{MemoryObjectStore, ObjectStore, S3ObjectStore};
pub use suggestions::{SuggestionEntry, SuggestionStore};
