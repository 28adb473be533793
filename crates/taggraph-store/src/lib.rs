pub mod cache;
pub mod fixtures;
pub mod source;

pub use cache::{CacheStats, CachedEntry, ContactCache};
pub use source::{load_or_sample, CachedSource, ContactSource, JsonFileSource, SampleSource};
