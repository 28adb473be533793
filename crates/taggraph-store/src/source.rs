use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use taggraph_core::Contact;

use crate::cache;
use crate::fixtures;

/// Where contacts come from. The graph engine consumes this trait and
/// nothing else about the store.
pub trait ContactSource {
    fn load(&self) -> Result<Vec<Contact>>;
}

/// Contacts from a JSON file (an array of contact objects, camelCase keys).
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContactSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Contact>> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read contacts file {}", self.path.display()))?;
        let contacts: Vec<Contact> = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse contacts file {}", self.path.display()))?;
        Ok(contacts)
    }
}

/// The built-in sample set.
pub struct SampleSource;

impl ContactSource for SampleSource {
    fn load(&self) -> Result<Vec<Contact>> {
        Ok(fixtures::sample_contacts())
    }
}

/// Decorates a source with the process-wide cache: contacts that arrive
/// without hashtags pick up whatever a previous session stored for the same
/// name + phone number.
pub struct CachedSource<S> {
    inner: S,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ContactSource> ContactSource for CachedSource<S> {
    fn load(&self) -> Result<Vec<Contact>> {
        let mut contacts = self.inner.load()?;
        let cache = cache::handle();
        for contact in &mut contacts {
            if !contact.hashtags.is_empty() {
                continue;
            }
            if let Some(hit) = cache.get(&contact.name, &contact.phone_number) {
                contact.hashtags = hit.hashtags.clone();
                if contact.summary.is_none() {
                    contact.summary = hit.summary.clone();
                }
            }
        }
        Ok(contacts)
    }
}

/// Load from `path` when given, falling back to the samples when the file
/// cannot be used: the same degrade-to-samples behavior the app shows when
/// device contacts are unavailable.
pub fn load_or_sample(path: Option<&Path>) -> Vec<Contact> {
    match path {
        Some(p) => match JsonFileSource::new(p).load() {
            Ok(contacts) => contacts,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "falling back to sample contacts");
                fixtures::sample_contacts()
            }
        },
        None => fixtures::sample_contacts(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedEntry;
    use std::io::Write;

    #[test]
    fn json_file_source_roundtrips() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{"id":"9","name":"Iris","phoneNumber":"+1 555 9","hashtags":["books"]}}]"#
        )
        .expect("write fixture");

        let contacts = JsonFileSource::new(file.path()).load().expect("load");
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Iris");
        assert_eq!(contacts[0].hashtags, vec!["books".to_string()]);
    }

    #[test]
    fn json_file_source_reports_missing_file() {
        let err = JsonFileSource::new("/nonexistent/contacts.json")
            .load()
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("contacts.json"));
    }

    #[test]
    fn load_or_sample_falls_back() {
        let contacts = load_or_sample(Some(Path::new("/nonexistent/contacts.json")));
        assert!(!contacts.is_empty());
        assert_eq!(contacts, fixtures::sample_contacts());
    }

    #[test]
    fn cached_source_fills_missing_hashtags() {
        cache::init();
        cache::handle().set(
            "Ana Sousa",
            "+1 (555) 010-0007",
            CachedEntry {
                summary: Some("from the book club".into()),
                hashtags: vec!["books".into()],
            },
        );

        let contacts = CachedSource::new(SampleSource).load().expect("load");
        let ana = contacts
            .iter()
            .find(|c| c.name == "Ana Sousa")
            .expect("sample contact");
        assert_eq!(ana.hashtags, vec!["books".to_string()]);
        assert_eq!(ana.summary.as_deref(), Some("from the book club"));

        cache::handle().remove("Ana Sousa", "+1 (555) 010-0007");
    }
}
