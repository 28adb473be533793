//! Hashtag index and highlight state. Highlighting is derived state: always
//! recomputable from a tap or query plus the hashtag→contacts index, and
//! replaced wholesale on every new tap or search. Tapping a second hashtag
//! replaces the highlighted tag set rather than accumulating.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use taggraph_core::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Idle,
    ContactHighlighted,
    TagHighlighted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Highlight changed; the caller should center on the node.
    Highlighted,
    /// The contact was already the sole highlighted one; open its detail
    /// view instead of re-highlighting.
    OpenDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: highlighting cleared.
    Cleared,
    /// A contact name matched; carries the contact id to center on.
    Contact(String),
    /// No contact matched but a hashtag did.
    Tag(String),
    /// Nothing matched; highlighting left as it was.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    None,
    Contact,
    Tag,
}

#[derive(Default)]
pub struct Selection {
    index: BTreeMap<String, BTreeSet<String>>,
    highlighted_contacts: HashSet<String>,
    highlighted_tags: HashSet<String>,
    focus: Focus,
}

impl Selection {
    /// Rebuild the hashtag → contact-ids index for a new contact list.
    /// Clears any highlight from the previous session.
    pub fn build_index(&mut self, contacts: &[Contact]) {
        self.index.clear();
        self.clear();
        for contact in contacts {
            for tag in contact.tag_set() {
                self.index
                    .entry(tag.to_string())
                    .or_default()
                    .insert(contact.id.clone());
            }
        }
    }

    pub fn contacts_for_tag(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.index.get(tag)
    }

    pub fn highlighted_contacts(&self) -> &HashSet<String> {
        &self.highlighted_contacts
    }

    pub fn highlighted_tags(&self) -> &HashSet<String> {
        &self.highlighted_tags
    }

    pub fn is_contact_highlighted(&self, contact_id: &str) -> bool {
        self.highlighted_contacts.contains(contact_id)
    }

    pub fn is_tag_highlighted(&self, tag: &str) -> bool {
        self.highlighted_tags.contains(tag)
    }

    pub fn mode(&self) -> SelectionMode {
        match self.focus {
            Focus::None => SelectionMode::Idle,
            Focus::Contact => SelectionMode::ContactHighlighted,
            Focus::Tag => SelectionMode::TagHighlighted,
        }
    }

    /// Tap-once-to-highlight, tap-again-to-open: a contact that is already
    /// the sole highlighted contact yields the detail intent and the
    /// highlight is left untouched.
    pub fn select_contact(&mut self, contact: &Contact) -> SelectOutcome {
        if self.highlighted_contacts.len() == 1
            && self.highlighted_contacts.contains(&contact.id)
        {
            return SelectOutcome::OpenDetail;
        }
        self.highlight_contact(contact);
        SelectOutcome::Highlighted
    }

    fn highlight_contact(&mut self, contact: &Contact) {
        self.highlighted_contacts = HashSet::from([contact.id.clone()]);
        self.highlighted_tags = contact.tag_set().iter().map(|t| t.to_string()).collect();
        self.focus = Focus::Contact;
    }

    /// Highlight one hashtag and every contact carrying it. Returns false
    /// (leaving the highlight unchanged) for a tag the index doesn't know.
    pub fn select_tag(&mut self, tag: &str) -> bool {
        let Some(members) = self.index.get(tag) else {
            return false;
        };
        self.highlighted_contacts = members.iter().cloned().collect();
        self.highlighted_tags = HashSet::from([tag.to_string()]);
        self.focus = Focus::Tag;
        true
    }

    /// Search-driven highlighting. A contact-name match wins over a hashtag
    /// match; at most one match class is acted on per call. Matching is a
    /// case-insensitive substring test, first hit wins.
    pub fn search(&mut self, contacts: &[Contact], query: &str) -> SearchOutcome {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.clear();
            return SearchOutcome::Cleared;
        }

        let needle = trimmed.to_lowercase();
        if let Some(hit) = contacts
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
        {
            self.highlight_contact(hit);
            return SearchOutcome::Contact(hit.id.clone());
        }

        let tag_hit = self
            .index
            .keys()
            .find(|tag| tag.to_lowercase().contains(&needle))
            .cloned();
        if let Some(tag) = tag_hit {
            self.select_tag(&tag);
            return SearchOutcome::Tag(tag);
        }

        SearchOutcome::NoMatch
    }

    /// Empty both highlight sets. Never moves the viewport.
    pub fn clear(&mut self) {
        self.highlighted_contacts.clear();
        self.highlighted_tags.clear();
        self.focus = Focus::None;
    }
}
