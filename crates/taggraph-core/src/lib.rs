use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A contact as delivered by the address book or the built-in samples.
/// Hashtags are attached upstream (heuristic or AI extraction) before the
/// graph engine ever sees the contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub image_url: Option<String>,
    pub hashtags: Vec<String>,
    pub summary: Option<String>,
}

impl Contact {
    /// Deduplicated view of this contact's hashtags. Duplicate tags on one
    /// contact collapse here, so consumers see each (contact, tag) pair once.
    pub fn tag_set(&self) -> BTreeSet<&str> {
        self.hashtags.iter().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    /// Id of the graph node for a contact. Deterministic, so re-derivation
    /// from the same contact list always lands on the same node.
    pub fn contact(contact_id: &str) -> Self {
        Self(format!("contact:{contact_id}"))
    }

    /// Id of the graph node for a hashtag.
    pub fn tag(text: &str) -> Self {
        Self(format!("tag:{text}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Contact,
    Tag,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    /// Source contact, present only for contact nodes.
    pub contact: Option<Contact>,
}

impl GraphNode {
    pub fn for_contact(contact: &Contact) -> Self {
        Self {
            id: NodeId::contact(&contact.id),
            kind: NodeKind::Contact,
            label: contact.name.clone(),
            contact: Some(contact.clone()),
        }
    }

    pub fn for_tag(text: &str) -> Self {
        Self {
            id: NodeId::tag(text),
            kind: NodeKind::Tag,
            label: text.to_string(),
            contact: None,
        }
    }
}

/// One contact↔hashtag connection. `from` is always the contact node and
/// `to` always the tag node; the canonical orientation is what makes the
/// pair effectively unordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
}
