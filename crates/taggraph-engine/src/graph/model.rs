use std::collections::{BTreeSet, HashMap, HashSet};

use smallvec::SmallVec;
use taggraph_core::{Contact, GraphEdge, GraphNode, NodeId, NodeKind};

/// Bipartite contact/hashtag graph for one loaded contact list. Replaced
/// wholesale when the list changes, never patched in place.
#[derive(Default)]
pub struct GraphModel {
    pub nodes: HashMap<NodeId, GraphNode>,
    pub edges: HashSet<GraphEdge>,
    incident: HashMap<NodeId, SmallVec<[NodeId; 4]>>,
}

impl GraphModel {
    /// Pure function of the contact list: one node per contact, one node
    /// per distinct hashtag, one edge per (contact, tag) pair. Duplicate
    /// tags on a single contact collapse via `Contact::tag_set`; a tag node
    /// therefore never exists without at least one incident edge.
    pub fn build(contacts: &[Contact]) -> Self {
        let mut model = Self::default();

        let mut tags: BTreeSet<&str> = BTreeSet::new();
        for contact in contacts {
            let node = GraphNode::for_contact(contact);
            model.nodes.insert(node.id.clone(), node);
            tags.extend(contact.tag_set());
        }
        for tag in &tags {
            let node = GraphNode::for_tag(tag);
            model.nodes.insert(node.id.clone(), node);
        }

        for contact in contacts {
            let from = NodeId::contact(&contact.id);
            for tag in contact.tag_set() {
                let to = NodeId::tag(tag);
                let edge = GraphEdge {
                    from: from.clone(),
                    to: to.clone(),
                };
                if model.edges.insert(edge) {
                    model.incident.entry(from.clone()).or_default().push(to.clone());
                    model.incident.entry(to).or_default().push(from.clone());
                }
            }
        }

        model
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn neighbors(&self, id: &NodeId) -> &[NodeId] {
        self.incident.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contact_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.kind == NodeKind::Contact)
            .count()
    }

    pub fn tag_count(&self) -> usize {
        self.nodes.values().filter(|n| n.kind == NodeKind::Tag).count()
    }
}
