//! The owning aggregate for one interactive graph session: contacts, model,
//! resolved layout, selection and viewport. Everything the presentation
//! layer does arrives through the `on_*` event surface; everything it draws
//! comes out through the read accessors. No event may crash the session;
//! bad input degrades to "nothing happens".

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use taggraph_core::{Contact, GraphEdge, GraphNode, NodeId, NodeKind};
use tracing::{debug, info, warn};

use crate::graph::layout::{self, LayoutBounds, LayoutResult};
use crate::graph::model::GraphModel;
use crate::graph::select::{SearchOutcome, SelectOutcome, Selection, SelectionMode};
use crate::source::Incoming;
use crate::util::config::GraphConfig;
use crate::view::viewport::{ScreenGeometry, Viewport, ViewportTransform};

/// What a node tap means for the presentation layer.
#[derive(Debug, PartialEq)]
pub enum TapOutcome {
    /// Second tap on the sole highlighted contact: open its detail screen.
    OpenDetail(Contact),
    /// Highlight changed and the viewport is gliding toward the node.
    Highlighted,
    /// Unknown node, or nothing sensible to do.
    Ignored,
}

pub struct GraphSession {
    cfg: GraphConfig,
    screen: ScreenGeometry,
    contacts: Vec<Contact>,
    model: GraphModel,
    layout: LayoutResult,
    selection: Selection,
    viewport: Viewport,
    search_query: String,
}

impl GraphSession {
    pub fn new(cfg: GraphConfig, screen: ScreenGeometry) -> Self {
        let layout = LayoutResult::empty(&cfg);
        let viewport = Viewport::new(cfg.min_scale, cfg.max_scale);
        Self {
            cfg,
            screen,
            contacts: Vec::new(),
            model: GraphModel::default(),
            layout,
            selection: Selection::default(),
            viewport,
            search_query: String::new(),
        }
    }

    /// Loader messages. A loaded batch triggers the full rebuild; a loader
    /// error is logged and the session keeps whatever it had.
    pub fn apply(&mut self, incoming: Incoming) {
        match incoming {
            Incoming::Loaded(contacts) => self.rebuild(contacts),
            Incoming::Error(err) => warn!(error = %err, "contact loading failed"),
        }
    }

    /// One synchronous unit of work per new contact list: model, layout,
    /// index, then a viewport back at identity.
    pub fn rebuild(&mut self, contacts: Vec<Contact>) {
        self.model = GraphModel::build(&contacts);
        self.layout = layout::solve(&self.model, &self.cfg);
        self.selection.build_index(&contacts);
        self.contacts = contacts;
        self.viewport.reset_transform();
        self.search_query.clear();
        info!(
            contacts = self.model.contact_count(),
            tags = self.model.tag_count(),
            edges = self.model.edge_count(),
            "graph session rebuilt"
        );
    }

    // ---- Gestures ----

    pub fn on_pinch(&mut self, delta: f32) {
        self.viewport.pinch(delta);
    }

    pub fn on_pan(&mut self, dx: f32, dy: f32) {
        self.viewport.pan(dx, dy);
    }

    pub fn on_gesture_end(&mut self) {
        self.viewport.end_gesture();
    }

    // ---- Taps & search ----

    pub fn on_node_tap(&mut self, id: &NodeId) -> TapOutcome {
        let Some(node) = self.model.node(id) else {
            debug!(node = %id.0, "tap on unknown node");
            return TapOutcome::Ignored;
        };
        let kind = node.kind;
        let label = node.label.clone();
        let contact = node.contact.clone();

        match kind {
            NodeKind::Contact => {
                let Some(contact) = contact else {
                    return TapOutcome::Ignored;
                };
                match self.selection.select_contact(&contact) {
                    SelectOutcome::OpenDetail => TapOutcome::OpenDetail(contact),
                    SelectOutcome::Highlighted => {
                        self.center_on_node(id);
                        TapOutcome::Highlighted
                    }
                }
            }
            NodeKind::Tag => {
                if self.selection.select_tag(&label) {
                    self.center_on_node(id);
                    TapOutcome::Highlighted
                } else {
                    TapOutcome::Ignored
                }
            }
        }
    }

    /// Tap on empty canvas: drop the highlight, leave the viewport alone.
    pub fn on_background_tap(&mut self) {
        self.selection.clear();
    }

    pub fn on_search_text_change(&mut self, query: &str) {
        self.search_query = query.to_string();
        match self.selection.search(&self.contacts, query) {
            SearchOutcome::Contact(contact_id) => {
                self.center_on_node(&NodeId::contact(&contact_id));
            }
            SearchOutcome::Tag(tag) => {
                self.center_on_node(&NodeId::tag(&tag));
            }
            SearchOutcome::Cleared | SearchOutcome::NoMatch => {}
        }
    }

    /// Reset affordance: unit scale, cleared highlight and query, view
    /// recentered on the default node.
    pub fn on_reset(&mut self) {
        self.selection.clear();
        self.search_query.clear();
        match self.default_focus_node() {
            Some(id) => {
                if let Some(pos) = self.layout.positions.get(&id).copied() {
                    self.viewport.reset(pos, &self.screen, &self.layout.bounds);
                }
            }
            None => self.viewport.reset_transform(),
        }
    }

    /// Glide the viewport toward a node. Reports false, and does nothing,
    /// when the node has no resolved position.
    pub fn center_on_node(&mut self, id: &NodeId) -> bool {
        let Some(pos) = self.layout.positions.get(id).copied() else {
            debug!(node = %id.0, "center request for unpositioned node");
            return false;
        };
        self.viewport.center_on(pos, &self.screen, &self.layout.bounds);
        true
    }

    /// First positioned node in id order; the reset target.
    fn default_focus_node(&self) -> Option<NodeId> {
        self.layout.positions.keys().min().cloned()
    }

    // ---- Animation hooks for the presentation layer ----

    pub fn tick_glide(&mut self, alpha: f32) -> bool {
        self.viewport.step_glide(alpha)
    }

    pub fn snap_glide(&mut self) {
        self.viewport.snap_to_target();
    }

    // ---- Read access for drawing ----

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.model.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.model.edges.iter()
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn positions(&self) -> &HashMap<NodeId, Vec2> {
        &self.layout.positions
    }

    pub fn bounds(&self) -> LayoutBounds {
        self.layout.bounds
    }

    pub fn transform(&self) -> ViewportTransform {
        self.viewport.transform()
    }

    /// Screen-space position of a layout point under the current transform.
    pub fn project(&self, pos: Vec2) -> Vec2 {
        self.viewport.project(pos, &self.layout.bounds)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn highlighted_contacts(&self) -> &HashSet<String> {
        self.selection.highlighted_contacts()
    }

    pub fn highlighted_tags(&self) -> &HashSet<String> {
        self.selection.highlighted_tags()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str, tags: &[&str]) -> Contact {
        Contact {
            id: id.into(),
            name: name.into(),
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
            ..Contact::default()
        }
    }

    fn session() -> GraphSession {
        let cfg = GraphConfig::default();
        let screen = ScreenGeometry {
            width: cfg.default_screen_width,
            height: cfg.default_screen_height,
            chrome_height: cfg.default_chrome_height,
        };
        let mut session = GraphSession::new(cfg, screen);
        session.rebuild(vec![
            contact("1", "Alice", &["sf", "pm"]),
            contact("2", "Bob", &["sf"]),
        ]);
        session
    }

    #[test]
    fn rebuild_populates_model_layout_and_index() {
        let s = session();

        assert_eq!(s.model().contact_count(), 2);
        assert_eq!(s.model().tag_count(), 2);
        assert_eq!(s.model().edge_count(), 3);
        assert_eq!(s.positions().len(), 4);
        assert!(s.bounds().width() > 0.0);
        assert_eq!(s.transform(), ViewportTransform::IDENTITY);
    }

    #[test]
    fn empty_contact_list_degrades_to_default_bounds() {
        let cfg = GraphConfig::default();
        let screen = ScreenGeometry {
            width: cfg.default_screen_width,
            height: cfg.default_screen_height,
            chrome_height: cfg.default_chrome_height,
        };
        let mut s = GraphSession::new(cfg, screen);
        s.rebuild(Vec::new());

        assert!(s.model().is_empty());
        assert!(s.bounds().width() > 0.0);
        assert!(s.bounds().height() > 0.0);
    }

    #[test]
    fn tap_highlights_then_opens_detail() {
        let mut s = session();
        let alice = NodeId::contact("1");

        assert_eq!(s.on_node_tap(&alice), TapOutcome::Highlighted);
        assert!(s.highlighted_contacts().contains("1"));
        assert!(s.highlighted_tags().contains("sf"));
        assert!(s.highlighted_tags().contains("pm"));

        match s.on_node_tap(&alice) {
            TapOutcome::OpenDetail(c) => assert_eq!(c.name, "Alice"),
            other => panic!("expected detail intent, got {other:?}"),
        }
    }

    #[test]
    fn tag_tap_highlights_carriers_and_centers() {
        let mut s = session();
        let sf = NodeId::tag("sf");

        assert_eq!(s.on_node_tap(&sf), TapOutcome::Highlighted);
        assert!(s.highlighted_contacts().contains("1"));
        assert!(s.highlighted_contacts().contains("2"));

        s.snap_glide();
        let pos = s.positions()[&sf];
        assert!((s.project(pos) - s.screen().target_point()).length() < 1e-2);
    }

    #[test]
    fn unknown_node_tap_is_ignored() {
        let mut s = session();
        assert_eq!(s.on_node_tap(&NodeId::contact("404")), TapOutcome::Ignored);
        assert_eq!(s.selection_mode(), SelectionMode::Idle);
    }

    #[test]
    fn center_on_unpositioned_node_reports_false() {
        let mut s = session();
        assert!(!s.center_on_node(&NodeId::tag("ghost")));
        assert_eq!(s.transform(), ViewportTransform::IDENTITY);
    }

    #[test]
    fn background_tap_clears_highlight_without_moving_the_view() {
        let mut s = session();
        s.on_node_tap(&NodeId::tag("sf"));
        s.snap_glide();
        let before = s.transform();

        s.on_background_tap();
        assert_eq!(s.selection_mode(), SelectionMode::Idle);
        assert_eq!(s.transform(), before);
    }

    #[test]
    fn search_highlights_and_empty_search_clears() {
        let mut s = session();

        s.on_search_text_change("sf");
        assert_eq!(s.selection_mode(), SelectionMode::TagHighlighted);
        assert_eq!(s.highlighted_contacts().len(), 2);
        assert_eq!(s.search_query(), "sf");

        s.on_search_text_change("");
        assert_eq!(s.selection_mode(), SelectionMode::Idle);
        assert!(s.highlighted_contacts().is_empty());
    }

    #[test]
    fn search_miss_leaves_highlight_unchanged() {
        let mut s = session();
        s.on_search_text_change("alice");
        assert_eq!(s.selection_mode(), SelectionMode::ContactHighlighted);

        s.on_search_text_change("no-such-thing");
        assert_eq!(s.selection_mode(), SelectionMode::ContactHighlighted);
        assert!(s.highlighted_contacts().contains("1"));
    }

    #[test]
    fn gestures_flow_through_to_the_viewport() {
        let mut s = session();
        s.on_pinch(100.0);
        assert_eq!(s.transform().scale, GraphConfig::default().max_scale);
        s.on_gesture_end();

        s.on_pan(12.0, -7.0);
        s.on_gesture_end();
        assert_eq!(s.transform().translate, Vec2::new(12.0, -7.0));
    }

    #[test]
    fn reset_restores_scale_and_clears_state() {
        let mut s = session();
        s.on_pinch(2.0);
        s.on_gesture_end();
        s.on_node_tap(&NodeId::tag("sf"));
        s.on_search_text_change("sf");

        s.on_reset();
        s.snap_glide();
        assert_eq!(s.transform().scale, 1.0);
        assert_eq!(s.selection_mode(), SelectionMode::Idle);
        assert!(s.search_query().is_empty());
    }

    #[test]
    fn loader_error_keeps_the_session_intact() {
        let mut s = session();
        let nodes_before = s.model().node_count();

        s.apply(Incoming::Error("device said no".into()));
        assert_eq!(s.model().node_count(), nodes_before);
    }
}
