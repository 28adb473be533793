//! Force layout, resolved synchronously before anything is displayed: a
//! fixed number of relaxation iterations, then a single bounds scan. No
//! convergence detection; the fixed iteration count keeps the latency
//! bounded and the result deterministic.
//!
//! Repulsion and collision are O(n²) per iteration. Fine for a personal
//! contact book; spatial partitioning is the next step if node counts ever
//! pass a few hundred.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use taggraph_core::{GraphEdge, NodeId, NodeKind};

use crate::graph::model::GraphModel;
use crate::util::config::GraphConfig;

/// Distance floor for force math; coincident points have no direction.
const MIN_DIST: f32 = 1e-3;

/// Integration step per iteration. Fixed, so the layout depends only on the
/// input graph and the config.
const DT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl LayoutBounds {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    fn expanded(self, pad: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(pad),
            max: self.max + Vec2::splat(pad),
        }
    }
}

pub struct LayoutResult {
    pub positions: HashMap<NodeId, Vec2>,
    pub bounds: LayoutBounds,
}

impl LayoutResult {
    pub fn empty(cfg: &GraphConfig) -> Self {
        Self {
            positions: HashMap::new(),
            bounds: default_bounds(cfg),
        }
    }
}

/// Assign a position to every node and compute the padded bounds.
pub fn solve(model: &GraphModel, cfg: &GraphConfig) -> LayoutResult {
    let mut ids: Vec<NodeId> = model.nodes.keys().cloned().collect();
    ids.sort();
    if ids.is_empty() {
        return LayoutResult::empty(cfg);
    }

    let center = Vec2::new(cfg.default_screen_width, cfg.default_screen_height) * 0.5;
    let mut pos = seed_positions(model, &ids, center, cfg);
    let mut vel = vec![Vec2::ZERO; ids.len()];

    let index: HashMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let mut edges: Vec<&GraphEdge> = model.edges.iter().collect();
    edges.sort();
    let springs: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| Some((*index.get(&e.from)?, *index.get(&e.to)?)))
        .collect();

    for _ in 0..cfg.layout_iterations {
        step(&mut pos, &mut vel, &springs, center, cfg);
    }

    let mut positions = HashMap::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if pos[i].is_finite() {
            positions.insert(id.clone(), pos[i]);
        } else {
            tracing::warn!(node = %id.0, "dropping non-finite layout position");
        }
    }

    let bounds = bounds_of(positions.values().copied())
        .map(|b| b.expanded(cfg.bounds_padding))
        .unwrap_or_else(|| default_bounds(cfg));

    LayoutResult { positions, bounds }
}

/// One relaxation iteration: many-body repulsion and link springs feed a
/// damped velocity integration, collision overlap is corrected positionally,
/// then the whole layout is translated so its centroid sits on `center`.
fn step(
    pos: &mut [Vec2],
    vel: &mut [Vec2],
    springs: &[(usize, usize)],
    center: Vec2,
    cfg: &GraphConfig,
) {
    let n = pos.len();
    let repulsion = cfg.repulsion_strength.max(0.0);
    let link_strength = cfg.link_strength.clamp(0.0, 1.0);
    let damping = cfg.layout_damping.clamp(0.0, 1.0);
    let max_step = cfg.max_step.max(0.001);

    let mut force = vec![Vec2::ZERO; n];

    // Many-body: every pair pushed apart, magnitude inverse with distance.
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = pos[i] - pos[j];
            let dist = delta.length().max(MIN_DIST);
            let push = (delta / dist) * (repulsion / dist);
            force[i] += push;
            force[j] -= push;
        }
    }

    // Links: springs toward the rest distance.
    for &(a, b) in springs {
        let delta = pos[b] - pos[a];
        let dist = delta.length().max(MIN_DIST);
        let dir = delta / dist;
        let stretch = dist - cfg.link_distance;
        let pull = dir * (stretch * link_strength);
        force[a] += pull;
        force[b] -= pull;
    }

    for i in 0..n {
        vel[i] = (vel[i] + force[i] * DT) * damping;
        let mut step = vel[i] * DT;
        if step.length() > max_step {
            step = step.normalize_or_zero() * max_step;
        }
        pos[i] += step;
    }

    // Collision: separate overlapping bounding circles, half the overlap
    // each. Positional, so it cannot be overpowered by the springs.
    let min_sep = cfg.collide_radius * 2.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = pos[j] - pos[i];
            let dist = delta.length();
            if dist >= min_sep {
                continue;
            }
            let dir = if dist > MIN_DIST { delta / dist } else { Vec2::X };
            let shift = dir * ((min_sep - dist) * 0.5);
            pos[i] -= shift;
            pos[j] += shift;
        }
    }

    // Centering: translate the whole layout so its centroid is on center.
    let centroid = pos.iter().copied().sum::<Vec2>() / n as f32;
    let correction = center - centroid;
    for p in pos.iter_mut() {
        *p += correction;
    }
}

/// Starting coordinates: contacts on an outer ring, tags on an inner ring,
/// both walked in sorted-id order. No two nodes start coincident, which the
/// pairwise forces require.
fn seed_positions(model: &GraphModel, ids: &[NodeId], center: Vec2, cfg: &GraphConfig) -> Vec<Vec2> {
    let base = cfg.default_screen_width.min(cfg.default_screen_height) * 0.35;

    let contacts: Vec<&NodeId> = ids
        .iter()
        .filter(|id| matches!(model.node(id).map(|n| n.kind), Some(NodeKind::Contact)))
        .collect();
    let tags: Vec<&NodeId> = ids
        .iter()
        .filter(|id| matches!(model.node(id).map(|n| n.kind), Some(NodeKind::Tag)))
        .collect();

    let mut seeded: HashMap<&NodeId, Vec2> = HashMap::with_capacity(ids.len());
    place_ring(&mut seeded, &contacts, center, base);
    place_ring(&mut seeded, &tags, center, base * 0.55);

    ids.iter()
        .map(|id| seeded.get(id).copied().unwrap_or(center))
        .collect()
}

fn place_ring<'a>(
    out: &mut HashMap<&'a NodeId, Vec2>,
    ids: &[&'a NodeId],
    center: Vec2,
    radius: f32,
) {
    let n = ids.len().max(1) as f32;
    for (i, id) in ids.iter().enumerate() {
        let t = i as f32 / n * TAU;
        out.insert(id, center + Vec2::new(radius * t.cos(), radius * t.sin()));
    }
}

fn bounds_of(positions: impl Iterator<Item = Vec2>) -> Option<LayoutBounds> {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut any = false;
    for p in positions {
        min = min.min(p);
        max = max.max(p);
        any = true;
    }
    any.then_some(LayoutBounds { min, max })
}

fn default_bounds(cfg: &GraphConfig) -> LayoutBounds {
    LayoutBounds {
        min: Vec2::ZERO,
        max: Vec2::new(cfg.default_screen_width, cfg.default_screen_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taggraph_core::Contact;

    fn contact(id: &str, name: &str, tags: &[&str]) -> Contact {
        Contact {
            id: id.into(),
            name: name.into(),
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
            ..Contact::default()
        }
    }

    fn small_graph() -> GraphModel {
        GraphModel::build(&[
            contact("1", "Alice", &["sf", "pm"]),
            contact("2", "Bob", &["sf"]),
            contact("3", "Ana", &[]),
        ])
    }

    #[test]
    fn positions_every_node_and_pads_the_bounds() {
        let model = small_graph();
        let cfg = GraphConfig::default();
        let result = solve(&model, &cfg);

        assert_eq!(result.positions.len(), model.node_count());

        let raw = bounds_of(result.positions.values().copied()).expect("positions");
        let pad = Vec2::splat(cfg.bounds_padding);
        assert!((result.bounds.min - (raw.min - pad)).length() < 1e-3);
        assert!((result.bounds.max - (raw.max + pad)).length() < 1e-3);
        for p in result.positions.values() {
            assert!(result.bounds.contains(*p));
        }
    }

    #[test]
    fn empty_graph_yields_default_nondegenerate_bounds() {
        let cfg = GraphConfig::default();
        let result = solve(&GraphModel::default(), &cfg);

        assert!(result.positions.is_empty());
        assert!(result.bounds.width() > 0.0);
        assert!(result.bounds.height() > 0.0);
    }

    #[test]
    fn layout_is_deterministic() {
        let model = small_graph();
        let cfg = GraphConfig::default();
        let a = solve(&model, &cfg);
        let b = solve(&model, &cfg);

        assert_eq!(a.positions.len(), b.positions.len());
        for (id, p) in &a.positions {
            assert_eq!(b.positions[id], *p, "position of {} diverged", id.0);
        }
        assert_eq!(a.bounds, b.bounds);
    }

    #[test]
    fn single_isolated_node_sits_at_the_center() {
        let model = GraphModel::build(&[contact("1", "Ana", &[])]);
        let cfg = GraphConfig::default();
        let result = solve(&model, &cfg);

        let center = Vec2::new(cfg.default_screen_width, cfg.default_screen_height) * 0.5;
        let p = result.positions[&taggraph_core::NodeId::contact("1")];
        assert!((p - center).length() < 1e-3);
    }

    #[test]
    fn collision_keeps_linked_nodes_separated() {
        let model = GraphModel::build(&[contact("1", "Alice", &["sf"])]);
        let cfg = GraphConfig::default();
        let result = solve(&model, &cfg);

        let a = result.positions[&taggraph_core::NodeId::contact("1")];
        let b = result.positions[&taggraph_core::NodeId::tag("sf")];
        assert!((a - b).length() >= cfg.collide_radius * 2.0 - 1e-2);
    }

    #[test]
    fn respects_the_configured_iteration_count() {
        let model = small_graph();
        let mut cfg = GraphConfig::default();
        cfg.layout_iterations = 0;

        let result = solve(&model, &cfg);
        // With zero iterations the seeds come back untouched, still bounded.
        assert_eq!(result.positions.len(), model.node_count());
        for p in result.positions.values() {
            assert!(result.bounds.contains(*p));
        }
    }
}
