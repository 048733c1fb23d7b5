use crate::aspects::types::{ordered_pair, AspectEdge, AspectKind};
use std::collections::{BTreeMap, HashMap};

/// Aspect edges for one instant with an index on (pair, aspect).
///
/// Holds at most one edge per unordered body pair.
#[derive(Debug, Clone, Default)]
pub struct AspectGraph {
    edges: Vec<AspectEdge>,
    /// Sorted body names; position is the body id used by the index
    bodies: Vec<String>,
    body_ids: HashMap<String, usize>,
    index: HashMap<(usize, usize, AspectKind), usize>,
}

impl AspectGraph {
    /// Build the graph. A second edge for an already-seen pair is dropped.
    pub fn from_edges(edges: Vec<AspectEdge>) -> Self {
        let mut seen: HashMap<(String, String), AspectKind> = HashMap::new();
        let mut kept = Vec::with_capacity(edges.len());
        for edge in edges {
            if edge.body1 == edge.body2 {
                log::warn!("Ignoring self-aspect on {}", edge.body1);
                continue;
            }
            let (low, high) = ordered_pair(&edge.body1, &edge.body2);
            let pair = (low.to_string(), high.to_string());
            if let Some(existing) = seen.get(&pair) {
                log::warn!(
                    "Ignoring {} between {} and {}: pair already has a {}",
                    edge.kind,
                    edge.body1,
                    edge.body2,
                    existing
                );
                continue;
            }
            seen.insert(pair, edge.kind);
            kept.push(edge);
        }

        let mut bodies: Vec<String> = kept
            .iter()
            .flat_map(|e| [e.body1.clone(), e.body2.clone()])
            .collect();
        bodies.sort();
        bodies.dedup();
        let body_ids: HashMap<String, usize> = bodies
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();
        let index = kept
            .iter()
            .enumerate()
            .map(|(pos, e)| {
                let (low, high) = canonical(body_ids[&e.body1], body_ids[&e.body2]);
                ((low, high, e.kind), pos)
            })
            .collect();

        Self {
            edges: kept,
            bodies,
            body_ids,
            index,
        }
    }

    fn lookup(&self, a: &str, b: &str, kind: AspectKind) -> Option<usize> {
        let id_a = *self.body_ids.get(a)?;
        let id_b = *self.body_ids.get(b)?;
        let (low, high) = canonical(id_a, id_b);
        self.index.get(&(low, high, kind)).copied()
    }

    /// Whether `kind` connects `a` and `b`, in either order
    pub fn has_aspect(&self, a: &str, b: &str, kind: AspectKind) -> bool {
        self.lookup(a, b, kind).is_some()
    }

    pub fn get(&self, a: &str, b: &str, kind: AspectKind) -> Option<&AspectEdge> {
        self.lookup(a, b, kind).map(|pos| &self.edges[pos])
    }

    /// Sorted names of every body on at least one edge
    pub fn bodies(&self) -> &[String] {
        &self.bodies
    }

    pub fn edges(&self) -> &[AspectEdge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<AspectEdge> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges per aspect kind
    pub fn counts_by_kind(&self) -> BTreeMap<AspectKind, usize> {
        let mut counts = BTreeMap::new();
        for edge in &self.edges {
            *counts.entry(edge.kind).or_insert(0) += 1;
        }
        counts
    }
}

fn canonical(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
