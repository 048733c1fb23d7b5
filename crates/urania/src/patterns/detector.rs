use crate::aspects::AspectGraph;
use crate::patterns::motifs::{standard_motifs, MotifSpec};
use crate::patterns::types::{Pattern, PatternEdge, PatternType};
use std::collections::HashSet;

/// Finds motif instances in an aspect graph
pub struct PatternDetector {
    motifs: Vec<MotifSpec>,
}

impl PatternDetector {
    /// Detector for the six standard motifs
    pub fn new() -> Self {
        Self::with_motifs(standard_motifs())
    }

    pub fn with_motifs(motifs: Vec<MotifSpec>) -> Self {
        Self { motifs }
    }

    pub fn motifs(&self) -> &[MotifSpec] {
        &self.motifs
    }

    /// Detect every motif over the graph's bodies.
    ///
    /// Each (type, member set) is reported once, with the edges of the first
    /// role assignment that matched. Patterns come out unscored.
    pub fn detect(&self, graph: &AspectGraph) -> Vec<Pattern> {
        let bodies = graph.bodies();
        let mut seen: HashSet<(PatternType, Vec<String>)> = HashSet::new();
        let mut patterns = Vec::new();

        for motif in &self.motifs {
            let orderings = permutations(motif.arity);
            let before = patterns.len();
            for subset in combinations(bodies.len(), motif.arity) {
                let members: Vec<&str> = subset.iter().map(|&i| bodies[i].as_str()).collect();
                let Some(roles) = orderings
                    .iter()
                    .map(|order| order.iter().map(|&slot| members[slot]).collect::<Vec<_>>())
                    .find(|roles| matches_motif(graph, motif, roles))
                else {
                    continue;
                };

                let pattern = build_pattern(motif, &members, &roles);
                if seen.insert(pattern.fingerprint()) {
                    patterns.push(pattern);
                }
            }
            log::debug!(
                "{}: {} found among {} bodies",
                motif.pattern_type,
                patterns.len() - before,
                bodies.len()
            );
        }

        patterns
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether every required edge holds with `roles[i]` playing role i
fn matches_motif(graph: &AspectGraph, motif: &MotifSpec, roles: &[&str]) -> bool {
    motif
        .edges
        .iter()
        .all(|req| graph.has_aspect(roles[req.from], roles[req.to], req.kind))
}

fn build_pattern(motif: &MotifSpec, members: &[&str], roles: &[&str]) -> Pattern {
    let mut sorted: Vec<String> = members.iter().map(|m| m.to_string()).collect();
    sorted.sort();
    Pattern {
        pattern_type: motif.pattern_type,
        members: sorted,
        edges: motif
            .edges
            .iter()
            .map(|req| PatternEdge::new(req.kind, roles[req.from], roles[req.to]))
            .collect(),
        pattern_score: motif.base_score,
        has_out_of_sign: false,
        pattern_strength_score: 0.0,
    }
}

/// All k-element index subsets of 0..n, in lexicographic order
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        out.push(current.clone());
        // Rightmost index that can still move forward
        let Some(pos) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            return out;
        };
        current[pos] += 1;
        for i in (pos + 1)..k {
            current[i] = current[i - 1] + 1;
        }
    }
}

/// All orderings of 0..k, in lexicographic order
pub(crate) fn permutations(k: usize) -> Vec<Vec<usize>> {
    fn extend(prefix: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Vec<usize>>) {
        if prefix.len() == used.len() {
            out.push(prefix.clone());
            return;
        }
        for i in 0..used.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            prefix.push(i);
            extend(prefix, used, out);
            prefix.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    extend(&mut Vec::with_capacity(k), &mut vec![false; k], &mut out);
    out
}
