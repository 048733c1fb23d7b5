use crate::aspects::{tightness, AspectGraph};
use crate::config::AspectConfig;
use crate::patterns::types::{Pattern, PatternEdge};
use std::sync::Arc;

const OUT_OF_SIGN_PENALTY: f64 = 0.10;
const LUMINARY_BONUS: f64 = 0.05;
const LUMINARIES: &[&str] = &["sun", "moon"];

/// Annotates detected patterns with out-of-sign flags and strength scores
pub struct PatternScorer {
    config: Arc<AspectConfig>,
}

impl PatternScorer {
    pub fn new(config: Arc<AspectConfig>) -> Self {
        Self { config }
    }

    /// Score every pattern against the graph it was detected in
    pub fn score(&self, patterns: Vec<Pattern>, graph: &AspectGraph) -> Vec<Pattern> {
        patterns
            .into_iter()
            .map(|mut pattern| {
                pattern.has_out_of_sign = self.has_out_of_sign(&pattern, graph);
                pattern.pattern_strength_score =
                    self.strength(&pattern, pattern.has_out_of_sign, graph);
                pattern
            })
            .collect()
    }

    /// True if any referenced aspect is itself out of sign. Unknown edges count as in sign.
    pub fn has_out_of_sign(&self, pattern: &Pattern, graph: &AspectGraph) -> bool {
        pattern.edges.iter().any(|e| {
            graph
                .get(&e.body1, &e.body2, e.kind)
                .map(|aspect| aspect.out_of_sign)
                .unwrap_or(false)
        })
    }

    /// Mean edge tightness, adjusted for out-of-sign and luminaries, clamped to [0, 1]
    pub fn strength(&self, pattern: &Pattern, out_of_sign: bool, graph: &AspectGraph) -> f64 {
        if pattern.edges.is_empty() {
            return 0.0;
        }

        let total: f64 = pattern
            .edges
            .iter()
            .map(|e| self.edge_tightness(e, graph))
            .sum();
        let mut score = total / pattern.edges.len() as f64;

        if out_of_sign {
            score -= OUT_OF_SIGN_PENALTY;
        }
        if has_luminary(&pattern.members) {
            score += LUMINARY_BONUS;
        }
        score.clamp(0.0, 1.0)
    }

    fn edge_tightness(&self, edge: &PatternEdge, graph: &AspectGraph) -> f64 {
        let Some(aspect) = graph.get(&edge.body1, &edge.body2, edge.kind) else {
            return 0.0;
        };
        match self.config.orb_limit(edge.kind) {
            Some(limit) => tightness(aspect.orb, limit),
            None => 0.0,
        }
    }
}

fn has_luminary(members: &[String]) -> bool {
    members
        .iter()
        .any(|m| LUMINARIES.iter().any(|l| m.eq_ignore_ascii_case(l)))
}
