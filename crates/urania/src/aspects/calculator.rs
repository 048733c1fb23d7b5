use crate::aspects::graph::AspectGraph;
use crate::aspects::types::{ordered_pair, AspectEdge, BodySnapshot, Phase};
use crate::config::{AspectConfig, AspectDefinition};
use crate::ephemeris::types::{BodyState, Positions};
use crate::zodiac;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shortest angular distance between two longitudes, in [0, 180]
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = zodiac::normalize_degrees(lon1 - lon2);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Tightness of an orb against its limit, 1.0 when exact and 0.0 at or past the limit
pub fn tightness(orb: f64, orb_limit: f64) -> f64 {
    if orb_limit <= 0.0 {
        return 0.0;
    }
    (1.0 - orb / orb_limit).max(0.0)
}

/// Builds the daily aspect graph from body positions
pub struct AspectClassifier {
    config: Arc<AspectConfig>,
}

impl AspectClassifier {
    pub fn new(config: Arc<AspectConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AspectConfig {
        &self.config
    }

    /// Compute the aspect graph for one instant
    pub fn classify(&self, positions: &Positions) -> AspectGraph {
        let bodies: Vec<(&String, &BodyState)> = positions.iter().collect();

        let mut edges = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (name1, state1) = bodies[i];
                let (name2, state2) = bodies[j];
                if let Some(edge) = self.classify_pair(name1, state1, name2, state2) {
                    edges.push(edge);
                }
            }
        }

        log::debug!(
            "Classified {} bodies into {} aspects",
            bodies.len(),
            edges.len()
        );
        AspectGraph::from_edges(edges)
    }

    /// Classify a single pair. `name1` should sort before `name2`.
    pub fn classify_pair(
        &self,
        name1: &str,
        state1: &BodyState,
        name2: &str,
        state2: &BodyState,
    ) -> Option<AspectEdge> {
        let lon1 = zodiac::normalize_degrees(state1.lon);
        let lon2 = zodiac::normalize_degrees(state2.lon);
        let angle = angular_separation(lon1, lon2);
        let (definition, orb) = self.closest_aspect(angle)?;

        // Phase projection treats the second body as faster on a tie
        let (faster, slower) = if state1.speed.abs() > state2.speed.abs() {
            ((lon1, state1.speed), (lon2, state2.speed))
        } else {
            ((lon2, state2.speed), (lon1, state1.speed))
        };
        let phase = self.phase(faster, slower, definition.angle, orb);

        let sign1 = zodiac::sign_index(lon1);
        let sign2 = zodiac::sign_index(lon2);
        let out_of_sign = zodiac::is_out_of_sign(definition.kind, sign1, sign2);

        let weight = (self.config.body_weight(name1) + self.config.body_weight(name2)) / 2.0;
        let importance_score = (tightness(orb, definition.orb) * weight).clamp(0.0, 1.0);

        let mut snapshots = BTreeMap::new();
        snapshots.insert(
            name1.to_string(),
            BodySnapshot {
                lon: lon1,
                sign: zodiac::sign_name(sign1).to_string(),
                speed: state1.speed,
            },
        );
        snapshots.insert(
            name2.to_string(),
            BodySnapshot {
                lon: lon2,
                sign: zodiac::sign_name(sign2).to_string(),
                speed: state2.speed,
            },
        );

        let (body1, body2) = ordered_pair(name1, name2);
        Some(AspectEdge {
            body1: body1.to_string(),
            body2: body2.to_string(),
            kind: definition.kind,
            family: definition.family.clone(),
            vibe: definition.vibe.clone(),
            ideal_angle: definition.angle,
            angle,
            orb,
            phase,
            out_of_sign,
            positions: snapshots,
            importance_score,
        })
    }

    /// Pick the definition with the smallest passing orb; earlier definitions win ties
    pub fn closest_aspect(&self, angle: f64) -> Option<(&AspectDefinition, f64)> {
        let mut best: Option<(&AspectDefinition, f64)> = None;
        for definition in &self.config.aspects {
            let orb = (angle - definition.angle).abs();
            if orb > definition.orb {
                continue;
            }
            match best {
                Some((_, best_orb)) if orb >= best_orb => {}
                _ => best = Some((definition, orb)),
            }
        }
        best
    }

    /// Project the faster body forward and see whether the orb shrinks.
    ///
    /// Near-zero relative speed reports separating without projecting. The
    /// projection alone would still move the faster body and could report
    /// applying for a pair whose separation is not changing.
    fn phase(&self, faster: (f64, f64), slower: (f64, f64), ideal: f64, orb: f64) -> Phase {
        let (faster_lon, faster_speed) = faster;
        let (slower_lon, slower_speed) = slower;

        if (faster_speed - slower_speed).abs() < self.config.stationary_speed_epsilon {
            return Phase::Separating;
        }

        let projected =
            zodiac::normalize_degrees(faster_lon + faster_speed * self.config.phase_step_days);
        let future_angle = angular_separation(projected, slower_lon);
        if (future_angle - ideal).abs() < orb {
            Phase::Applying
        } else {
            Phase::Separating
        }
    }
}
