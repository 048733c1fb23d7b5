//! Declarative motif templates.
//!
//! A motif is a set of roles (0..arity) plus the aspects that must connect
//! specific role pairs. The detector tries every assignment of bodies to
//! roles, so symmetric shapes only need to be written down once.

use crate::aspects::AspectKind;
use crate::patterns::types::PatternType;

/// Role indices used in the templates below
pub const A: usize = 0;
pub const B: usize = 1;
pub const C: usize = 2;
pub const D: usize = 3;

/// One aspect a motif requires between two roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredEdge {
    pub kind: AspectKind,
    pub from: usize,
    pub to: usize,
}

impl RequiredEdge {
    pub const fn new(kind: AspectKind, from: usize, to: usize) -> Self {
        Self { kind, from, to }
    }
}

/// Template for one pattern type
#[derive(Debug, Clone, PartialEq)]
pub struct MotifSpec {
    pub pattern_type: PatternType,
    /// Number of member bodies (3 or 4)
    pub arity: usize,
    /// Required edges, in the order they are reported
    pub edges: Vec<RequiredEdge>,
    pub base_score: f64,
}

impl MotifSpec {
    pub fn new(pattern_type: PatternType, arity: usize, edges: Vec<RequiredEdge>, base_score: f64) -> Self {
        debug_assert!(edges.iter().all(|e| e.from < arity && e.to < arity && e.from != e.to));
        Self {
            pattern_type,
            arity,
            edges,
            base_score,
        }
    }
}

/// The six stock motifs, in reporting order
pub fn standard_motifs() -> Vec<MotifSpec> {
    use AspectKind::{Opposition, Quincunx, Sextile, Square, Trine};
    let e = RequiredEdge::new;
    vec![
        MotifSpec::new(
            PatternType::Yod,
            3,
            vec![e(Sextile, A, B), e(Quincunx, A, C), e(Quincunx, B, C)],
            0.80,
        ),
        MotifSpec::new(
            PatternType::TSquare,
            3,
            vec![e(Opposition, A, B), e(Square, A, C), e(Square, B, C)],
            0.85,
        ),
        MotifSpec::new(
            PatternType::GrandTrine,
            3,
            vec![e(Trine, A, B), e(Trine, A, C), e(Trine, B, C)],
            0.80,
        ),
        // D opposes one trine vertex and sextiles the other two
        MotifSpec::new(
            PatternType::Kite,
            4,
            vec![
                e(Trine, A, B),
                e(Trine, A, C),
                e(Trine, B, C),
                e(Opposition, D, A),
                e(Sextile, D, B),
                e(Sextile, D, C),
            ],
            0.86,
        ),
        MotifSpec::new(
            PatternType::MysticRectangle,
            4,
            vec![
                e(Opposition, A, B),
                e(Opposition, C, D),
                e(Sextile, A, C),
                e(Sextile, A, D),
                e(Sextile, B, C),
                e(Sextile, B, D),
            ],
            0.84,
        ),
        // A-C and B-D oppose; squares run around the cycle A-B-C-D
        MotifSpec::new(
            PatternType::GrandCross,
            4,
            vec![
                e(Opposition, A, C),
                e(Opposition, B, D),
                e(Square, A, B),
                e(Square, B, C),
                e(Square, C, D),
                e(Square, D, A),
            ],
            0.88,
        ),
    ]
}
