use std::collections::BTreeMap;
use std::sync::Arc;
use urania::aspects::{ordered_pair, AspectEdge, AspectGraph, AspectKind, Phase};
use urania::config::AspectConfig;
use urania::patterns::{Pattern, PatternDetector, PatternEdge, PatternScorer, PatternType};

fn edge(a: &str, b: &str, kind: AspectKind, orb: f64) -> AspectEdge {
    let (body1, body2) = ordered_pair(a, b);
    AspectEdge {
        body1: body1.to_string(),
        body2: body2.to_string(),
        kind,
        family: String::new(),
        vibe: String::new(),
        ideal_angle: 0.0,
        angle: 0.0,
        orb,
        phase: Phase::Separating,
        out_of_sign: false,
        positions: BTreeMap::new(),
        importance_score: 0.0,
    }
}

fn exact(a: &str, b: &str, kind: AspectKind) -> AspectEdge {
    edge(a, b, kind, 0.0)
}

fn scorer() -> PatternScorer {
    PatternScorer::new(Arc::new(AspectConfig::default()))
}

fn of_type(patterns: &[Pattern], pattern_type: PatternType) -> Vec<&Pattern> {
    patterns.iter().filter(|p| p.pattern_type == pattern_type).collect()
}

fn grand_trine_graph() -> AspectGraph {
    AspectGraph::from_edges(vec![
        exact("mars", "jupiter", AspectKind::Trine),
        exact("mars", "saturn", AspectKind::Trine),
        exact("jupiter", "saturn", AspectKind::Trine),
    ])
}

#[test]
fn test_grand_trine_reported_once() {
    let patterns = PatternDetector::new().detect(&grand_trine_graph());

    assert_eq!(patterns.len(), 1);
    let pattern = &patterns[0];
    assert_eq!(pattern.pattern_type, PatternType::GrandTrine);
    assert_eq!(pattern.members, vec!["jupiter", "mars", "saturn"]);
    assert_eq!(pattern.edges.len(), 3);
    assert_eq!(pattern.pattern_score, 0.80);
}

#[test]
fn test_yod_ignores_noise_and_symmetric_roles() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "b", AspectKind::Sextile),
        exact("a", "c", AspectKind::Quincunx),
        exact("b", "c", AspectKind::Quincunx),
        exact("c", "d", AspectKind::Square),
        exact("a", "e", AspectKind::Trine),
        exact("d", "e", AspectKind::Conjunction),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].pattern_type, PatternType::Yod);
    assert_eq!(patterns[0].members, vec!["a", "b", "c"]);
    assert_eq!(
        patterns[0].edges,
        vec![
            PatternEdge::new(AspectKind::Sextile, "a", "b"),
            PatternEdge::new(AspectKind::Quincunx, "a", "c"),
            PatternEdge::new(AspectKind::Quincunx, "b", "c"),
        ]
    );
}

#[test]
fn test_yod_edges_follow_winning_role_assignment() {
    // The apex sorts first, so the first matching assignment is not the identity
    let graph = AspectGraph::from_edges(vec![
        exact("left", "right", AspectKind::Sextile),
        exact("apex", "left", AspectKind::Quincunx),
        exact("apex", "right", AspectKind::Quincunx),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].members, vec!["apex", "left", "right"]);
    assert_eq!(
        patterns[0].edges,
        vec![
            PatternEdge::new(AspectKind::Sextile, "left", "right"),
            PatternEdge::new(AspectKind::Quincunx, "left", "apex"),
            PatternEdge::new(AspectKind::Quincunx, "right", "apex"),
        ]
    );
    assert_eq!(patterns[0].edges[1].body1, "apex");
}

#[test]
fn test_t_square() {
    let graph = AspectGraph::from_edges(vec![
        exact("moon", "saturn", AspectKind::Opposition),
        exact("moon", "mars", AspectKind::Square),
        exact("saturn", "mars", AspectKind::Square),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].pattern_type, PatternType::TSquare);
    assert_eq!(patterns[0].members, vec!["mars", "moon", "saturn"]);
    assert_eq!(patterns[0].pattern_score, 0.85);
    assert_eq!(
        patterns[0].edges[0],
        PatternEdge::new(AspectKind::Opposition, "moon", "saturn")
    );
}

#[test]
fn test_kite_reported_alongside_its_grand_trine() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "b", AspectKind::Trine),
        exact("a", "c", AspectKind::Trine),
        exact("b", "c", AspectKind::Trine),
        exact("d", "b", AspectKind::Opposition),
        exact("d", "a", AspectKind::Sextile),
        exact("d", "c", AspectKind::Sextile),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[0].pattern_type, PatternType::GrandTrine);
    assert_eq!(patterns[1].pattern_type, PatternType::Kite);
    assert_eq!(patterns[1].members, vec!["a", "b", "c", "d"]);
    assert_eq!(patterns[1].pattern_score, 0.86);
    assert!(patterns[1]
        .edges
        .contains(&PatternEdge::new(AspectKind::Opposition, "b", "d")));
}

#[test]
fn test_kite_with_opposition_on_first_member() {
    let graph = AspectGraph::from_edges(vec![
        exact("b", "c", AspectKind::Trine),
        exact("b", "d", AspectKind::Trine),
        exact("c", "d", AspectKind::Trine),
        exact("a", "b", AspectKind::Opposition),
        exact("a", "c", AspectKind::Sextile),
        exact("a", "d", AspectKind::Sextile),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[0].pattern_type, PatternType::GrandTrine);
    assert_eq!(patterns[0].members, vec!["b", "c", "d"]);
    assert_eq!(patterns[1].pattern_type, PatternType::Kite);
    assert_eq!(patterns[1].members, vec!["a", "b", "c", "d"]);
    assert!(patterns[1]
        .edges
        .contains(&PatternEdge::new(AspectKind::Opposition, "a", "b")));
}

#[test]
fn test_mystic_rectangle() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "b", AspectKind::Opposition),
        exact("c", "d", AspectKind::Opposition),
        exact("a", "c", AspectKind::Sextile),
        exact("a", "d", AspectKind::Sextile),
        exact("b", "c", AspectKind::Sextile),
        exact("b", "d", AspectKind::Sextile),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].pattern_type, PatternType::MysticRectangle);
    assert_eq!(patterns[0].pattern_score, 0.84);
    assert_eq!(patterns[0].edges.len(), 6);
}

#[test]
fn test_grand_cross_contains_four_t_squares() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "c", AspectKind::Opposition),
        exact("b", "d", AspectKind::Opposition),
        exact("a", "b", AspectKind::Square),
        exact("b", "c", AspectKind::Square),
        exact("c", "d", AspectKind::Square),
        exact("a", "d", AspectKind::Square),
    ]);
    let patterns = PatternDetector::new().detect(&graph);

    assert_eq!(of_type(&patterns, PatternType::TSquare).len(), 4);
    let crosses = of_type(&patterns, PatternType::GrandCross);
    assert_eq!(crosses.len(), 1);
    assert_eq!(crosses[0].members, vec!["a", "b", "c", "d"]);
    assert_eq!(crosses[0].pattern_score, 0.88);
    assert_eq!(patterns.len(), 5);
}

#[test]
fn test_detection_is_idempotent_and_order_independent() {
    let edges = vec![
        exact("a", "c", AspectKind::Opposition),
        exact("b", "d", AspectKind::Opposition),
        exact("a", "b", AspectKind::Square),
        exact("b", "c", AspectKind::Square),
        exact("c", "d", AspectKind::Square),
        exact("a", "d", AspectKind::Square),
        exact("e", "a", AspectKind::Trine),
    ];
    let mut reversed = edges.clone();
    reversed.reverse();

    let detector = PatternDetector::new();
    let graph = AspectGraph::from_edges(edges);
    let first = detector.detect(&graph);
    let second = detector.detect(&graph);
    let from_reversed = detector.detect(&AspectGraph::from_edges(reversed));

    assert_eq!(first, second);
    assert_eq!(first, from_reversed);
}

#[test]
fn test_no_patterns_in_sparse_graph() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "b", AspectKind::Trine),
        exact("b", "c", AspectKind::Trine),
    ]);
    assert!(PatternDetector::new().detect(&graph).is_empty());
    assert!(PatternDetector::new().detect(&AspectGraph::default()).is_empty());
}

#[test]
fn test_duplicate_pair_keeps_first_edge() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "b", AspectKind::Trine),
        exact("b", "a", AspectKind::Square),
    ]);
    assert_eq!(graph.len(), 1);
    assert!(graph.has_aspect("a", "b", AspectKind::Trine));
    assert!(!graph.has_aspect("a", "b", AspectKind::Square));
}

#[test]
fn test_exact_pattern_scores_full_strength() {
    let graph = grand_trine_graph();
    let patterns = scorer().score(PatternDetector::new().detect(&graph), &graph);

    assert!(!patterns[0].has_out_of_sign);
    assert_eq!(patterns[0].pattern_strength_score, 1.0);
}

#[test]
fn test_strength_decreases_as_orb_widens() {
    let strength_for = |orb: f64| {
        let graph = AspectGraph::from_edges(vec![
            edge("mars", "jupiter", AspectKind::Trine, orb),
            edge("mars", "saturn", AspectKind::Trine, 1.0),
            edge("jupiter", "saturn", AspectKind::Trine, 1.0),
        ]);
        let patterns = scorer().score(PatternDetector::new().detect(&graph), &graph);
        patterns[0].pattern_strength_score
    };

    let mut previous = strength_for(0.0);
    for step in 1..=6 {
        let current = strength_for(step as f64);
        assert!(current < previous, "orb {} did not lower strength", step);
        previous = current;
    }
    // Trine orb limit is 6: (0 + 5/6 + 5/6) / 3
    assert!((previous - 5.0 / 9.0).abs() < 1e-12);
}

#[test]
fn test_out_of_sign_penalty() {
    let mut edges = vec![
        exact("mars", "jupiter", AspectKind::Trine),
        exact("mars", "saturn", AspectKind::Trine),
        edge("jupiter", "saturn", AspectKind::Trine, 3.0),
    ];
    edges[0].out_of_sign = true;
    let graph = AspectGraph::from_edges(edges);
    let patterns = scorer().score(PatternDetector::new().detect(&graph), &graph);

    assert!(patterns[0].has_out_of_sign);
    let expected = (1.0 + 1.0 + 0.5) / 3.0 - 0.10;
    assert!((patterns[0].pattern_strength_score - expected).abs() < 1e-12);
}

#[test]
fn test_luminary_bonus_and_clamp() {
    let graph = AspectGraph::from_edges(vec![
        edge("Sun", "jupiter", AspectKind::Trine, 3.0),
        edge("Sun", "saturn", AspectKind::Trine, 3.0),
        edge("jupiter", "saturn", AspectKind::Trine, 3.0),
    ]);
    let patterns = scorer().score(PatternDetector::new().detect(&graph), &graph);
    assert!((patterns[0].pattern_strength_score - 0.55).abs() < 1e-12);

    let graph = AspectGraph::from_edges(vec![
        exact("moon", "jupiter", AspectKind::Trine),
        exact("moon", "saturn", AspectKind::Trine),
        exact("jupiter", "saturn", AspectKind::Trine),
    ]);
    let patterns = scorer().score(PatternDetector::new().detect(&graph), &graph);
    assert_eq!(patterns[0].pattern_strength_score, 1.0);
}

#[test]
fn test_missing_edge_counts_as_zero_tightness() {
    let graph = AspectGraph::from_edges(vec![
        exact("a", "b", AspectKind::Trine),
        exact("a", "c", AspectKind::Trine),
    ]);
    let pattern = Pattern {
        pattern_type: PatternType::GrandTrine,
        members: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        edges: vec![
            PatternEdge::new(AspectKind::Trine, "a", "b"),
            PatternEdge::new(AspectKind::Trine, "a", "c"),
            PatternEdge::new(AspectKind::Trine, "b", "c"),
        ],
        pattern_score: 0.80,
        has_out_of_sign: false,
        pattern_strength_score: 0.0,
    };
    let scored = scorer().score(vec![pattern], &graph);

    assert!(!scored[0].has_out_of_sign);
    assert!((scored[0].pattern_strength_score - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_pattern_json_shape() {
    let graph = grand_trine_graph();
    let patterns = scorer().score(PatternDetector::new().detect(&graph), &graph);
    let value = serde_json::to_value(&patterns[0]).unwrap();

    assert_eq!(value["pattern_type"], "Grand Trine");
    assert_eq!(value["members"][0], "jupiter");
    assert_eq!(value["edges"][0]["aspect_name"], "trine");
    assert_eq!(value["edges"][0]["body1"], "jupiter");
    assert_eq!(value["pattern_score"], 0.8);
    assert_eq!(value["has_out_of_sign"], false);
    assert_eq!(value["pattern_strength_score"], 1.0);
}
