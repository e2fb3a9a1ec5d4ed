use rstest::rstest;
use skyscore::config::{Config, RuleParams};
use skyscore::rules::{RuleKind, RuleSet};

mod common;
use common::build_trace;

fn rules(kind: RuleKind) -> RuleSet {
    RuleSet::new(kind, RuleParams::default())
}

#[rstest]
#[case(RuleKind::OutAndReturn, 3)]
#[case(RuleKind::FaiTriangle, 4)]
fn fixed_slot_counts(#[case] kind: RuleKind, #[case] expected: usize) {
    assert_eq!(rules(kind).max_slots(), expected);
}

#[rstest]
#[case(5, 5)]
#[case(12, 12)]
// Degenerate configs clamp to a scoreable range.
#[case(1, 2)]
#[case(64, 16)]
fn free_distance_slots_follow_config(#[case] configured: usize, #[case] expected: usize) {
    let params = RuleParams {
        free_distance_points: configured,
        ..RuleParams::default()
    };
    assert_eq!(
        RuleSet::new(RuleKind::FreeDistance, params).max_slots(),
        expected
    );
}

#[test]
fn edge_score_is_handicapped_distance() {
    let config = Config::default();
    let trace = build_trace(&config, &[(0.0, 0.0, 0.0), (0.0, 1.0, 1.0)]);

    let raw = rules(RuleKind::FreeDistance)
        .edge_score(&trace, 0, 1, 1)
        .unwrap();
    // One degree of longitude on the equator.
    assert!((raw - 111.19).abs() < 0.05, "raw leg was {raw}");

    let params = RuleParams {
        handicap: 0.8,
        ..RuleParams::default()
    };
    let scaled = RuleSet::new(RuleKind::FreeDistance, params)
        .edge_score(&trace, 0, 1, 1)
        .unwrap();
    assert!((scaled - raw * 0.8).abs() < 1e-9);
}

#[test]
fn out_of_range_indices_are_non_edges() {
    let config = Config::default();
    let trace = build_trace(&config, &[(0.0, 0.0, 0.0), (0.0, 1.0, 1.0)]);
    let rules = rules(RuleKind::FreeDistance);

    assert!(rules.edge_score(&trace, 0, 2, 1).is_none());
    assert!(rules.edge_score(&trace, 7, 8, 1).is_none());
}

#[test]
fn out_and_return_requires_closure() {
    let config = Config::default();
    let rules = rules(RuleKind::OutAndReturn);

    let closed = build_trace(
        &config,
        &[(0.0, 0.0, 0.0), (0.0, 1.0, 1.0), (0.001, 0.001, 2.0)],
    );
    assert!(rules.is_path_legal(&closed, &[0, 1, 2]));

    let open = build_trace(
        &config,
        &[(0.0, 0.0, 0.0), (0.0, 1.0, 1.0), (0.1, 0.1, 2.0)],
    );
    assert!(!rules.is_path_legal(&open, &[0, 1, 2]));
}

#[test]
fn structurally_broken_paths_are_illegal() {
    let config = Config::default();
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 1.0, 1.0),
            (0.866, 0.5, 2.0),
            (0.001, 0.001, 3.0),
        ],
    );
    let rules = rules(RuleKind::FaiTriangle);

    // Wrong slot count, non-increasing indices, dead index.
    assert!(!rules.is_path_legal(&trace, &[0, 1, 2]));
    assert!(!rules.is_path_legal(&trace, &[0, 2, 1, 3]));
    assert!(!rules.is_path_legal(&trace, &[0, 1, 2, 9]));
}

#[test]
fn equilateral_triangle_is_legal() {
    let config = Config::default();
    // Roughly equilateral: three ~111 km legs closing to ~0.16 km.
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 1.0, 1.0),
            (0.866, 0.5, 2.0),
            (0.001, 0.001, 3.0),
        ],
    );
    assert!(rules(RuleKind::FaiTriangle).is_path_legal(&trace, &[0, 1, 2, 3]));
}

#[test]
fn triangle_closure_violation_is_illegal() {
    let config = Config::default();
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 1.0, 1.0),
            (0.866, 0.5, 2.0),
            (0.1, 0.1, 3.0),
        ],
    );
    assert!(!rules(RuleKind::FaiTriangle).is_path_legal(&trace, &[0, 1, 2, 3]));
}

#[test]
fn skinny_small_triangle_fails_ratio_rule() {
    let config = Config::default();
    // Legs roughly 222/111/111 km: ratios 0.5/0.25/0.25, total well under
    // the large-triangle threshold.
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 2.0, 1.0),
            (0.05, 1.0, 2.0),
            (0.001, 0.0, 3.0),
        ],
    );
    assert!(!rules(RuleKind::FaiTriangle).is_path_legal(&trace, &[0, 1, 2, 3]));
}

#[test]
fn large_triangle_relaxation_admits_flat_shapes() {
    let config = Config::default();
    // Legs roughly 920/540/540 km: ratios 0.46/0.27/0.27. Fails the
    // standard 28% rule but the total is past the large-triangle
    // threshold and no leg drops below 25%.
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 8.273, 1.0),
            (2.5466, 4.1365, 2.0),
            (0.001, 0.001, 3.0),
        ],
    );
    assert!(rules(RuleKind::FaiTriangle).is_path_legal(&trace, &[0, 1, 2, 3]));
}

#[test]
fn large_triangle_allows_one_relaxed_leg() {
    let config = Config::default();
    // Legs roughly 900/660/440 km: ratios 0.45/0.33/0.22. One leg below
    // 25% is allowed on a large triangle as long as it stays above 15%.
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 8.0939, 1.0),
            (2.7473, 2.8481, 2.0),
            (0.001, 0.001, 3.0),
        ],
    );
    assert!(rules(RuleKind::FaiTriangle).is_path_legal(&trace, &[0, 1, 2, 3]));
}

#[test]
fn large_triangle_rejects_leg_below_floor() {
    let config = Config::default();
    // Legs roughly 960/760/280 km: ratios 0.48/0.38/0.14. The short leg
    // is under the 15% floor, so even a large triangle is out.
    let trace = build_trace(
        &config,
        &[
            (0.0, 0.0, 0.0),
            (0.0, 8.6335, 1.0),
            (1.5576, 1.9785, 2.0),
            (0.001, 0.001, 3.0),
        ],
    );
    assert!(!rules(RuleKind::FaiTriangle).is_path_legal(&trace, &[0, 1, 2, 3]));
}

#[test]
fn rule_kind_round_trips_through_names() {
    use std::str::FromStr;
    for (name, kind) in [
        ("free-distance", RuleKind::FreeDistance),
        ("out-and-return", RuleKind::OutAndReturn),
        ("fai-triangle", RuleKind::FaiTriangle),
    ] {
        assert_eq!(RuleKind::from_str(name).unwrap(), kind);
        assert_eq!(kind.to_string(), name);
    }
}
