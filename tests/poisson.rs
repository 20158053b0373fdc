use brasileirao_terminal::poisson::{
    MAX_CORNERS, MAX_GOALS, corner_total_distribution, predict_score, top_scores,
};

#[test]
fn symmetric_form_predicts_a_symmetric_scoreline() {
    let p = predict_score(1.5, 1.0, 1.0, 1.5);
    assert_eq!(p.expected_home, 1.25);
    assert_eq!(p.expected_away, 1.25);
    assert_eq!(p.best, (1, 1));
}

#[test]
fn grid_ties_resolve_to_the_earliest_cell() {
    // At a rate of exactly 1.0 the probabilities of 0 and 1 goals are equal,
    // so four cells share the maximum. The first in enumeration order wins.
    let p = predict_score(1.0, 1.0, 1.0, 1.0);
    assert_eq!(p.best, (0, 0));
}

#[test]
fn grid_enumerates_all_scorelines_in_order() {
    let p = predict_score(1.2, 0.8, 0.9, 1.1);
    assert_eq!(p.grid.len(), ((MAX_GOALS + 1) * (MAX_GOALS + 1)) as usize);
    assert_eq!(p.grid[0].0, (0, 0));
    assert_eq!(p.grid[1].0, (0, 1));
    assert_eq!(p.grid[6].0, (1, 0));
    assert_eq!(p.grid.last().map(|c| c.0), Some((5, 5)));

    let mass: f64 = p.grid.iter().map(|(_, prob)| prob).sum();
    assert!(mass > 0.9 && mass < 1.0, "truncated mass out of range: {mass}");
}

#[test]
fn top_scores_rank_by_probability() {
    let p = predict_score(2.1, 1.4, 0.9, 1.2);
    let ranked = top_scores(&p, 10);
    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].0, p.best);
    assert_eq!(ranked[0].1, p.best_prob);
    for pair in ranked.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn top_scores_never_exceed_the_grid() {
    let p = predict_score(1.0, 1.0, 1.0, 1.0);
    assert_eq!(top_scores(&p, 100).len(), p.grid.len());
}

#[test]
fn corner_distribution_spans_zero_to_twenty() {
    let d = corner_total_distribution(6.0, 4.0, 5.0, 5.0);
    assert_eq!(d.expected_total, 10.0);
    assert_eq!(d.pmf.len(), (MAX_CORNERS + 1) as usize);
    let mass: f64 = d.pmf.iter().sum();
    assert!(mass > 0.9 && mass < 1.0);
    assert!(d.mode == 9 || d.mode == 10);
}

#[test]
fn zero_history_floors_the_rates() {
    let p = predict_score(0.0, 0.0, 0.0, 0.0);
    assert_eq!(p.expected_home, 0.1);
    assert_eq!(p.best, (0, 0));
    assert!(p.best_prob > 0.8);

    let d = corner_total_distribution(0.0, 0.0, 0.0, 0.0);
    assert_eq!(d.expected_total, 0.1);
    assert_eq!(d.mode, 0);
}
