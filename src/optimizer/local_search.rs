use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::optimizer::constants::{IMPROVEMENT_EPSILON, MAX_LOCAL_SEARCH_PASSES};
use crate::optimizer::search::SearchContext;

/// Result of refining one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome {
    pub picks: Vec<usize>,
    pub distance: f64,
    /// Accepted moves.
    pub moves: usize,
}

/// Improve a selection by first-improvement moves.
///
/// Each pass tries, in order, removing one item, swapping one item for an
/// unselected candidate, and adding one candidate (while under
/// `max_additional`). The first strictly improving move is applied and the
/// next pass starts again from removals. Stops after a pass with no move or
/// after [`MAX_LOCAL_SEARCH_PASSES`] passes. The returned distance is never
/// worse than the input's.
///
/// With `rng`, scan orders are shuffled on every pass.
pub fn local_search(
    ctx: &SearchContext<'_>,
    picks: Vec<usize>,
    mut rng: Option<&mut StdRng>,
) -> LocalSearchOutcome {
    let mut selected = picks;
    let mut current = ctx.score(&selected);
    let mut moves = 0;

    for pass in 0..MAX_LOCAL_SEARCH_PASSES {
        let improved = try_removal(ctx, &mut selected, &mut current, &mut rng)
            || try_swap(ctx, &mut selected, &mut current, &mut rng)
            || try_addition(ctx, &mut selected, &mut current, &mut rng);

        if !improved {
            debug!(pass, distance = current, "local search converged");
            break;
        }
        moves += 1;
    }

    LocalSearchOutcome {
        picks: selected,
        distance: current,
        moves,
    }
}

/// `0..len`, shuffled when an RNG is present.
fn scan_order(len: usize, rng: &mut Option<&mut StdRng>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if let Some(r) = rng.as_deref_mut() {
        order.shuffle(r);
    }
    order
}

/// Candidate indices not in `selected`, in scan order.
fn unselected(ctx: &SearchContext<'_>, selected: &[usize], rng: &mut Option<&mut StdRng>) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..ctx.candidates().len())
        .filter(|idx| !selected.contains(idx))
        .collect();
    if let Some(r) = rng.as_deref_mut() {
        pool.shuffle(r);
    }
    pool
}

fn accept(selected: &mut Vec<usize>, current: &mut f64, trial: Vec<usize>, distance: f64) -> bool {
    if distance < *current - IMPROVEMENT_EPSILON {
        *selected = trial;
        *current = distance;
        true
    } else {
        false
    }
}

fn try_removal(
    ctx: &SearchContext<'_>,
    selected: &mut Vec<usize>,
    current: &mut f64,
    rng: &mut Option<&mut StdRng>,
) -> bool {
    for pos in scan_order(selected.len(), rng) {
        let removed = selected[pos];
        let trial: Vec<usize> = selected
            .iter()
            .enumerate()
            .filter(|&(p, _)| p != pos)
            .map(|(_, &idx)| idx)
            .collect();
        let distance = ctx.score(&trial);

        if accept(selected, current, trial, distance) {
            debug!(menu = %ctx.candidate(removed).name, distance, "local search: removed");
            return true;
        }
    }
    false
}

fn try_swap(
    ctx: &SearchContext<'_>,
    selected: &mut Vec<usize>,
    current: &mut f64,
    rng: &mut Option<&mut StdRng>,
) -> bool {
    let pool = unselected(ctx, selected, rng);
    for pos in scan_order(selected.len(), rng) {
        for &incoming in &pool {
            let outgoing = selected[pos];
            let mut trial = selected.clone();
            trial[pos] = incoming;
            let distance = ctx.score(&trial);

            if accept(selected, current, trial, distance) {
                debug!(
                    from = %ctx.candidate(outgoing).name,
                    to = %ctx.candidate(incoming).name,
                    distance,
                    "local search: swapped"
                );
                return true;
            }
        }
    }
    false
}

fn try_addition(
    ctx: &SearchContext<'_>,
    selected: &mut Vec<usize>,
    current: &mut f64,
    rng: &mut Option<&mut StdRng>,
) -> bool {
    if selected.len() >= ctx.max_additional() {
        return false;
    }

    for incoming in unselected(ctx, selected, rng) {
        let mut trial = selected.clone();
        trial.push(incoming);
        let distance = ctx.score(&trial);

        if accept(selected, current, trial, distance) {
            debug!(menu = %ctx.candidate(incoming).name, distance, "local search: added");
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MenuItem, Nutrition};
    use crate::optimizer::distance::DistanceConfig;
    use rand::SeedableRng;

    fn target(values: &[(&str, f64)]) -> Nutrition {
        values.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn test_removal_shrinks_overfull_selection() {
        // Pudding is scanned first, so dropping it is the first improving move
        let menus = vec![
            MenuItem::with_values("Pudding", [("energy", 250.0)]),
            MenuItem::with_values("Curry", [("energy", 700.0)]),
        ];
        let t = target(&[("energy", 700.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 5);

        let outcome = local_search(&ctx, vec![0, 1], None);
        assert_eq!(outcome.picks, vec![1]);
        assert_eq!(outcome.distance, 0.0);
        assert_eq!(outcome.moves, 1);
    }

    #[test]
    fn test_first_improving_removal_then_swap() {
        // Dropping Curry is the first improvement found; a swap then restores it
        let menus = vec![
            MenuItem::with_values("Curry", [("energy", 700.0)]),
            MenuItem::with_values("Pudding", [("energy", 250.0)]),
        ];
        let t = target(&[("energy", 700.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 5);

        let outcome = local_search(&ctx, vec![0, 1], None);
        assert_eq!(outcome.picks, vec![0]);
        assert_eq!(outcome.distance, 0.0);
        assert_eq!(outcome.moves, 2);
    }

    #[test]
    fn test_shuffled_scan_order_varies_the_path() {
        let menus = vec![
            MenuItem::with_values("Curry", [("energy", 700.0)]),
            MenuItem::with_values("Pudding", [("energy", 250.0)]),
        ];
        let t = target(&[("energy", 700.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 5);

        // 1 move when Pudding is scanned first, 2 when Curry is
        let mut move_counts = Vec::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = local_search(&ctx, vec![0, 1], Some(&mut rng));
            assert_eq!(outcome.picks, vec![0]);
            assert_eq!(outcome.distance, 0.0);
            move_counts.push(outcome.moves);
        }

        assert!(move_counts.contains(&1));
        assert!(move_counts.contains(&2));
    }

    #[test]
    fn test_swap_replaces_worse_item() {
        let menus = vec![
            MenuItem::with_values("Fried Rice", [("energy", 900.0)]),
            MenuItem::with_values("Set Meal", [("energy", 650.0)]),
        ];
        let t = target(&[("energy", 650.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 1);

        let outcome = local_search(&ctx, vec![0], None);
        assert_eq!(outcome.picks, vec![1]);
        assert_eq!(outcome.distance, 0.0);
    }

    #[test]
    fn test_addition_fills_remaining_room() {
        let menus = vec![
            MenuItem::with_values("Fish", [("energy", 300.0), ("protein", 20.0)]),
            MenuItem::with_values("Tofu", [("energy", 100.0), ("protein", 10.0)]),
        ];
        let t = target(&[("energy", 400.0), ("protein", 30.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 2);

        let outcome = local_search(&ctx, vec![0], None);
        assert_eq!(outcome.picks, vec![0, 1]);
        assert_eq!(outcome.distance, 0.0);
    }

    #[test]
    fn test_addition_blocked_at_max() {
        let menus = vec![
            MenuItem::with_values("Fish", [("energy", 300.0)]),
            MenuItem::with_values("Tofu", [("energy", 100.0)]),
        ];
        let t = target(&[("energy", 400.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 1);

        let outcome = local_search(&ctx, vec![0], None);
        assert_eq!(outcome.picks.len(), 1);
    }

    #[test]
    fn test_never_worse_than_input() {
        let menus: Vec<MenuItem> = [120.0, 340.0, 510.0, 80.0, 260.0]
            .iter()
            .enumerate()
            .map(|(i, &e)| MenuItem::with_values(format!("M{}", i), [("energy", e), ("fat", e / 20.0)]))
            .collect();
        let t = target(&[("energy", 720.0), ("fat", 30.0)]);
        let config = DistanceConfig::default();
        let ctx = SearchContext::new(&t, &config, Nutrition::new(), menus.iter().collect(), 3);

        for start in [vec![], vec![2], vec![0, 3], vec![1, 2, 4]] {
            let before = ctx.score(&start);
            let mut rng = StdRng::seed_from_u64(7);
            let outcome = local_search(&ctx, start, Some(&mut rng));
            assert!(outcome.distance <= before);
            assert!(outcome.picks.len() <= 3);
        }
    }
}
