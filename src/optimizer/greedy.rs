use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::optimizer::constants::{IMPROVEMENT_EPSILON, TIE_EPSILON};
use crate::optimizer::search::SearchContext;

/// Build a selection one item at a time.
///
/// Each step scores every remaining candidate added to the current totals
/// and commits the lowest-scoring one, but only if it strictly beats the
/// current distance. Stops at `max_additional`, when candidates run out, or
/// when no candidate improves.
///
/// Exact ties go to the first candidate in catalog order, or to a random
/// finalist when `rng` is given.
///
/// Returns the picked candidate indices and their distance.
pub fn greedy_construct(ctx: &SearchContext<'_>, mut rng: Option<&mut StdRng>) -> (Vec<usize>, f64) {
    let mut picks = Vec::new();
    let mut remaining: Vec<usize> = (0..ctx.candidates().len()).collect();
    let mut current_total = ctx.base().clone();
    let mut current_distance = ctx.score_totals(&current_total);

    while picks.len() < ctx.max_additional() && !remaining.is_empty() {
        let scored: Vec<(usize, f64)> = remaining
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, ctx.score_with(&current_total, ctx.candidate(idx))))
            .collect();

        let best = scored
            .iter()
            .map(|&(_, d)| d)
            .fold(f64::INFINITY, f64::min);

        if best >= current_distance - IMPROVEMENT_EPSILON {
            debug!(
                step = picks.len(),
                best, current_distance, "no improving candidate, stopping greedy"
            );
            break;
        }

        // Stage 2: keep every candidate tied with the best score
        let finalists: Vec<(usize, f64)> = scored
            .into_iter()
            .filter(|&(_, d)| d <= best + TIE_EPSILON)
            .collect();

        let chosen = match rng.as_deref_mut() {
            Some(r) => finalists.choose(r).copied(),
            None => finalists.first().copied(),
        };
        let Some((pos, score)) = chosen else {
            break;
        };

        let idx = remaining.remove(pos);
        let item = ctx.candidate(idx);
        current_total.accumulate(&item.nutrition);
        current_distance = score;
        picks.push(idx);

        debug!(
            step = picks.len(),
            menu = %item.name,
            distance = current_distance,
            tied = finalists.len(),
            "greedy pick"
        );
    }

    (picks, current_distance)
}
