use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{MenuItem, Nutrition, OptimizationResult, RunSummary, SelectionState, SelectionWarning};
use crate::optimizer::constants::{DEFAULT_MAX_ADDITIONAL, DEFAULT_MULTI_START, DEFAULT_SEED};
use crate::optimizer::distance::{distance, distance_with, DistanceConfig};
use crate::optimizer::greedy::greedy_construct;
use crate::optimizer::local_search::local_search;

/// Knobs for a single optimization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    /// Cap on items picked beyond the fixed ones. 0 yields a fixed-only result.
    pub max_additional: usize,

    /// Number of greedy + local search runs. Run 0 is deterministic; later
    /// runs break ties and order their scans with a seeded RNG. 0 is treated
    /// as 1.
    pub multi_start: usize,

    /// Seed for the randomized runs. Same inputs and seed give the same result.
    pub seed: u64,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_additional: DEFAULT_MAX_ADDITIONAL,
            multi_start: DEFAULT_MULTI_START,
            seed: DEFAULT_SEED,
        }
    }
}

impl OptimizeOptions {
    pub fn with_max_additional(mut self, n: usize) -> Self {
        self.max_additional = n;
        self
    }

    pub fn with_multi_start(mut self, n: usize) -> Self {
        self.multi_start = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// The problem instance shared by greedy construction and local search.
///
/// Selections are index lists into `candidates`. Totals are always
/// `base + selected`, where `base` is the fixed items' nutrition.
pub struct SearchContext<'a> {
    target: &'a Nutrition,
    config: &'a DistanceConfig,
    base: Nutrition,
    candidates: Vec<&'a MenuItem>,
    max_additional: usize,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        target: &'a Nutrition,
        config: &'a DistanceConfig,
        base: Nutrition,
        candidates: Vec<&'a MenuItem>,
        max_additional: usize,
    ) -> Self {
        Self {
            target,
            config,
            base,
            candidates,
            max_additional,
        }
    }

    pub fn candidates(&self) -> &[&'a MenuItem] {
        &self.candidates
    }

    pub fn candidate(&self, idx: usize) -> &'a MenuItem {
        self.candidates[idx]
    }

    pub fn base(&self) -> &Nutrition {
        &self.base
    }

    pub fn max_additional(&self) -> usize {
        self.max_additional
    }

    /// Distance of `base + picks`.
    pub fn score(&self, picks: &[usize]) -> f64 {
        distance_with(self.target, self.config, |key| {
            self.base.get(key)
                + picks
                    .iter()
                    .map(|&i| self.candidates[i].nutrition.get(key))
                    .sum::<f64>()
        })
    }

    /// Distance of `totals + item`.
    pub fn score_with(&self, totals: &Nutrition, item: &MenuItem) -> f64 {
        distance_with(self.target, self.config, |key| {
            totals.get(key) + item.nutrition.get(key)
        })
    }

    /// Distance of `totals` alone.
    pub fn score_totals(&self, totals: &Nutrition) -> f64 {
        distance(self.target, totals, self.config)
    }
}

/// Pick the subset of `catalog` closest to `target`.
///
/// Items named in `selection.fixed` are always included; items in
/// `selection.excluded` never are. Fixed names missing from the catalog are
/// reported in [`OptimizationResult::warnings`]. The target should be
/// non-empty: with no target keys every subset scores 0 and nothing is added.
pub fn optimize(
    catalog: &[MenuItem],
    target: &Nutrition,
    selection: &SelectionState,
    options: &OptimizeOptions,
    config: &DistanceConfig,
) -> OptimizationResult {
    info!(
        menus = catalog.len(),
        targets = target.len(),
        fixed = selection.fixed.len(),
        excluded = selection.excluded.len(),
        max_additional = options.max_additional,
        multi_start = options.multi_start,
        "optimization started"
    );

    let on_menu = |name: &str| catalog.iter().any(|m| m.name == name);
    let mut warnings = Vec::new();

    for name in &selection.fixed {
        if !on_menu(name) {
            warn!(menu = %name, "fixed menu not found in catalog, dropping it");
            warnings.push(SelectionWarning::FixedNotFound(name.clone()));
        }
    }
    for name in selection.overlap() {
        if on_menu(name) {
            warn!(menu = %name, "menu is both fixed and excluded, keeping it fixed");
            warnings.push(SelectionWarning::FixedAndExcluded(name.to_string()));
        }
    }

    let fixed_items: Vec<&MenuItem> = catalog
        .iter()
        .filter(|m| selection.fixed.contains(&m.name))
        .collect();
    let candidates: Vec<&MenuItem> = catalog
        .iter()
        .filter(|m| !selection.fixed.contains(&m.name) && !selection.excluded.contains(&m.name))
        .collect();
    let fixed_nutrition = Nutrition::total_of(fixed_items.iter().copied());

    debug!(
        fixed = fixed_items.len(),
        candidates = candidates.len(),
        "candidate pool prepared"
    );

    let ctx = SearchContext::new(
        target,
        config,
        fixed_nutrition.clone(),
        candidates,
        options.max_additional,
    );

    let runs = options.multi_start.max(1);
    let mut summaries = Vec::with_capacity(runs);
    let mut best: Option<(Vec<usize>, f64)> = None;

    for run in 0..runs {
        let mut rng = (run > 0).then(|| StdRng::seed_from_u64(options.seed.wrapping_add(run as u64)));

        let (greedy_picks, greedy_distance) = greedy_construct(&ctx, rng.as_mut());
        let refined = local_search(&ctx, greedy_picks, rng.as_mut());

        debug!(
            run,
            greedy_distance,
            final_distance = refined.distance,
            moves = refined.moves,
            "run finished"
        );
        summaries.push(RunSummary {
            run,
            greedy_distance,
            final_distance: refined.distance,
            moves: refined.moves,
        });

        let improves = best
            .as_ref()
            .map_or(true, |(_, best_distance)| refined.distance < *best_distance);
        if improves {
            best = Some((refined.picks, refined.distance));
        }
    }

    let picks = best.map(|(picks, _)| picks).unwrap_or_default();
    let additional_items: Vec<MenuItem> = picks
        .iter()
        .map(|&i| ctx.candidate(i).clone())
        .collect();

    let total_nutrition = fixed_nutrition.plus(&Nutrition::total_of(&additional_items));
    let final_distance = distance(target, &total_nutrition, config);
    let minimum_limits = fixed_nutrition.project_onto(target);

    info!(
        fixed = fixed_items.len(),
        additional = additional_items.len(),
        distance = final_distance,
        "optimization finished"
    );

    OptimizationResult {
        fixed_items: fixed_items.into_iter().cloned().collect(),
        additional_items,
        total_nutrition,
        distance: final_distance,
        minimum_limits,
        target: target.clone(),
        warnings,
        runs: summaries,
    }
}
