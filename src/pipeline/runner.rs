//! Greedy construction followed by SA and tabu refinement.

use super::config::PipelineConfig;
use crate::error::{AdmissionError, Result};
use crate::greedy::GreedyConstructor;
use crate::model::{Assignment, AssignmentRecord, Dataset};
use crate::refine::AssignmentProblem;
use crate::sa::SaRunner;
use crate::score::{satisfaction_score, SatisfactionScore};
use crate::tabu::TabuRunner;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

/// Assignment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Greedy,
    SimulatedAnnealing,
    TabuSearch,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Greedy => "Greedy",
            Strategy::SimulatedAnnealing => "Simulated Annealing",
            Strategy::TabuSearch => "Tabu Search",
        })
    }
}

/// What one strategy produced.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub assignment: Assignment,
    /// Total preference rank of seated agents.
    pub cost: usize,
    /// `None` when the dataset has no resource-side preferences to score
    /// against.
    pub satisfaction: Option<SatisfactionScore>,
}

impl StrategyOutcome {
    pub fn record(&self, dataset: &Dataset) -> AssignmentRecord {
        self.assignment.to_record(dataset)
    }
}

/// Outcomes of every strategy on one dataset.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    /// Greedy, simulated annealing, tabu search, in that order.
    pub outcomes: Vec<StrategyOutcome>,
    /// Agents greedy could not seat; they stay unseated throughout.
    pub unassigned: Vec<usize>,
    /// Whether refinement was cancelled before its budget ran out.
    pub cancelled: bool,
}

impl ComparisonReport {
    pub fn outcome(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }

    /// The lowest-cost outcome; earlier strategies win ties.
    pub fn best(&self) -> Option<&StrategyOutcome> {
        self.outcomes
            .iter()
            .reduce(|best, o| if o.cost < best.cost { o } else { best })
    }
}

/// Runs greedy construction, then SA and tabu search from the greedy
/// assignment, drawing from one generator seeded by the configuration.
///
/// # Examples
///
/// ```
/// use u_admission::model::{Capacity, Dataset, DatasetRecord};
/// use u_admission::pipeline::{Pipeline, PipelineConfig, Strategy};
///
/// let record = DatasetRecord::new(["A1", "A2"], ["R1", "R2"])
///     .with_capacity("R1", Capacity::new(1))
///     .with_capacity("R2", Capacity::new(1))
///     .with_agent_preferences("A1", &["R1", "R2"])
///     .with_agent_preferences("A2", &["R2", "R1"]);
/// let dataset = Dataset::from_record(record).unwrap();
///
/// let report = Pipeline::new(PipelineConfig::default()).run(&dataset).unwrap();
/// assert_eq!(report.outcome(Strategy::Greedy).unwrap().cost, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stops both refiners once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every strategy on `dataset`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for a bad configuration
    /// - `InfeasiblePopulation` if greedy leaves agents unseated and
    ///   partial assignments are not allowed
    /// - `MissingPreferenceEntry` if an outcome seats an agent its
    ///   resource does not rank
    pub fn run(&self, dataset: &Dataset) -> Result<ComparisonReport> {
        self.config.validate()?;
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let greedy = GreedyConstructor::construct(dataset);
        let unassigned = greedy.unassigned.clone();
        let initial = if self.config.allow_partial {
            greedy.assignment
        } else {
            greedy.into_complete(dataset)?
        };

        let problem = AssignmentProblem::new(dataset, &initial)?;
        let greedy_cost = problem.rank_cost(&initial);
        info!(
            agents = dataset.agent_count(),
            resources = dataset.resource_count(),
            unassigned = unassigned.len(),
            cost = greedy_cost,
            "greedy construction done"
        );

        let sa = SaRunner::run_with_cancel(
            &problem,
            initial.clone(),
            &self.config.sa,
            &mut rng,
            self.cancel.clone(),
        )?;
        info!(
            cost = sa.best_cost,
            iterations = sa.iterations,
            accepted = sa.accepted_moves,
            "simulated annealing done"
        );

        let ts = TabuRunner::run_with_cancel(
            &problem,
            initial.clone(),
            &self.config.tabu,
            &mut rng,
            self.cancel.clone(),
        );
        info!(
            cost = ts.best_cost,
            iterations = ts.iterations,
            skipped = ts.skipped_moves,
            "tabu search done"
        );

        let cancelled = sa.cancelled || ts.cancelled;
        let outcomes = [
            (Strategy::Greedy, initial),
            (Strategy::SimulatedAnnealing, sa.best),
            (Strategy::TabuSearch, ts.best),
        ]
        .into_iter()
        .map(|(strategy, assignment)| {
            let satisfaction = match satisfaction_score(dataset, &assignment) {
                Ok(score) => Some(score),
                Err(AdmissionError::MissingResourcePreferences) => None,
                Err(e) => return Err(e),
            };
            Ok(StrategyOutcome {
                strategy,
                cost: problem.rank_cost(&assignment),
                assignment,
                satisfaction,
            })
        })
        .collect::<Result<Vec<_>>>()?;

        for outcome in &outcomes {
            if let Some(score) = outcome.satisfaction {
                info!(
                    strategy = %outcome.strategy,
                    normalized = score.normalized,
                    "satisfaction score"
                );
            }
        }

        Ok(ComparisonReport {
            outcomes,
            unassigned,
            cancelled,
        })
    }
}
