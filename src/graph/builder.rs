//! Dominance graph construction.
//!
//! # Algorithm
//!
//! 1. Select programs: the regular track of every resource with regular
//!    seats and/or the reserved track of every resource with reserved seats
//! 2. Rank each program's agents by score (reserved programs keep only the
//!    eligible subset)
//! 3. Add a node for each ranked (program, agent) pair
//! 4. Preference edges: for each agent, walk its preference list expanded to
//!    programs and link each adjacent pair of existing nodes from the less
//!    preferred to the more preferred program
//! 5. Score edges: within each program, link every agent to every other
//!    agent scoring at least as high

use super::ranking::{derive_resource_rankings, Ranking};
use super::types::{DominanceGraph, EdgeKind, Node, Program, Track};
use crate::error::Result;
use crate::model::Dataset;
use tracing::debug;

/// Builds [`DominanceGraph`]s for a scored dataset.
///
/// # Examples
///
/// ```
/// use u_admission::graph::GraphBuilder;
/// use u_admission::model::{Capacity, Dataset, DatasetRecord};
///
/// let record = DatasetRecord::new(["a1", "a2"], ["C1"])
///     .with_capacity("C1", Capacity::new(1).with_eligibility_score(50.0))
///     .with_agent_preferences("a1", &["C1"])
///     .with_agent_preferences("a2", &["C1"])
///     .with_scores("a1", &[("C1", 80.0)])
///     .with_scores("a2", &[("C1", 40.0)]);
/// let dataset = Dataset::from_record(record).unwrap();
///
/// let graph = GraphBuilder::regular(&dataset).unwrap();
/// assert_eq!(graph.node_count(), 1);
/// assert_eq!(graph.edge_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    dataset: &'a Dataset,
    rankings: Vec<Ranking>,
    regular: bool,
    reserved: bool,
}

impl<'a> GraphBuilder<'a> {
    /// Prepares a builder covering both tracks.
    ///
    /// # Errors
    ///
    /// `MissingScores` if the dataset has no score table.
    pub fn new(dataset: &'a Dataset) -> Result<Self> {
        Ok(Self {
            dataset,
            rankings: derive_resource_rankings(dataset)?,
            regular: true,
            reserved: true,
        })
    }

    pub fn with_regular(mut self, enabled: bool) -> Self {
        self.regular = enabled;
        self
    }

    pub fn with_reserved(mut self, enabled: bool) -> Self {
        self.reserved = enabled;
        self
    }

    /// Graph over regular tracks only.
    pub fn regular(dataset: &Dataset) -> Result<DominanceGraph> {
        Ok(GraphBuilder::new(dataset)?.with_reserved(false).build())
    }

    /// Graph over reserved tracks and the eligible subset only.
    pub fn reserved(dataset: &Dataset) -> Result<DominanceGraph> {
        Ok(GraphBuilder::new(dataset)?.with_regular(false).build())
    }

    /// One graph spanning regular and reserved tracks.
    pub fn unified(dataset: &Dataset) -> Result<DominanceGraph> {
        Ok(GraphBuilder::new(dataset)?.build())
    }

    /// Per-resource rankings the programs are derived from.
    pub fn rankings(&self) -> &[Ranking] {
        &self.rankings
    }

    pub fn build(&self) -> DominanceGraph {
        let ds = self.dataset;
        let programs = self.programs();
        let rankings: Vec<Ranking> = programs.iter().map(|&p| self.program_ranking(p)).collect();
        let mut graph = DominanceGraph::new(programs, rankings.clone());

        for agent in 0..ds.agent_count() {
            for program in self.agent_programs(agent, &graph) {
                if self.admits(program, agent) {
                    graph.add_node(Node { program, agent });
                }
            }
        }

        for agent in 0..ds.agent_count() {
            let order = self.agent_programs(agent, &graph);
            for pair in order.windows(2) {
                let (higher, lower) = (pair[0], pair[1]);
                if let (Some(h), Some(l)) =
                    (graph.node_id(higher, agent), graph.node_id(lower, agent))
                {
                    graph.add_edge(l, h, EdgeKind::Preference);
                }
            }
        }

        let programs = graph.programs().to_vec();
        for (program, ranking) in programs.into_iter().zip(&rankings) {
            let agents = ranking.agents();
            let scores = ranking.scores();
            for i in 0..agents.len() {
                let Some(from) = graph.node_id(program, agents[i]) else {
                    continue;
                };
                for j in 0..agents.len() {
                    if i == j || scores[j] < scores[i] {
                        continue;
                    }
                    if let Some(to) = graph.node_id(program, agents[j]) {
                        graph.add_edge(from, to, EdgeKind::Score);
                    }
                }
            }
        }

        debug!(
            programs = graph.programs().len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dominance graph"
        );
        graph
    }

    fn programs(&self) -> Vec<Program> {
        let mut programs = Vec::new();
        for r in 0..self.dataset.resource_count() {
            let capacity = self.dataset.capacity(r);
            if self.regular && capacity.regular_quota > 0 {
                programs.push(Program::regular(r));
            }
            if self.reserved && capacity.reserved_quota > 0 {
                programs.push(Program::reserved(r));
            }
        }
        programs
    }

    fn program_ranking(&self, program: Program) -> Ranking {
        let ranking = &self.rankings[program.resource];
        match program.track {
            Track::Regular => ranking.clone(),
            Track::Reserved => ranking.filtered(|a| self.dataset.is_eligible(a)),
        }
    }

    /// The agent's preference list expanded to the programs in scope:
    /// regular track, then reserved track when the agent is eligible.
    fn agent_programs(&self, agent: usize, graph: &DominanceGraph) -> Vec<Program> {
        let in_scope = |p: &Program| graph.programs().contains(p);
        let mut order = Vec::new();
        for &r in self.dataset.preferences(agent) {
            let regular = Program::regular(r);
            if in_scope(&regular) {
                order.push(regular);
            }
            let reserved = Program::reserved(r);
            if self.dataset.is_eligible(agent) && in_scope(&reserved) {
                order.push(reserved);
            }
        }
        order
    }

    fn admits(&self, program: Program, agent: usize) -> bool {
        if program.track == Track::Reserved && !self.dataset.is_eligible(agent) {
            return false;
        }
        let threshold = self.dataset.capacity(program.resource).eligibility_score;
        self.dataset
            .score(agent, program.resource)
            .is_some_and(|s| s >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{small_dataset, small_record};
    use crate::model::Capacity;

    fn node(resource: usize, track: Track, agent: usize) -> Node {
        Node {
            program: Program { resource, track },
            agent,
        }
    }

    #[test]
    fn test_regular_graph_nodes_respect_thresholds() {
        let ds = small_dataset();
        let graph = GraphBuilder::regular(&ds).unwrap();

        assert_eq!(graph.programs(), &[Program::regular(0), Program::regular(1)]);
        // C1: a1, a2, a3 (a4 below 60). C2: a1, a3, a4 (a2 below 70).
        assert_eq!(graph.node_count(), 6);
        assert!(!graph.contains(Program::regular(0), 3));
        assert!(!graph.contains(Program::regular(1), 1));

        for edge in graph.edges() {
            for id in [edge.from, edge.to] {
                let n = graph.node(id);
                let threshold = ds.capacity(n.program.resource).eligibility_score;
                assert!(ds.score(n.agent, n.program.resource).unwrap() >= threshold);
            }
        }
    }

    #[test]
    fn test_preference_edges_point_to_preferred_program() {
        let ds = small_dataset();
        let graph = GraphBuilder::regular(&ds).unwrap();

        // a1 prefers C1 over C2 and is eligible for both.
        assert!(graph.has_edge(node(1, Track::Regular, 0), node(0, Track::Regular, 0)));
        assert!(!graph.has_edge(node(0, Track::Regular, 0), node(1, Track::Regular, 0)));
        // a3 prefers C2 over C1.
        assert!(graph.has_edge(node(0, Track::Regular, 2), node(1, Track::Regular, 2)));
        // a2 has no C2 node, so no preference edge.
        let a2_c1 = graph.node_id(Program::regular(0), 1).unwrap();
        assert!(graph
            .successors(a2_c1)
            .iter()
            .all(|&t| graph.node(t).program == Program::regular(0)));
    }

    #[test]
    fn test_score_edges_follow_ranking_and_ties() {
        let ds = small_dataset();
        let graph = GraphBuilder::regular(&ds).unwrap();

        // C1: a1 90 > a2 80 = a3 80.
        assert!(graph.has_edge(node(0, Track::Regular, 1), node(0, Track::Regular, 0)));
        assert!(!graph.has_edge(node(0, Track::Regular, 0), node(0, Track::Regular, 1)));
        assert!(graph.has_edge(node(0, Track::Regular, 1), node(0, Track::Regular, 2)));
        assert!(graph.has_edge(node(0, Track::Regular, 2), node(0, Track::Regular, 1)));

        let score_edges = graph
            .edges()
            .iter()
            .filter(|e| e.kind == EdgeKind::Score)
            .count();
        // C1: a2 and a3 each point at the other two. C2 (a3 85, a1 75, a4 75):
        // a1 and a4 each point at the other two.
        assert_eq!(score_edges, 4 + 4);
    }

    #[test]
    fn test_reserved_graph_only_holds_eligible_agents() {
        let ds = small_dataset();
        let graph = GraphBuilder::reserved(&ds).unwrap();

        assert_eq!(graph.programs(), &[Program::reserved(1)]);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains(Program::reserved(1), 3));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.ranking(Program::reserved(1)).unwrap().agents(), &[3]);
    }

    #[test]
    fn test_unified_graph_links_tracks() {
        let ds = small_dataset();
        let graph = GraphBuilder::unified(&ds).unwrap();

        assert_eq!(
            graph.programs(),
            &[Program::regular(0), Program::regular(1), Program::reserved(1)]
        );
        assert_eq!(graph.node_count(), 7);
        // a4 walks C2_reg, C2_res, C1_reg; C1_reg has no a4 node.
        assert!(graph.has_edge(node(1, Track::Reserved, 3), node(1, Track::Regular, 3)));
        let a4_reserved = graph.node_id(Program::reserved(1), 3).unwrap();
        assert_eq!(graph.node_label(&ds, a4_reserved), "(C2_res, a4)");
    }

    #[test]
    fn test_zero_quota_removes_program_nodes() {
        let record =
            small_record().with_capacity("C2", Capacity::new(0).with_eligibility_score(70.0));
        let ds = Dataset::from_record(record).unwrap();
        let graph = GraphBuilder::unified(&ds).unwrap();

        assert_eq!(graph.programs(), &[Program::regular(0)]);
        assert!(graph.nodes().iter().all(|n| n.program.resource == 0));
        assert!(graph.edges().iter().all(|e| e.kind == EdgeKind::Score));
    }

    #[test]
    fn test_unreachable_threshold_yields_no_nodes() {
        let record =
            small_record().with_capacity("C1", Capacity::new(2).with_eligibility_score(1000.0));
        let ds = Dataset::from_record(record).unwrap();
        let graph = GraphBuilder::regular(&ds).unwrap();

        assert!(graph.programs().contains(&Program::regular(0)));
        assert!(graph.ranking(Program::regular(0)).unwrap().is_empty());
        assert!(graph.nodes().iter().all(|n| n.program.resource == 1));
    }

    #[test]
    fn test_labelled_edges() {
        let ds = small_dataset();
        let graph = GraphBuilder::reserved(&ds).unwrap();
        assert!(graph.labelled_edges(&ds).is_empty());

        let graph = GraphBuilder::regular(&ds).unwrap();
        let labels = graph.labelled_edges(&ds);
        assert!(labels.contains(&("(C2_reg, a1)".to_string(), "(C1_reg, a1)".to_string())));
    }
}
