//! Dominance graph structure.

use super::ranking::Ranking;
use crate::model::Dataset;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Seat track of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Track {
    /// Seats open to every agent.
    Regular,
    /// Seats restricted to the eligible subset.
    Reserved,
}

impl Track {
    pub fn suffix(&self) -> &'static str {
        match self {
            Track::Regular => "reg",
            Track::Reserved => "res",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// One seat track of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Program {
    pub resource: usize,
    pub track: Track,
}

impl Program {
    pub fn regular(resource: usize) -> Self {
        Self {
            resource,
            track: Track::Regular,
        }
    }

    pub fn reserved(resource: usize) -> Self {
        Self {
            resource,
            track: Track::Reserved,
        }
    }

    /// `"<resource>_reg"` or `"<resource>_res"`.
    pub fn label(&self, dataset: &Dataset) -> String {
        format!("{}_{}", dataset.resource_id(self.resource), self.track)
    }
}

/// An eligible (program, agent) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub program: Program,
    pub agent: usize,
}

/// Which ordering an edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Same agent, adjacent programs in the agent's preference order.
    Preference,
    /// Same program, score order between two agents.
    Score,
}

/// Directed edge between node ids: `to` is no worse than `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
}

/// Eligibility-filtered dominance graph over (program, agent) nodes.
#[derive(Debug, Clone, Default)]
pub struct DominanceGraph {
    programs: Vec<Program>,
    rankings: Vec<Ranking>,
    nodes: Vec<Node>,
    node_index: HashMap<Node, usize>,
    edges: Vec<Edge>,
    edge_set: HashSet<(usize, usize)>,
    successors: Vec<Vec<usize>>,
}

impl DominanceGraph {
    pub(crate) fn new(programs: Vec<Program>, rankings: Vec<Ranking>) -> Self {
        Self {
            programs,
            rankings,
            ..Self::default()
        }
    }

    pub(crate) fn add_node(&mut self, node: Node) -> usize {
        if let Some(&id) = self.node_index.get(&node) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        self.node_index.insert(node, id);
        self.successors.push(Vec::new());
        id
    }

    pub(crate) fn add_edge(&mut self, from: usize, to: usize, kind: EdgeKind) {
        if !self.edge_set.insert((from, to)) {
            return;
        }
        self.successors[from].push(to);
        self.edges.push(Edge { from, to, kind });
    }

    /// Programs in the graph, resource order, regular before reserved.
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// The ranking a program applies, aligned with [`programs`](Self::programs).
    pub fn ranking(&self, program: Program) -> Option<&Ranking> {
        self.programs
            .iter()
            .position(|&p| p == program)
            .map(|i| &self.rankings[i])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Node {
        self.nodes[id]
    }

    pub fn node_id(&self, program: Program, agent: usize) -> Option<usize> {
        self.node_index.get(&Node { program, agent }).copied()
    }

    pub fn contains(&self, program: Program, agent: usize) -> bool {
        self.node_id(program, agent).is_some()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes that `id` points to (each no worse than `id`).
    pub fn successors(&self, id: usize) -> &[usize] {
        &self.successors[id]
    }

    pub fn has_edge(&self, from: Node, to: Node) -> bool {
        match (self.node_index.get(&from), self.node_index.get(&to)) {
            (Some(&f), Some(&t)) => self.edge_set.contains(&(f, t)),
            _ => false,
        }
    }

    /// `"(<program>, <agent>)"` label for a node.
    pub fn node_label(&self, dataset: &Dataset, id: usize) -> String {
        let node = self.nodes[id];
        format!(
            "({}, {})",
            node.program.label(dataset),
            dataset.agent_id(node.agent)
        )
    }

    /// Edges as label pairs, for handing to a renderer.
    pub fn labelled_edges(&self, dataset: &Dataset) -> Vec<(String, String)> {
        self.edges
            .iter()
            .map(|e| (self.node_label(dataset, e.from), self.node_label(dataset, e.to)))
            .collect()
    }
}
