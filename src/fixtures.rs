//! Hand-built datasets shared by unit tests.

use crate::model::{Capacity, Dataset, DatasetRecord};

/// Two resources, four agents, scores, and one agent eligible for the
/// single reserved seat at `C2`.
pub(crate) fn small_record() -> DatasetRecord {
    DatasetRecord::new(["a1", "a2", "a3", "a4"], ["C1", "C2"])
        .with_capacity("C1", Capacity::new(2).with_eligibility_score(60.0))
        .with_capacity(
            "C2",
            Capacity::new(1)
                .with_reserved_quota(1)
                .with_eligibility_score(70.0),
        )
        .with_agent_preferences("a1", &["C1", "C2"])
        .with_agent_preferences("a2", &["C1", "C2"])
        .with_agent_preferences("a3", &["C2", "C1"])
        .with_agent_preferences("a4", &["C2", "C1"])
        .with_scores("a1", &[("C1", 90.0), ("C2", 75.0)])
        .with_scores("a2", &[("C1", 80.0), ("C2", 65.0)])
        .with_scores("a3", &[("C1", 80.0), ("C2", 85.0)])
        .with_scores("a4", &[("C1", 55.0), ("C2", 75.0)])
        .with_eligible(&["a4"])
}

pub(crate) fn small_dataset() -> Dataset {
    Dataset::from_record(small_record()).expect("fixture is valid")
}

/// Both agents favour `C1`, but only `a1` reaches its threshold of 60.
/// `C2` admits anyone.
pub(crate) fn threshold_dataset() -> Dataset {
    let record = DatasetRecord::new(["a1", "a2"], ["C1", "C2"])
        .with_capacity("C1", Capacity::new(2).with_eligibility_score(60.0))
        .with_capacity("C2", Capacity::new(2))
        .with_agent_preferences("a1", &["C1", "C2"])
        .with_agent_preferences("a2", &["C1", "C2"])
        .with_scores("a1", &[("C1", 90.0), ("C2", 40.0)])
        .with_scores("a2", &[("C1", 50.0), ("C2", 40.0)]);
    Dataset::from_record(record).expect("fixture is valid")
}

/// Four agents, two resources with two seats each; A1 and A2 favour R1,
/// A3 and A4 favour R2.
pub(crate) fn split_interest_dataset() -> Dataset {
    let record = DatasetRecord::new(["A1", "A2", "A3", "A4"], ["R1", "R2"])
        .with_capacity("R1", Capacity::new(2))
        .with_capacity("R2", Capacity::new(2))
        .with_agent_preferences("A1", &["R1", "R2"])
        .with_agent_preferences("A2", &["R1", "R2"])
        .with_agent_preferences("A3", &["R2", "R1"])
        .with_agent_preferences("A4", &["R2", "R1"]);
    Dataset::from_record(record).expect("fixture is valid")
}

/// Three single-seat resources. `A1` and `A2` both want `R1`, `A3` wants
/// `R3`. Resources carry explicit agent orderings.
pub(crate) fn contended_dataset() -> Dataset {
    let record = DatasetRecord::new(["A1", "A2", "A3"], ["R1", "R2", "R3"])
        .with_capacity("R1", Capacity::new(1))
        .with_capacity("R2", Capacity::new(1))
        .with_capacity("R3", Capacity::new(1))
        .with_agent_preferences("A1", &["R1", "R2", "R3"])
        .with_agent_preferences("A2", &["R1", "R2", "R3"])
        .with_agent_preferences("A3", &["R3", "R2", "R1"])
        .with_resource_preferences("R1", &["A2", "A1", "A3"])
        .with_resource_preferences("R2", &["A1", "A2", "A3"])
        .with_resource_preferences("R3", &["A3", "A1", "A2"]);
    Dataset::from_record(record).expect("fixture is valid")
}

/// A synthetic dataset with `agents` agents and `resources` resources,
/// preferences rotated so that demand spreads across resources, and
/// enough total seats for everyone.
pub(crate) fn rotated_dataset(agents: usize, resources: usize) -> Dataset {
    let agent_ids: Vec<String> = (1..=agents).map(|i| format!("S{i}")).collect();
    let resource_ids: Vec<String> = (1..=resources).map(|i| format!("C{i}")).collect();
    let seats = agents.div_ceil(resources);
    let mut record = DatasetRecord::new(agent_ids.clone(), resource_ids.clone());
    for r in &resource_ids {
        record = record.with_capacity(r, Capacity::new(seats));
    }
    for (i, a) in agent_ids.iter().enumerate() {
        // Half the agents start from C1, the rest are rotated.
        let shift = if i % 2 == 0 { 0 } else { i % resources };
        let order: Vec<&str> = (0..resources)
            .map(|k| resource_ids[(k + shift) % resources].as_str())
            .collect();
        record = record.with_agent_preferences(a, &order);
    }
    Dataset::from_record(record).expect("fixture is valid")
}
