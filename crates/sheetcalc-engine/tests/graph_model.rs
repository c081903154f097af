//! Cross-checks DependencyGraph against a plain set model under a scripted
//! mix of adds, removes and re-adds over a dense 200-node universe.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use sheetcalc_engine::engine::DependencyGraph;

const SIZE: usize = 200;

struct Model {
    graph: DependencyGraph,
    names: Vec<String>,
    dependents: Vec<HashSet<String>>,
    dependees: Vec<HashSet<String>>,
}

impl Model {
    fn new() -> Self {
        Model {
            graph: DependencyGraph::new(),
            names: (0..SIZE).map(|i| format!("n{i}")).collect(),
            dependents: vec![HashSet::new(); SIZE],
            dependees: vec![HashSet::new(); SIZE],
        }
    }

    fn add(&mut self, i: usize, j: usize) {
        self.graph
            .add_dependency(self.names[i].clone(), self.names[j].clone());
        self.dependents[i].insert(self.names[j].clone());
        self.dependees[j].insert(self.names[i].clone());
    }

    fn remove(&mut self, i: usize, j: usize) {
        self.graph
            .remove_dependency(self.names[i].as_str(), self.names[j].as_str());
        self.dependents[i].remove(&self.names[j]);
        self.dependees[j].remove(&self.names[i]);
    }

    fn check(&self, batch: &str) {
        let expected_len: usize = self.dependents.iter().map(HashSet::len).sum();
        assert_eq!(self.graph.len(), expected_len, "size after {batch}");

        for (i, name) in self.names.iter().enumerate() {
            assert_eq!(
                self.graph.dependents(name.as_str()),
                self.dependents[i],
                "dependents of {name} after {batch}"
            );
            assert_eq!(
                self.graph.dependees(name.as_str()),
                self.dependees[i],
                "dependees of {name} after {batch}"
            );
            assert_eq!(
                self.graph.has_dependents(name.as_str()),
                !self.dependents[i].is_empty()
            );
            assert_eq!(
                self.graph.has_dependees(name.as_str()),
                !self.dependees[i].is_empty()
            );
        }
    }
}

#[test]
fn stress_matches_reference_model() {
    let started = Instant::now();
    let mut m = Model::new();

    for i in 0..SIZE {
        for j in (i + 1)..SIZE {
            m.add(i, j);
        }
    }
    m.check("initial adds");

    for i in 0..SIZE {
        for j in ((i + 4)..SIZE).step_by(4) {
            m.remove(i, j);
        }
    }
    m.check("first removes");

    for i in 0..SIZE {
        for j in ((i + 1)..SIZE).step_by(2) {
            m.add(i, j);
        }
    }
    m.check("re-adds");

    for i in (0..SIZE).step_by(2) {
        for j in ((i + 3)..SIZE).step_by(3) {
            m.remove(i, j);
        }
    }
    m.check("second removes");

    assert!(
        started.elapsed() < Duration::from_secs(5),
        "stress run took {:?}",
        started.elapsed()
    );
}

#[test]
fn replace_matches_reference_model() {
    let mut m = Model::new();
    for i in 0..SIZE {
        for j in ((i + 1)..SIZE).step_by(7) {
            m.add(i, j);
        }
    }

    for i in (0..SIZE).step_by(5) {
        let new_dependents: Vec<usize> = ((i + 2)..SIZE).step_by(11).collect();

        for j in m.dependents[i].clone() {
            let j: usize = j[1..].parse().unwrap();
            m.dependees[j].remove(&m.names[i].clone());
        }
        m.dependents[i].clear();
        for &j in &new_dependents {
            m.dependents[i].insert(m.names[j].clone());
            m.dependees[j].insert(m.names[i].clone());
        }

        let node = m.names[i].clone();
        let replacement: Vec<String> = new_dependents.iter().map(|&j| m.names[j].clone()).collect();
        m.graph.replace_dependents(&node, replacement.clone());
        assert_eq!(
            m.graph.dependents(node.as_str()),
            replacement.into_iter().collect::<HashSet<_>>()
        );
    }
    m.check("replace_dependents");

    for j in (1..SIZE).step_by(3) {
        let new_dependees: Vec<usize> = (0..j).step_by(13).collect();

        for i in m.dependees[j].clone() {
            let i: usize = i[1..].parse().unwrap();
            m.dependents[i].remove(&m.names[j].clone());
        }
        m.dependees[j].clear();
        for &i in &new_dependees {
            m.dependees[j].insert(m.names[i].clone());
            m.dependents[i].insert(m.names[j].clone());
        }

        let node = m.names[j].clone();
        m.graph
            .replace_dependees(&node, new_dependees.iter().map(|&i| m.names[i].clone()));
    }
    m.check("replace_dependees");
}
