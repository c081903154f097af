//! Recalculation order and circular dependency detection.
//!
//! When a cell changes, every cell that (transitively) depends on it must be
//! recomputed after the cells it depends on. This module walks the
//! "dependents" edges depth-first from the changed node and returns the
//! reverse postorder, which starts with the changed node and places each
//! node after everything it depends on within the visited subgraph.
//!
//! The walk is iterative with explicit in-progress/done marks, so deep
//! dependency chains cannot overflow the stack, and reaching a node that is
//! still in progress means the edges form a cycle.
//!
//! The traversal is pure: edges come from a caller-supplied successor
//! function, so a caller can check a hypothetical edge set before
//! committing it to a [`DependencyGraph`](super::DependencyGraph).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A cycle was found while ordering. `node` is where the cycle closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleDetected<N> {
    pub node: N,
}

impl<N: fmt::Display> fmt::Display for CycleDetected<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circular dependency through {}", self.node)
    }
}

impl<N: fmt::Debug + fmt::Display> std::error::Error for CycleDetected<N> {}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Order `start` and everything reachable from it through `successors`.
///
/// Runs in O(V + E) over the reachable subgraph.
pub fn recalculation_order<N, F, I>(start: &N, mut successors: F) -> Result<Vec<N>, CycleDetected<N>>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    let mut marks: HashMap<N, Mark> = HashMap::new();
    let mut postorder: Vec<N> = Vec::new();

    marks.insert(start.clone(), Mark::InProgress);
    let first: Vec<N> = successors(start).into_iter().collect();
    let mut stack = vec![(start.clone(), first.into_iter())];

    loop {
        let next = match stack.last_mut() {
            Some((_, children)) => children.next(),
            None => break,
        };

        match next {
            Some(child) => match marks.get(&child) {
                Some(Mark::InProgress) => return Err(CycleDetected { node: child }),
                Some(Mark::Done) => {}
                None => {
                    marks.insert(child.clone(), Mark::InProgress);
                    let grandchildren: Vec<N> = successors(&child).into_iter().collect();
                    stack.push((child, grandchildren.into_iter()));
                }
            },
            None => {
                if let Some((node, _)) = stack.pop() {
                    marks.insert(node.clone(), Mark::Done);
                    postorder.push(node);
                }
            }
        }
    }

    postorder.reverse();
    Ok(postorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DependencyGraph;

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut g = DependencyGraph::new();
        for (dependee, dependent) in edges {
            g.add_dependency(*dependee, *dependent);
        }
        g
    }

    fn order(g: &DependencyGraph, start: &str) -> Result<Vec<String>, CycleDetected<String>> {
        recalculation_order(&start.to_string(), |n: &String| g.dependents(n.as_str()))
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn test_isolated_node() {
        let g = graph(&[]);
        assert_eq!(order(&g, "A1").unwrap(), vec!["A1".to_string()]);
    }

    #[test]
    fn test_chain() {
        let g = graph(&[("A1", "B1"), ("B1", "C1")]);
        assert_eq!(order(&g, "A1").unwrap(), vec!["A1", "B1", "C1"]);
        assert_eq!(order(&g, "B1").unwrap(), vec!["B1", "C1"]);
    }

    #[test]
    fn test_diamond_respects_dependencies() {
        // B1 = A1, C1 = B1 + A1, D1 = C1 + B1
        let g = graph(&[
            ("A1", "B1"),
            ("A1", "C1"),
            ("B1", "C1"),
            ("B1", "D1"),
            ("C1", "D1"),
        ]);
        let o = order(&g, "A1").unwrap();
        assert_eq!(o.len(), 4);
        assert_eq!(o[0], "A1");
        assert!(position(&o, "B1") < position(&o, "C1"));
        assert!(position(&o, "C1") < position(&o, "D1"));
    }

    #[test]
    fn test_cycle_back_to_start() {
        let g = graph(&[("A1", "B1"), ("B1", "C1"), ("C1", "A1")]);
        let err = order(&g, "A1").unwrap_err();
        assert_eq!(err.node, "A1");
    }

    #[test]
    fn test_self_loop() {
        let g = graph(&[("A1", "A1")]);
        assert!(order(&g, "A1").is_err());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let names: Vec<String> = (1..=50_000).map(|i| format!("A{i}")).collect();
        let mut g = DependencyGraph::new();
        for pair in names.windows(2) {
            g.add_dependency(pair[0].clone(), pair[1].clone());
        }
        let o = order(&g, "A1").unwrap();
        assert_eq!(o.len(), names.len());
        assert_eq!(o.last().map(String::as_str), Some("A50000"));
    }

    #[test]
    fn test_hypothetical_edges() {
        // Current graph: A1 -> B1. Proposed: A1 depends on B1.
        let g = graph(&[("A1", "B1")]);
        let proposed = |n: &String| {
            let mut next = g.dependents(n.as_str());
            if n == "B1" {
                next.insert("A1".to_string());
            }
            next
        };
        assert!(recalculation_order(&"A1".to_string(), proposed).is_err());
        // Nothing was committed.
        assert!(!g.has_dependents("B1"));
    }
}
