//! Dependency graph over opaque node names.
//!
//! An edge `(dependee, dependent)` means "dependent's value depends on
//! dependee's value". The graph is a set of such pairs: adding an existing
//! pair is a no-op. Both directions are indexed so every edge operation is
//! amortized O(1).
//!
//! A node is a key in the dependents map iff it has at least one dependent,
//! and a key in the dependees map iff it has at least one dependee.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Dependency graph (dependee -> dependents, dependent -> dependees).
#[derive(Clone)]
pub struct DependencyGraph<N = String> {
    /// Node -> nodes that depend on it
    dependents: HashMap<N, HashSet<N>>,
    /// Node -> nodes it depends on
    dependees: HashMap<N, HashSet<N>>,
    len: usize,
}

impl<N> DependencyGraph<N>
where
    N: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        DependencyGraph {
            dependents: HashMap::new(),
            dependees: HashMap::new(),
            len: 0,
        }
    }

    /// Number of distinct (dependee, dependent) pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_dependents<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents.contains_key(node)
    }

    pub fn has_dependees<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependees.contains_key(node)
    }

    /// Snapshot of the nodes that depend on `node` (empty if unknown).
    pub fn dependents<Q>(&self, node: &Q) -> HashSet<N>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents.get(node).cloned().unwrap_or_default()
    }

    /// Snapshot of the nodes `node` depends on (empty if unknown).
    pub fn dependees<Q>(&self, node: &Q) -> HashSet<N>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependees.get(node).cloned().unwrap_or_default()
    }

    /// Add the pair `(dependee, dependent)`. Returns false if it already existed.
    pub fn add_dependency(&mut self, dependee: impl Into<N>, dependent: impl Into<N>) -> bool {
        let dependee = dependee.into();
        let dependent = dependent.into();

        let inserted = self
            .dependents
            .entry(dependee.clone())
            .or_default()
            .insert(dependent.clone());
        if inserted {
            self.dependees.entry(dependent).or_default().insert(dependee);
            self.len += 1;
        }
        inserted
    }

    /// Remove the pair `(dependee, dependent)`. Returns false if it was absent.
    pub fn remove_dependency<Q>(&mut self, dependee: &Q, dependent: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !remove_from(&mut self.dependents, dependee, dependent) {
            return false;
        }
        remove_from(&mut self.dependees, dependent, dependee);
        self.len -= 1;
        true
    }

    /// Remove every pair with `node` as dependee, then add `(node, d)` for
    /// each `d` in `new_dependents`.
    pub fn replace_dependents<I>(&mut self, node: &N, new_dependents: I)
    where
        I: IntoIterator<Item = N>,
    {
        if let Some(old) = self.dependents.remove(node) {
            for dependent in &old {
                remove_from(&mut self.dependees, dependent, node);
            }
            self.len -= old.len();
        }
        for dependent in new_dependents {
            self.add_dependency(node.clone(), dependent);
        }
    }

    /// Remove every pair with `node` as dependent, then add `(d, node)` for
    /// each `d` in `new_dependees`.
    pub fn replace_dependees<I>(&mut self, node: &N, new_dependees: I)
    where
        I: IntoIterator<Item = N>,
    {
        if let Some(old) = self.dependees.remove(node) {
            for dependee in &old {
                remove_from(&mut self.dependents, dependee, node);
            }
            self.len -= old.len();
        }
        for dependee in new_dependees {
            self.add_dependency(dependee, node.clone());
        }
    }
}

/// Remove `value` from the set stored under `key`, dropping the set when it
/// becomes empty.
fn remove_from<N, Q>(map: &mut HashMap<N, HashSet<N>>, key: &Q, value: &Q) -> bool
where
    N: Eq + Hash + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        map.remove(key);
    }
    removed
}

impl<N> Default for DependencyGraph<N>
where
    N: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for DependencyGraph<N>
where
    N: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("len", &self.len)
            .field("dependents", &self.dependents)
            .finish()
    }
}
