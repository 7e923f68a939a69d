//! Union-find over a fixed set of elements.
//!
//! A DisjointSet tracks a partition of `0..num_elements` into disjoint sets,
//! with near-constant-time find and union thanks to path compression and
//! union by rank. The factor graph uses it as its topology-analysis
//! substrate: one element per variable, one union per potential edge, and a
//! union that reports an already-existing connection is a cycle.

use crate::{FactorlibError, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
    // memo maintained by the owner once its unions are done, never derived
    // from the forest itself
    connected: bool,
}

impl DisjointSet {
    /// Creates `num_elements` singleton sets: `parent[i] = i`, `rank[i] = 0`.
    pub fn new(num_elements: usize) -> Self {
        DisjointSet {
            parent: (0..num_elements).collect(),
            rank: vec![0; num_elements],
            connected: false,
        }
    }

    pub fn num_elements(&self) -> usize {
        self.parent.len()
    }

    fn check_element(&self, x: usize) -> Result<()> {
        if x >= self.parent.len() {
            Err(FactorlibError::IndexOutOfRange {
                index: x,
                bound: self.parent.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Root of the set containing x. Every node walked over on the way up
    /// is re-pointed directly at the root.
    pub fn find_set(&mut self, x: usize) -> Result<usize> {
        self.check_element(x)?;
        Ok(self.find_root(x))
    }

    fn find_root(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cur = x;
        while cur != root {
            cur = std::mem::replace(&mut self.parent[cur], root);
        }
        root
    }

    /// Union by rank of two roots, returning the new root. The strictly
    /// higher-ranked root wins; on equal rank yroot wins and its rank grows.
    /// Both arguments must be roots of their sets.
    pub fn link_set(&mut self, xroot: usize, yroot: usize) -> usize {
        debug_assert!(self.parent[xroot] == xroot && self.parent[yroot] == yroot);
        debug_assert!(xroot != yroot);

        if self.rank[xroot] > self.rank[yroot] {
            self.parent[yroot] = xroot;
            xroot
        } else {
            self.parent[xroot] = yroot;
            if self.rank[xroot] == self.rank[yroot] {
                self.rank[yroot] += 1;
            }
            yroot
        }
    }

    /// Returns true iff x and y already belong to the same set, in which
    /// case the forest is left unchanged. Otherwise their roots are linked
    /// and false is returned.
    pub fn union_set(&mut self, x: usize, y: usize) -> Result<bool> {
        let xroot = self.find_set(x)?;
        let yroot = self.find_set(y)?;
        if xroot == yroot {
            return Ok(true);
        }
        self.link_set(xroot, yroot);
        Ok(false)
    }

    pub fn is_same_set(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find_set(x)? == self.find_set(y)?)
    }

    /// Labels every element with its set. Labels are assigned in order of
    /// first-encountered root, so they form the contiguous range `[0, k)`
    /// with k the number of sets, which is returned. `out` must have one
    /// slot per element.
    pub fn unique_labeling(&mut self, out: &mut [usize]) -> Result<usize> {
        if out.len() != self.parent.len() {
            return Err(FactorlibError::DimensionMismatch {
                got: out.len(),
                expected: self.parent.len(),
            });
        }
        Ok(self.label_all(out))
    }

    fn label_all(&mut self, out: &mut [usize]) -> usize {
        let n = self.parent.len();
        // n itself is never a valid label, use it as the unassigned marker
        let mut root_label = vec![n; n];
        let mut num_sets = 0;
        for i in 0..n {
            let root = self.find_root(i);
            if root_label[root] == n {
                root_label[root] = num_sets;
                num_sets += 1;
            }
            out[i] = root_label[root];
        }
        num_sets
    }

    /// Number of disjoint sets.
    pub fn num_sets(&mut self) -> usize {
        let mut scratch = vec![0; self.parent.len()];
        self.label_all(&mut scratch)
    }

    /// Owner-set connectivity memo.
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}
