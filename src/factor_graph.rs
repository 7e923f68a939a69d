//! Factor graph over discrete variables.
//!
//! A FactorGraph owns the variable cardinalities, the factor list and the
//! data-source arena, and derives its topology (disjoint-set forest, edge
//! count, cycle flag) with connect_components. Topology queries fail until
//! connect_components has run against the current variable domain; adding
//! factors does not invalidate a previously built topology, re-running
//! connect_components after mutation is the caller's responsibility.

use std::sync::Arc;

use itertools::izip;

use crate::disjoint_set::DisjointSet;
use crate::factor::{Factor, FactorSource};
use crate::features::{Features, Observation};
use crate::{ClassVal, FactorId, FactorlibError, Result, SourceId};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct FactorGraph {
    cardinalities: Vec<usize>,
    // insertion order is significant: energies are summed in this order
    factors: Vec<Factor>,
    // keeps shared sources alive; factors refer to them by SourceId
    sources: Vec<Arc<FactorSource>>,
    // derived state, None until connect_components has run
    dset: Option<DisjointSet>,
    num_edges: usize,
    has_cycle: bool,
}

impl FactorGraph {
    pub fn new(cardinalities: Vec<usize>) -> Self {
        FactorGraph {
            cardinalities,
            factors: Vec::new(),
            sources: Vec::new(),
            dset: None,
            num_edges: 0,
            has_cycle: false,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.cardinalities.len()
    }

    pub fn num_factors(&self) -> usize {
        self.factors.len()
    }

    pub fn cardinalities(&self) -> &[usize] {
        &self.cardinalities
    }

    /// Replaces the variable domain and drops any derived topology.
    pub fn set_cardinalities(&mut self, cardinalities: Vec<usize>) {
        self.cardinalities = cardinalities;
        self.dset = None;
        self.num_edges = 0;
        self.has_cycle = false;
    }

    /// Appends a factor. Scope validity against the variable domain is only
    /// checked lazily, by connect_components and energy evaluation.
    pub fn add_factor(&mut self, factor: Factor) -> FactorId {
        self.factors.push(factor);
        self.factors.len() - 1
    }

    /// Adds a shared data source to the arena and returns the handle
    /// factors reference it by.
    pub fn add_source(&mut self, source: Arc<FactorSource>) -> SourceId {
        self.sources.push(source);
        self.sources.len() - 1
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn factor(&self, factor: FactorId) -> Result<&Factor> {
        self.factors.get(factor).ok_or(FactorlibError::IndexOutOfRange {
            index: factor,
            bound: self.factors.len(),
        })
    }

    pub fn factor_mut(&mut self, factor: FactorId) -> Result<&mut Factor> {
        let bound = self.factors.len();
        self.factors.get_mut(factor).ok_or(FactorlibError::IndexOutOfRange {
            index: factor,
            bound,
        })
    }

    pub fn sources(&self) -> &[Arc<FactorSource>] {
        &self.sources
    }

    pub fn source(&self, source: SourceId) -> Result<&Arc<FactorSource>> {
        self.sources.get(source).ok_or(FactorlibError::IndexOutOfRange {
            index: source,
            bound: self.sources.len(),
        })
    }

    /// Rebuilds the disjoint-set forest, edge count and cycle flag from the
    /// current factor scopes, from scratch.
    ///
    /// The first variable of each scope anchors the clique: every later
    /// scope variable is unioned with it. A union over an already-connected
    /// pair means the connection existed through another path, which marks
    /// the graph cyclic and adds no edge; otherwise a new tree edge is
    /// counted. On error the previously derived topology is left untouched.
    pub fn connect_components(&mut self) -> Result<()> {
        let num_vars = self.cardinalities.len();
        let mut dset = DisjointSet::new(num_vars);
        let mut num_edges = 0;
        let mut has_cycle = false;
        for factor in &self.factors {
            let scope = factor.scope();
            for &var in scope {
                if var >= num_vars {
                    return Err(FactorlibError::IndexOutOfRange {
                        index: var,
                        bound: num_vars,
                    });
                }
            }
            if scope.len() < 2 {
                continue;
            }
            let anchor = scope[0];
            for &var in &scope[1..] {
                if dset.union_set(anchor, var)? {
                    has_cycle = true;
                } else {
                    num_edges += 1;
                }
            }
        }
        // <= 1 so that the empty graph counts as connected
        let connected = dset.num_sets() <= 1;
        dset.set_connected(connected);
        self.dset = Some(dset);
        self.num_edges = num_edges;
        self.has_cycle = has_cycle;
        Ok(())
    }

    fn topology(&self) -> Result<&DisjointSet> {
        self.dset.as_ref().ok_or(FactorlibError::StaleTopology)
    }

    pub fn is_acyclic(&self) -> Result<bool> {
        self.topology()?;
        Ok(!self.has_cycle)
    }

    pub fn is_connected(&self) -> Result<bool> {
        Ok(self.topology()?.connected())
    }

    pub fn is_tree(&self) -> Result<bool> {
        Ok(self.is_acyclic()? && self.is_connected()?)
    }

    pub fn num_edges(&self) -> Result<usize> {
        self.topology()?;
        Ok(self.num_edges)
    }

    /// Forest built by the last connect_components run, if any.
    pub fn disjoint_set(&self) -> Option<&DisjointSet> {
        self.dset.as_ref()
    }

    /// Re-materializes the energy table of every factor holding a source
    /// handle. Factors without a source keep the table they already have.
    pub fn compute_energies(&mut self) -> Result<()> {
        for factor in &mut self.factors {
            if let Some(source) = factor.source() {
                let source = self.sources.get(source).ok_or(FactorlibError::IndexOutOfRange {
                    index: source,
                    bound: self.sources.len(),
                })?;
                factor.materialize_table(source)?;
            }
        }
        Ok(())
    }

    /// Total energy of a full assignment: the sum of per-factor energies,
    /// in factor insertion order.
    pub fn evaluate_energy(&self, state: &[ClassVal]) -> Result<f64> {
        if state.len() != self.cardinalities.len() {
            return Err(FactorlibError::DimensionMismatch {
                got: state.len(),
                expected: self.cardinalities.len(),
            });
        }
        for (s, c) in izip!(state.iter(), self.cardinalities.iter()) {
            if *s as usize >= *c {
                return Err(FactorlibError::IndexOutOfRange {
                    index: *s as usize,
                    bound: *c,
                });
            }
        }
        let mut energy = 0.0;
        let mut restricted = Vec::new();
        for factor in &self.factors {
            restricted.clear();
            for &var in factor.scope() {
                let s = state.get(var).ok_or(FactorlibError::IndexOutOfRange {
                    index: var,
                    bound: state.len(),
                })?;
                restricted.push(*s);
            }
            energy += factor.energy(&restricted)?;
        }
        Ok(energy)
    }

    /// Energy of a fully observed assignment.
    pub fn evaluate_energy_obs(&self, obs: &impl Observation) -> Result<f64> {
        self.evaluate_energy(obs.assignment())
    }

    /// Copy of the model: cardinalities and factors are deep-cloned, data
    /// sources stay shared. The copy carries no topology; run
    /// connect_components on it before querying. Not a Clone impl since the
    /// derived state is deliberately not carried over.
    pub fn duplicate(&self) -> FactorGraph {
        FactorGraph {
            cardinalities: self.cardinalities.clone(),
            factors: self.factors.clone(),
            sources: self.sources.clone(),
            dset: None,
            num_edges: 0,
            has_cycle: false,
        }
    }
}

impl Features for FactorGraph {
    fn num_vectors(&self) -> usize {
        self.factors.len()
    }
}
