//! Energy factors and the shared data they are materialized from.

use std::sync::RwLock;

use itertools::{izip, Itertools};

use crate::{ClassVal, FactorlibError, Result, SourceId, VarId};

/// Shared energy data referenced by zero or more factors, possibly across
/// several graphs. Identity is `Arc` pointer identity; the payload can be
/// swapped at any time and is only picked up by factors when they
/// re-materialize their tables.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct FactorSource {
    data: RwLock<Vec<f64>>,
}

impl FactorSource {
    pub fn new(data: Vec<f64>) -> Self {
        FactorSource {
            data: RwLock::new(data),
        }
    }

    pub fn set_data(&self, data: Vec<f64>) {
        *self.data.write().unwrap() = data;
    }

    pub fn snapshot(&self) -> Vec<f64> {
        self.data.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A local energy term over an ordered, duplicate-free subset of the graph
/// variables (its scope).
///
/// The energy table has one entry per joint state of the scope, laid out
/// row-major with the last scope variable varying fastest. A factor either
/// carries its table directly or holds a [`SourceId`] handle and fills the
/// table from the graph's source arena on `compute_energies`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Factor {
    scope: Vec<VarId>,
    cards: Vec<usize>,
    table: Vec<f64>,
    source: Option<SourceId>,
}

impl Factor {
    /// Factor with an explicit energy table. The table may also be left
    /// empty here and materialized later.
    pub fn new(scope: Vec<VarId>, cards: Vec<usize>, table: Vec<f64>) -> Result<Self> {
        let factor = Factor {
            scope,
            cards,
            table,
            source: None,
        };
        factor.validate()?;
        Ok(factor)
    }

    /// Factor whose table comes from a shared data source; the table stays
    /// empty until materialized.
    pub fn with_source(scope: Vec<VarId>, cards: Vec<usize>, source: SourceId) -> Result<Self> {
        let factor = Factor {
            scope,
            cards,
            table: Vec::new(),
            source: Some(source),
        };
        factor.validate()?;
        Ok(factor)
    }

    fn validate(&self) -> Result<()> {
        if self.scope.is_empty() {
            return Err(FactorlibError::InvalidSize(0));
        }
        if let Some(var) = self.scope.iter().duplicates().next() {
            return Err(FactorlibError::RepeatedScopeVar(*var));
        }
        if self.cards.len() != self.scope.len() {
            return Err(FactorlibError::DimensionMismatch {
                got: self.cards.len(),
                expected: self.scope.len(),
            });
        }
        if self.cards.contains(&0) {
            return Err(FactorlibError::InvalidSize(0));
        }
        if !self.table.is_empty() && self.table.len() != self.table_size() {
            return Err(FactorlibError::DimensionMismatch {
                got: self.table.len(),
                expected: self.table_size(),
            });
        }
        Ok(())
    }

    pub fn scope(&self) -> &[VarId] {
        &self.scope
    }

    pub fn cards(&self) -> &[usize] {
        &self.cards
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut [f64] {
        &mut self.table
    }

    pub fn source(&self) -> Option<SourceId> {
        self.source
    }

    /// Number of joint states of the scope.
    pub fn table_size(&self) -> usize {
        self.cards.iter().product()
    }

    fn joint_index(&self, state: &[ClassVal]) -> Result<usize> {
        if state.len() != self.scope.len() {
            return Err(FactorlibError::DimensionMismatch {
                got: state.len(),
                expected: self.scope.len(),
            });
        }
        let mut index = 0;
        for (s, c) in izip!(state.iter(), self.cards.iter()) {
            if *s as usize >= *c {
                return Err(FactorlibError::IndexOutOfRange {
                    index: *s as usize,
                    bound: *c,
                });
            }
            index = index * *c + *s as usize;
        }
        Ok(index)
    }

    /// Energy of an assignment restricted to the scope, in scope order.
    /// Fails if the table has not been materialized to the scope's size.
    pub fn energy(&self, state: &[ClassVal]) -> Result<f64> {
        let index = self.joint_index(state)?;
        if self.table.len() != self.table_size() {
            return Err(FactorlibError::DimensionMismatch {
                got: self.table.len(),
                expected: self.table_size(),
            });
        }
        Ok(self.table[index])
    }

    /// Replaces the energy table with a snapshot of the source data.
    pub fn materialize_table(&mut self, source: &FactorSource) -> Result<()> {
        let data = source.snapshot();
        if data.len() != self.table_size() {
            return Err(FactorlibError::DimensionMismatch {
                got: data.len(),
                expected: self.table_size(),
            });
        }
        self.table = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_index_last_var_fastest() {
        let table = (0..6).map(f64::from).collect();
        let factor = Factor::new(vec![0, 1], vec![2, 3], table).unwrap();
        assert_eq!(factor.energy(&[0, 0]).unwrap(), 0.0);
        assert_eq!(factor.energy(&[0, 2]).unwrap(), 2.0);
        assert_eq!(factor.energy(&[1, 0]).unwrap(), 3.0);
        assert_eq!(factor.energy(&[1, 2]).unwrap(), 5.0);
    }

    #[test]
    fn empty_table_has_no_energy() {
        let factor = Factor::new(vec![0], vec![4], vec![]).unwrap();
        assert!(matches!(
            factor.energy(&[1]),
            Err(FactorlibError::DimensionMismatch { .. })
        ));
    }
}
