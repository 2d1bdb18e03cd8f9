//! Conditional probability tables for boolean nodes.
//!
//! A node with `k` boolean parents needs one entry per parent configuration,
//! `2^k` in total. Each entry is P(node = true | parents).
//!
//! Parent values are encoded row-major in declared parent order, with the
//! first parent as the most significant bit:
//!
//! ```text
//! parents [a, b]     index
//!   a=F, b=F    ->     0
//!   a=F, b=T    ->     1
//!   a=T, b=F    ->     2
//!   a=T, b=T    ->     3
//! ```

use serde::Serialize;

use crate::error::SimError;

/// P(node = true | parent configuration), one entry per configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cpt {
    table: Vec<f64>,
}

impl Cpt {
    /// Create a CPT for `node` with `n_parents` parents.
    ///
    /// Fails with [`SimError::MalformedCpt`] unless the table holds exactly
    /// `2^n_parents` finite probabilities in `[0, 1]`.
    pub fn new(node: &str, n_parents: usize, table: Vec<f64>) -> Result<Self, SimError> {
        let expected = u32::try_from(n_parents)
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
            .ok_or_else(|| SimError::MalformedCpt {
                node: node.to_string(),
                reason: format!("{} parents cannot be keyed by a table index", n_parents),
            })?;
        if table.len() != expected {
            return Err(SimError::MalformedCpt {
                node: node.to_string(),
                reason: format!(
                    "expected {} entries for {} parents, got {}",
                    expected,
                    n_parents,
                    table.len()
                ),
            });
        }

        if let Some((i, p)) = table
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0 || **p > 1.0)
        {
            return Err(SimError::MalformedCpt {
                node: node.to_string(),
                reason: format!("entry {} = {} is not a probability in [0, 1]", i, p),
            });
        }

        Ok(Self { table })
    }

    /// A root-node CPT holding a single probability.
    pub fn prior(node: &str, p: f64) -> Result<Self, SimError> {
        Self::new(node, 0, vec![p])
    }

    /// Number of parents this table is keyed by.
    pub fn n_parents(&self) -> usize {
        self.table.len().trailing_zeros() as usize
    }

    /// Raw entries in index order.
    pub fn entries(&self) -> &[f64] {
        &self.table
    }

    /// Encode parent values into a table index.
    pub fn encode(parent_values: &[bool]) -> usize {
        parent_values
            .iter()
            .fold(0, |idx, &v| (idx << 1) | usize::from(v))
    }

    /// Decode a table index into `n_parents` parent values.
    pub fn decode(idx: usize, n_parents: usize) -> Vec<bool> {
        (0..n_parents)
            .map(|i| (idx >> (n_parents - 1 - i)) & 1 == 1)
            .collect()
    }

    /// P(true | parent_values).
    ///
    /// Fails with [`SimError::ParentCountMismatch`] unless one value is given
    /// per parent.
    pub fn probability(&self, parent_values: &[bool]) -> Result<f64, SimError> {
        if parent_values.len() != self.n_parents() {
            return Err(SimError::ParentCountMismatch {
                expected: self.n_parents(),
                got: parent_values.len(),
            });
        }
        Ok(self.table[Self::encode(parent_values)])
    }

    /// Entry at an already-encoded index.
    pub(crate) fn at(&self, idx: usize) -> f64 {
        self.table[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_is_row_major() {
        assert_eq!(Cpt::encode(&[]), 0);
        assert_eq!(Cpt::encode(&[false, false]), 0);
        assert_eq!(Cpt::encode(&[false, true]), 1);
        assert_eq!(Cpt::encode(&[true, false]), 2);
        assert_eq!(Cpt::encode(&[true, true]), 3);
        assert_eq!(Cpt::encode(&[true, false, true]), 5);
    }

    #[test]
    fn test_decode_inverts_encode() {
        for idx in 0..8 {
            let values = Cpt::decode(idx, 3);
            assert_eq!(Cpt::encode(&values), idx);
        }
        assert_eq!(Cpt::decode(2, 2), vec![true, false]);
        assert!(Cpt::decode(0, 0).is_empty());
    }

    #[test]
    fn test_probability_lookup() {
        let cpt = Cpt::new("sym", 2, vec![0.05, 0.4, 0.6, 0.9]).unwrap();
        assert_eq!(cpt.n_parents(), 2);
        assert_eq!(cpt.probability(&[true, true]), Ok(0.9));
        assert_eq!(cpt.probability(&[true, false]), Ok(0.6));
        assert_eq!(cpt.probability(&[false, true]), Ok(0.4));
        assert_eq!(cpt.probability(&[false, false]), Ok(0.05));
    }

    #[test]
    fn test_prior() {
        let cpt = Cpt::prior("exposure", 0.2).unwrap();
        assert_eq!(cpt.n_parents(), 0);
        assert_eq!(cpt.probability(&[]), Ok(0.2));
    }

    #[test]
    fn test_wrong_size_rejected() {
        let result = Cpt::new("dis_a", 2, vec![0.1, 0.5, 0.6]);
        assert!(matches!(result, Err(SimError::MalformedCpt { .. })));

        let result = Cpt::new("dis_a", 0, vec![]);
        assert!(matches!(result, Err(SimError::MalformedCpt { .. })));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Cpt::new("x", 1, vec![0.1, 1.5]),
            Err(SimError::MalformedCpt { .. })
        ));
        assert!(matches!(
            Cpt::prior("x", -0.01),
            Err(SimError::MalformedCpt { .. })
        ));
        assert!(matches!(
            Cpt::prior("x", f64::NAN),
            Err(SimError::MalformedCpt { .. })
        ));
    }

    #[test]
    fn test_boundary_values_accepted() {
        let cpt = Cpt::new("wet", 1, vec![0.0, 1.0]).unwrap();
        assert_eq!(cpt.probability(&[false]), Ok(0.0));
        assert_eq!(cpt.probability(&[true]), Ok(1.0));
    }

    #[test]
    fn test_wide_table_accepted() {
        let table = vec![0.5; 1 << 17];
        let cpt = Cpt::new("child", 17, table).unwrap();
        assert_eq!(cpt.n_parents(), 17);
        assert_eq!(cpt.probability(&[true; 17]), Ok(0.5));
    }

    #[test]
    fn test_unindexable_parent_count_rejected() {
        for n_parents in [usize::BITS as usize, usize::MAX] {
            let result = Cpt::new("x", n_parents, vec![0.5]);
            assert!(matches!(result, Err(SimError::MalformedCpt { .. })));
        }
    }

    #[test]
    fn test_probability_with_wrong_parent_count() {
        let cpt = Cpt::new("sym", 2, vec![0.05, 0.4, 0.6, 0.9]).unwrap();
        assert_eq!(
            cpt.probability(&[true]),
            Err(SimError::ParentCountMismatch {
                expected: 2,
                got: 1
            })
        );
        assert!(cpt.probability(&[true, false, true]).is_err());
    }
}
