//! Searching phase permutations for the strongest signal.

use itertools::Itertools;

use crate::machine::{MachineError, Word};
use crate::network::{FeedbackNetwork, Topology};

/// Strongest signal found, and the permutation that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Best {
    pub signal: Word,
    pub phases: Vec<Word>,
}

/// Every ordering of `values`, in lexicographic order of their indices.
///
/// The empty slice has exactly one (empty) ordering.
pub fn permutations(values: &[Word]) -> Vec<Vec<Word>> {
    values
        .iter()
        .copied()
        .permutations(values.len())
        .collect()
}

/// Evaluate every permutation of `values` with fresh amplifiers and keep the strongest signal.
///
/// The first permutation, in [`permutations`] order, wins ties. Stops at the first machine
/// error.
pub fn best(image: &[Word], values: &[Word], topology: Topology) -> Result<Best, MachineError> {
    let mut best = Best {
        signal: Word::MIN,
        phases: Vec::new(),
    };
    for (i, phases) in permutations(values).into_iter().enumerate() {
        let signal = FeedbackNetwork::new(image, &phases, topology).run()?;
        if i == 0 || signal > best.signal {
            best = Best { signal, phases };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MachineErrorKind;

    fn factorial(n: usize) -> usize {
        (1..=n).product()
    }

    #[test]
    fn permutation_order() {
        assert_eq!(
            permutations(&[1, 2, 3]),
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn permutation_counts() {
        assert_eq!(permutations(&[]), vec![Vec::<Word>::new()]);
        assert_eq!(permutations(&[7]), vec![vec![7]]);
        for n in 2..=6 {
            let values: Vec<Word> = (0..n as Word).collect();
            let mut all = permutations(&values);
            assert_eq!(all.len(), factorial(n));
            all.sort();
            all.dedup();
            assert_eq!(all.len(), factorial(n), "duplicates for n = {}", n);
            for permutation in &all {
                let mut sorted = permutation.clone();
                sorted.sort();
                assert_eq!(sorted, values);
            }
        }
    }

    #[test]
    fn best_serial() {
        let image = [
            3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0,
        ];
        let best = best(&image, &[0, 1, 2, 3, 4], Topology::Serial).unwrap();
        assert_eq!(
            best,
            Best {
                signal: 43210,
                phases: vec![4, 3, 2, 1, 0],
            }
        );
    }

    #[test]
    fn best_feedback() {
        #[rustfmt::skip]
        let image = [
            3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1,
            28, 1005, 28, 6, 99, 0, 0, 5,
        ];
        let best = best(&image, &[5, 6, 7, 8, 9], Topology::Feedback).unwrap();
        assert_eq!(best.signal, 139629729);
        assert_eq!(best.phases, vec![9, 8, 7, 6, 5]);
    }

    #[test]
    fn ties_keep_first() {
        // Signal is always 0
        let best = best(&[99], &[1, 2, 3], Topology::Feedback).unwrap();
        assert_eq!(best.signal, 0);
        assert_eq!(best.phases, vec![1, 2, 3]);
    }

    #[test]
    fn empty_phase_set() {
        let best = best(&[99], &[], Topology::Feedback).unwrap();
        assert_eq!(
            best,
            Best {
                signal: 0,
                phases: vec![],
            }
        );
    }

    #[test]
    fn stops_on_error() {
        let error = best(&[42], &[0, 1], Topology::Serial).unwrap_err();
        assert_eq!(error.kind, MachineErrorKind::InvalidOpcode { value: 42 });
    }
}
