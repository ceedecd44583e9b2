//! Reference suffix sorting by direct comparison of suffixes, and checks for suffix arrays.
//!
//! Nothing here uses induced sorting; these functions exist to cross-check [`build`](crate::build).
use crate::{Index, Symbol};
use std::cmp::Ordering;

fn cmp_suffix<C: Symbol>(s: &[C], i: usize, j: usize) -> Ordering {
    s[i..]
        .iter()
        .map(|c| c.to_u())
        .cmp(s[j..].iter().map(|c| c.to_u()))
}

/// Build suffix array by sorting all suffixes with a comparison sort.
///
/// Runs in O(N² log N) time in the worst case.
/// # Example
/// ```
/// assert_eq!(sais::naive::build(b"banana"), vec![5, 3, 1, 0, 4, 2]);
/// ```
pub fn build<C: Symbol>(s: &[C]) -> Vec<isize> {
    let mut sa: Vec<usize> = (0..s.len()).collect();

    sa.sort_by(|&a, &b| cmp_suffix(s, a, b));

    sa.into_iter().map(|i| i as isize).collect()
}

/// Returns the first rank `k` whose entry is out of range or whose suffix is not strictly greater
/// than the suffix at rank `k - 1`.
pub fn first_disorder<C: Symbol, I: Index>(s: &[C], sa: &[I]) -> Option<usize> {
    let in_range = |k: usize| !sa[k].is_negative() && sa[k].to_u() < s.len();

    (0..sa.len()).find(|&k| {
        !in_range(k) || (k > 0 && cmp_suffix(s, sa[k - 1].to_u(), sa[k].to_u()) != Ordering::Less)
    })
}

/// Returns true iff `sa` contains every value of `0..sa.len()` exactly once.
pub fn is_permutation<I: Index>(sa: &[I]) -> bool {
    let mut seen = vec![false; sa.len()];

    sa.iter().all(|e| {
        if e.is_negative() || e.to_u() >= sa.len() || seen[e.to_u()] {
            return false;
        }
        seen[e.to_u()] = true;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_banana() {
        assert_eq!(build(b"banana"), vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn build_compares_unsigned() {
        // -1 reads as u32::MAX
        let s: Vec<i32> = vec![-1, 1];
        assert_eq!(build(&s), vec![1, 0]);
    }

    #[test]
    fn build_empty() {
        let s: Vec<u8> = vec![];
        assert!(build(&s).is_empty());
    }

    #[test]
    fn first_disorder_accepts_sorted() {
        let sa: Vec<isize> = vec![5, 3, 1, 0, 4, 2];
        assert_eq!(first_disorder(b"banana", &sa), None);
    }

    #[test]
    fn first_disorder_finds_swap() {
        let sa: Vec<isize> = vec![5, 3, 1, 4, 0, 2];
        assert_eq!(first_disorder(b"banana", &sa), Some(4));
    }

    #[test]
    fn first_disorder_finds_out_of_range() {
        let sa: Vec<i32> = vec![5, 3, -1, 0, 4, 2];
        assert_eq!(first_disorder(b"banana", &sa), Some(2));

        let sa: Vec<i32> = vec![5, 3, 1, 0, 4, 6];
        assert_eq!(first_disorder(b"banana", &sa), Some(5));
    }

    #[test]
    fn first_disorder_finds_duplicate() {
        let sa: Vec<isize> = vec![5, 3, 3, 0, 4, 2];
        assert_eq!(first_disorder(b"banana", &sa), Some(2));
    }

    #[test]
    fn is_permutation_works() {
        assert!(is_permutation::<isize>(&[]));
        assert!(is_permutation(&[2i64, 0, 1]));
        assert!(!is_permutation(&[2i64, 2, 1]));
        assert!(!is_permutation(&[3i64, 0, 1]));
        assert!(!is_permutation(&[-1i64, 0, 1]));
    }
}
