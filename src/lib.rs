//! Provide suffix array construction that runs in O(N+|Σ|) time by induced sorting (SA-IS).
//!
//! The implementation follows the algorithm proposed in the paper [*Linear Suffix Array Construction by Almost Pure Induced-Sorting*](https://doi.org/10.1109/DCC.2009.42).
//!
//! No terminator has to be appended to the input: the last position of the sequence plays the
//! role of the sentinel and is always placed first in its bucket.
//!
//! # Example
//! ```ignore
//! use std::fs;
//! use std::io;
//!
//! fn main() -> io::Result<()> {
//!     let buf = fs::read("./english.100MB")?;
//!     let sa = sais::build(&buf, u8::MAX as usize);
//!     assert_eq!(sa.len(), buf.len());
//!
//!     Ok(())
//! }
//! ```
use contracts::*;
use log::{debug, trace};
use std::cmp::Ordering::*;

pub mod naive;

mod private {
    use num::{PrimInt, Signed};
    use std::fmt::Debug;

    pub trait Symbol: PrimInt + Copy + Debug {
        /// Rank of the symbol as an unsigned value of the same width.
        fn to_u(&self) -> usize;
    }

    pub trait Index: Symbol + Signed {
        fn of_u(v: usize) -> Self;
    }

    macro_rules! impl_symbol {
        ($int:ty, $uint:ty) => {
            impl Symbol for $int {
                #[inline]
                fn to_u(&self) -> usize {
                    *self as $uint as usize
                }
            }
        };
    }

    macro_rules! impl_index {
        ($int:ty) => {
            impl Index for $int {
                #[inline]
                fn of_u(v: usize) -> Self {
                    v as $int
                }
            }
        };
    }

    impl_symbol!(u8, u8);

    impl_symbol!(u16, u16);

    #[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
    impl_symbol!(u32, u32);

    #[cfg(target_pointer_width = "64")]
    impl_symbol!(u64, u64);

    impl_symbol!(usize, usize);

    #[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
    impl_symbol!(i32, u32);

    #[cfg(target_pointer_width = "64")]
    impl_symbol!(i64, u64);

    impl_symbol!(isize, usize);

    #[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
    impl_index!(i32);

    #[cfg(target_pointer_width = "64")]
    impl_index!(i64);

    impl_index!(isize);
}

/// A trait that represents a character: primitive integer type ordered by its unsigned value.
///
/// Signed types are read as the unsigned integer of the same width.
///
/// This is a [sealed trait](https://rust-lang.github.io/api-guidelines/future-proofing.html).
pub trait Symbol: private::Symbol {}

/// A trait that represents a cell of a suffix array: primitive signed integer type.
///
/// Reduced sequences are stored inside suffix array buffers, so every index is also a [`Symbol`].
///
/// This is a [sealed trait](https://rust-lang.github.io/api-guidelines/future-proofing.html).
pub trait Index: private::Index + Symbol {}

macro_rules! impl_symbol {
    ($int:ty) => {
        impl Symbol for $int {}
    };
}

macro_rules! impl_index {
    ($int:ty) => {
        impl Index for $int {}
    };
}

impl_symbol!(u8);

impl_symbol!(u16);

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl_symbol!(u32);

#[cfg(target_pointer_width = "64")]
impl_symbol!(u64);

impl_symbol!(usize);

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl_symbol!(i32);

#[cfg(target_pointer_width = "64")]
impl_symbol!(i64);

impl_symbol!(isize);

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl_index!(i32);

#[cfg(target_pointer_width = "64")]
impl_index!(i64);

impl_index!(isize);

/// When to solve the reduced problem recursively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Recurse {
    /// Only if two LMS-substrings got the same name.
    OnDuplicateNames,
    /// Whenever there is at least one LMS-substring.
    Always,
}

/// Returns the first `mid` cells and the last `mid` cells of `slice`.
fn split_at_same_len_mut<T>(slice: &mut [T], mid: usize) -> (&mut [T], &mut [T]) {
    let len = slice.len();

    assert!(mid * 2 <= len);

    let (fst, snd) = slice.split_at_mut(len - mid);
    (&mut fst[..mid], snd)
}

/// v==-1
#[inline]
fn empty<I: Index>() -> I {
    -I::one()
}

#[inline]
fn is_empty<I: Index>(v: I) -> bool {
    v < I::zero()
}

#[inline]
fn fill_empty<I: Index>(sa: &mut [I]) {
    sa.iter_mut().for_each(|e| *e = empty());
}

/// `t[i]` is true iff `s[i..]` is S-type. The last position is always L-type.
fn classify<C: Symbol>(s: &[C]) -> Vec<bool> {
    let mut t = vec![false; s.len()];

    for i in (1..s.len()).rev() {
        t[i - 1] = match s[i - 1].to_u().cmp(&s[i].to_u()) {
            Less => true,
            Equal => t[i],
            Greater => false,
        };
    }

    t
}

/// s[i] is LMS
#[inline]
fn is_lms(t: &[bool], i: usize) -> bool {
    i > 0 && t[i] && !t[i - 1]
}

/// Bucket `c` occupies `bounds[c]..bounds[c + 1]`.
fn bucket_bounds<C: Symbol>(s: &[C], ch_max: usize) -> Vec<usize> {
    let mut bounds = vec![0; ch_max + 2];

    s.iter().for_each(|c| bounds[c.to_u() + 1] += 1);

    (1..bounds.len()).for_each(|i| bounds[i] += bounds[i - 1]);

    bounds
}

/// Reset cursors to the head (first slot) or the tail (one past the last slot) of each bucket.
#[inline]
fn fill_bucket(bounds: &[usize], bucket: &mut [usize], head: bool) {
    let k = bucket.len();

    if head {
        bucket.copy_from_slice(&bounds[..k]);
    } else {
        bucket.copy_from_slice(&bounds[1..=k]);
    }
}

fn put_lms_char<C: Symbol, I: Index>(
    s: &[C],
    t: &[bool],
    bounds: &[usize],
    bucket: &mut [usize],
    sa: &mut [I],
) -> usize {
    fill_empty(sa);

    fill_bucket(bounds, bucket, false);

    let mut lms_count = 0;

    for i in (1..s.len()).filter(|&i| is_lms(t, i)) {
        let b = &mut bucket[s[i].to_u()];
        *b -= 1;
        sa[*b] = I::of_u(i);
        lms_count += 1;
    }

    lms_count
}

fn sort_l<C: Symbol, I: Index>(
    s: &[C],
    t: &[bool],
    bounds: &[usize],
    bucket: &mut [usize],
    sa: &mut [I],
) {
    debug_assert_eq!(s.len(), sa.len());

    fill_bucket(bounds, bucket, true);

    // the last suffix is the smallest one in its bucket
    let last = s.len() - 1;
    let b = &mut bucket[s[last].to_u()];
    sa[*b] = I::of_u(last);
    *b += 1;

    for i in 0..s.len() {
        let j = sa[i];
        // s[j-1] is L-type?
        if j > I::zero() && !t[j.to_u() - 1] {
            let j = j.to_u() - 1;
            let b = &mut bucket[s[j].to_u()];
            sa[*b] = I::of_u(j);
            *b += 1;
        }
    }
}

fn sort_s<C: Symbol, I: Index>(
    s: &[C],
    t: &[bool],
    bounds: &[usize],
    bucket: &mut [usize],
    sa: &mut [I],
) {
    debug_assert_eq!(s.len(), sa.len());

    fill_bucket(bounds, bucket, false);

    for i in (0..s.len()).rev() {
        let j = sa[i];
        // s[j-1] is S-type?
        if j > I::zero() && t[j.to_u() - 1] {
            let j = j.to_u() - 1;
            let b = &mut bucket[s[j].to_u()];
            *b -= 1;
            sa[*b] = I::of_u(j);
        }
    }
}

/// Induced sorting. The L-type pass has to finish before the S-type pass starts.
fn induce<C: Symbol, I: Index>(
    s: &[C],
    t: &[bool],
    bounds: &[usize],
    bucket: &mut [usize],
    sa: &mut [I],
) {
    sort_l(s, t, bounds, bucket, sa);

    sort_s(s, t, bounds, bucket, sa);
}

/// Compare the LMS-substrings starting at `i` and `j`, types included.
fn eq_lms_substr<C: Symbol>(s: &[C], t: &[bool], mut i: usize, mut j: usize) -> bool {
    let n = s.len();

    if s[i] != s[j] || t[i] != t[j] {
        return false;
    }

    loop {
        i += 1;
        j += 1;

        if i == n || j == n || s[i] != s[j] || t[i] != t[j] {
            return false;
        }

        // types agree up to here, so both substrings end together
        if is_lms(t, i) || is_lms(t, j) {
            return true;
        }
    }
}

/// Pre-condition: sa contains every position of `s` in induced order
///
/// Post-condition: sa[..lms_count] holds the LMS positions in sorted order, sa[n-lms_count..]
/// holds the reduced string (names in text order) and every other cell is empty.
/// Returns the number of distinct names.
fn reduce<C: Symbol, I: Index>(s: &[C], t: &[bool], lms_count: usize, sa: &mut [I]) -> usize {
    debug_assert_eq!(s.len(), sa.len());
    debug_assert!(lms_count * 2 <= s.len());

    let n = sa.len();

    {
        let mut i = 0;
        for j in 0..n {
            let p = sa[j];
            if !is_empty(p) && is_lms(t, p.to_u()) {
                sa[i] = p;
                i += 1;
            }
        }
        debug_assert_eq!(i, lms_count);
    }

    fill_empty(&mut sa[lms_count..]);

    // the name of the LMS-substring at p is stored in sa[lms_count + p / 2]
    // we can do this because no two LMS are adjacent
    let mut name = 0;
    for i in 0..lms_count {
        let cur = sa[i].to_u();

        if i > 0 && !eq_lms_substr(s, t, sa[i - 1].to_u(), cur) {
            name += 1;
        }

        sa[lms_count + cur / 2] = I::of_u(name);
    }

    // move names to the tail, keeping text order
    let mut i = n;
    for j in (lms_count..n).rev() {
        if !is_empty(sa[j]) {
            i -= 1;
            if i != j {
                sa[i] = sa[j];
                sa[j] = empty();
            }
        }
    }
    debug_assert_eq!(i, n - lms_count);

    if lms_count == 0 {
        0
    } else {
        name + 1
    }
}

/// Write LMS positions in text order.
fn fill_lms_index<I: Index>(t: &[bool], lms_index: &mut [I]) {
    (1..t.len())
        .filter(|&i| is_lms(t, i))
        .zip(lms_index.iter_mut())
        .for_each(|(i, e)| *e = I::of_u(i));
}

/// Pre-condition: sa[..lms_count] contains the sorted suffixes of the reduced string
fn put_lms_suffix<C: Symbol, I: Index>(
    s: &[C],
    t: &[bool],
    lms_count: usize,
    bounds: &[usize],
    bucket: &mut [usize],
    sa: &mut [I],
) {
    debug_assert!(s.len() == sa.len());

    {
        let (sa1, lms_index) = split_at_same_len_mut(sa, lms_count);

        fill_lms_index(t, lms_index);

        sa1.iter_mut().for_each(|e| *e = lms_index[e.to_u()]);
    }
    // -> sa[..lms_count] contains sorted LMS suffixes

    fill_empty(&mut sa[lms_count..]);

    fill_bucket(bounds, bucket, false);

    for i in (0..lms_count).rev() {
        let j = sa[i];
        sa[i] = empty();
        let b = &mut bucket[s[j.to_u()].to_u()];
        *b -= 1;
        sa[*b] = j;
    }
}

fn sais<C: Symbol, I: Index>(s: &[C], sa: &mut [I], ch_max: usize, depth: usize, recurse: Recurse) {
    debug_assert_eq!(s.len(), sa.len());

    if s.is_empty() {
        return;
    }

    let t = classify(s);

    let bounds = bucket_bounds(s, ch_max);

    let mut bucket = vec![0; ch_max + 1];

    // Stage 1: sort LMS-substrings and reduce the problem by at least 1/2
    let lms_count = put_lms_char(s, &t, &bounds, &mut bucket, sa);

    debug_assert!(lms_count <= s.len() / 2);

    induce(s, &t, &bounds, &mut bucket, sa);

    let name_count = reduce(s, &t, lms_count, sa);

    debug!(
        "level {}: n={} alphabet={} lms={} names={}",
        depth,
        s.len(),
        ch_max + 1,
        lms_count,
        name_count
    );

    // Stage 2: sort the suffixes of the reduced string
    {
        let (sa1, s1) = split_at_same_len_mut(sa, lms_count);

        if name_count < lms_count || (recurse == Recurse::Always && lms_count > 0) {
            sais::<I, I>(s1, sa1, name_count - 1, depth + 1, recurse);
        } else {
            // names are unique, so a name is the rank of its suffix
            for (i, c) in s1.iter().enumerate() {
                sa1[c.to_u()] = I::of_u(i);
            }
        }
    }

    // Stage 3: induce the whole suffix array from the sorted LMS suffixes
    put_lms_suffix(s, &t, lms_count, &bounds, &mut bucket, sa);

    induce(s, &t, &bounds, &mut bucket, sa);
}

/// Construct suffix array into a caller-supplied buffer.
///
/// Runs in O(N+|Σ|) time. Only `s[..n]` is read and only `sa[..n]` is written, so larger buffers
/// can be reused across calls.
/// # Arguments
/// - `s`: Input string
/// - `sa`: Output suffix array
/// - `n`: Length of the input
/// - `ch_max`: Largest symbol value that may occur in `s[..n]`
/// # Panics
/// Panics if `ch_max` is `usize::MAX`, a buffer is shorter than `n`, a symbol exceeds `ch_max`
/// or `n - 1` does not fit into `I`.
/// # Example
/// ```
/// use sais;
///
/// let s = b"abracadabra";
///
/// let mut sa = vec![0i32; 16];
///
/// sais::construct(s, &mut sa, s.len(), u8::MAX as usize);
///
/// assert_eq!(sa[..11], [10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
/// ```
#[requires(ch_max < usize::MAX, "`ch_max + 1` buckets fit into `usize`")]
#[requires(s.len() >= n, "`s` has at least `n` characters")]
#[requires(sa.len() >= n, "`sa` has at least `n` cells")]
#[requires(n == 0 || I::max_value().to_usize().map_or(false, |m| m >= n - 1), "indexes of `s` fit into `I`")]
#[requires(s.iter().take(n).all(|c| c.to_u() <= ch_max), "characters of `s` are at most `ch_max`")]
pub fn construct<C: Symbol, I: Index>(s: &[C], sa: &mut [I], n: usize, ch_max: usize) {
    trace!("construct: n={} ch_max={}", n, ch_max);

    sais(&s[..n], &mut sa[..n], ch_max, 0, Recurse::OnDuplicateNames);
}

/// Build suffix array.
///
/// Runs in O(N+|Σ|) time. Every character of `s` must be at most `ch_max`.
/// # Example
/// ```
/// let sa = sais::build(b"mmiissiissiippii", u8::MAX as usize);
///
/// assert_eq!(sa, vec![15, 14, 10, 6, 2, 11, 7, 3, 1, 0, 13, 12, 9, 5, 8, 4]);
/// ```
pub fn build<C: Symbol>(s: &[C], ch_max: usize) -> Vec<isize> {
    let mut sa = vec![0isize; s.len()];

    construct(s, &mut sa, s.len(), ch_max);

    sa
}
