//! Combination approvals: one approved artifact covering the full
//! cross-product of a set of input ranges.
//!
//! Each combination becomes one line of the artifact, `(in1, in2, ...) =>
//! result`, rendered in the cartesian engine's enumeration order, then the
//! whole artifact goes through the standard verification flow. Growing an
//! input range later extends the artifact instead of multiplying test
//! functions.

use std::fmt::{self, Write as _};

use crate::approvals;
use crate::cartesian::cartesian_product;
use crate::errors::ApprovalResult;
use crate::namers::ApprovalNamer;
use crate::options::Options;

/// A tuple of range references whose cross-product can be rendered through a
/// converter into artifact lines. Implemented for 1 through 8 ranges;
/// range items must be `Display` (they appear on the input side of each
/// line) and `Clone` (the converter consumes its own copies).
pub trait CombinationSet<F> {
    fn render(self, converter: &mut F, out: &mut String);
}

/// Verify one artifact containing every combination of `ranges`, each line
/// holding the inputs and the converter's output for them.
///
/// ```no_run
/// use greenlight::combinations::verify_all_combinations;
/// use greenlight::namers::TestNamer;
/// use greenlight::options::Options;
///
/// let namer = TestNamer::new("tests/approvals", "volume_grid");
/// let widths = vec![1u32, 2];
/// let heights = vec![10u32, 20, 30];
/// verify_all_combinations(
///     &namer,
///     &Options::default(),
///     |w: &u32, h: &u32| w * h,
///     (&widths, &heights),
/// )
/// .unwrap();
/// ```
pub fn verify_all_combinations<F, Ranges>(
    namer: &dyn ApprovalNamer,
    options: &Options,
    mut converter: F,
    ranges: Ranges,
) -> ApprovalResult<()>
where
    Ranges: CombinationSet<F>,
{
    let mut artifact = String::new();
    ranges.render(&mut converter, &mut artifact);
    approvals::verify(&artifact, namer, options)
}

macro_rules! combination_set_impls {
    ($($r:ident $R:ident),+) => {
        impl<'r, F, Out, $($R: ?Sized),+> CombinationSet<F> for ($(&'r $R,)+)
        where
            $(
                &'r $R: IntoIterator,
                <&'r $R as IntoIterator>::Item: Clone + fmt::Display,
            )+
            F: FnMut($(<&'r $R as IntoIterator>::Item),+) -> Out,
            Out: fmt::Display,
        {
            fn render(self, converter: &mut F, out: &mut String) {
                cartesian_product(
                    &mut |$($r),+| {
                        let result = converter($(Clone::clone(&$r)),+);
                        let inputs = [$(format!("{}", $r)),+];
                        let _ = writeln!(out, "({}) => {}", inputs.join(", "), result);
                    },
                    self,
                );
            }
        }
    };
}

combination_set_impls!(r1 R1);
combination_set_impls!(r1 R1, r2 R2);
combination_set_impls!(r1 R1, r2 R2, r3 R3);
combination_set_impls!(r1 R1, r2 R2, r3 R3, r4 R4);
combination_set_impls!(r1 R1, r2 R2, r3 R3, r4 R4, r5 R5);
combination_set_impls!(r1 R1, r2 R2, r3 R3, r4 R4, r5 R5, r6 R6);
combination_set_impls!(r1 R1, r2 R2, r3 R3, r4 R4, r5 R5, r6 R6, r7 R7);
combination_set_impls!(r1 R1, r2 R2, r3 R3, r4 R4, r5 R5, r6 R6, r7 R7, r8 R8);
