//! Orientation codes and the coverage-stable combination rule.
//!
//! `orientation` is a 2-bit strand-pair code:
//!
//! | code | `from` strand | `to` strand | wire form |
//! |------|---------------|-------------|-----------|
//! | 0    | reverse       | reverse     | `- -`     |
//! | 1    | forward       | reverse     | `+ -`     |
//! | 2    | reverse       | forward     | `- +`     |
//! | 3    | forward       | forward     | `+ +`     |

use std::fmt;

/// A 2-bit strand-pair code, always in `{0, 1, 2, 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation(u8);

impl Orientation {
    /// Build an orientation from a raw code.
    ///
    /// # Panics
    /// Panics if `code` is not in `0..4` — a bad orientation is a
    /// programmer-contract violation, not a recoverable error.
    pub fn new(code: u32) -> Self {
        assert!(
            code < 4,
            "tried to build an orientation with a rubbish code {code} which should be < 4"
        );
        Self(code as u8)
    }

    /// The raw 2-bit code.
    pub fn code(self) -> u32 {
        self.0 as u32
    }

    /// `from`-side strand: `true` = forward, `false` = reverse (bit 0).
    pub fn from_forward(self) -> bool {
        self.0 % 2 == 1
    }

    /// `to`-side strand: `true` = forward, `false` = reverse (bit 1).
    pub fn to_forward(self) -> bool {
        self.0 > 1
    }

    /// `rev_orient(o) = (~o) & 0b11`: the orientation of the same edge
    /// traversed from `to` to `from`.
    pub fn reversed(self) -> Self {
        Self((!self.0) & 0b11)
    }

    /// Wire-visible strand sign for the `from` endpoint: `+` or `-`.
    pub fn from_sign(self) -> char {
        if self.from_forward() {
            '+'
        } else {
            '-'
        }
    }

    /// Wire-visible strand sign for the `to` endpoint: `+` or `-`.
    pub fn to_sign(self) -> char {
        if self.to_forward() {
            '+'
        } else {
            '-'
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orientation of the edge created when two consecutive edges `(f, t)` are
/// collapsed into a single shortcut edge across their shared junction node.
///
/// Two candidate formulas, `nice` and `fix`, disagree on some inputs; this
/// always commits to `fix` and logs a warning on disagreement rather than
/// "correcting" to `nice`, since silently switching formulas here would
/// change downstream coverage and edge identity.
pub fn combine_orientations(f: Orientation, t: Orientation) -> Orientation {
    let f = f.code();
    let t = t.code();
    let nice = f + t - 3 * u32::from(f > 1);
    let fix = u32::from(f % 2 == 1) | (2 * u32::from(t > 1));
    if nice != fix {
        tracing::warn!(
            f, t, nice, fix,
            "combine_orientations: nice and fix formulas disagree, committing to fix"
        );
    }
    Orientation::new(fix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn round_trip(#[case] code: u32) {
        // reversing an orientation twice must return it unchanged
        let o = Orientation::new(code);
        assert_eq!(o.reversed().reversed(), o);
    }

    #[test]
    #[should_panic(expected = "rubbish code")]
    fn rejects_bad_code() {
        Orientation::new(4);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 1, 1)]
    #[case(3, 3, 3)]
    #[case(1, 2, 3)]
    fn combine_matches_fix(#[case] f: u32, #[case] t: u32, #[case] expect: u32) {
        let got = combine_orientations(Orientation::new(f), Orientation::new(t));
        assert_eq!(got.code(), expect);
    }

    #[test]
    fn orientation_signs_match_wire_table() {
        assert_eq!((Orientation::new(0).from_sign(), Orientation::new(0).to_sign()), ('-', '-'));
        assert_eq!((Orientation::new(1).from_sign(), Orientation::new(1).to_sign()), ('+', '-'));
        assert_eq!((Orientation::new(2).from_sign(), Orientation::new(2).to_sign()), ('-', '+'));
        assert_eq!((Orientation::new(3).from_sign(), Orientation::new(3).to_sign()), ('+', '+'));
    }
}
