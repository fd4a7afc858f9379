//! Validated integer degree ranges for the `l`-indexed evaluators.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("degree range requires 0 <= lmin <= lmax, got lmin = {lmin}, lmax = {lmax}")]
pub struct InvalidDegreeRange {
    pub lmin: i32,
    pub lmax: i32,
}

/// Inclusive degree range `[lmin, lmax]` with `0 <= lmin <= lmax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeRange {
    lmin: i32,
    lmax: i32,
}

impl DegreeRange {
    pub fn new(lmin: i32, lmax: i32) -> Result<Self, InvalidDegreeRange> {
        if lmin < 0 || lmax < lmin {
            return Err(InvalidDegreeRange { lmin, lmax });
        }
        Ok(Self { lmin, lmax })
    }

    pub const fn lmin(self) -> i32 {
        self.lmin
    }

    pub const fn lmax(self) -> i32 {
        self.lmax
    }

    /// Number of degrees in the range, always at least one.
    pub const fn len(self) -> usize {
        (self.lmax - self.lmin + 1) as usize
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn degrees(self) -> impl Iterator<Item = i32> {
        self.lmin..=self.lmax
    }
}

#[cfg(test)]
mod tests {
    use super::DegreeRange;

    #[test]
    fn degree_range_rejects_negative_lmin_and_inverted_bounds() {
        assert!(DegreeRange::new(-1, 2).is_err());
        assert!(DegreeRange::new(3, 2).is_err());
        let error = DegreeRange::new(-4, -7).unwrap_err();
        assert_eq!(error.lmin, -4);
        assert_eq!(error.lmax, -7);
    }

    #[test]
    fn degree_range_len_is_inclusive() {
        let range = DegreeRange::new(2, 5).expect("valid range");
        assert_eq!(range.len(), 4);
        assert!(!range.is_empty());
        assert_eq!(range.degrees().collect::<Vec<_>>(), vec![2, 3, 4, 5]);

        let single = DegreeRange::new(0, 0).expect("valid range");
        assert_eq!(single.len(), 1);
        assert!(!single.is_empty());
    }
}
