//! Dense integer arc matrix.

/// A dense n×n matrix of integer arc values stored in row-major order.
///
/// The formulation precomputes every transit the engine may ask for into one
/// of these, so callbacks are plain array lookups.
///
/// # Examples
///
/// ```
/// use u_shipping::distance::ArcMatrix;
///
/// let m = ArcMatrix::from_fn(3, |from, to| (10 * from + to) as i64);
/// assert_eq!(m.get(2, 1), 21);
/// assert_eq!(m.get(0, 2), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcMatrix {
    data: Vec<i64>,
    size: usize,
}

impl ArcMatrix {
    /// Fills a matrix by evaluating `f(from, to)` for every pair.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> i64) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for from in 0..size {
            for to in 0..size {
                data.push(f(from, to));
            }
        }
        Self { data, size }
    }

    /// Returns the value of arc `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_row_major() {
        let m = ArcMatrix::from_fn(2, |i, j| (i * 2 + j) as i64);
        assert_eq!(m.get(0, 0), 0);
        assert_eq!(m.get(0, 1), 1);
        assert_eq!(m.get(1, 0), 2);
        assert_eq!(m.get(1, 1), 3);
    }

    #[test]
    fn test_from_fn_visits_every_pair_once() {
        let mut calls = 0;
        let m = ArcMatrix::from_fn(3, |i, j| {
            calls += 1;
            if i == j { 0 } else { 7 }
        });
        assert_eq!(calls, 9);
        assert_eq!(m.get(1, 1), 0);
        assert_eq!(m.get(2, 0), 7);
    }
}
