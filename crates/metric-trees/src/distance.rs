//! Distance functions over [`Object`]s.

use crate::{Error, Object};

/// A pure function `d(a, b) -> non-negative real`, assumed to satisfy the
/// metric-space axioms (non-negativity, symmetry, identity of
/// indiscernibles, and the triangle inequality). Implementors are stateless
/// or hold read-only parameters, are `Send + Sync`, and are never mutated
/// once built — matching the core's single-threaded, synchronous build and
/// query phases, and permitting read-only sharing across concurrent
/// consumers.
pub trait Distance: Send + Sync {
    /// Evaluates the distance between `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `a` or `b` is not the kind of
    /// object this distance supports, or [`Error::Domain`] if a
    /// distance-specific precondition fails (unequal lengths, a missing
    /// weighted-edit score-table entry).
    fn eval(&self, a: &Object, b: &Object) -> Result<f64, Error>;

    /// A short, display-friendly name for this distance function.
    fn name(&self) -> &'static str;
}

/// The Minkowski family of distances (`t = 1, 2, infinity`) between
/// fixed-dimension real vectors.
#[derive(Debug, Clone, Copy)]
pub struct Minkowski {
    /// The order of the Minkowski distance.
    pub order: distances::vectors::MinkowskiOrder,
}

impl Distance for Minkowski {
    fn eval(&self, a: &Object, b: &Object) -> Result<f64, Error> {
        match (a, b) {
            (Object::Vector(x), Object::Vector(y)) => Ok(distances::vectors::minkowski(self.order, x, y)?),
            _ => Err(Error::TypeMismatch(format!("{} requires two vector objects", self.name()))),
        }
    }

    fn name(&self) -> &'static str {
        self.order.name()
    }
}

/// The Hamming distance between equal-length strings.
#[derive(Debug, Clone, Copy)]
pub struct Hamming;

impl Distance for Hamming {
    fn eval(&self, a: &Object, b: &Object) -> Result<f64, Error> {
        match (a, b) {
            (Object::Text(x), Object::Text(y)) => Ok(f64::from(distances::strings::hamming(x, y)?)),
            _ => Err(Error::TypeMismatch("Hamming requires two string objects".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "Hamming"
    }
}

/// Classical Levenshtein edit distance (unit insert/delete/substitute cost).
#[derive(Debug, Clone, Copy)]
pub struct Edit;

impl Distance for Edit {
    fn eval(&self, a: &Object, b: &Object) -> Result<f64, Error> {
        match (a, b) {
            (Object::Text(x), Object::Text(y)) => Ok(f64::from(distances::strings::edit(x, y))),
            _ => Err(Error::TypeMismatch("Edit requires two string objects".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "Edit"
    }
}

/// Weighted edit distance, scored against an arbitrary substitution/gap
/// table (see [`distances::strings::ScoreTable`]).
#[derive(Debug, Clone)]
pub struct WeightedEdit {
    /// The substitution/gap score table.
    pub scores: distances::strings::ScoreTable,
}

impl Distance for WeightedEdit {
    fn eval(&self, a: &Object, b: &Object) -> Result<f64, Error> {
        match (a, b) {
            (Object::Text(x), Object::Text(y)) => Ok(distances::strings::weighted_edit(x, y, &self.scores)?),
            _ => Err(Error::TypeMismatch("Weighted Edit Distance requires two string objects".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "Weighted Edit Distance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distances::vectors::MinkowskiOrder;

    #[test]
    fn minkowski_rejects_strings() {
        let d = Minkowski { order: MinkowskiOrder::Euclidean };
        let a = Object::Text("abc".to_string());
        let b = Object::Vector(vec![0.0]);
        assert!(matches!(d.eval(&a, &b), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn hamming_rejects_unequal_lengths() {
        let a = Object::Text("cat".to_string());
        let b = Object::Text("cats".to_string());
        assert!(matches!(Hamming.eval(&a, &b), Err(Error::Domain(_))));
    }

    #[test]
    fn edit_never_fails_on_strings() {
        let a = Object::Text("cat".to_string());
        let b = Object::Text("cut".to_string());
        assert_eq!(Edit.eval(&a, &b).unwrap(), 1.0);
    }
}
