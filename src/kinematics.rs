use nalgebra::Vector2;

/// `a - b`, componentwise.
#[must_use]
pub fn difference(a: &Vector2<f64>, b: &Vector2<f64>) -> Vector2<f64> {
    a - b
}

/// Euclidean norm of `v`.
#[must_use]
pub fn magnitude(v: &Vector2<f64>) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_is_componentwise() {
        let d = difference(&Vector2::new(3., 1.), &Vector2::new(1., 4.));
        assert_eq!(d, Vector2::new(2., -3.));
    }

    #[test]
    fn magnitude_of_vectors() {
        assert_eq!(magnitude(&Vector2::new(3., 4.)), 5.);
        assert_eq!(magnitude(&Vector2::zeros()), 0.);
    }
}
