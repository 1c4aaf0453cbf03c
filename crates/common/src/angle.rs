use std::f32::consts::{PI, TAU};

/// Bring `angle` back into `(-PI, PI]` with at most one full turn of
/// correction. Callers advance angles by small per-frame deltas, so a single
/// correction is always enough.
pub fn wrap_once(angle: f32) -> f32 {
    if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

/// Fold an unbounded accumulated angle into `[0, TAU)`.
pub fn fold_turns(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_once_leaves_in_range_values() {
        assert_eq!(wrap_once(0.5), 0.5);
        assert_eq!(wrap_once(PI), PI);
        // The lower bound is open.
        assert_eq!(wrap_once(-PI), PI);
    }

    #[test]
    fn wrap_once_crosses_seam() {
        let wrapped = wrap_once(PI + 0.1);
        assert!((wrapped - (-PI + 0.1)).abs() < 1e-5);
        let wrapped = wrap_once(-PI - 0.1);
        assert!((wrapped - (PI - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn fold_turns_is_non_negative() {
        assert!((fold_turns(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((fold_turns(-1.0) - (TAU - 1.0)).abs() < 1e-5);
    }
}
