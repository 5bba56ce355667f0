//! Numeric helpers: sine easing for fade weights, closed-form quadratic and
//! cubic (Cardano) root solving used to invert a cubic Bezier's time mapping,
//! and a positive modulo for loop wrapping.

use std::f32::consts::PI;

/// Coefficient magnitude below which a polynomial degree is treated as degenerate.
pub(crate) const EPSILON: f32 = 1e-5;

/// Sine-based fade curve: monotonic, C1-continuous, clamped to [0,1].
#[inline]
pub fn ease_sine(value: f32) -> f32 {
    if value < 0.0 {
        return 0.0;
    }
    if value > 1.0 {
        return 1.0;
    }
    0.5 - 0.5 * (value * PI).cos()
}

/// Larger root of `a*x^2 + b*x + c = 0`, degrading to the linear and constant
/// closed forms when leading coefficients vanish. No clamping; callers clamp
/// into their valid range.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> f32 {
    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return -c;
        }
        return -c / b;
    }
    (-b + (b * b - 4.0 * a * c).max(0.0).sqrt()) / (2.0 * a)
}

#[inline]
fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Solve `a*t^3 + b*t^2 + c*t + d = 0` for the root meaningful as a Bezier
/// time parameter, clamped to [0,1].
///
/// When multiple real roots exist, a root near the segment center is
/// preferred (well-formed animation data keeps the interior root there);
/// otherwise roots are tried in closed-form order. A near-zero cubic
/// coefficient degrades to the quadratic solver, so finite inputs from
/// x-monotonic control points never produce NaN.
pub fn solve_cubic_bezier_t(a: f32, b: f32, c: f32, d: f32) -> f32 {
    if a.abs() < EPSILON {
        return clamp01(solve_quadratic(b, c, d));
    }

    let ba = b / a;
    let ca = c / a;
    let da = d / a;

    // Depressed cubic t^3 + p*t + q = 0 via t -> t - ba/3.
    let p = (3.0 * ca - ba * ba) / 3.0;
    let p3 = p / 3.0;
    let q = (2.0 * ba * ba * ba - 9.0 * ba * ca + 27.0 * da) / 27.0;
    let q2 = q / 2.0;
    let discriminant = q2 * q2 + p3 * p3 * p3;

    let center = 0.5;
    let threshold = center + 0.01;

    if discriminant < 0.0 {
        // Three real roots: trigonometric form.
        let mp3 = -p / 3.0;
        let mp33 = mp3 * mp3 * mp3;
        let r = mp33.sqrt();
        let t = (-q / (2.0 * r)).clamp(-1.0, 1.0);
        let phi = t.acos();
        let t1 = 2.0 * r.cbrt();

        let root1 = t1 * (phi / 3.0).cos() - ba / 3.0;
        if (root1 - center).abs() < threshold {
            return clamp01(root1);
        }
        let root2 = t1 * ((phi + 2.0 * PI) / 3.0).cos() - ba / 3.0;
        if (root2 - center).abs() < threshold {
            return clamp01(root2);
        }
        let root3 = t1 * ((phi + 4.0 * PI) / 3.0).cos() - ba / 3.0;
        return clamp01(root3);
    }

    if discriminant == 0.0 {
        // Double root.
        let u1 = if q2 < 0.0 { (-q2).cbrt() } else { -(q2.cbrt()) };
        let root1 = 2.0 * u1 - ba / 3.0;
        if (root1 - center).abs() < threshold {
            return clamp01(root1);
        }
        return clamp01(-u1 - ba / 3.0);
    }

    // Single real root.
    let sd = discriminant.sqrt();
    let u1 = (sd - q2).cbrt();
    clamp01(u1 - (sd + q2).cbrt() - ba / 3.0)
}

/// Positive modulo: result in [0, b) for b > 0.
pub(crate) fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}
