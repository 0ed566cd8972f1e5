//! Closed-form easing functions
//!
//! Each function maps a normalized progress `x` in [0, 1] to a normalized
//! position along the curve. Callers clamp `x`; values outside the range are
//! extrapolated by the same formula.
//!
//! The formulas are kept in their literal form, `powf` calls included, and
//! must stay that way: commanded positions are compared sample for sample.
//! Elastic and back curves leave [0, 1] on purpose.

use core::f32::consts::{FRAC_PI_2, PI};

use libm::{cosf, powf, sinf, sqrtf};

// Quadratic

/// y = x^2
pub fn ease_in_quadratic(x: f32) -> f32 {
    powf(x, 2.0)
}

/// y = -x^2 + 2x
pub fn ease_out_quadratic(x: f32) -> f32 {
    -(x * (x - 2.0))
}

/// Piecewise quadratic
///
/// y = (1/2)((2x)^2) on [0, 0.5), y = -(1/2)((2x-1)(2x-3) - 1) on [0.5, 1]
pub fn ease_in_out_quadratic(x: f32) -> f32 {
    if x < 0.5 {
        2.0 * powf(x, 2.0)
    } else {
        (-2.0 * powf(x, 2.0)) + (4.0 * x) - 1.0
    }
}

// Cubic

/// y = x^3
pub fn ease_in_cubic(x: f32) -> f32 {
    powf(x, 3.0)
}

/// y = (x - 1)^3 + 1
pub fn ease_out_cubic(x: f32) -> f32 {
    powf(x - 1.0, 3.0) + 1.0
}

/// Piecewise cubic
///
/// y = (1/2)((2x)^3) on [0, 0.5), y = (1/2)((2x-2)^3 + 2) on [0.5, 1]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * powf(x, 3.0)
    } else {
        0.5 * powf((2.0 * x) - 2.0, 3.0) + 1.0
    }
}

// Quartic

/// y = x^4
pub fn ease_in_quartic(x: f32) -> f32 {
    powf(x, 4.0)
}

/// y = 1 - (x - 1)^4, written as (x - 1)^3 (1 - x) + 1
pub fn ease_out_quartic(x: f32) -> f32 {
    powf(x - 1.0, 3.0) * (1.0 - x) + 1.0
}

/// Piecewise quartic
///
/// y = (1/2)((2x)^4) on [0, 0.5), y = -(1/2)((2x-2)^4 - 2) on [0.5, 1]
pub fn ease_in_out_quartic(x: f32) -> f32 {
    if x < 0.5 {
        8.0 * powf(x, 4.0)
    } else {
        -8.0 * powf(x - 1.0, 4.0) + 1.0
    }
}

// Quintic

/// y = x^5
pub fn ease_in_quintic(x: f32) -> f32 {
    powf(x, 5.0)
}

/// y = (x - 1)^5 + 1
pub fn ease_out_quintic(x: f32) -> f32 {
    powf(x - 1.0, 5.0) + 1.0
}

/// Piecewise quintic
///
/// y = (1/2)((2x)^5) on [0, 0.5), y = (1/2)((2x-2)^5 + 2) on [0.5, 1]
pub fn ease_in_out_quintic(x: f32) -> f32 {
    if x < 0.5 {
        16.0 * powf(x, 5.0)
    } else {
        0.5 * powf((2.0 * x) - 2.0, 5.0) + 1.0
    }
}

// Sine

/// Quarter cycle of a sine wave, shifted to start flat
pub fn ease_in_sine(x: f32) -> f32 {
    sinf((x - 1.0) * FRAC_PI_2) + 1.0
}

/// Quarter cycle of a sine wave
pub fn ease_out_sine(x: f32) -> f32 {
    sinf(x * FRAC_PI_2)
}

/// Half cycle of a cosine wave
pub fn ease_in_out_sine(x: f32) -> f32 {
    0.5 * (1.0 - cosf(x * PI))
}

// Circular

/// Shifted quadrant IV of the unit circle
pub fn ease_in_circular(x: f32) -> f32 {
    1.0 - sqrtf(1.0 - powf(x, 2.0))
}

/// Shifted quadrant II of the unit circle
pub fn ease_out_circular(x: f32) -> f32 {
    sqrtf((2.0 - x) * x)
}

/// Piecewise circular
///
/// y = (1/2)(1 - sqrt(1 - 4x^2)) on [0, 0.5),
/// y = (1/2)(sqrt(-(2x - 3)(2x - 1)) + 1) on [0.5, 1]
pub fn ease_in_out_circular(x: f32) -> f32 {
    if x < 0.5 {
        0.5 * (1.0 - sqrtf(1.0 - 4.0 * powf(x, 2.0)))
    } else {
        0.5 * (sqrtf(-((2.0 * x) - 3.0) * ((2.0 * x) - 1.0)) + 1.0)
    }
}

// Exponential, base 2

/// y = 2^(10(x - 1)), pinned to 0 at x = 0
pub fn ease_in_exponential(x: f32) -> f32 {
    if x == 0.0 {
        x
    } else {
        powf(2.0, 10.0 * (x - 1.0))
    }
}

/// y = 1 - 2^(-10x), pinned to 1 at x = 1
pub fn ease_out_exponential(x: f32) -> f32 {
    if x == 1.0 {
        x
    } else {
        1.0 - powf(2.0, -10.0 * x)
    }
}

/// Piecewise exponential, pinned at both ends
///
/// y = (1/2)2^(10(2x - 1)) on [0, 0.5), y = -(1/2)2^(-10(2x - 1)) + 1 on [0.5, 1]
pub fn ease_in_out_exponential(x: f32) -> f32 {
    if x == 0.0 || x == 1.0 {
        return x;
    }

    if x < 0.5 {
        0.5 * powf(2.0, (20.0 * x) - 10.0)
    } else {
        -0.5 * powf(2.0, (-20.0 * x) + 10.0) + 1.0
    }
}

// Elastic

/// Damped sine wave y = sin(13pi/2 x) 2^(10(x - 1))
pub fn ease_in_elastic(x: f32) -> f32 {
    sinf(13.0 * FRAC_PI_2 * x) * powf(2.0, 10.0 * (x - 1.0))
}

/// Damped sine wave y = sin(-13pi/2 (x + 1)) 2^(-10x) + 1
pub fn ease_out_elastic(x: f32) -> f32 {
    sinf(-13.0 * FRAC_PI_2 * (x + 1.0)) * powf(2.0, -10.0 * x) + 1.0
}

/// Piecewise damped sine wave, both halves at double rate
pub fn ease_in_out_elastic(x: f32) -> f32 {
    if x < 0.5 {
        0.5 * sinf(13.0 * FRAC_PI_2 * (2.0 * x)) * powf(2.0, 10.0 * ((2.0 * x) - 1.0))
    } else {
        0.5 * (sinf(-13.0 * FRAC_PI_2 * ((2.0 * x - 1.0) + 1.0))
            * powf(2.0, -10.0 * (2.0 * x - 1.0))
            + 2.0)
    }
}

// Overshoot (back)

/// Overshooting cubic y = x^3 - x sin(x pi)
pub fn ease_in_back(x: f32) -> f32 {
    powf(x, 3.0) - x * sinf(x * PI)
}

/// Overshooting cubic y = 1 - ((1 - x)^3 - (1 - x) sin((1 - x) pi))
pub fn ease_out_back(x: f32) -> f32 {
    1.0 - (powf(1.0 - x, 3.0) - (1.0 - x) * sinf((1.0 - x) * PI))
}

/// Piecewise overshooting cubic, halved and mirrored
pub fn ease_in_out_back(x: f32) -> f32 {
    if x < 0.5 {
        0.5 * (powf(2.0 * x, 3.0) - 2.0 * x * sinf(2.0 * x * PI))
    } else {
        let f = 1.0 - (2.0 * x - 1.0);
        0.5 * (1.0 - (powf(f, 3.0) - f * sinf(f * PI))) + 0.5
    }
}

// Bounce

/// Mirror image of [`ease_out_bounce`]
pub fn ease_in_bounce(x: f32) -> f32 {
    1.0 - ease_out_bounce(1.0 - x)
}

/// Four parabolic bounces settling at 1
///
/// The last segment is additionally scaled by `x`, unlike the other three.
pub fn ease_out_bounce(x: f32) -> f32 {
    if x < 1.0 / 2.75 {
        7.5625 * powf(x, 2.0)
    } else if x < 2.0 / 2.75 {
        7.5625 * powf(x - (1.5 / 2.75), 2.0) + 0.75
    } else if x < 2.5 / 2.75 {
        7.5625 * powf(x - (2.25 / 2.75), 2.0) + 0.9375
    } else {
        7.5625 * powf(x - (2.625 / 2.75), 2.0) * x + 0.984375
    }
}

/// Bounce in on the first half, bounce out on the second
pub fn ease_in_out_bounce(x: f32) -> f32 {
    if x < 0.5 {
        0.5 * ease_in_bounce(x * 2.0)
    } else {
        0.5 * ease_out_bounce(x * 2.0 - 1.0) + 0.5
    }
}
