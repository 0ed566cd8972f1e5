//! Curve and style selection
//!
//! A [`Curve`] names a family of easing functions and a [`Style`] picks
//! which end of the movement is eased. Together they select one of the
//! functions in [`super::functions`].

use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::functions::*;

/// Easing function signature
pub type EaseFn = fn(f32) -> f32;

/// Easing curve family
///
/// The discriminants are the numeric curve identifiers accepted in config
/// files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Curve {
    #[default]
    Cubic = 1,
    Quadratic = 2,
    Quartic = 3,
    Quintic = 4,
    Sine = 5,
    Circular = 6,
    Exponential = 7,
    Elastic = 8,
    /// Back easing: pulls away before moving, or overshoots before settling
    Overshoot = 9,
    Bounce = 10,
}

/// Which part of the movement the curve shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Style {
    /// Fast start, slow arrival
    #[default]
    Out = 0,
    /// Slow start, fast arrival
    In = 1,
    /// Slow at both ends
    InOut = 2,
}

/// Errors converting identifiers or names into a curve or style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectError {
    /// Numeric identifier outside the known range
    UnknownId(u8),
    /// Name does not match any variant
    UnknownName,
}

impl Curve {
    /// All curve families, in identifier order
    pub const ALL: [Curve; 10] = [
        Curve::Cubic,
        Curve::Quadratic,
        Curve::Quartic,
        Curve::Quintic,
        Curve::Sine,
        Curve::Circular,
        Curve::Exponential,
        Curve::Elastic,
        Curve::Overshoot,
        Curve::Bounce,
    ];

    /// Numeric identifier
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Curve::Cubic => "cubic",
            Curve::Quadratic => "quadratic",
            Curve::Quartic => "quartic",
            Curve::Quintic => "quintic",
            Curve::Sine => "sine",
            Curve::Circular => "circular",
            Curve::Exponential => "exponential",
            Curve::Elastic => "elastic",
            Curve::Overshoot => "overshoot",
            Curve::Bounce => "bounce",
        }
    }

    /// Look up the easing function for a style
    pub fn function(self, style: Style) -> EaseFn {
        match self {
            Curve::Quadratic => match style {
                Style::In => ease_in_quadratic,
                Style::Out => ease_out_quadratic,
                Style::InOut => ease_in_out_quadratic,
            },
            Curve::Cubic => match style {
                Style::In => ease_in_cubic,
                Style::Out => ease_out_cubic,
                Style::InOut => ease_in_out_cubic,
            },
            Curve::Quartic => match style {
                Style::In => ease_in_quartic,
                Style::Out => ease_out_quartic,
                Style::InOut => ease_in_out_quartic,
            },
            Curve::Quintic => match style {
                Style::In => ease_in_quintic,
                Style::Out => ease_out_quintic,
                Style::InOut => ease_in_out_quintic,
            },
            Curve::Sine => match style {
                Style::In => ease_in_sine,
                Style::Out => ease_out_sine,
                Style::InOut => ease_in_out_sine,
            },
            Curve::Circular => match style {
                Style::In => ease_in_circular,
                Style::Out => ease_out_circular,
                Style::InOut => ease_in_out_circular,
            },
            Curve::Exponential => match style {
                Style::In => ease_in_exponential,
                Style::Out => ease_out_exponential,
                Style::InOut => ease_in_out_exponential,
            },
            Curve::Elastic => match style {
                Style::In => ease_in_elastic,
                Style::Out => ease_out_elastic,
                Style::InOut => ease_in_out_elastic,
            },
            Curve::Overshoot => match style {
                Style::In => ease_in_back,
                Style::Out => ease_out_back,
                Style::InOut => ease_in_out_back,
            },
            Curve::Bounce => match style {
                Style::In => ease_in_bounce,
                Style::Out => ease_out_bounce,
                Style::InOut => ease_in_out_bounce,
            },
        }
    }

    /// Evaluate the curve at normalized progress `x`
    #[inline]
    pub fn evaluate(self, style: Style, x: f32) -> f32 {
        (self.function(style))(x)
    }

    /// Whether every style of this curve stays within [0, 1] and never
    /// moves backwards
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Curve::Elastic | Curve::Overshoot | Curve::Bounce)
    }
}

impl TryFrom<u8> for Curve {
    type Error = SelectError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Curve::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or(SelectError::UnknownId(id))
    }
}

impl FromStr for Curve {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "back" is the common name for the overshoot family
        if s.eq_ignore_ascii_case("back") {
            return Ok(Curve::Overshoot);
        }
        Curve::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(SelectError::UnknownName)
    }
}

impl Style {
    /// All styles, in motion-code order
    pub const ALL: [Style; 3] = [Style::Out, Style::In, Style::InOut];

    /// Numeric motion code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Style::Out => "out",
            Style::In => "in",
            Style::InOut => "in-out",
        }
    }
}

impl TryFrom<u8> for Style {
    type Error = SelectError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Style::Out),
            1 => Ok(Style::In),
            2 => Ok(Style::InOut),
            other => Err(SelectError::UnknownId(other)),
        }
    }
}

impl FromStr for Style {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("out") {
            Ok(Style::Out)
        } else if s.eq_ignore_ascii_case("in") {
            Ok(Style::In)
        } else if s.eq_ignore_ascii_case("in-out")
            || s.eq_ignore_ascii_case("in_out")
            || s.eq_ignore_ascii_case("inout")
        {
            Ok(Style::InOut)
        } else {
            Err(SelectError::UnknownName)
        }
    }
}

/// Evaluate `curve` with `style` at normalized progress `x`
#[inline]
pub fn ease(curve: Curve, style: Style, x: f32) -> f32 {
    curve.evaluate(style, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_endpoints_for_every_pair() {
        for curve in Curve::ALL {
            for style in Style::ALL {
                let start = curve.evaluate(style, 0.0);
                let end = curve.evaluate(style, 1.0);
                assert!(
                    start.abs() <= EPS,
                    "{:?}/{:?} at 0 gave {}",
                    curve,
                    style,
                    start
                );
                assert!(
                    (end - 1.0).abs() <= EPS,
                    "{:?}/{:?} at 1 gave {}",
                    curve,
                    style,
                    end
                );
            }
        }
    }

    #[test]
    fn test_monotonic_families_never_reverse() {
        for curve in Curve::ALL.into_iter().filter(|c| c.is_monotonic()) {
            for style in Style::ALL {
                let mut prev = curve.evaluate(style, 0.0);
                for i in 1..=1000 {
                    let y = curve.evaluate(style, i as f32 / 1000.0);
                    assert!(
                        y >= prev - EPS,
                        "{:?}/{:?} reversed at step {}",
                        curve,
                        style,
                        i
                    );
                    prev = y;
                }
            }
        }
    }

    #[test]
    fn test_lookup_selects_matching_formula() {
        let samples = [0.1, 0.3, 0.7, 0.9];
        for x in samples {
            assert_eq!(Curve::Cubic.function(Style::Out)(x), ease_out_cubic(x));
            assert_eq!(Curve::Bounce.function(Style::In)(x), ease_in_bounce(x));
            assert_eq!(Curve::Overshoot.function(Style::InOut)(x), ease_in_out_back(x));
            assert_eq!(Curve::Quartic.function(Style::Out)(x), ease_out_quartic(x));
            assert_eq!(ease(Curve::Sine, Style::In, x), ease_in_sine(x));
        }
    }

    #[test]
    fn test_curve_ids_round_trip() {
        for curve in Curve::ALL {
            assert_eq!(Curve::try_from(curve.id()), Ok(curve));
        }
        assert_eq!(Curve::try_from(0), Err(SelectError::UnknownId(0)));
        assert_eq!(Curve::try_from(11), Err(SelectError::UnknownId(11)));
        assert_eq!(Curve::try_from(1), Ok(Curve::Cubic));
        assert_eq!(Curve::try_from(10), Ok(Curve::Bounce));
    }

    #[test]
    fn test_style_codes() {
        assert_eq!(Style::try_from(0), Ok(Style::Out));
        assert_eq!(Style::try_from(1), Ok(Style::In));
        assert_eq!(Style::try_from(2), Ok(Style::InOut));
        assert_eq!(Style::try_from(3), Err(SelectError::UnknownId(3)));
        assert_eq!(Style::default(), Style::Out);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Cubic".parse::<Curve>(), Ok(Curve::Cubic));
        assert_eq!(" bounce ".parse::<Curve>(), Ok(Curve::Bounce));
        assert_eq!("back".parse::<Curve>(), Ok(Curve::Overshoot));
        assert_eq!("linear".parse::<Curve>(), Err(SelectError::UnknownName));

        assert_eq!("in".parse::<Style>(), Ok(Style::In));
        assert_eq!("InOut".parse::<Style>(), Ok(Style::InOut));
        assert_eq!("in_out".parse::<Style>(), Ok(Style::InOut));
        assert_eq!("sideways".parse::<Style>(), Err(SelectError::UnknownName));

        for curve in Curve::ALL {
            assert_eq!(curve.name().parse::<Curve>(), Ok(curve));
        }
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>(), Ok(style));
        }
    }

    proptest! {
        #[test]
        fn prop_bounce_in_mirrors_out(x in 0.0f32..=1.0) {
            prop_assert_eq!(
                Curve::Bounce.evaluate(Style::In, x),
                1.0 - Curve::Bounce.evaluate(Style::Out, 1.0 - x)
            );
        }

        #[test]
        fn prop_monotonic_pairs_are_ordered(
            a in 0.0f32..=1.0,
            b in 0.0f32..=1.0,
            curve_idx in 0usize..10,
            style_idx in 0usize..3,
        ) {
            let curve = Curve::ALL[curve_idx];
            let style = Style::ALL[style_idx];
            prop_assume!(curve.is_monotonic());

            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve.evaluate(style, lo) <= curve.evaluate(style, hi) + EPS);
        }

        #[test]
        fn prop_monotonic_families_stay_in_unit_range(
            x in 0.0f32..=1.0,
            curve_idx in 0usize..10,
            style_idx in 0usize..3,
        ) {
            let curve = Curve::ALL[curve_idx];
            prop_assume!(curve.is_monotonic());

            let y = curve.evaluate(Style::ALL[style_idx], x);
            prop_assert!((-EPS..=1.0 + EPS).contains(&y));
        }
    }
}
