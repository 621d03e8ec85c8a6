//! Timing functions (easing curves) for tweens.
//!
//! Every curve is a pure function from progress in `[0, 1]` to an
//! interpolation factor. Factors may leave `[0, 1]` transiently for
//! overshoot curves such as [`TimingFunction::BackOut`].
//!
//! ## Named curves
//!
//! [`TimingFunction::from_str`](std::str::FromStr) accepts the vocabulary
//! the page layer already speaks:
//!
//! - `none`, `linear`
//! - `ease-in`, `ease-out`, `ease-in-out`, `ease-out-cubic`
//! - `power1` .. `power4`, with `.in`, `.out` or `.inOut` (bare means `.out`)
//! - `back`, `back.in(s)`, `back.out(s)` (default overshoot 1.70158)
//! - `cubic-bezier(x1, y1, x2, y2)`
//!
//! ```ignore
//! let pop: TimingFunction = "back.out(1.7)".parse()?;
//! assert!(pop.evaluate(0.6) > 1.0);
//! ```

use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConfigError;

/// Overshoot amount used by `back` curves when none is given.
pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

/// An easing curve.
#[derive(Clone)]
pub enum TimingFunction {
    Linear,
    /// Quadratic, starts slow
    EaseIn,
    /// Quadratic, ends slow
    EaseOut,
    /// Quadratic, slow at both ends
    EaseInOut,
    /// `t^p`
    PowerIn(f32),
    /// `1 - (1 - t)^p`
    PowerOut(f32),
    /// Symmetric power curve
    PowerInOut(f32),
    /// Pulls back below zero before accelerating
    BackIn(f32),
    /// Overshoots past one before settling, used for "pop" entrances
    BackOut(f32),
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Arbitrary curve, see [`TimingFunction::custom`]
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Ease-out cubic, the default deceleration for scroll reveals.
    pub const fn ease_out_cubic() -> Self {
        TimingFunction::PowerOut(3.0)
    }

    /// Map progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            TimingFunction::PowerIn(p) => t.powf(*p),
            TimingFunction::PowerOut(p) => 1.0 - (1.0 - t).powf(*p),
            TimingFunction::PowerInOut(p) => {
                if t < 0.5 {
                    (2.0 * t).powf(*p) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powf(*p) / 2.0
                }
            }
            TimingFunction::BackIn(s) => t * t * ((s + 1.0) * t - s),
            TimingFunction::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Wrap a closure as a curve. It receives clamped progress.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        TimingFunction::Linear
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::PowerIn(p) => write!(f, "PowerIn({})", p),
            TimingFunction::PowerOut(p) => write!(f, "PowerOut({})", p),
            TimingFunction::PowerInOut(p) => write!(f, "PowerInOut({})", p),
            TimingFunction::BackIn(s) => write!(f, "BackIn({})", s),
            TimingFunction::BackOut(s) => write!(f, "BackOut({})", s),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl FromStr for TimingFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let unknown = || ConfigError::UnknownEasing(name.to_string());

        match name {
            "none" | "linear" => return Ok(TimingFunction::Linear),
            "ease-in" => return Ok(TimingFunction::EaseIn),
            "ease-out" => return Ok(TimingFunction::EaseOut),
            "ease-in-out" => return Ok(TimingFunction::EaseInOut),
            "ease-out-cubic" => return Ok(TimingFunction::ease_out_cubic()),
            _ => {}
        }

        if let Some(args) = name
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let points = parse_args(args).ok_or_else(unknown)?;
            return match points.as_slice() {
                [x1, y1, x2, y2] => Ok(TimingFunction::CubicBezier(*x1, *y1, *x2, *y2)),
                _ => Err(unknown()),
            };
        }

        let (family, variant) = name.split_once('.').unwrap_or((name, "out"));

        if let Some(level) = family.strip_prefix("power") {
            // powerN is an (N+1)-degree polynomial
            let exponent = match level {
                "1" => 2.0,
                "2" => 3.0,
                "3" => 4.0,
                "4" => 5.0,
                _ => return Err(unknown()),
            };
            return match variant {
                "in" => Ok(TimingFunction::PowerIn(exponent)),
                "out" => Ok(TimingFunction::PowerOut(exponent)),
                "inOut" => Ok(TimingFunction::PowerInOut(exponent)),
                _ => Err(unknown()),
            };
        }

        if family == "back" {
            let (kind, overshoot) = match variant.split_once('(') {
                Some((kind, rest)) => {
                    let args = rest.strip_suffix(')').ok_or_else(unknown)?;
                    let values = parse_args(args).ok_or_else(unknown)?;
                    match values.as_slice() {
                        [s] => (kind, *s),
                        _ => return Err(unknown()),
                    }
                }
                None => (variant, DEFAULT_BACK_OVERSHOOT),
            };
            return match kind {
                "in" => Ok(TimingFunction::BackIn(overshoot)),
                "out" => Ok(TimingFunction::BackOut(overshoot)),
                _ => Err(unknown()),
            };
        }

        Err(unknown())
    }
}

fn parse_args(args: &str) -> Option<Vec<f32>> {
    args.split(',')
        .map(|a| a.trim().parse::<f32>().ok())
        .collect()
}

/// Solves x(u) = t for the curve parameter, then returns y(u).
/// Control x values are expected in `[0, 1]`.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut u = t;
    for _ in 0..8 {
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= (bezier_axis(u, x1, x2) - t) / slope;
    }
    bezier_axis(u, y1, y2)
}

/// One coordinate of a cubic bezier anchored at 0 and 1.
fn bezier_axis(u: f32, p1: f32, p2: f32) -> f32 {
    let v = 1.0 - u;
    3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u
}

fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let v = 1.0 - u;
    3.0 * v * v * p1 + 6.0 * v * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_endpoints_are_fixed() {
        let curves = [
            TimingFunction::EaseInOut,
            TimingFunction::ease_out_cubic(),
            TimingFunction::PowerInOut(4.0),
            TimingFunction::BackOut(DEFAULT_BACK_OVERSHOOT),
            TimingFunction::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ];
        for curve in curves {
            assert!(curve.evaluate(0.0).abs() < 1e-4, "{:?} at 0", curve);
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_ease_out_cubic() {
        let result = TimingFunction::ease_out_cubic().evaluate(0.5);
        assert!((result - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_back_out_overshoots() {
        let curve: TimingFunction = "back.out(1.7)".parse().unwrap();
        let peak = (1..100)
            .map(|i| curve.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "back.out should overshoot, peak {}", peak);
    }

    #[test]
    fn test_parse_power_names() {
        let out: TimingFunction = "power3.out".parse().unwrap();
        assert!(matches!(out, TimingFunction::PowerOut(p) if p == 4.0));
        let bare: TimingFunction = "power2".parse().unwrap();
        assert!(matches!(bare, TimingFunction::PowerOut(p) if p == 3.0));
        let in_out: TimingFunction = "power1.inOut".parse().unwrap();
        assert!(matches!(in_out, TimingFunction::PowerInOut(p) if p == 2.0));
    }

    #[test]
    fn test_parse_cubic_bezier() {
        let curve: TimingFunction = "cubic-bezier(0.76, 0, 0.24, 1)".parse().unwrap();
        assert!(matches!(curve, TimingFunction::CubicBezier(..)));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "elastic.out".parse::<TimingFunction>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownEasing("elastic.out".into()));
        assert!("power9.out".parse::<TimingFunction>().is_err());
        assert!("cubic-bezier(1, 2)".parse::<TimingFunction>().is_err());
    }
}
