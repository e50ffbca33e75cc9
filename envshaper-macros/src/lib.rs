use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Number of table intervals swept by one envelope phase.
const TABLE_SIZE: usize = 256;

/// Largest table value; the smallest is always zero.
const TABLE_PEAK: f64 = 32767.0;

/// Steepness used when an exponential curve is named without one.
const DEFAULT_STEEPNESS: f64 = 4.0;

/// Builds an envelope shape table at compile time from a curve description.
///
/// Expands to a `[i16; 257]` array literal: 256 intervals plus one guard
/// entry, so an interpolated lookup at the top index stays in range. Values
/// run from `0` at the start of the curve to `32767` at its end.
///
/// # Format
///
/// `<curve>[(<steepness>)]` where `curve` is one of:
/// - `linear`
/// - `exponential` - slow start, fast finish
/// - `inverted_exponential` - fast start, slow finish
/// - `s_curve` - smoothstep ease in/out
///
/// The exponential curves accept an optional positive steepness, default `4`.
///
/// # Examples
///
/// ```ignore
/// use envshaper::{ShapeTable, shape_table};
///
/// static SOFT: ShapeTable = ShapeTable::from_array(shape_table!("inverted_exponential(2.5)"));
/// static RAMP: ShapeTable = ShapeTable::from_array(shape_table!("linear"));
/// ```
#[proc_macro]
pub fn shape_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let spec = input.value();

    match parse_curve(&spec) {
        Ok(curve) => {
            let values = sample_curve(curve);
            let expanded = quote! {
                [#(#values),*]
            };
            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid shape '{}': {}", spec, e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Curve {
    Linear,
    Exponential(f64),
    InvertedExponential(f64),
    SCurve,
}

impl Curve {
    /// Maps `t` in [0, 1] onto [0, 1] with `f(0) = 0` and `f(1) = 1`.
    fn apply(self, t: f64) -> f64 {
        match self {
            Curve::Linear => t,
            Curve::Exponential(k) => ((k * t).exp() - 1.0) / (k.exp() - 1.0),
            Curve::InvertedExponential(k) => (1.0 - (-k * t).exp()) / (1.0 - (-k).exp()),
            Curve::SCurve => t * t * (3.0 - 2.0 * t),
        }
    }
}

fn parse_curve(s: &str) -> Result<Curve, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty string".to_string());
    }

    let (name, steepness) = match s.find('(') {
        Some(open) => {
            let close = s
                .rfind(')')
                .filter(|&close| close == s.len() - 1 && close > open)
                .ok_or_else(|| "unclosed steepness parameter".to_string())?;
            let value = s[open + 1..close].trim();
            let steepness = value
                .parse::<f64>()
                .map_err(|_| format!("invalid steepness '{}'", value))?;
            if !steepness.is_finite() || steepness <= 0.0 {
                return Err(format!("steepness {} must be positive", steepness));
            }
            (s[..open].trim(), Some(steepness))
        }
        None => (s, None),
    };

    match (name, steepness) {
        ("linear", None) => Ok(Curve::Linear),
        ("s_curve", None) => Ok(Curve::SCurve),
        ("exponential", k) => Ok(Curve::Exponential(k.unwrap_or(DEFAULT_STEEPNESS))),
        ("inverted_exponential", k) => Ok(Curve::InvertedExponential(
            k.unwrap_or(DEFAULT_STEEPNESS),
        )),
        ("linear" | "s_curve", Some(_)) => Err(format!("curve '{}' takes no steepness", name)),
        _ => Err(format!("unknown curve '{}'", name)),
    }
}

fn sample_curve(curve: Curve) -> Vec<i16> {
    (0..=TABLE_SIZE)
        .map(|i| {
            let t = i as f64 / TABLE_SIZE as f64;
            (curve.apply(t).clamp(0.0, 1.0) * TABLE_PEAK).round() as i16
        })
        .collect()
}
