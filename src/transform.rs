// src/transform.rs

//! Value Transformer: raw API magnitudes → the table's display units.

/// Unit normalization from the source's raw magnitude to the table's
/// documented unit (e.g. people → millions, USD → billions).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Direct,
    Div1e3,
    Div1e6,
    Div1e9,
}

impl Scale {
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Scale::Direct => v,
            Scale::Div1e3 => v / 1e3,
            Scale::Div1e6 => v / 1e6,
            Scale::Div1e9 => v / 1e9,
        }
    }
}

/// Per-indicator-class rounding: whole numbers for large absolute
/// magnitudes, one decimal for percentages, rates and ratios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Whole,
    Tenth,
}

/// Scaled and rounded numeric value, ready for comparison and formatting.
pub fn display_value(raw: f64, scale: Scale, rounding: Rounding) -> f64 {
    let v = scale.apply(raw);
    match rounding {
        Rounding::Whole => v.round(),
        Rounding::Tenth => (v * 10.0).round() / 10.0,
    }
}

/// Format a display value the way the table stores it: whole numbers with
/// no decimal point, tenths with one — unless the tenth is zero, in which
/// case the integer form is used (`335.0` → `"335"`).
///
/// Absent values are the empty field; callers map `None` to `""` before
/// this point, never to zero.
pub fn format_display(v: f64, rounding: Rounding) -> String {
    match rounding {
        Rounding::Whole => format!("{}", v.round() as i64),
        Rounding::Tenth => {
            let r = (v * 10.0).round() / 10.0;
            if r.fract() == 0.0 {
                format!("{}", r as i64)
            } else {
                format!("{:.1}", r)
            }
        }
    }
}
