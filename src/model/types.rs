use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

macro_rules! periodic_table {
    ($($sym:ident),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            $($sym),+
        }

        impl Element {
            const ALL: &'static [Element] = &[$(Element::$sym),+];

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$sym => stringify!($sym)),+
                }
            }
        }
    };
}

periodic_table! {
    H, He,
    Li, Be, B, C, N, O, F, Ne,
    Na, Mg, Al, Si, P, S, Cl, Ar,
    K, Ca, Sc, Ti, V, Cr, Mn, Fe, Co, Ni, Cu, Zn, Ga, Ge, As, Se, Br, Kr,
    Rb, Sr, Y, Zr, Nb, Mo, Tc, Ru, Rh, Pd, Ag, Cd, In, Sn, Sb, Te, I, Xe,
    Cs, Ba, La, Ce, Pr, Nd, Pm, Sm, Eu, Gd, Tb, Dy, Ho, Er, Tm, Yb, Lu,
    Hf, Ta, W, Re, Os, Ir, Pt, Au, Hg, Tl, Pb, Bi, Po, At, Rn,
    Fr, Ra, Ac, Th, Pa, U, Np, Pu, Am, Cm, Bk, Cf, Es, Fm, Md, No, Lr,
    Rf, Db, Sg, Bh, Hs, Mt, Ds, Rg, Cn, Nh, Fl, Mc, Lv, Ts, Og,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn from_atomic_number(z: u8) -> Option<Self> {
        z.checked_sub(1)
            .and_then(|i| Self::ALL.get(usize::from(i)))
            .copied()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|e| e.symbol() == s)
            .copied()
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

/// Coarse classification of a raw input value, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    Sequence,
    Mapping,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(n) if n.is_f64() => ValueType::Float,
            Value::Number(_) => ValueType::Integer,
            Value::String(_) => ValueType::Text,
            Value::Array(_) => ValueType::Sequence,
            Value::Object(_) => ValueType::Mapping,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Text => "text",
            ValueType::Sequence => "sequence",
            ValueType::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// A numeric input accepted wherever a real number is expected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericScalar {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl NumericScalar {
    pub fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            NumericScalar::Integer(i)
        } else if let Some(u) = n.as_u64() {
            NumericScalar::Unsigned(u)
        } else {
            // serde_json numbers are always one of the three representations.
            NumericScalar::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            NumericScalar::Integer(i) => i as f64,
            NumericScalar::Unsigned(u) => u as f64,
            NumericScalar::Float(x) => x,
        }
    }
}

/// Dimensions of a coordinate matrix as `[rows, cols]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("He").unwrap(), Element::He);
        assert_eq!(Element::from_str("Fe").unwrap(), Element::Fe);
        assert_eq!(Element::from_str("Og").unwrap(), Element::Og);
    }

    #[test]
    fn element_from_str_invalid_case() {
        let err = Element::from_str("h").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: 'h'");
    }

    #[test]
    fn element_symbol_display_and_atomic_number() {
        let el = Element::Na;
        assert_eq!(el.symbol(), "Na");
        assert_eq!(el.to_string(), "Na");
        assert_eq!(el.atomic_number(), 11);
        assert_eq!(Element::H.atomic_number(), 1);
        assert_eq!(Element::Og.atomic_number(), 118);
    }

    #[test]
    fn element_from_atomic_number_bounds() {
        assert_eq!(Element::from_atomic_number(8), Some(Element::O));
        assert_eq!(Element::from_atomic_number(0), None);
        assert_eq!(Element::from_atomic_number(119), None);
    }

    #[test]
    fn value_type_classifies_json() {
        assert_eq!(ValueType::of(&json!(null)), ValueType::Null);
        assert_eq!(ValueType::of(&json!(true)), ValueType::Bool);
        assert_eq!(ValueType::of(&json!(3)), ValueType::Integer);
        assert_eq!(ValueType::of(&json!(-3)), ValueType::Integer);
        assert_eq!(ValueType::of(&json!(3.5)), ValueType::Float);
        assert_eq!(ValueType::of(&json!("x")), ValueType::Text);
        assert_eq!(ValueType::of(&json!([1])), ValueType::Sequence);
        assert_eq!(ValueType::of(&json!({"a": 1})), ValueType::Mapping);
    }

    #[test]
    fn numeric_scalar_variants_widen_to_f64() {
        let Value::Number(neg) = json!(-2) else { unreachable!() };
        let Value::Number(big) = json!(u64::MAX) else { unreachable!() };
        let Value::Number(frac) = json!(0.5) else { unreachable!() };

        assert_eq!(NumericScalar::from_number(&neg), NumericScalar::Integer(-2));
        assert_eq!(NumericScalar::from_number(&big), NumericScalar::Unsigned(u64::MAX));
        assert_eq!(NumericScalar::from_number(&frac), NumericScalar::Float(0.5));
        assert_eq!(NumericScalar::Integer(-2).to_f64(), -2.0);
    }

    #[test]
    fn shape_display() {
        assert_eq!(Shape::new(2, 3).to_string(), "[2, 3]");
    }
}
