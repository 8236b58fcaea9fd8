use crate::{
    animation::interp::Lerp,
    foundation::core::{Rgba8, Vec2},
};

/// Dynamically typed property payload used by scene documents and the CLI.
///
/// Library users with a fixed payload type can skip this and use any `V: Lerp`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "ValueRepr", into = "ValueRepr")]
pub enum Value {
    Number(f64),
    Vec2(Vec2),
    Color(Rgba8),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Vec2(_) => "vec2",
            Self::Color(_) => "color",
            Self::Text(_) => "text",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Lerp for Value {
    /// Matching numeric kinds blend; text and mismatched kinds step to `b` only at `t >= 1`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Number(x), Self::Number(y)) => Self::Number(f64::lerp(x, y, t)),
            (Self::Vec2(x), Self::Vec2(y)) => Self::Vec2(<Vec2 as Lerp>::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(Rgba8::lerp(x, y, t)),
            _ => {
                if t >= 1.0 {
                    b.clone()
                } else {
                    a.clone()
                }
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Rgba8> for Value {
    fn from(v: Rgba8) -> Self {
        Self::Color(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Number(f64),
    Pair([f64; 2]),
    Color(Rgba8),
    Text(String),
}

impl From<ValueRepr> for Value {
    fn from(v: ValueRepr) -> Self {
        match v {
            ValueRepr::Number(n) => Self::Number(n),
            ValueRepr::Pair([x, y]) => Self::Vec2(Vec2::new(x, y)),
            ValueRepr::Color(c) => Self::Color(c),
            ValueRepr::Text(s) => Self::Text(s),
        }
    }
}

impl From<Value> for ValueRepr {
    fn from(v: Value) -> Self {
        match v {
            Value::Number(n) => Self::Number(n),
            Value::Vec2(p) => Self::Pair([p.x, p.y]),
            Value::Color(c) => Self::Color(c),
            Value::Text(s) => Self::Text(s),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
