//! Arithmetic operators and their textual forms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An operator a question may use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Addition, `+`.
    Add,
    /// Subtraction, `-`. Never produces a negative answer.
    Sub,
    /// Multiplication, configured as `*` and rendered as `x`.
    Mul,
    /// Any unrecognized token. Questions fall back to a subtraction shape.
    Other(String),
}

impl Operator {
    /// The full operator set used when none is configured.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Add, Self::Sub, Self::Mul]
    }

    /// Parse a configuration token. Unknown tokens become [`Operator::Other`].
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" | "x" => Self::Mul,
            other => Self::Other(other.to_string()),
        }
    }

    /// The configuration token (`"+"`, `"-"`, `"*"`, or the raw unknown token).
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Other(raw) => raw,
        }
    }

    /// The symbol drawn in question text.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Mul => "x",
            other => other.token(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<String> for Operator {
    fn from(token: String) -> Self {
        Self::parse(&token)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.token().to_string()
    }
}
