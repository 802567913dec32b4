use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed palette of gradient tokens a module card may use. Anything
/// outside this set is rejected at the edge, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Amber,
    Emerald,
    Sky,
    Violet,
    Rose,
    Teal,
    Indigo,
    Slate,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown color token: {0}")]
pub struct UnknownColor(pub String);

impl ColorToken {
    pub const ALL: [ColorToken; 8] = [
        ColorToken::Amber,
        ColorToken::Emerald,
        ColorToken::Sky,
        ColorToken::Violet,
        ColorToken::Rose,
        ColorToken::Teal,
        ColorToken::Indigo,
        ColorToken::Slate,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ColorToken::Amber => "amber",
            ColorToken::Emerald => "emerald",
            ColorToken::Sky => "sky",
            ColorToken::Violet => "violet",
            ColorToken::Rose => "rose",
            ColorToken::Teal => "teal",
            ColorToken::Indigo => "indigo",
            ColorToken::Slate => "slate",
        }
    }

    /// CSS gradient stops used by front ends rendering the module card.
    #[must_use]
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            ColorToken::Amber => ("#f59e0b", "#d97706"),
            ColorToken::Emerald => ("#10b981", "#059669"),
            ColorToken::Sky => ("#0ea5e9", "#0284c7"),
            ColorToken::Violet => ("#8b5cf6", "#7c3aed"),
            ColorToken::Rose => ("#f43f5e", "#e11d48"),
            ColorToken::Teal => ("#14b8a6", "#0d9488"),
            ColorToken::Indigo => ("#6366f1", "#4f46e5"),
            ColorToken::Slate => ("#64748b", "#475569"),
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorToken {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorToken::ALL
            .into_iter()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| UnknownColor(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_their_names() {
        for token in ColorToken::ALL {
            assert_eq!(token.as_str().parse::<ColorToken>(), Ok(token));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "chartreuse".parse::<ColorToken>(),
            Err(UnknownColor("chartreuse".to_owned()))
        );
    }

    #[test]
    fn serde_uses_the_token_name() {
        let json = serde_json::to_string(&ColorToken::Emerald).unwrap();
        assert_eq!(json, r#""emerald""#);
        let token: ColorToken = serde_json::from_str(r#""sky""#).unwrap();
        assert_eq!(token, ColorToken::Sky);
    }
}
