// Proximity bands for "hot/cold" feedback on a similarity percentage.

use serde::Serialize;

/// Fixed similarity bands, closest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Hot,
    Warm,
    Tepid,
    Cool,
    Cold,
}

impl Proximity {
    /// Total over every f64: out-of-range values and NaN fall to `Cold`.
    pub fn from_similarity(similarity: f64) -> Self {
        match similarity {
            s if s >= 90.0 => Proximity::Hot,
            s if s >= 70.0 => Proximity::Warm,
            s if s >= 50.0 => Proximity::Tepid,
            s if s >= 30.0 => Proximity::Cool,
            _ => Proximity::Cold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Proximity::Hot => "hot",
            Proximity::Warm => "warm",
            Proximity::Tepid => "tepid",
            Proximity::Cool => "cool",
            Proximity::Cold => "cold",
        }
    }

    /// Display accent identifier for the band (a CSS utility class).
    pub fn color(&self) -> &'static str {
        match self {
            Proximity::Hot => "text-red-500",
            Proximity::Warm => "text-orange-500",
            Proximity::Tepid => "text-yellow-500",
            Proximity::Cool => "text-blue-500",
            Proximity::Cold => "text-blue-900",
        }
    }
}

impl std::fmt::Display for Proximity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn proximity_label(similarity: f64) -> &'static str {
    Proximity::from_similarity(similarity).as_str()
}

pub fn proximity_color(similarity: f64) -> &'static str {
    Proximity::from_similarity(similarity).color()
}
