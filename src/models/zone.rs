use serde::{Deserialize, Serialize};

/// Accumulation zone of the latest close against the 20/50/100/200 EMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Goated,
    Excellent,
    Great,
    Good,
    Caution,
    High,
    Expensive,
    VeryExpensive,
}

impl Zone {
    /// Classify from percentage distances to the 20, 50, 100 and 200 EMAs.
    ///
    /// Under the 200 EMA the zone is decided by the first shorter EMA the
    /// close still sits on or above. Otherwise it worsens with each EMA cleared.
    pub fn classify(distances: [f64; 4]) -> Self {
        let [d20, d50, d100, d200] = distances;

        if d200 < 0.0 {
            if d100 >= 0.0 {
                return Zone::Goated;
            }
            if d50 >= 0.0 {
                return Zone::Excellent;
            }
            if d20 >= 0.0 {
                return Zone::Great;
            }
            return Zone::Good;
        }

        if d20 > 0.0 {
            if d50 > 0.0 {
                if d100 > 0.0 {
                    return Zone::VeryExpensive;
                }
                return Zone::Expensive;
            }
            return Zone::High;
        }
        Zone::Caution
    }

    pub fn score(self) -> u8 {
        match self {
            Zone::Goated => 100,
            Zone::Excellent => 90,
            Zone::Great => 75,
            Zone::Good => 60,
            Zone::Caution => 30,
            Zone::High => 20,
            Zone::Expensive => 10,
            Zone::VeryExpensive => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Goated => "Goated Price (below 200 EMA)",
            Zone::Excellent => "Excellent Price (below 100 EMA)",
            Zone::Great => "Great Price (below 50 EMA)",
            Zone::Good => "Good Price (below 20 EMA)",
            Zone::Caution => "Caution Zone (near 20 EMA)",
            Zone::High => "High Zone (above 20 EMA)",
            Zone::Expensive => "Expensive (above 50 EMA)",
            Zone::VeryExpensive => "Very Expensive (above all EMAs)",
        }
    }
}

/// One tracked EMA and how far the latest close sits from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaLevel {
    pub period: usize,
    pub value: f64,
    /// Percent; negative when the close is below the EMA.
    pub distance_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAssessment {
    pub levels: Vec<EmaLevel>,
    pub zone: Zone,
    /// Volatility known and at or below the accumulation threshold.
    pub within_volatility_threshold: bool,
    /// Great zone or better with volatility within the threshold.
    pub accumulate: bool,
}

impl ZoneAssessment {
    pub fn score(&self) -> u8 {
        self.zone.score()
    }

    pub fn label(&self) -> &'static str {
        self.zone.label()
    }
}
