//! Playing positions offered on the registration form.

use serde::{Deserialize, Serialize};

/// Group a position is listed under.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PositionCategory {
    Goalkeeper,
    Defenders,
    Midfielders,
    Forwards,
}

impl PositionCategory {
    /// Display order on the form.
    pub const ALL: [Self; 4] = [
        Self::Goalkeeper,
        Self::Defenders,
        Self::Midfielders,
        Self::Forwards,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defenders => "Defenders",
            Self::Midfielders => "Midfielders",
            Self::Forwards => "Forwards",
        }
    }

    /// Positions in this category, in form order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        Position::ALL
            .into_iter()
            .filter(move |p| p.category() == self)
    }
}

/// A playing position, submitted by its short code (e.g. `"CDM"`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "CB")]
    CenterBack,
    #[serde(rename = "RB")]
    RightBack,
    #[serde(rename = "LB")]
    LeftBack,
    #[serde(rename = "CDM")]
    CentralDefensiveMidfielder,
    #[serde(rename = "CM")]
    CentralMidfielder,
    #[serde(rename = "CAM")]
    CentralAttackingMidfielder,
    #[serde(rename = "RW")]
    RightWinger,
    #[serde(rename = "LW")]
    LeftWinger,
    #[serde(rename = "CF")]
    CenterForward,
}

impl Position {
    pub const ALL: [Self; 10] = [
        Self::Goalkeeper,
        Self::CenterBack,
        Self::RightBack,
        Self::LeftBack,
        Self::CentralDefensiveMidfielder,
        Self::CentralMidfielder,
        Self::CentralAttackingMidfielder,
        Self::RightWinger,
        Self::LeftWinger,
        Self::CenterForward,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::CenterBack => "CB",
            Self::RightBack => "RB",
            Self::LeftBack => "LB",
            Self::CentralDefensiveMidfielder => "CDM",
            Self::CentralMidfielder => "CM",
            Self::CentralAttackingMidfielder => "CAM",
            Self::RightWinger => "RW",
            Self::LeftWinger => "LW",
            Self::CenterForward => "CF",
        }
    }

    /// Button text, e.g. "Center Back (CB)".
    pub fn name(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper (GK)",
            Self::CenterBack => "Center Back (CB)",
            Self::RightBack => "Right Back (RB)",
            Self::LeftBack => "Left Back (LB)",
            Self::CentralDefensiveMidfielder => "Central Defensive Midfielder (CDM)",
            Self::CentralMidfielder => "Central Midfielder (CM)",
            Self::CentralAttackingMidfielder => "Central Attacking Midfielder (CAM)",
            Self::RightWinger => "Right Winger (RW)",
            Self::LeftWinger => "Left Winger (LW)",
            Self::CenterForward => "Center Forward (CF)",
        }
    }

    pub fn category(self) -> PositionCategory {
        match self {
            Self::Goalkeeper => PositionCategory::Goalkeeper,
            Self::CenterBack | Self::RightBack | Self::LeftBack => PositionCategory::Defenders,
            Self::CentralDefensiveMidfielder
            | Self::CentralMidfielder
            | Self::CentralAttackingMidfielder => PositionCategory::Midfielders,
            Self::RightWinger | Self::LeftWinger | Self::CenterForward => {
                PositionCategory::Forwards
            }
        }
    }

    /// Exact, case-sensitive code lookup.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
