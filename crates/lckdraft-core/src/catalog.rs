// Static team catalog: the ten LCK Cup teams, their rosters, and the two
// captains that seed the baron and elder sides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of picks in a draft (4 per captain).
pub const TOTAL_PICKS: usize = 8;

/// Number of teams on each side once the draft completes (captain + 4 picks).
pub const SIDE_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Team codes
// ---------------------------------------------------------------------------

/// One of the ten fixed team identifiers.
///
/// Serialized as the upper-case code string ("GEN", "T1", ...), which is also
/// the form used in share tokens and composition keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamCode {
    #[serde(rename = "GEN")]
    Gen,
    #[serde(rename = "HLE")]
    Hle,
    #[serde(rename = "T1")]
    T1,
    #[serde(rename = "KT")]
    Kt,
    #[serde(rename = "DK")]
    Dk,
    #[serde(rename = "BFX")]
    Bfx,
    #[serde(rename = "NS")]
    Ns,
    #[serde(rename = "BRO")]
    Bro,
    #[serde(rename = "DRX")]
    Drx,
    #[serde(rename = "DNF")]
    Dnf,
}

/// The eight draftable teams in canonical order. A fresh draft offers them in
/// exactly this order.
pub const DRAFTABLE_TEAMS: [TeamCode; 8] = [
    TeamCode::T1,
    TeamCode::Kt,
    TeamCode::Dk,
    TeamCode::Bfx,
    TeamCode::Ns,
    TeamCode::Bro,
    TeamCode::Drx,
    TeamCode::Dnf,
];

impl TeamCode {
    /// Every team, captains first.
    pub const ALL: [TeamCode; 10] = [
        TeamCode::Gen,
        TeamCode::Hle,
        TeamCode::T1,
        TeamCode::Kt,
        TeamCode::Dk,
        TeamCode::Bfx,
        TeamCode::Ns,
        TeamCode::Bro,
        TeamCode::Drx,
        TeamCode::Dnf,
    ];

    /// Parse an exact (case-sensitive) team code.
    pub fn from_code(s: &str) -> Option<Self> {
        TeamCode::ALL.into_iter().find(|t| t.code() == s)
    }

    /// The code string for this team.
    pub fn code(&self) -> &'static str {
        match self {
            TeamCode::Gen => "GEN",
            TeamCode::Hle => "HLE",
            TeamCode::T1 => "T1",
            TeamCode::Kt => "KT",
            TeamCode::Dk => "DK",
            TeamCode::Bfx => "BFX",
            TeamCode::Ns => "NS",
            TeamCode::Bro => "BRO",
            TeamCode::Drx => "DRX",
            TeamCode::Dnf => "DNF",
        }
    }

    /// Whether this team is one of the two captains.
    pub fn is_captain(&self) -> bool {
        self.as_captain().is_some()
    }

    /// Whether this team can be chosen during a draft.
    pub fn is_draftable(&self) -> bool {
        !self.is_captain()
    }

    /// The captain role of this team, if it has one.
    pub fn as_captain(&self) -> Option<Captain> {
        match self {
            TeamCode::Gen => Some(Captain::Gen),
            TeamCode::Hle => Some(Captain::Hle),
            _ => None,
        }
    }

    /// Catalog record for this team.
    pub fn team(&self) -> &'static Team {
        &TEAMS[*self as usize]
    }

    /// Path of the team's logo asset.
    pub fn logo_path(&self) -> String {
        format!("/logos/{}.svg", self.code().to_lowercase())
    }
}

impl fmt::Display for TeamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown team code: {0}")]
pub struct UnknownTeamCode(pub String);

impl FromStr for TeamCode {
    type Err = UnknownTeamCode;

    /// Lenient parse for user input: surrounding whitespace and letter case
    /// are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TeamCode::from_code(&s.trim().to_uppercase()).ok_or_else(|| UnknownTeamCode(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Captains and sides
// ---------------------------------------------------------------------------

/// One of the two fixed captains. GEN leads the baron side, HLE the elder side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Captain {
    #[serde(rename = "GEN")]
    Gen,
    #[serde(rename = "HLE")]
    Hle,
}

impl Captain {
    /// Parse an exact captain code ("GEN" or "HLE").
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "GEN" => Some(Captain::Gen),
            "HLE" => Some(Captain::Hle),
            _ => None,
        }
    }

    pub fn team(&self) -> TeamCode {
        match self {
            Captain::Gen => TeamCode::Gen,
            Captain::Hle => TeamCode::Hle,
        }
    }

    /// The opposing captain.
    pub fn other(&self) -> Captain {
        match self {
            Captain::Gen => Captain::Hle,
            Captain::Hle => Captain::Gen,
        }
    }

    /// The side this captain leads.
    pub fn side(&self) -> Side {
        match self {
            Captain::Gen => Side::Baron,
            Captain::Hle => Side::Elder,
        }
    }
}

impl fmt::Display for Captain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.team().code())
    }
}

impl FromStr for Captain {
    type Err = UnknownTeamCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<TeamCode>()?
            .as_captain()
            .ok_or_else(|| UnknownTeamCode(s.to_string()))
    }
}

/// The two sides of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Baron,
    Elder,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Baron, Side::Elder];

    pub fn captain(&self) -> Captain {
        match self {
            Side::Baron => Captain::Gen,
            Side::Elder => Captain::Hle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Baron => "baron",
            Side::Elder => "elder",
        }
    }

    /// Human-readable name of the side.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Baron => "Baron Team",
            Side::Elder => "Elder Team",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baron" => Ok(Side::Baron),
            "elder" => Ok(Side::Elder),
            other => Err(format!("unknown side: {other} (expected baron or elder)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Team records
// ---------------------------------------------------------------------------

/// The five starters of a team, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub top: &'static str,
    pub jungle: &'static str,
    pub mid: &'static str,
    pub adc: &'static str,
    pub support: &'static str,
}

impl Roster {
    /// Role label and player name pairs in lane order.
    pub fn slots(&self) -> [(&'static str, &'static str); 5] {
        [
            ("top", self.top),
            ("jungle", self.jungle),
            ("mid", self.mid),
            ("adc", self.adc),
            ("support", self.support),
        ]
    }
}

/// A team's display identity and roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Team {
    pub code: TeamCode,
    pub name: &'static str,
    pub short_name: &'static str,
    pub roster: Roster,
}

// Indexed by `TeamCode as usize`; order must match the enum declaration.
static TEAMS: [Team; 10] = [
    Team {
        code: TeamCode::Gen,
        name: "Gen.G Esports",
        short_name: "Gen.G",
        roster: Roster { top: "Kiin", jungle: "Canyon", mid: "Chovy", adc: "Ruler", support: "Duro" },
    },
    Team {
        code: TeamCode::Hle,
        name: "Hanwha Life Esports",
        short_name: "HLE",
        roster: Roster { top: "Zeus", jungle: "Kanavi", mid: "Zeka", adc: "Gumayusi", support: "Delight" },
    },
    Team {
        code: TeamCode::T1,
        name: "T1",
        short_name: "T1",
        roster: Roster { top: "Doran", jungle: "Oner", mid: "Faker", adc: "Peyz", support: "Keria" },
    },
    Team {
        code: TeamCode::Kt,
        name: "KT Rolster",
        short_name: "KT",
        roster: Roster { top: "Perfect", jungle: "Cuzz", mid: "Bdd", adc: "Aiming", support: "Ghost" },
    },
    Team {
        code: TeamCode::Dk,
        name: "Dplus KIA",
        short_name: "DK",
        roster: Roster { top: "Siwoo", jungle: "Lucid", mid: "ShowMaker", adc: "Smash", support: "Career" },
    },
    Team {
        code: TeamCode::Bfx,
        name: "BNK FearX",
        short_name: "FearX",
        roster: Roster { top: "Clear", jungle: "Raptor", mid: "VicLa", adc: "Diable", support: "Kellin" },
    },
    Team {
        code: TeamCode::Ns,
        name: "Nongshim RedForce",
        short_name: "NS",
        roster: Roster { top: "Kingen", jungle: "Sponge", mid: "Scout", adc: "Taeyoon", support: "Lehends" },
    },
    Team {
        code: TeamCode::Bro,
        name: "OKSavingsBank BRION",
        short_name: "BRO",
        roster: Roster { top: "Casting", jungle: "GIDEON", mid: "Fisher", adc: "Teddy", support: "Namgung" },
    },
    Team {
        code: TeamCode::Drx,
        name: "DRX",
        short_name: "DRX",
        roster: Roster { top: "Rich", jungle: "Vincenzo", mid: "Ucal", adc: "Jiwoo", support: "Andil" },
    },
    Team {
        code: TeamCode::Dnf,
        name: "DN Freecs",
        short_name: "DNF",
        roster: Roster { top: "DuDu", jungle: "Pyosik", mid: "Clozer", adc: "deokdam", support: "Peter" },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_is_keyed_by_code() {
        for code in TeamCode::ALL {
            assert_eq!(code.team().code, code, "catalog entry out of order for {code}");
        }
    }

    #[test]
    fn codes_are_unique_and_delimiter_free() {
        let codes: HashSet<&str> = TeamCode::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), 10);
        for code in codes {
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn draftable_teams_exclude_captains() {
        assert_eq!(DRAFTABLE_TEAMS.len(), 8);
        assert!(DRAFTABLE_TEAMS.iter().all(|t| t.is_draftable()));
        assert!(TeamCode::Gen.is_captain());
        assert!(TeamCode::Hle.is_captain());
        assert!(!TeamCode::T1.is_captain());
    }

    #[test]
    fn from_code_is_exact() {
        assert_eq!(TeamCode::from_code("BFX"), Some(TeamCode::Bfx));
        assert_eq!(TeamCode::from_code("bfx"), None);
        assert_eq!(TeamCode::from_code("XX"), None);
        assert_eq!(TeamCode::from_code(""), None);
    }

    #[test]
    fn from_str_is_lenient() {
        assert_eq!(" dnf ".parse::<TeamCode>(), Ok(TeamCode::Dnf));
        assert_eq!("t1".parse::<TeamCode>(), Ok(TeamCode::T1));
        assert!("FNC".parse::<TeamCode>().is_err());
    }

    #[test]
    fn captain_parse_rejects_draftable_teams() {
        assert_eq!("hle".parse::<Captain>(), Ok(Captain::Hle));
        assert!("T1".parse::<Captain>().is_err());
        assert_eq!(Captain::from_code("GEN"), Some(Captain::Gen));
        assert_eq!(Captain::from_code("gen"), None);
    }

    #[test]
    fn captains_map_to_sides() {
        assert_eq!(Captain::Gen.side(), Side::Baron);
        assert_eq!(Captain::Hle.side(), Side::Elder);
        assert_eq!(Side::Baron.captain(), Captain::Gen);
        assert_eq!(Captain::Gen.other(), Captain::Hle);
        assert_eq!(Captain::Hle.other(), Captain::Gen);
    }

    #[test]
    fn serde_uses_code_strings() {
        let json = serde_json::to_string(&vec![TeamCode::Gen, TeamCode::Bfx]).unwrap();
        assert_eq!(json, r#"["GEN","BFX"]"#);
        let back: Vec<TeamCode> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![TeamCode::Gen, TeamCode::Bfx]);
        assert_eq!(serde_json::to_string(&Side::Elder).unwrap(), r#""elder""#);
    }

    #[test]
    fn logo_path_is_lowercase() {
        assert_eq!(TeamCode::Bfx.logo_path(), "/logos/bfx.svg");
        assert_eq!(TeamCode::T1.logo_path(), "/logos/t1.svg");
    }

    #[test]
    fn roster_slots_in_lane_order() {
        let slots = TeamCode::T1.team().roster.slots();
        assert_eq!(slots[0], ("top", "Doran"));
        assert_eq!(slots[2], ("mid", "Faker"));
        assert_eq!(slots[4], ("support", "Keria"));
    }
}
