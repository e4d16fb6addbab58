//! Core identifier and enum types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a status in the status catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(pub u32);

/// Identifier of a skill in the skill catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

/// Identifier of a roster member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// Identifier of one applied status instance.
///
/// Allocated from [`crate::party::PartyState`] so that replaying the same
/// log always produces the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusInstanceId(pub u64);

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for StatusInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Damage type of an incoming hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    #[default]
    Physical,
    Magical,
    /// Unaspected damage, reduced by the `darkness` factor
    Special,
}

impl DamageType {
    pub fn all() -> &'static [DamageType] {
        &[DamageType::Physical, DamageType::Magical, DamageType::Special]
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DamageType::Physical => "physical",
            DamageType::Magical => "magical",
            DamageType::Special => "special",
        };
        f.write_str(s)
    }
}

/// Party role of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobRole {
    Tank,
    Healer,
    Melee,
    Ranged,
    Caster,
}

impl JobRole {
    /// Roles in display order
    pub fn all() -> &'static [JobRole] {
        &[
            JobRole::Tank,
            JobRole::Healer,
            JobRole::Melee,
            JobRole::Ranged,
            JobRole::Caster,
        ]
    }

    /// Jobs belonging to this role, in display order
    pub fn jobs(self) -> Vec<Job> {
        Job::all().iter().copied().filter(|j| j.role() == self).collect()
    }
}

/// Combat job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Job {
    // Tanks
    Pld,
    War,
    Drk,
    Gnb,
    // Healers
    Whm,
    Sch,
    Ast,
    Sge,
    // Melee
    Mnk,
    Drg,
    Nin,
    Sam,
    Rpr,
    Vpr,
    // Ranged physical
    Brd,
    Mch,
    Dnc,
    // Casters
    Blm,
    Smn,
    Rdm,
    Pct,
}

impl Job {
    /// All jobs in display order
    pub fn all() -> &'static [Job] {
        &[
            Job::Pld,
            Job::War,
            Job::Drk,
            Job::Gnb,
            Job::Whm,
            Job::Sch,
            Job::Ast,
            Job::Sge,
            Job::Mnk,
            Job::Drg,
            Job::Nin,
            Job::Sam,
            Job::Rpr,
            Job::Vpr,
            Job::Brd,
            Job::Mch,
            Job::Dnc,
            Job::Blm,
            Job::Smn,
            Job::Rdm,
            Job::Pct,
        ]
    }

    pub fn role(self) -> JobRole {
        match self {
            Job::Pld | Job::War | Job::Drk | Job::Gnb => JobRole::Tank,
            Job::Whm | Job::Sch | Job::Ast | Job::Sge => JobRole::Healer,
            Job::Mnk | Job::Drg | Job::Nin | Job::Sam | Job::Rpr | Job::Vpr => JobRole::Melee,
            Job::Brd | Job::Mch | Job::Dnc => JobRole::Ranged,
            Job::Blm | Job::Smn | Job::Rdm | Job::Pct => JobRole::Caster,
        }
    }

    /// Three-letter job code
    pub fn code(self) -> &'static str {
        match self {
            Job::Pld => "PLD",
            Job::War => "WAR",
            Job::Drk => "DRK",
            Job::Gnb => "GNB",
            Job::Whm => "WHM",
            Job::Sch => "SCH",
            Job::Ast => "AST",
            Job::Sge => "SGE",
            Job::Mnk => "MNK",
            Job::Drg => "DRG",
            Job::Nin => "NIN",
            Job::Sam => "SAM",
            Job::Rpr => "RPR",
            Job::Vpr => "VPR",
            Job::Brd => "BRD",
            Job::Mch => "MCH",
            Job::Dnc => "DNC",
            Job::Blm => "BLM",
            Job::Smn => "SMN",
            Job::Rdm => "RDM",
            Job::Pct => "PCT",
        }
    }

    /// Full English name
    pub fn name(self) -> &'static str {
        match self {
            Job::Pld => "Paladin",
            Job::War => "Warrior",
            Job::Drk => "Dark Knight",
            Job::Gnb => "Gunbreaker",
            Job::Whm => "White Mage",
            Job::Sch => "Scholar",
            Job::Ast => "Astrologian",
            Job::Sge => "Sage",
            Job::Mnk => "Monk",
            Job::Drg => "Dragoon",
            Job::Nin => "Ninja",
            Job::Sam => "Samurai",
            Job::Rpr => "Reaper",
            Job::Vpr => "Viper",
            Job::Brd => "Bard",
            Job::Mch => "Machinist",
            Job::Dnc => "Dancer",
            Job::Blm => "Black Mage",
            Job::Smn => "Summoner",
            Job::Rdm => "Red Mage",
            Job::Pct => "Pictomancer",
        }
    }

    /// Parse a job code, case-insensitive
    pub fn from_code(code: &str) -> Option<Job> {
        Job::all()
            .iter()
            .copied()
            .find(|j| j.code().eq_ignore_ascii_case(code))
    }

    pub fn is_tank(self) -> bool {
        self.role() == JobRole::Tank
    }

    pub fn is_healer(self) -> bool {
        self.role() == JobRole::Healer
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
