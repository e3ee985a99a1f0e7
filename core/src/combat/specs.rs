//! Specialization ids as reported by the game client.

use phf::phf_map;

use super::unit::CombatUnitClass;

/// Spec id used by the parser and the stats feed when the spec is unknown.
pub const UNKNOWN_SPEC_ID: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecInfo {
    pub class: CombatUnitClass,
    pub name: &'static str,
}

const fn spec(class: CombatUnitClass, name: &'static str) -> SpecInfo {
    SpecInfo { class, name }
}

static SPECS: phf::Map<&'static str, SpecInfo> = phf_map! {
    "62" => spec(CombatUnitClass::Mage, "Arcane Mage"),
    "63" => spec(CombatUnitClass::Mage, "Fire Mage"),
    "64" => spec(CombatUnitClass::Mage, "Frost Mage"),
    "65" => spec(CombatUnitClass::Paladin, "Holy Paladin"),
    "66" => spec(CombatUnitClass::Paladin, "Protection Paladin"),
    "70" => spec(CombatUnitClass::Paladin, "Retribution Paladin"),
    "71" => spec(CombatUnitClass::Warrior, "Arms Warrior"),
    "72" => spec(CombatUnitClass::Warrior, "Fury Warrior"),
    "73" => spec(CombatUnitClass::Warrior, "Protection Warrior"),
    "102" => spec(CombatUnitClass::Druid, "Balance Druid"),
    "103" => spec(CombatUnitClass::Druid, "Feral Druid"),
    "104" => spec(CombatUnitClass::Druid, "Guardian Druid"),
    "105" => spec(CombatUnitClass::Druid, "Restoration Druid"),
    "250" => spec(CombatUnitClass::DeathKnight, "Blood Death Knight"),
    "251" => spec(CombatUnitClass::DeathKnight, "Frost Death Knight"),
    "252" => spec(CombatUnitClass::DeathKnight, "Unholy Death Knight"),
    "253" => spec(CombatUnitClass::Hunter, "Beast Mastery Hunter"),
    "254" => spec(CombatUnitClass::Hunter, "Marksmanship Hunter"),
    "255" => spec(CombatUnitClass::Hunter, "Survival Hunter"),
    "256" => spec(CombatUnitClass::Priest, "Discipline Priest"),
    "257" => spec(CombatUnitClass::Priest, "Holy Priest"),
    "258" => spec(CombatUnitClass::Priest, "Shadow Priest"),
    "259" => spec(CombatUnitClass::Rogue, "Assassination Rogue"),
    "260" => spec(CombatUnitClass::Rogue, "Outlaw Rogue"),
    "261" => spec(CombatUnitClass::Rogue, "Subtlety Rogue"),
    "262" => spec(CombatUnitClass::Shaman, "Elemental Shaman"),
    "263" => spec(CombatUnitClass::Shaman, "Enhancement Shaman"),
    "264" => spec(CombatUnitClass::Shaman, "Restoration Shaman"),
    "265" => spec(CombatUnitClass::Warlock, "Affliction Warlock"),
    "266" => spec(CombatUnitClass::Warlock, "Demonology Warlock"),
    "267" => spec(CombatUnitClass::Warlock, "Destruction Warlock"),
    "268" => spec(CombatUnitClass::Monk, "Brewmaster Monk"),
    "269" => spec(CombatUnitClass::Monk, "Windwalker Monk"),
    "270" => spec(CombatUnitClass::Monk, "Mistweaver Monk"),
    "577" => spec(CombatUnitClass::DemonHunter, "Havoc Demon Hunter"),
    "581" => spec(CombatUnitClass::DemonHunter, "Vengeance Demon Hunter"),
    "1467" => spec(CombatUnitClass::Evoker, "Devastation Evoker"),
    "1468" => spec(CombatUnitClass::Evoker, "Preservation Evoker"),
    "1473" => spec(CombatUnitClass::Evoker, "Augmentation Evoker"),
};

pub fn spec_info(spec_id: &str) -> Option<&'static SpecInfo> {
    SPECS.get(spec_id)
}
