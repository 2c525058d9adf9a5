//! Static specialization lookup table.
//!
//! Read-only configuration data consumed by the aggregation engine to attach
//! display metadata (class name, class color, spec icon) to combatants.

use serde::Serialize;

/// Display bundle for one specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecInfo {
    pub class_name: &'static str,
    pub class_color: &'static str,
    pub spec_name: &'static str,
    pub icon: &'static str,
}

impl SpecInfo {
    /// Neutral bundle used when a spec ID has no table entry.
    pub const UNKNOWN: SpecInfo = SpecInfo {
        class_name: "Unknown",
        class_color: "#9d9d9d",
        spec_name: "Unknown",
        icon: "unknown.png",
    };
}

/// Map a specialization ID to its display bundle.
pub fn lookup_spec(spec_id: i32) -> Option<SpecInfo> {
    let (class_name, class_color, spec_name, icon) = match spec_id {
        // Warrior
        71 => ("Warrior", "#C79C6E", "Arms", "warrior_arms.png"),
        72 => ("Warrior", "#C79C6E", "Fury", "warrior_fury.png"),
        73 => ("Warrior", "#C79C6E", "Protection", "warrior_protection.png"),
        // Paladin
        65 => ("Paladin", "#F58CBA", "Holy", "paladin_holy.png"),
        66 => ("Paladin", "#F58CBA", "Protection", "paladin_protection.png"),
        70 => ("Paladin", "#F58CBA", "Retribution", "paladin_retribution.png"),
        // Hunter
        253 => ("Hunter", "#ABD473", "Beast Mastery", "hunter_beastmastery.png"),
        254 => ("Hunter", "#ABD473", "Marksmanship", "hunter_marksmanship.png"),
        255 => ("Hunter", "#ABD473", "Survival", "hunter_survival.png"),
        // Rogue
        259 => ("Rogue", "#FFF569", "Assassination", "rogue_assassination.png"),
        260 => ("Rogue", "#FFF569", "Outlaw", "rogue_outlaw.png"),
        261 => ("Rogue", "#FFF569", "Subtlety", "rogue_subtlety.png"),
        // Priest
        256 => ("Priest", "#FFFFFF", "Discipline", "priest_discipline.png"),
        257 => ("Priest", "#FFFFFF", "Holy", "priest_holy.png"),
        258 => ("Priest", "#FFFFFF", "Shadow", "priest_shadow.png"),
        // Death Knight
        250 => ("Death Knight", "#C41F3B", "Blood", "deathknight_blood.png"),
        251 => ("Death Knight", "#C41F3B", "Frost", "deathknight_frost.png"),
        252 => ("Death Knight", "#C41F3B", "Unholy", "deathknight_unholy.png"),
        // Shaman
        262 => ("Shaman", "#0070DE", "Elemental", "shaman_elemental.png"),
        263 => ("Shaman", "#0070DE", "Enhancement", "shaman_enhancement.png"),
        264 => ("Shaman", "#0070DE", "Restoration", "shaman_restoration.png"),
        // Mage
        62 => ("Mage", "#69CCF0", "Arcane", "mage_arcane.png"),
        63 => ("Mage", "#69CCF0", "Fire", "mage_fire.png"),
        64 => ("Mage", "#69CCF0", "Frost", "mage_frost.png"),
        // Warlock
        265 => ("Warlock", "#9482C9", "Affliction", "warlock_affliction.png"),
        266 => ("Warlock", "#9482C9", "Demonology", "warlock_demonology.png"),
        267 => ("Warlock", "#9482C9", "Destruction", "warlock_destruction.png"),
        // Monk
        268 => ("Monk", "#00FF96", "Brewmaster", "monk_brewmaster.png"),
        269 => ("Monk", "#00FF96", "Windwalker", "monk_windwalker.png"),
        270 => ("Monk", "#00FF96", "Mistweaver", "monk_mistweaver.png"),
        // Druid
        102 => ("Druid", "#FF7D0A", "Balance", "druid_balance.png"),
        103 => ("Druid", "#FF7D0A", "Feral", "druid_feral.png"),
        104 => ("Druid", "#FF7D0A", "Guardian", "druid_guardian.png"),
        105 => ("Druid", "#FF7D0A", "Restoration", "druid_restoration.png"),
        // Demon Hunter
        577 => ("Demon Hunter", "#A330C9", "Havoc", "demonhunter_havoc.png"),
        581 => ("Demon Hunter", "#A330C9", "Vengeance", "demonhunter_vengeance.png"),
        // Evoker
        1467 => ("Evoker", "#33937F", "Devastation", "evoker_devastation.png"),
        1468 => ("Evoker", "#33937F", "Preservation", "evoker_preservation.png"),
        1473 => ("Evoker", "#33937F", "Augmentation", "evoker_augmentation.png"),
        _ => return None,
    };
    Some(SpecInfo {
        class_name,
        class_color,
        spec_name,
        icon,
    })
}
