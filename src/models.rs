use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::specs::{self, SpecInfo};

/// A fully aggregated combat log export
#[derive(Debug, Serialize, Clone)]
pub struct LogAggregate {
    pub log_version: Option<u32>,
    pub build_version: Option<String>,
    pub program_version: Option<String>,
    pub encounters: Vec<Encounter>,
    /// Display name of the player with the highest combined damage+healing
    /// across the whole log. `None` when the log contains no players.
    pub most_valuable_player: Option<String>,
}

/// A bounded time window of combat (one boss fight)
#[derive(Debug, Serialize, Clone)]
pub struct Encounter {
    pub name: String,
    pub difficulty_id: i32,
    pub difficulty_name: String,
    pub group_size: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_secs: f64,
    /// "minutes:seconds" display form of the duration
    pub duration_display: String,
    /// Root entities in first-seen order. Pets are nested inside their
    /// owner, never listed here.
    pub entities: Vec<Entity>,
    /// Sums over player-type root entities only
    pub total_group_damage: f64,
    pub total_group_healing: f64,
    /// Thousands-separated group totals for the table footer
    pub total_group_damage_display: String,
    pub total_group_healing_display: String,
    /// Raw per-combatant records from the log, consumed once by the
    /// roster pass and not part of the output surface.
    #[serde(skip)]
    pub roster: Vec<RosterRecord>,
}

impl Encounter {
    /// Strict window containment: an event exactly on a boundary belongs
    /// to no encounter.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp > self.start_time && timestamp < self.end_time
    }

    /// Get-or-create a root entity by UID, preserving first-seen order.
    /// `display_name` is only consulted when the entity does not exist yet.
    pub fn entity_mut(&mut self, uid: &str, display_name: &str) -> &mut Entity {
        match self.entities.iter().position(|e| e.uid == uid) {
            Some(i) => &mut self.entities[i],
            None => {
                let i = self.entities.len();
                self.entities.push(Entity::new(uid, display_name));
                &mut self.entities[i]
            }
        }
    }
}

/// A damage/heal source: player, non-player creature, or pet
#[derive(Debug, Serialize, Clone)]
pub struct Entity {
    pub uid: String,
    /// Name part of the combined "name-realm" string
    pub name: String,
    /// Realm part, absent when the log carried a bare name
    pub realm: Option<String>,
    pub faction_id: Option<i32>,
    pub spec_id: Option<i32>,
    pub spec_info: SpecInfo,
    pub equipped_items: Vec<EquippedItem>,
    pub events: Vec<CastEvent>,
    pub pets: Vec<Entity>,
    pub total_damage_done: f64,
    /// Net of overhealing
    pub total_healing_done: f64,
    pub dps: f64,
    pub hps: f64,
    /// Rounded mean level over qualifying equipped items; `None` when
    /// nothing qualifying is equipped. Computed for root entities only.
    pub average_item_level: Option<u32>,
}

impl Entity {
    pub fn new(uid: &str, display_name: &str) -> Self {
        let mut parts = display_name.splitn(2, '-');
        let name = parts.next().unwrap_or(display_name).to_string();
        let realm = parts.next().map(str::to_string);
        Entity {
            uid: uid.to_string(),
            name,
            realm,
            faction_id: None,
            spec_id: None,
            spec_info: SpecInfo::UNKNOWN,
            equipped_items: Vec::new(),
            events: Vec::new(),
            pets: Vec::new(),
            total_damage_done: 0.0,
            total_healing_done: 0.0,
            dps: 0.0,
            hps: 0.0,
            average_item_level: None,
        }
    }

    /// Player UIDs carry the "Player" marker; everything else is a
    /// creature or pet.
    pub fn is_player(&self) -> bool {
        self.uid.contains("Player")
    }

    /// Get-or-create a pet by UID, preserving first-seen order.
    pub fn pet_mut(&mut self, uid: &str, display_name: &str) -> &mut Entity {
        match self.pets.iter().position(|p| p.uid == uid) {
            Some(i) => &mut self.pets[i],
            None => {
                let i = self.pets.len();
                self.pets.push(Entity::new(uid, display_name));
                &mut self.pets[i]
            }
        }
    }

    /// Record a combatant registration. An unresolvable spec ID keeps the
    /// neutral display bundle and is logged for diagnosis.
    pub fn set_spec(&mut self, spec_id: i32) {
        self.spec_id = Some(spec_id);
        match specs::lookup_spec(spec_id) {
            Some(info) => self.spec_info = info,
            None => tracing::warn!(spec_id, "unknown spec ID, keeping neutral display bundle"),
        }
    }
}

/// One recorded combat action
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CastEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
    /// Ability display name, "Melee" when no named ability applies
    pub source_label: String,
    /// Ability identifier, absent for unnamed attacks
    pub source_id: Option<u32>,
    pub amount: f64,
    /// Portion of `amount` exceeding the target's missing health.
    /// Zero unless `kind` is a heal variant.
    pub overhealing: f64,
    pub is_critical: bool,
    pub is_glancing: bool,
    pub is_crushing: bool,
}

/// Canonical event category shared by every input schema generation.
/// The combatant-registration payload rides on its own variant.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    MeleeDamage,
    RangeDamage,
    SpellDamage,
    PeriodicDamage,
    Heal,
    PeriodicHeal,
    AbsorbedHeal,
    Combatant { faction_id: i32, spec_id: i32 },
}

impl EventKind {
    pub fn is_damage(self) -> bool {
        matches!(
            self,
            EventKind::MeleeDamage
                | EventKind::RangeDamage
                | EventKind::SpellDamage
                | EventKind::PeriodicDamage
        )
    }

    pub fn is_heal(self) -> bool {
        matches!(
            self,
            EventKind::Heal | EventKind::PeriodicHeal | EventKind::AbsorbedHeal
        )
    }
}

/// One equipped item surviving the degenerate-level filter
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct EquippedItem {
    pub item_id: u64,
    pub item_level: u32,
}

/// Raw per-combatant roster record, produced by the schema adapters and
/// consumed by the roster pass
#[derive(Debug, Clone)]
pub struct RosterRecord {
    pub uid: String,
    pub name: Option<String>,
    pub faction_id: i32,
    pub spec_id: i32,
    /// Unfiltered; degenerate levels are dropped when applied to an entity
    pub items: Vec<EquippedItem>,
}

/// File listing info
#[derive(Debug, Serialize, Clone)]
pub struct LogFileInfo {
    pub filename: String,
    pub size_bytes: u64,
    pub size_display: String,
    pub date_str: String,
}

/// Difficulty ID to name mapping
pub fn difficulty_name(id: i32) -> String {
    match id {
        1 => "Normal".to_string(),
        2 => "Heroic".to_string(),
        8 => "Mythic Keystone".to_string(),
        14 => "Normal (Raid)".to_string(),
        15 => "Heroic (Raid)".to_string(),
        16 => "Mythic (Raid)".to_string(),
        17 => "Looking for Raid".to_string(),
        23 => "Mythic".to_string(),
        24 => "Timewalking".to_string(),
        _ => format!("Unknown ({})", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_name_splits_on_realm_separator() {
        let entity = Entity::new("Player-1042-ABCDEF01", "Thrall-Area52");
        assert_eq!(entity.name, "Thrall");
        assert_eq!(entity.realm.as_deref(), Some("Area52"));

        let bare = Entity::new("Creature-0-1234", "Raging Spirit");
        assert_eq!(bare.name, "Raging Spirit");
        assert_eq!(bare.realm, None);
    }

    #[test]
    fn player_detection_comes_from_the_uid() {
        assert!(Entity::new("Player-1042-ABCDEF01", "Thrall").is_player());
        assert!(!Entity::new("Creature-0-1234", "Raging Spirit").is_player());
        assert!(!Entity::new("Pet-0-5678", "Felguard").is_player());
    }

    #[test]
    fn unknown_spec_keeps_neutral_bundle() {
        let mut entity = Entity::new("Player-1042-ABCDEF01", "Thrall");
        entity.set_spec(424242);
        assert_eq!(entity.spec_id, Some(424242));
        assert_eq!(entity.spec_info, SpecInfo::UNKNOWN);

        entity.set_spec(263);
        assert_eq!(entity.spec_info.class_name, "Shaman");
    }
}
