//! Raw input schemas and normalization.
//!
//! Two incompatible exporter generations are in the wild: the legacy v1
//! shape (camelCase, `DAMAGE`/`HEAL`/`COMBATANT` vocabulary, flat spell
//! fields, stringly-typed flags) and the current v2 shape (snake_case, the
//! expanded kind vocabulary, nested spell objects, real booleans). Each
//! generation gets its own serde types plus an adapter into the one
//! canonical [`Document`]; everything downstream of this module sees only
//! the canonical form.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::DocumentError;
use crate::models::{CastEvent, EquippedItem, EventKind, RosterRecord};

/// Canonical in-memory form of one log export, shared by both adapters.
#[derive(Debug, Clone)]
pub struct Document {
    pub log_version: Option<u32>,
    pub build_version: Option<String>,
    pub program_version: Option<String>,
    pub encounters: Vec<EncounterRecord>,
    pub entities: Vec<EntityRecord>,
}

/// Encounter metadata as declared by the log.
#[derive(Debug, Clone)]
pub struct EncounterRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub name: String,
    pub difficulty_id: i32,
    pub group_size: u32,
    pub roster: Vec<RosterRecord>,
}

/// One source of casts, with its pets nested.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub uid: String,
    pub name: String,
    pub events: Vec<CastEvent>,
    pub pets: Vec<PetRecord>,
}

#[derive(Debug, Clone)]
pub struct PetRecord {
    pub uid: String,
    pub name: String,
    pub events: Vec<CastEvent>,
}

/// Parse one raw export, dispatching on its schema generation.
///
/// A missing top-level `encounters` or `entities` list is a structural
/// error and aborts the parse; every smaller anomaly is normalized away.
pub fn parse_document(text: &str) -> Result<Document, DocumentError> {
    let probe: VersionProbe = serde_json::from_str(text)?;
    match probe.schema_generation() {
        1 => Ok(serde_json::from_str::<V1Document>(text)?.normalize()),
        2 => Ok(serde_json::from_str::<V2Document>(text)?.normalize()),
        other => Err(DocumentError::UnsupportedSchema(other)),
    }
}

/// Minimal first pass over the document to pick an adapter. An explicit
/// `schemaVersion` wins; otherwise the major of `programVersion`;
/// otherwise the legacy generation.
#[derive(Debug, Deserialize)]
struct VersionProbe {
    #[serde(default, alias = "schemaVersion")]
    schema_version: Option<u32>,
    #[serde(default, alias = "programVersion")]
    program_version: Option<String>,
}

impl VersionProbe {
    fn schema_generation(&self) -> u32 {
        if let Some(version) = self.schema_version {
            return version;
        }
        self.program_version
            .as_deref()
            .and_then(|v| v.split('.').next())
            .and_then(|major| major.parse().ok())
            .unwrap_or(1)
    }
}

/// Exported timestamps are RFC 3339; some legacy exports omit the offset.
/// Unparseable values pin the event to the minimum instant, which no
/// encounter window strictly contains, so the event is dropped downstream.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return t.with_timezone(&Utc);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return t.and_utc();
    }
    tracing::debug!(raw, "unparseable timestamp, event will route to no encounter");
    DateTime::<Utc>::MIN_UTC
}

/// Numeric field that may arrive as a JSON number or a numeric string.
/// Anything unresolvable becomes NaN rather than failing the record.
#[derive(Debug, Clone, Copy)]
struct LenientNumber(f64);

impl LenientNumber {
    fn as_f64(self) -> f64 {
        self.0
    }

    fn as_i32(self) -> i32 {
        if self.0.is_finite() {
            self.0 as i32
        } else {
            -1
        }
    }

    fn as_id(self) -> Option<u32> {
        if self.0.is_finite() && self.0 >= 0.0 {
            Some(self.0 as u32)
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for LenientNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => LenientNumber(n),
            Raw::Text(s) => LenientNumber(s.trim().parse().unwrap_or(f64::NAN)),
            Raw::Other(_) => LenientNumber(f64::NAN),
        })
    }
}

/// Combat-roll flag as the legacy exporter writes it: a boolean, or the
/// string "nil" for unset.
#[derive(Debug, Clone, Copy)]
struct Flag(bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
            Other(serde::de::IgnoredAny),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Flag(b),
            Raw::Text(s) => Flag(s != "nil"),
            Raw::Other(_) => Flag(false),
        })
    }
}

fn unset() -> i32 {
    -1
}

fn unknown_name() -> String {
    "unknown".to_string()
}

// ---------------------------------------------------------------------------
// v1: legacy exporter
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct V1Document {
    #[serde(default)]
    log_version: Option<u32>,
    #[serde(default)]
    build_version: Option<String>,
    #[serde(default)]
    program_version: Option<String>,
    encounters: Vec<V1Encounter>,
    entities: Vec<V1Entity>,
}

impl V1Document {
    fn normalize(self) -> Document {
        Document {
            log_version: self.log_version,
            build_version: self.build_version,
            program_version: self.program_version,
            encounters: self.encounters.into_iter().map(V1Encounter::normalize).collect(),
            entities: self.entities.into_iter().map(V1Entity::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct V1Encounter {
    timestamp: String,
    timestamp_end: String,
    #[serde(default)]
    encounter_name: String,
    #[serde(rename = "difficultyID", default)]
    difficulty_id: i32,
    #[serde(rename = "groupsize", default)]
    group_size: u32,
    #[serde(default)]
    combatants: Vec<V1Combatant>,
}

impl V1Encounter {
    fn normalize(self) -> EncounterRecord {
        EncounterRecord {
            start_time: parse_timestamp(&self.timestamp),
            end_time: parse_timestamp(&self.timestamp_end),
            name: self.encounter_name,
            difficulty_id: self.difficulty_id,
            group_size: self.group_size,
            roster: self.combatants.into_iter().map(V1Combatant::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V1Combatant {
    #[serde(rename = "UID")]
    uid: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "factionID", default)]
    faction_id: Option<LenientNumber>,
    #[serde(rename = "specID", default)]
    spec_id: Option<LenientNumber>,
    #[serde(default)]
    items: Vec<V1Item>,
}

impl V1Combatant {
    fn normalize(self) -> RosterRecord {
        RosterRecord {
            uid: self.uid,
            name: self.name,
            faction_id: self.faction_id.map_or(-1, LenientNumber::as_i32),
            spec_id: self.spec_id.map_or(-1, LenientNumber::as_i32),
            items: self.items.into_iter().map(V1Item::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V1Item {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    level: u32,
}

impl V1Item {
    fn normalize(self) -> EquippedItem {
        EquippedItem {
            item_id: self.id,
            item_level: self.level,
        }
    }
}

#[derive(Debug, Deserialize)]
struct V1Entity {
    #[serde(rename = "UID")]
    uid: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    events: Vec<V1Event>,
    #[serde(default)]
    pets: Vec<V1Pet>,
}

impl V1Entity {
    fn normalize(self) -> EntityRecord {
        EntityRecord {
            uid: self.uid,
            name: self.name,
            events: self.events.into_iter().filter_map(V1Event::normalize).collect(),
            pets: self.pets.into_iter().map(V1Pet::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V1Pet {
    #[serde(rename = "UID")]
    uid: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    events: Vec<V1Event>,
}

impl V1Pet {
    fn normalize(self) -> PetRecord {
        PetRecord {
            uid: self.uid,
            name: self.name,
            events: self.events.into_iter().filter_map(V1Event::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct V1Event {
    timestamp: String,
    event: String,
    #[serde(default)]
    spell_name: Option<String>,
    #[serde(rename = "spellID", default)]
    spell_id: Option<LenientNumber>,
    #[serde(default)]
    amount: Option<LenientNumber>,
    #[serde(default)]
    overhealing: Option<LenientNumber>,
    #[serde(default)]
    is_critical: Option<Flag>,
    #[serde(default)]
    is_glancing: Option<Flag>,
    #[serde(default)]
    is_crushing: Option<Flag>,
    #[serde(rename = "factionID", default)]
    faction_id: Option<LenientNumber>,
    #[serde(rename = "specID", default)]
    spec_id: Option<LenientNumber>,
}

impl V1Event {
    /// Map into the canonical event, or `None` for vocabulary this
    /// generation never defined (such records are dropped, as the original
    /// reader ignored them).
    fn normalize(self) -> Option<CastEvent> {
        let kind = match self.event.as_str() {
            "DAMAGE" => {
                if self.spell_name.is_some() {
                    EventKind::SpellDamage
                } else {
                    EventKind::MeleeDamage
                }
            }
            "HEAL" => EventKind::Heal,
            "COMBATANT" => EventKind::Combatant {
                faction_id: self.faction_id.map_or(-1, LenientNumber::as_i32),
                spec_id: self.spec_id.map_or(-1, LenientNumber::as_i32),
            },
            _ => return None,
        };
        let overhealing = if kind.is_heal() {
            self.overhealing.map_or(0.0, LenientNumber::as_f64)
        } else {
            0.0
        };
        Some(CastEvent {
            timestamp: parse_timestamp(&self.timestamp),
            kind,
            source_label: self.spell_name.unwrap_or_else(|| "Melee".to_string()),
            source_id: self.spell_id.and_then(LenientNumber::as_id),
            amount: self.amount.map_or(f64::NAN, LenientNumber::as_f64),
            overhealing,
            is_critical: self.is_critical.is_some_and(|f| f.0),
            is_glancing: self.is_glancing.is_some_and(|f| f.0),
            is_crushing: self.is_crushing.is_some_and(|f| f.0),
        })
    }
}

// ---------------------------------------------------------------------------
// v2: current exporter
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct V2Document {
    #[serde(default)]
    log_version: Option<u32>,
    #[serde(default)]
    build_version: Option<String>,
    #[serde(default)]
    program_version: Option<String>,
    encounters: Vec<V2Encounter>,
    entities: Vec<V2Entity>,
}

impl V2Document {
    fn normalize(self) -> Document {
        Document {
            log_version: self.log_version,
            build_version: self.build_version,
            program_version: self.program_version,
            encounters: self.encounters.into_iter().map(V2Encounter::normalize).collect(),
            entities: self.entities.into_iter().map(V2Entity::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2Encounter {
    start_time: String,
    end_time: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    difficulty: i32,
    #[serde(default)]
    group_size: u32,
    #[serde(default)]
    roster: Vec<V2RosterEntry>,
}

impl V2Encounter {
    fn normalize(self) -> EncounterRecord {
        EncounterRecord {
            start_time: parse_timestamp(&self.start_time),
            end_time: parse_timestamp(&self.end_time),
            name: self.name,
            difficulty_id: self.difficulty,
            group_size: self.group_size,
            roster: self.roster.into_iter().map(V2RosterEntry::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2RosterEntry {
    guid: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "unset")]
    faction_id: i32,
    #[serde(default = "unset")]
    spec_id: i32,
    #[serde(default)]
    equipment: Vec<V2EquipmentSlot>,
}

impl V2RosterEntry {
    fn normalize(self) -> RosterRecord {
        RosterRecord {
            uid: self.guid,
            name: self.name,
            faction_id: self.faction_id,
            spec_id: self.spec_id,
            items: self.equipment.into_iter().map(V2EquipmentSlot::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2EquipmentSlot {
    #[serde(default)]
    item_id: u64,
    #[serde(default)]
    item_level: u32,
}

impl V2EquipmentSlot {
    fn normalize(self) -> EquippedItem {
        EquippedItem {
            item_id: self.item_id,
            item_level: self.item_level,
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2Entity {
    guid: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    events: Vec<V2Event>,
    #[serde(default)]
    pets: Vec<V2Pet>,
}

impl V2Entity {
    fn normalize(self) -> EntityRecord {
        EntityRecord {
            uid: self.guid,
            name: self.name,
            events: self.events.into_iter().filter_map(V2Event::normalize).collect(),
            pets: self.pets.into_iter().map(V2Pet::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2Pet {
    guid: String,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    events: Vec<V2Event>,
}

impl V2Pet {
    fn normalize(self) -> PetRecord {
        PetRecord {
            uid: self.guid,
            name: self.name,
            events: self.events.into_iter().filter_map(V2Event::normalize).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2Event {
    timestamp: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    spell: Option<V2Spell>,
    #[serde(default)]
    amount: Option<LenientNumber>,
    #[serde(default)]
    overheal: Option<LenientNumber>,
    #[serde(default)]
    critical: bool,
    #[serde(default)]
    glancing: bool,
    #[serde(default)]
    crushing: bool,
    #[serde(default = "unset")]
    faction_id: i32,
    #[serde(default = "unset")]
    spec_id: i32,
}

#[derive(Debug, Deserialize)]
struct V2Spell {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
}

impl V2Event {
    fn normalize(self) -> Option<CastEvent> {
        let kind = match self.kind.as_str() {
            "swing_damage" => EventKind::MeleeDamage,
            "range_damage" => EventKind::RangeDamage,
            "spell_damage" => EventKind::SpellDamage,
            "spell_periodic_damage" => EventKind::PeriodicDamage,
            "spell_heal" => EventKind::Heal,
            "spell_periodic_heal" => EventKind::PeriodicHeal,
            "spell_absorbed" => EventKind::AbsorbedHeal,
            "combatant_info" => EventKind::Combatant {
                faction_id: self.faction_id,
                spec_id: self.spec_id,
            },
            _ => return None,
        };
        let (spell_id, spell_name) = match self.spell {
            Some(spell) => (spell.id, spell.name),
            None => (None, None),
        };
        let overhealing = if kind.is_heal() {
            self.overheal.map_or(0.0, LenientNumber::as_f64)
        } else {
            0.0
        };
        Some(CastEvent {
            timestamp: parse_timestamp(&self.timestamp),
            kind,
            source_label: spell_name.unwrap_or_else(|| "Melee".to_string()),
            source_id: spell_id,
            amount: self.amount.map_or(f64::NAN, LenientNumber::as_f64),
            overhealing,
            is_critical: self.critical,
            is_glancing: self.glancing,
            is_crushing: self.crushing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_document_normalizes() {
        let text = r#"{
            "programVersion": "1.4",
            "buildVersion": "9.2.7",
            "logVersion": 9,
            "encounters": [{
                "timestamp": "2022-08-01T20:00:00Z",
                "timestampEnd": "2022-08-01T20:05:00Z",
                "encounterName": "The Lich King",
                "difficultyID": 16,
                "groupsize": 20,
                "combatants": [{
                    "UID": "Player-1042-0A1B2C3D",
                    "factionID": "1",
                    "specID": 251,
                    "items": [{"id": 50730, "level": 284}]
                }]
            }],
            "entities": [{
                "UID": "Player-1042-0A1B2C3D",
                "name": "Arthas-Frostmourne",
                "events": [
                    {"timestamp": "2022-08-01T20:01:00Z", "event": "DAMAGE",
                     "spellName": "Obliterate", "spellID": 49020,
                     "amount": "1234", "isCritical": "1"},
                    {"timestamp": "2022-08-01T20:01:02Z", "event": "DAMAGE",
                     "amount": 55, "isCritical": "nil"},
                    {"timestamp": "2022-08-01T20:01:04Z", "event": "HEAL",
                     "spellName": "Death Strike", "spellID": 49998,
                     "amount": 300, "overhealing": 100},
                    {"timestamp": "2022-08-01T20:01:05Z", "event": "COMBATANT",
                     "factionID": 1, "specID": 251},
                    {"timestamp": "2022-08-01T20:01:06Z", "event": "ENERGIZE",
                     "amount": 20}
                ],
                "pets": [{
                    "UID": "Pet-0-3042-0F0E0D0C",
                    "name": "Risen Ghoul",
                    "events": [
                        {"timestamp": "2022-08-01T20:01:03Z", "event": "DAMAGE",
                         "spellName": "Claw", "spellID": 47468, "amount": 77}
                    ]
                }]
            }]
        }"#;

        let doc = parse_document(text).unwrap();
        assert_eq!(doc.log_version, Some(9));
        assert_eq!(doc.program_version.as_deref(), Some("1.4"));
        assert_eq!(doc.encounters.len(), 1);

        let enc = &doc.encounters[0];
        assert_eq!(enc.name, "The Lich King");
        assert_eq!(enc.difficulty_id, 16);
        assert_eq!(enc.group_size, 20);
        assert_eq!(enc.roster.len(), 1);
        assert_eq!(enc.roster[0].faction_id, 1);
        assert_eq!(enc.roster[0].spec_id, 251);
        assert_eq!(enc.roster[0].items, vec![EquippedItem { item_id: 50730, item_level: 284 }]);

        let entity = &doc.entities[0];
        // The ENERGIZE record is outside the v1 vocabulary and was dropped.
        assert_eq!(entity.events.len(), 4);

        let spell = &entity.events[0];
        assert_eq!(spell.kind, EventKind::SpellDamage);
        assert_eq!(spell.source_label, "Obliterate");
        assert_eq!(spell.source_id, Some(49020));
        assert_eq!(spell.amount, 1234.0);
        assert!(spell.is_critical);

        let melee = &entity.events[1];
        assert_eq!(melee.kind, EventKind::MeleeDamage);
        assert_eq!(melee.source_label, "Melee");
        assert_eq!(melee.source_id, None);
        assert!(!melee.is_critical);

        let heal = &entity.events[2];
        assert_eq!(heal.kind, EventKind::Heal);
        assert_eq!(heal.amount, 300.0);
        assert_eq!(heal.overhealing, 100.0);

        assert_eq!(
            entity.events[3].kind,
            EventKind::Combatant { faction_id: 1, spec_id: 251 }
        );

        assert_eq!(entity.pets.len(), 1);
        assert_eq!(entity.pets[0].events[0].amount, 77.0);
    }

    #[test]
    fn v2_document_normalizes() {
        let text = r#"{
            "schema_version": 2,
            "program_version": "2.0.1",
            "log_version": 11,
            "encounters": [{
                "start_time": "2024-03-10T19:30:00Z",
                "end_time": "2024-03-10T19:36:05Z",
                "name": "Fyrakk",
                "difficulty": 16,
                "group_size": 20,
                "roster": [{
                    "guid": "Player-3676-0BCDEF12",
                    "name": "Sylvanas-TarrenMill",
                    "faction_id": 0,
                    "spec_id": 254,
                    "equipment": [
                        {"item_id": 207165, "item_level": 489},
                        {"item_id": 0, "item_level": 0}
                    ]
                }]
            }],
            "entities": [{
                "guid": "Player-3676-0BCDEF12",
                "name": "Sylvanas-TarrenMill",
                "events": [
                    {"timestamp": "2024-03-10T19:31:00Z", "type": "spell_periodic_damage",
                     "spell": {"id": 271788, "name": "Serpent Sting"}, "amount": 4200,
                     "critical": true},
                    {"timestamp": "2024-03-10T19:31:01Z", "type": "swing_damage", "amount": 900},
                    {"timestamp": "2024-03-10T19:31:02Z", "type": "spell_absorbed",
                     "spell": {"id": 17, "name": "Power Word: Shield"}, "amount": 1500,
                     "overheal": 250},
                    {"timestamp": "2024-03-10T19:31:03Z", "type": "combatant_info",
                     "faction_id": 0, "spec_id": 254}
                ],
                "pets": []
            }]
        }"#;

        let doc = parse_document(text).unwrap();
        assert_eq!(doc.log_version, Some(11));

        let entity = &doc.entities[0];
        assert_eq!(entity.events[0].kind, EventKind::PeriodicDamage);
        assert_eq!(entity.events[0].source_label, "Serpent Sting");
        assert!(entity.events[0].is_critical);
        assert_eq!(entity.events[1].kind, EventKind::MeleeDamage);
        assert_eq!(entity.events[1].source_label, "Melee");
        assert_eq!(entity.events[2].kind, EventKind::AbsorbedHeal);
        assert_eq!(entity.events[2].overhealing, 250.0);
        assert_eq!(
            entity.events[3].kind,
            EventKind::Combatant { faction_id: 0, spec_id: 254 }
        );

        // Roster equipment passes through unfiltered; the roster pass
        // drops degenerate levels later.
        assert_eq!(doc.encounters[0].roster[0].items.len(), 2);
    }

    #[test]
    fn program_version_major_selects_the_adapter() {
        let text = r#"{
            "program_version": "2.3.0",
            "encounters": [],
            "entities": []
        }"#;
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.program_version.as_deref(), Some("2.3.0"));
    }

    #[test]
    fn missing_top_level_list_is_fatal() {
        let text = r#"{"programVersion": "1.0", "encounters": []}"#;
        let err = parse_document(text).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn unsupported_schema_version_is_fatal() {
        let text = r#"{"schemaVersion": 7, "encounters": [], "entities": []}"#;
        let err = parse_document(text).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedSchema(7)));
    }

    #[test]
    fn garbage_amount_becomes_nan() {
        let text = r#"{
            "encounters": [],
            "entities": [{
                "UID": "Player-1-1",
                "name": "Jaina",
                "events": [{"timestamp": "2022-08-01T20:01:00Z", "event": "DAMAGE",
                            "spellName": "Frostbolt", "spellID": 116, "amount": "oops"}]
            }]
        }"#;
        let doc = parse_document(text).unwrap();
        assert!(doc.entities[0].events[0].amount.is_nan());
    }

    #[test]
    fn unparseable_timestamp_pins_to_minimum() {
        let text = r#"{
            "encounters": [],
            "entities": [{
                "UID": "Player-1-1",
                "name": "Jaina",
                "events": [{"timestamp": "not a time", "event": "HEAL", "amount": 10}]
            }]
        }"#;
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.entities[0].events[0].timestamp, DateTime::<Utc>::MIN_UTC);
    }
}
