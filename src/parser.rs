//! Log aggregation engine.
//!
//! Rebuilds the encounter/entity/pet forest from a normalized document and
//! derives the performance metrics shown in the result tables. Aggregation
//! runs as four strictly ordered passes, each completing before the next:
//!
//! 1. routing: every cast record lands in the encounter whose window
//!    strictly contains its timestamp (or nowhere, and is dropped)
//! 2. roster: per-encounter combatant records set faction, spec and
//!    equipped items
//! 3. metrics: per-entity totals, pet roll-up, DPS/HPS, item level,
//!    per-encounter group totals
//! 4. MVP: combined damage+healing per player identifier across the
//!    whole log

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::DocumentError;
use crate::format;
use crate::models::*;
use crate::schema::{self, Document, EncounterRecord, EntityRecord};

/// Read, parse and aggregate one combat log export.
pub fn parse_log_file(path: &Path) -> Result<LogAggregate, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let document = schema::parse_document(&text)?;
    Ok(aggregate(document))
}

/// Aggregate a normalized document into per-encounter statistics.
pub fn aggregate(document: Document) -> LogAggregate {
    let Document {
        log_version,
        build_version,
        program_version,
        encounters,
        entities,
    } = document;

    let mut encounters = build_encounters(encounters);
    route_events(&mut encounters, entities);
    apply_rosters(&mut encounters);
    compute_metrics(&mut encounters);
    let most_valuable_player = most_valuable_player(&encounters);

    LogAggregate {
        log_version,
        build_version,
        program_version,
        encounters,
        most_valuable_player,
    }
}

/// One encounter per metadata record, in input order. All windows exist
/// before any event is routed.
fn build_encounters(records: Vec<EncounterRecord>) -> Vec<Encounter> {
    records
        .into_iter()
        .map(|record| {
            let duration_ms = (record.end_time - record.start_time).num_milliseconds();
            Encounter {
                name: record.name,
                difficulty_name: difficulty_name(record.difficulty_id),
                difficulty_id: record.difficulty_id,
                group_size: record.group_size,
                start_time: record.start_time,
                end_time: record.end_time,
                duration_secs: duration_ms as f64 / 1000.0,
                duration_display: format::format_duration(duration_ms),
                entities: Vec::new(),
                total_group_damage: 0.0,
                total_group_healing: 0.0,
                total_group_damage_display: String::new(),
                total_group_healing_display: String::new(),
                roster: record.roster,
            }
        })
        .collect()
}

/// First encounter whose window strictly contains the timestamp.
fn encounter_index_at(encounters: &[Encounter], timestamp: DateTime<Utc>) -> Option<usize> {
    encounters.iter().position(|e| e.contains(timestamp))
}

/// Routing pass. Damage and heal casts append to their entity's event
/// list; combatant registrations apply faction/spec immediately; events
/// matching no window are dropped (pre-pull and post-wipe noise).
fn route_events(encounters: &mut [Encounter], entities: Vec<EntityRecord>) {
    let mut dropped = 0usize;

    for record in entities {
        for event in record.events {
            let Some(idx) = encounter_index_at(encounters, event.timestamp) else {
                dropped += 1;
                continue;
            };
            let entity = encounters[idx].entity_mut(&record.uid, &record.name);
            match event.kind {
                EventKind::Combatant { faction_id, spec_id } => {
                    entity.faction_id = Some(faction_id);
                    entity.set_spec(spec_id);
                }
                _ => entity.events.push(event),
            }
        }

        for pet in record.pets {
            for event in pet.events {
                // Pets contribute casts only; registrations belong to owners.
                if !event.kind.is_damage() && !event.kind.is_heal() {
                    continue;
                }
                let Some(idx) = encounter_index_at(encounters, event.timestamp) else {
                    dropped += 1;
                    continue;
                };
                let owner = encounters[idx].entity_mut(&record.uid, &record.name);
                owner.pet_mut(&pet.uid, &pet.name).events.push(event);
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "events outside every encounter window were dropped");
    }
}

/// Roster pass. Consumes each encounter's combatant records, registering
/// faction, spec and equipment. Item levels 0 and 1 mean "no real item"
/// and never reach the entity.
fn apply_rosters(encounters: &mut [Encounter]) {
    for encounter in encounters.iter_mut() {
        let roster = std::mem::take(&mut encounter.roster);
        for entry in roster {
            let display_name = entry.name.as_deref().unwrap_or("unknown").to_string();
            let entity = encounter.entity_mut(&entry.uid, &display_name);
            entity.faction_id = Some(entry.faction_id);
            entity.set_spec(entry.spec_id);
            entity.equipped_items = entry
                .items
                .into_iter()
                .filter(|item| item.item_level > 1)
                .collect();
        }
    }
}

/// Metrics pass. Pet contributions roll up into the owner, but a pet's
/// own DPS/HPS come from the pet's own totals. Zero-duration encounters
/// divide through faithfully and surface as non-finite rates.
fn compute_metrics(encounters: &mut [Encounter]) {
    for encounter in encounters.iter_mut() {
        let duration_secs = encounter.duration_secs;
        let mut group_damage = 0.0;
        let mut group_healing = 0.0;

        for entity in encounter.entities.iter_mut() {
            let (mut damage, mut healing) = sum_casts(&entity.events);

            for pet in entity.pets.iter_mut() {
                let (pet_damage, pet_healing) = sum_casts(&pet.events);
                pet.total_damage_done = pet_damage;
                pet.total_healing_done = pet_healing;
                pet.dps = pet_damage / duration_secs;
                pet.hps = pet_healing / duration_secs;
                damage += pet_damage;
                healing += pet_healing;
            }

            entity.total_damage_done = damage;
            entity.total_healing_done = healing;
            entity.dps = damage / duration_secs;
            entity.hps = healing / duration_secs;
            entity.average_item_level = average_item_level(&entity.equipped_items);

            if entity.is_player() {
                group_damage += entity.total_damage_done;
                group_healing += entity.total_healing_done;
            }
        }

        encounter.total_group_damage = group_damage;
        encounter.total_group_healing = group_healing;
        encounter.total_group_damage_display = format::format_number(group_damage);
        encounter.total_group_healing_display = format::format_number(group_healing);
    }
}

/// Damage and effective healing (net of overhealing) across a cast list.
fn sum_casts(events: &[CastEvent]) -> (f64, f64) {
    let mut damage = 0.0;
    let mut healing = 0.0;
    for event in events {
        if event.kind.is_damage() {
            damage += event.amount;
        } else if event.kind.is_heal() {
            healing += event.amount - event.overhealing;
        }
    }
    (damage, healing)
}

/// Rounded mean item level, `None` when no qualifying items are equipped.
fn average_item_level(items: &[EquippedItem]) -> Option<u32> {
    if items.is_empty() {
        return None;
    }
    let sum: u32 = items.iter().map(|item| item.item_level).sum();
    Some((sum as f64 / items.len() as f64).round() as u32)
}

/// MVP pass. Combined damage+healing per player identifier across all
/// encounters; the same player in two encounters is merged here by UID.
/// Ties keep the first identifier seen in encounter-then-entity order,
/// and a NaN score can never displace a real one.
fn most_valuable_player(encounters: &[Encounter]) -> Option<String> {
    let mut scores: Vec<(&str, &str, f64)> = Vec::new();
    for encounter in encounters {
        for entity in &encounter.entities {
            if !entity.is_player() {
                continue;
            }
            let combined = entity.total_damage_done + entity.total_healing_done;
            match scores.iter_mut().find(|(uid, _, _)| *uid == entity.uid) {
                Some(entry) => entry.2 += combined,
                None => scores.push((entity.uid.as_str(), entity.name.as_str(), combined)),
            }
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (_, name, score) in &scores {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if *score <= best_score => {}
            _ => best = Some((*name, *score)),
        }
    }

    best.map(|(name, _)| name.to_string())
        .or_else(|| scores.first().map(|(_, name, _)| name.to_string()))
}
