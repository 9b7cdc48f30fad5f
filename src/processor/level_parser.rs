//! Turns a level script into a resolved `LevelDocument`.
//!
//! Three passes over the object list:
//!   1. decode every statement in source order, collecting door groups
//!   2. hand each counter/click box its door ids, register it as owner
//!   3. drop `owners` on walls that have fewer than two of them

use std::collections::HashMap;

use crate::model::{Doors, LevelDocument, LevelObject, Number, ObjectId, ObjectKind, Spawn};

use super::ProcessedLevel;
use super::error::{Diagnostics, ParseError};
use super::numeric::to_number;
use super::objects::ObjectType;
use super::patterns::{Statement, grammar};

pub fn parse_level(source: &str, name: &str) -> ProcessedLevel {
    let mut diagnostics = Diagnostics::new();
    let mut document = LevelDocument::new(name);

    document.spawn = parse_spawn(source, &mut diagnostics);

    // 1st pass: objects + door groups.
    let mut groups = DoorGroups::new();
    for (id, statement) in grammar().statements(source).enumerate() {
        let kind = decode_statement(id, &statement, &mut diagnostics);
        if let Some(key) = statement.door_key {
            groups.insert(key, id);
        }
        document.objects.push(LevelObject { id, kind });
    }
    log::info!(
        "Found {} object statements, {} door groups",
        document.objects.len(),
        groups.len()
    );

    // 2nd pass: doors <-> owners.
    link_doors(&mut document.objects, &groups);

    // 3rd pass: single-owner walls lose the field.
    prune_owners(&mut document.objects);

    ProcessedLevel {
        document,
        diagnostics: diagnostics.into_vec(),
    }
}

/// Door key → ids of the objects pushed under it, in source order.
struct DoorGroups {
    groups: HashMap<String, Vec<ObjectId>>,
}

impl DoorGroups {
    fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    fn insert(&mut self, key: &str, id: ObjectId) {
        self.groups.entry(key.to_string()).or_default().push(id);
    }

    fn get(&self, key: &str) -> Option<&Vec<ObjectId>> {
        self.groups.get(key)
    }

    fn len(&self) -> usize {
        self.groups.len()
    }
}

fn parse_spawn(source: &str, diagnostics: &mut Diagnostics) -> Spawn {
    let Some(call) = grammar().spawn_call(source) else {
        diagnostics.report(ParseError::SpawnPatternMismatch);
        return Spawn::invalid();
    };

    let coords = grammar().integers(call);
    let mut coord = |index: usize, field: &'static str| -> Number {
        let token = coords.get(index).copied().unwrap_or("");
        let value = to_number(token);
        if value.is_invalid() {
            diagnostics.report(ParseError::NumericDecodeFailure {
                id: None,
                field,
                token: token.to_string(),
            });
        }
        value
    };

    Spawn {
        x: coord(0, "x"),
        y: coord(1, "y"),
    }
}

fn decode_statement(
    id: ObjectId,
    statement: &Statement<'_>,
    diagnostics: &mut Diagnostics,
) -> ObjectKind {
    let found = grammar()
        .object_keyword(statement.text)
        .and_then(|(keyword, end)| Some((ObjectType::from_keyword(keyword)?, end)));

    match found {
        Some((object_type, end)) => {
            object_type.decode(id, statement.text, &statement.text[end..], diagnostics)
        }
        None => {
            diagnostics.report(ParseError::ObjectTypeMismatch { id });
            ObjectKind::Unknown
        }
    }
}

fn link_doors(objects: &mut [LevelObject], groups: &DoorGroups) {
    for owner in 0..objects.len() {
        let Some(Doors::Key(key)) = objects[owner].kind.doors() else {
            continue;
        };

        let members = match groups.get(key) {
            Some(ids) => ids.clone(),
            None => {
                log::debug!(
                    "{}",
                    ParseError::UnresolvedDoorKey {
                        id: owner,
                        key: key.clone(),
                    }
                );
                Vec::new()
            }
        };

        for &member in &members {
            if let ObjectKind::Wall(wall) = &mut objects[member].kind {
                wall.owners.get_or_insert_with(Vec::new).push(owner);
            }
        }

        if let Some(doors) = objects[owner].kind.doors_mut() {
            *doors = Doors::Resolved(members);
        }
    }
}

fn prune_owners(objects: &mut [LevelObject]) {
    for object in objects {
        if let ObjectKind::Wall(wall) = &mut object.kind {
            if wall.owners.as_ref().is_some_and(|owners| owners.len() <= 1) {
                wall.owners = None;
            }
        }
    }
}
