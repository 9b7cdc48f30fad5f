use serde::{Serialize, Serializer};

/// Marker written in place of any value that could not be decoded.
pub const INVALID_DATA: &str = "INVALID_DATA";

/// Object id: the rank of the statement in the source text.
pub type ObjectId = usize;

/// An integer field that either decoded or carries the `INVALID_DATA` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    Int(i64),
    Invalid,
}

impl Number {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Number::Invalid)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(n) => serializer.serialize_i64(*n),
            Number::Invalid => serializer.serialize_str(INVALID_DATA),
        }
    }
}

/// RGBA color. Alpha is always written as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: Number,
    pub g: Number,
    pub b: Number,
    pub a: u8,
}

impl Color {
    pub fn invalid() -> Self {
        Self {
            r: Number::Invalid,
            g: Number::Invalid,
            b: Number::Invalid,
            a: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spawn {
    pub x: Number,
    pub y: Number,
}

impl Spawn {
    pub fn invalid() -> Self {
        Self {
            x: Number::Invalid,
            y: Number::Invalid,
        }
    }
}

/// Position and size shared by every placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: Number,
    pub y: Number,
    pub width: Number,
    pub height: Number,
}

/// `doors` of a counter or click box.
///
/// Holds the raw door-key token right after decoding; the resolver replaces it
/// with the ids registered under that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Doors {
    Key(String),
    Resolved(Vec<ObjectId>),
}

impl Default for Doors {
    fn default() -> Self {
        Doors::Resolved(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallBody {
    #[serde(flatten)]
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Wall {
    /// Ids of the counters/click boxes using this wall as a door.
    /// Dropped once resolution finds fewer than two of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<ObjectId>>,
    #[serde(flatten)]
    pub body: Option<WallBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Teleport {
    #[serde(rename = "isBad")]
    pub is_bad: bool,
    #[serde(flatten)]
    pub body: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterBody {
    #[serde(flatten)]
    pub rect: Rect,
    pub count: Number,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AreaCounter {
    pub doors: Doors,
    #[serde(flatten)]
    pub body: Option<CounterBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickBoxBody {
    #[serde(flatten)]
    pub rect: Rect,
    pub count: Number,
    #[serde(rename = "relaxationTime")]
    pub relaxation_time: Number,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ClickBox {
    pub doors: Doors,
    #[serde(flatten)]
    pub body: Option<ClickBoxBody>,
}

/// The closed set of object variants a level can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// Statement matched but named no known object type.
    Unknown,
    Wall(Wall),
    Teleport(Teleport),
    AreaCounter(AreaCounter),
    ClickBox(ClickBox),
}

impl ObjectKind {
    /// Numeric `type` code written to the output.
    pub fn type_code(&self) -> Number {
        match self {
            ObjectKind::Unknown => Number::Invalid,
            ObjectKind::Wall(_) => Number::Int(1),
            ObjectKind::Teleport(_) => Number::Int(2),
            ObjectKind::AreaCounter(_) => Number::Int(3),
            ObjectKind::ClickBox(_) => Number::Int(4),
        }
    }

    pub fn doors(&self) -> Option<&Doors> {
        match self {
            ObjectKind::AreaCounter(c) => Some(&c.doors),
            ObjectKind::ClickBox(c) => Some(&c.doors),
            _ => None,
        }
    }

    pub fn doors_mut(&mut self) -> Option<&mut Doors> {
        match self {
            ObjectKind::AreaCounter(c) => Some(&mut c.doors),
            ObjectKind::ClickBox(c) => Some(&mut c.doors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
}

/// Output layout: `id` and `type` first, then the variant's own fields.
#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    id: ObjectId,
    #[serde(rename = "type")]
    type_code: Number,
    #[serde(flatten)]
    fields: &'a T,
}

impl Serialize for LevelObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fn tagged<'a, T: Serialize>(obj: &LevelObject, fields: &'a T) -> Tagged<'a, T> {
            Tagged {
                id: obj.id,
                type_code: obj.kind.type_code(),
                fields,
            }
        }

        match &self.kind {
            ObjectKind::Unknown => tagged(self, &serde_json::Map::new()).serialize(serializer),
            ObjectKind::Wall(w) => tagged(self, w).serialize(serializer),
            ObjectKind::Teleport(t) => tagged(self, t).serialize(serializer),
            ObjectKind::AreaCounter(c) => tagged(self, c).serialize(serializer),
            ObjectKind::ClickBox(c) => tagged(self, c).serialize(serializer),
        }
    }
}

/// Fully resolved level, handed to `writer`.
///
/// `objects[i].id == i` always holds; doors and owners refer to objects by
/// that index only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelDocument {
    pub spawn: Spawn,
    pub objects: Vec<LevelObject>,
    pub lvlname: String,
}

impl LevelDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spawn: Spawn {
                x: Number::Int(0),
                y: Number::Int(0),
            },
            objects: Vec::new(),
            lvlname: name.into(),
        }
    }

    /// Compact JSON, no pretty-printing.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Source text and level name as delivered by the loader.
#[derive(Debug, Clone)]
pub struct RawLevel {
    pub source: String,
    pub name: String,
}
