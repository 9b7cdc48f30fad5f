//! Object variants and their argument decoders.

use crate::model::{
    AreaCounter, ClickBox, ClickBoxBody, Color, CounterBody, Doors, Number, ObjectId, ObjectKind,
    Rect, Teleport, Wall, WallBody,
};

use super::error::{Diagnostics, ParseError};
use super::numeric::{decode_color, to_number};
use super::patterns::{grammar, split_arguments};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Wall,
    Teleport,
    AreaCounter,
    ClickBox,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Wall,
        ObjectType::Teleport,
        ObjectType::AreaCounter,
        ObjectType::ClickBox,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ObjWall" => Some(ObjectType::Wall),
            "ObjTeleport" => Some(ObjectType::Teleport),
            "ObjAreaCounter" => Some(ObjectType::AreaCounter),
            "ObjClickBox" => Some(ObjectType::ClickBox),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ObjectType::Wall => "ObjWall",
            ObjectType::Teleport => "ObjTeleport",
            ObjectType::AreaCounter => "ObjAreaCounter",
            ObjectType::ClickBox => "ObjClickBox",
        }
    }

    /// Fields that exist even when the argument list can't be read.
    fn skeleton(&self, statement: &str) -> ObjectKind {
        match self {
            ObjectType::Wall => ObjectKind::Wall(Wall {
                owners: Some(Vec::new()),
                body: None,
            }),
            ObjectType::Teleport => ObjectKind::Teleport(Teleport {
                is_bad: grammar().is_bad_teleport(statement),
                body: None,
            }),
            ObjectType::AreaCounter => ObjectKind::AreaCounter(AreaCounter::default()),
            ObjectType::ClickBox => ObjectKind::ClickBox(ClickBox::default()),
        }
    }

    /// Decodes one statement.
    ///
    /// `arguments` is the statement text following the type keyword. Positional
    /// layout per variant:
    ///   • Wall         x, y, width, height, color
    ///   • Teleport     x, y, width, height
    ///   • AreaCounter  doors, x, y, width, height, count, color
    ///   • ClickBox     doors, x, y, width, height, count, relaxationTime, color
    pub fn decode(
        &self,
        id: ObjectId,
        statement: &str,
        arguments: &str,
        diagnostics: &mut Diagnostics,
    ) -> ObjectKind {
        let mut kind = self.skeleton(statement);

        let Some(list) = grammar().arguments(arguments) else {
            diagnostics.report(ParseError::ArgumentPatternMismatch {
                id,
                kind: self.keyword(),
            });
            return kind;
        };
        log::debug!("object {id}: {} arguments `{list}`", self.keyword());

        let mut args = Arguments {
            id,
            values: split_arguments(list),
            diagnostics,
        };

        match &mut kind {
            ObjectKind::Wall(wall) => {
                wall.body = Some(WallBody {
                    rect: args.rect(0),
                    color: args.color(4),
                });
            }
            ObjectKind::Teleport(teleport) => {
                teleport.body = Some(args.rect(0));
            }
            ObjectKind::AreaCounter(counter) => {
                counter.doors = Doors::Key(args.raw(0).to_string());
                counter.body = Some(CounterBody {
                    rect: args.rect(1),
                    count: args.int(5, "count"),
                    color: args.color(6),
                });
            }
            ObjectKind::ClickBox(click_box) => {
                click_box.doors = Doors::Key(args.raw(0).to_string());
                click_box.body = Some(ClickBoxBody {
                    rect: args.rect(1),
                    count: args.int(5, "count"),
                    relaxation_time: args.int(6, "relaxationTime"),
                    color: args.color(7),
                });
            }
            ObjectKind::Unknown => {}
        }

        kind
    }
}

/// Positional view over a whitespace-free, comma-split argument list.
struct Arguments<'d> {
    id: ObjectId,
    values: Vec<String>,
    diagnostics: &'d mut Diagnostics,
}

impl Arguments<'_> {
    fn raw(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    fn int(&mut self, index: usize, field: &'static str) -> Number {
        let token = self.raw(index);
        let value = to_number(token);
        if value.is_invalid() {
            let token = token.to_string();
            self.diagnostics.report(ParseError::NumericDecodeFailure {
                id: Some(self.id),
                field,
                token,
            });
        }
        value
    }

    fn rect(&mut self, start: usize) -> Rect {
        Rect {
            x: self.int(start, "x"),
            y: self.int(start + 1, "y"),
            width: self.int(start + 2, "width"),
            height: self.int(start + 3, "height"),
        }
    }

    fn color(&mut self, index: usize) -> Color {
        match decode_color(self.raw(index)) {
            Some(color) => color,
            None => {
                let token = self.raw(index).to_string();
                self.diagnostics.report(ParseError::NumericDecodeFailure {
                    id: Some(self.id),
                    field: "color",
                    token,
                });
                Color::invalid()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(ty: ObjectType, statement: &str) -> (ObjectKind, Vec<ParseError>) {
        let (_, end) = grammar().object_keyword(statement).expect("keyword present");
        let mut diagnostics = Diagnostics::new();
        let kind = ty.decode(0, statement, &statement[end..], &mut diagnostics);
        (kind, diagnostics.into_vec())
    }

    fn rect(x: i64, y: i64, width: i64, height: i64) -> Rect {
        Rect {
            x: Number::Int(x),
            y: Number::Int(y),
            width: Number::Int(width),
            height: Number::Int(height),
        }
    }

    fn rgb(r: i64, g: i64, b: i64) -> Color {
        Color {
            r: Number::Int(r),
            g: Number::Int(g),
            b: Number::Int(b),
            a: 0,
        }
    }

    #[test]
    fn test_keywords_round_trip() {
        for ty in ObjectType::ALL {
            assert_eq!(ObjectType::from_keyword(ty.keyword()), Some(ty));
        }
        assert_eq!(ObjectType::from_keyword("ObjBarrel"), None);
    }

    #[test]
    fn test_decode_wall() {
        let (kind, errors) = decode(
            ObjectType::Wall,
            "AddObject(new ObjWall(10, -10, 50, 60, 0xFF0080))",
        );
        assert!(errors.is_empty());
        assert_eq!(
            kind,
            ObjectKind::Wall(Wall {
                owners: Some(vec![]),
                body: Some(WallBody {
                    rect: rect(10, -10, 50, 60),
                    color: rgb(255, 0, 128),
                }),
            })
        );
    }

    #[test]
    fn test_decode_teleport_marker() {
        let test_cases = vec![
            (
                "AddObject(new ObjTeleport(1, 2, 3, 4, LevelManager::GetNextLevel(this)))",
                true,
            ),
            ("AddObject(new ObjTeleport(1, 2, 3, 4))", false),
        ];

        for (statement, is_bad) in test_cases {
            let (kind, errors) = decode(ObjectType::Teleport, statement);
            assert!(errors.is_empty());
            assert_eq!(
                kind,
                ObjectKind::Teleport(Teleport {
                    is_bad,
                    body: Some(rect(1, 2, 3, 4)),
                })
            );
        }
    }

    #[test]
    fn test_decode_counter_and_click_box() {
        let (kind, errors) = decode(
            ObjectType::AreaCounter,
            "AddObject(new ObjAreaCounter(wallByColor[1], 5, 5, 20, 20, 3, 0x00FF00))",
        );
        assert!(errors.is_empty());
        assert_eq!(
            kind,
            ObjectKind::AreaCounter(AreaCounter {
                doors: Doors::Key("wallByColor[1]".into()),
                body: Some(CounterBody {
                    rect: rect(5, 5, 20, 20),
                    count: Number::Int(3),
                    color: rgb(0, 255, 0),
                }),
            })
        );

        let (kind, errors) = decode(
            ObjectType::ClickBox,
            "AddObject(new ObjClickBox(wallByColor[2], 1, 2, 3, 4, 5, 600, 0x000001))",
        );
        assert!(errors.is_empty());
        assert_eq!(
            kind,
            ObjectKind::ClickBox(ClickBox {
                doors: Doors::Key("wallByColor[2]".into()),
                body: Some(ClickBoxBody {
                    rect: rect(1, 2, 3, 4),
                    count: Number::Int(5),
                    relaxation_time: Number::Int(600),
                    color: rgb(0, 0, 1),
                }),
            })
        );
    }

    #[test]
    fn test_argument_mismatch_keeps_skeleton() {
        let (kind, errors) = decode(ObjectType::Wall, "AddObject(new ObjWall(left, top))");
        assert_eq!(
            kind,
            ObjectKind::Wall(Wall {
                owners: Some(vec![]),
                body: None,
            })
        );
        assert_eq!(
            errors,
            vec![ParseError::ArgumentPatternMismatch { id: 0, kind: "ObjWall" }]
        );

        let (kind, _) = decode(ObjectType::ClickBox, "AddObject(new ObjClickBox(key))");
        assert_eq!(kind, ObjectKind::ClickBox(ClickBox::default()));
    }

    #[test]
    fn test_missing_fields_are_invalid() {
        // Short color and no height: only those fields fail.
        let (kind, errors) = decode(ObjectType::Wall, "AddObject(new ObjWall(1, 2, 3))");
        let ObjectKind::Wall(Wall { body: Some(body), .. }) = kind else {
            panic!("expected a decoded wall");
        };
        assert_eq!(body.rect.x, Number::Int(1));
        assert_eq!(body.rect.width, Number::Int(3));
        assert_eq!(body.rect.height, Number::Invalid);
        assert_eq!(body.color, Color::invalid());
        assert_eq!(errors.len(), 2);
    }
}
