//! Text grammar for level scripts.
//!
//! The scripts are hand-written C++ level constructors; we never parse them
//! properly, we only pick out the calls we care about:
//
//      spawn      ::= 'Level(' numbers ')'
//      numbers    ::= int (',' int)+ ','?        (at least two)
//      int        ::= '-'? [0-9]+
//      color      ::= '0x' [0-9A-Fa-f]*
//      door_key   ::= 'wallByColor[' [0-9] ']'
//      statement  ::= door_key '.push_back(' 'AddObject(' … ')'
//                   | 'AddObject(' … ')'
//      arguments  ::= (door_key ',')? numbers (',' color)?
//
//  A statement runs to the last `)` on its line. Whitespace between tokens
//  is free everywhere except inside a token.

use std::sync::LazyLock;

use regex::Regex;

use super::objects::ObjectType;

const INT: &str = r"-?\d+\b";
const DOOR_KEY: &str = r"wallByColor\[\d\]";
const COLOR: &str = r"0x[0-9A-Fa-f]*";
const BAD_TELEPORT: &str = r"LevelManager\s*::\s*GetNextLevel\s*\(\s*this\s*\)";

/// Compiled once, shared by every parse.
pub struct Grammar {
    int: Regex,
    spawn: Regex,
    statement: Regex,
    keyword: Regex,
    arguments: Regex,
    bad_teleport: Regex,
}

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::build);

pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("level grammar must compile: {e}"))
}

/// One object statement as found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    /// The whole matched call, wrapper included.
    pub text: &'a str,
    /// `wallByColor[n]` when the object was pushed into a door group.
    pub door_key: Option<&'a str>,
}

impl Grammar {
    fn build() -> Self {
        let numbers = format!(r"(?:{INT}\s*,\s*)+{INT}");
        let keywords = ObjectType::ALL
            .iter()
            .map(|ty| ty.keyword())
            .collect::<Vec<_>>()
            .join("|");

        Self {
            int: compile(r"-?\d+"),
            spawn: compile(&format!(r"\bLevel\s*\(\s*{numbers}\s*,?\s*\)")),
            statement: compile(&format!(
                r"(?P<door>{DOOR_KEY})\s*\.\s*push_back\s*\(\s*AddObject\s*\(.*\)|AddObject\s*\(.*\)"
            )),
            keyword: compile(&format!(r"\b(?:{keywords})\b")),
            arguments: compile(&format!(
                r"(?:{DOOR_KEY}\s*,\s*)?{numbers}(?:\s*,\s*{COLOR})?"
            )),
            bad_teleport: compile(BAD_TELEPORT),
        }
    }

    /// Span of the first `Level(x, y, ...)` call.
    pub fn spawn_call<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.spawn.find(source).map(|m| m.as_str())
    }

    /// Every integer literal in `text`, left to right.
    pub fn integers<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.int.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// All object statements in order of appearance.
    pub fn statements<'a>(&self, source: &'a str) -> impl Iterator<Item = Statement<'a>> {
        self.statement.captures_iter(source).filter_map(|caps| {
            let text = caps.get(0)?.as_str();
            Some(Statement {
                text,
                door_key: caps.name("door").map(|m| m.as_str()),
            })
        })
    }

    /// First object keyword in the statement and the byte offset right
    /// after it.
    pub fn object_keyword<'a>(&self, statement: &'a str) -> Option<(&'a str, usize)> {
        self.keyword
            .find(statement)
            .map(|m| (m.as_str(), m.end()))
    }

    /// Raw argument list: first match of the argument grammar in `text`.
    pub fn arguments<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.arguments.find(text).map(|m| m.as_str())
    }

    pub fn is_bad_teleport(&self, statement: &str) -> bool {
        self.bad_teleport.is_match(statement)
    }
}

/// Strips all whitespace and splits the argument list on commas.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    let compact: String = arguments.chars().filter(|c| !c.is_whitespace()).collect();
    compact.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_call() {
        let test_cases = vec![
            ("Level(100, 200)", Some("Level(100, 200)")),
            ("Level1::Level1() : Level( -5 ,7, 3 ) {}", Some("Level( -5 ,7, 3 )")),
            ("Level(100)", None),
            ("GetNextLevel(100, 200)", None),
            ("no spawn here", None),
        ];

        for (src, expected) in test_cases {
            assert_eq!(grammar().spawn_call(src), expected, "source: {src}");
        }
    }

    #[test]
    fn test_integers() {
        assert_eq!(grammar().integers("Level(-3, 40, 5)"), vec!["-3", "40", "5"]);
    }

    #[test]
    fn test_statements_in_order() {
        let src = "\
            AddObject(new ObjTeleport(1, 2, 3, 4));\n\
            wallByColor[3].push_back(AddObject(new ObjWall(10, 10, 50, 50, 0xFF0000)));\n\
            AddObject (new ObjAreaCounter(wallByColor[3], 5, 5, 20, 20, 3, 0x00FF00));\n";

        let found: Vec<_> = grammar().statements(src).collect();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].text, "AddObject(new ObjTeleport(1, 2, 3, 4))");
        assert_eq!(found[0].door_key, None);
        assert_eq!(
            found[1].text,
            "wallByColor[3].push_back(AddObject(new ObjWall(10, 10, 50, 50, 0xFF0000)))"
        );
        assert_eq!(found[1].door_key, Some("wallByColor[3]"));
        assert_eq!(found[2].door_key, None);
    }

    #[test]
    fn test_object_keyword() {
        let test_cases = vec![
            ("AddObject(new ObjClickBox(wallByColor[1], 1, 2))", Some("ObjClickBox")),
            ("AddObject(new ObjWall(1, 2))", Some("ObjWall")),
            ("AddObject(new ObjWallpaper(1, 2))", None),
            ("AddObject(new ObjBarrel(1, 2))", None),
        ];

        for (stmt, expected) in test_cases {
            let found = grammar().object_keyword(stmt).map(|(k, _)| k);
            assert_eq!(found, expected, "statement: {stmt}");
        }
    }

    #[test]
    fn test_every_object_type_keyword_matches() {
        for ty in ObjectType::ALL {
            let stmt = format!("AddObject(new {}(1, 2, 3, 4))", ty.keyword());
            let found = grammar().object_keyword(&stmt).map(|(k, _)| k);
            assert_eq!(found, Some(ty.keyword()), "statement: {stmt}");
        }
    }

    #[test]
    fn test_arguments() {
        let test_cases = vec![
            ("(10, 10, 50, 50, 0xFF0000)))", Some("10, 10, 50, 50, 0xFF0000")),
            (
                "(wallByColor[1], 5, 5, 20, 20, 3, 0x00FF00))",
                Some("wallByColor[1], 5, 5, 20, 20, 3, 0x00FF00"),
            ),
            (
                "(1, 2, 3, 4, LevelManager::GetNextLevel(this)))",
                Some("1, 2, 3, 4"),
            ),
            ("(-1, -2))", Some("-1, -2")),
            ("(x, y))", None),
        ];

        for (text, expected) in test_cases {
            assert_eq!(grammar().arguments(text), expected, "text: {text}");
        }
    }

    #[test]
    fn test_bad_teleport_marker() {
        let g = grammar();
        assert!(g.is_bad_teleport("ObjTeleport(1, 2, 3, 4, LevelManager::GetNextLevel(this))"));
        assert!(!g.is_bad_teleport("ObjTeleport(1, 2, 3, 4)"));
    }

    #[test]
    fn test_split_arguments() {
        assert_eq!(
            split_arguments("wallByColor[1], 5,\t-6 ,0xAA00FF00"),
            vec!["wallByColor[1]", "5", "-6", "0xAA00FF00"]
        );
    }
}
