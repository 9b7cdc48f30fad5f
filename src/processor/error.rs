//! Diagnostics raised while decoding a level.
//!
//! None of these abort a parse: the affected field or object gets the
//! `INVALID_DATA` marker and processing moves on.

use crate::model::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("spawn data is invalid: no `Level(x, y, ...)` call found")]
    SpawnPatternMismatch,

    #[error("object {id}: invalid object type")]
    ObjectTypeMismatch { id: ObjectId },

    #[error("object {id}: invalid {kind} properties, argument list not recognised")]
    ArgumentPatternMismatch { id: ObjectId, kind: &'static str },

    /// `id` is `None` for spawn coordinates.
    #[error("{}: `{token}` is not a valid {field}", describe(.id))]
    NumericDecodeFailure {
        id: Option<ObjectId>,
        field: &'static str,
        token: String,
    },

    #[error("object {id}: door key `{key}` has no walls, doors left empty")]
    UnresolvedDoorKey { id: ObjectId, key: String },
}

/// Collects diagnostics in detection order and logs each one as it comes in.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<ParseError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, err: ParseError) {
        log::error!("{err}");
        self.errors.push(err);
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

fn describe(id: &Option<ObjectId>) -> String {
    match id {
        Some(id) => format!("object {id}"),
        None => "spawn".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let test_cases = vec![
            (
                ParseError::NumericDecodeFailure {
                    id: Some(4),
                    field: "width",
                    token: "w".into(),
                },
                "object 4: `w` is not a valid width",
            ),
            (
                ParseError::NumericDecodeFailure {
                    id: None,
                    field: "x",
                    token: "".into(),
                },
                "spawn: `` is not a valid x",
            ),
            (
                ParseError::ArgumentPatternMismatch { id: 2, kind: "ObjWall" },
                "object 2: invalid ObjWall properties, argument list not recognised",
            ),
        ];

        for (err, expected) in test_cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
