//! Key predicates and key descriptors.
//!
//! A key predicate is the text between the parentheses of an entity
//! identifier: either a single positional literal (`7`) or named pairs
//! (`OrderID=1, Line=2`). Parsing only tokenizes; validation checks the
//! pairs against a type's declared key properties and produces a
//! [`KeyDescriptor`] holding canonical literals in declared key order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{KeyError, KeyResult};
use crate::PrimitiveKind;

/// A tokenized, not yet validated key predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPredicate {
    text: String,
    values: Vec<(Option<String>, String)>,
}

impl KeyPredicate {
    /// Tokenize `value` or `name=value[, name=value]*`.
    ///
    /// Quoted literals may contain separators and doubled quotes.
    pub fn parse(text: &str) -> KeyResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(KeyError::EmptyPredicate);
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        let mut in_quote = false;
        for (i, c) in text.char_indices() {
            match c {
                '\'' => in_quote = !in_quote,
                ',' if !in_quote => {
                    pieces.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if in_quote {
            return Err(KeyError::malformed(text, "unterminated quoted literal"));
        }
        pieces.push(&text[start..]);

        let mut values = Vec::with_capacity(pieces.len());
        for piece in pieces {
            values.push(split_pair(text, piece)?);
        }

        let named = values.iter().filter(|(name, _)| name.is_some()).count();
        if named != 0 && named != values.len() {
            return Err(KeyError::malformed(text, "mixes positional and named values"));
        }
        if named == 0 && values.len() > 1 {
            return Err(KeyError::malformed(
                text,
                "positional key predicate must hold a single value",
            ));
        }

        Ok(Self {
            text: text.to_string(),
            values,
        })
    }

    /// The predicate text as parsed (trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the predicate is a single positional value.
    pub fn is_positional(&self) -> bool {
        self.values.len() == 1 && self.values[0].0.is_none()
    }

    /// Number of values in the predicate.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Parsing never yields an empty predicate.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The tokenized (name, literal) pairs. Names are `None` when positional.
    pub fn values(&self) -> &[(Option<String>, String)] {
        &self.values
    }
}

/// Split one `name=value` (or bare `value`) piece at its first unquoted `=`.
fn split_pair(predicate: &str, piece: &str) -> KeyResult<(Option<String>, String)> {
    let mut in_quote = false;
    let mut eq = None;
    for (i, c) in piece.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '=' if !in_quote => {
                eq = Some(i);
                break;
            }
            _ => {}
        }
    }

    match eq {
        Some(i) => {
            let name = piece[..i].trim();
            let value = piece[i + 1..].trim();
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(KeyError::malformed(predicate, format!("invalid key name '{}'", name)));
            }
            if value.is_empty() {
                return Err(KeyError::malformed(predicate, format!("missing value for '{}'", name)));
            }
            Ok((Some(name.to_string()), value.to_string()))
        }
        None => {
            let value = piece.trim();
            if value.is_empty() {
                return Err(KeyError::malformed(predicate, "empty key value"));
            }
            Ok((None, value.to_string()))
        }
    }
}

/// Parsed, validated key identity of a resource.
///
/// Holds (key property name, canonical literal) pairs in the type's declared
/// key order. Immutable; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyDescriptor {
    pairs: Vec<(String, String)>,
}

impl KeyDescriptor {
    /// Validate a tokenized predicate against declared key properties.
    ///
    /// `keys` lists (name, kind) in declared key order.
    pub fn validate(
        predicate: &KeyPredicate,
        type_name: &str,
        keys: &[(&str, PrimitiveKind)],
    ) -> KeyResult<Self> {
        if predicate.len() != keys.len() {
            return Err(KeyError::key_count_mismatch(
                predicate.text(),
                type_name,
                keys.len(),
                predicate.len(),
            ));
        }

        if predicate.is_positional() {
            let (name, kind) = keys[0];
            let literal = &predicate.values()[0].1;
            let canonical = canonicalize(name, kind, literal)?;
            return Ok(Self {
                pairs: vec![(name.to_string(), canonical)],
            });
        }

        let mut found: Vec<Option<&str>> = vec![None; keys.len()];
        for (name, literal) in predicate.values() {
            // Named form: every value carries a name
            let name = name.as_deref().unwrap_or_default();
            let position = keys
                .iter()
                .position(|(key_name, _)| *key_name == name)
                .ok_or_else(|| KeyError::unknown_key_property(type_name, name))?;
            if found[position].is_some() {
                return Err(KeyError::duplicate_key_property(predicate.text(), name));
            }
            found[position] = Some(literal.as_str());
        }

        let mut pairs = Vec::with_capacity(keys.len());
        for ((name, kind), literal) in keys.iter().zip(found) {
            let literal = literal.ok_or_else(|| KeyError::missing_key_value(*name))?;
            pairs.push((name.to_string(), canonicalize(name, *kind, literal)?));
        }
        Ok(Self { pairs })
    }

    /// Parse and validate predicate text in one step.
    pub fn parse(text: &str, type_name: &str, keys: &[(&str, PrimitiveKind)]) -> KeyResult<Self> {
        let predicate = KeyPredicate::parse(text)?;
        Self::validate(&predicate, type_name, keys)
    }

    /// The (name, canonical literal) pairs in declared key order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Canonical literal for a key property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of key properties.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Validated descriptors always hold at least one pair.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

fn canonicalize(name: &str, kind: PrimitiveKind, literal: &str) -> KeyResult<String> {
    kind.parse_literal(literal)
        .and_then(|value| kind.to_literal(&value))
        .ok_or_else(|| KeyError::type_mismatch(name, kind.name(), literal))
}

/// Split an entity identifier into its set name and raw predicate text.
///
/// Takes the segment after the last `/`, splits it at the first `(` and
/// strips the closing `)`: `http://host/svc/Orders(7)` gives `("Orders", "7")`.
pub fn split_identifier(identifier: &str) -> KeyResult<(&str, &str)> {
    let identifier = identifier.trim();
    let segment = identifier.rsplit('/').next().unwrap_or(identifier);
    let (set_name, rest) = segment
        .split_once('(')
        .ok_or_else(|| KeyError::malformed_identifier(identifier, "missing '('"))?;
    let predicate = rest
        .strip_suffix(')')
        .ok_or_else(|| KeyError::malformed_identifier(identifier, "missing closing ')'"))?;
    Ok((set_name.trim(), predicate.trim()))
}
