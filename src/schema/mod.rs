// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative command parameter schemas.
//!
//! Each command family describes the parameter bag it accepts on the
//! validated dispatch path as plain data:
//!
//! - the enumeration of command names (the `command` field)
//! - one constraint per parameter field (integer range, string set or
//!   pattern, boolean)
//! - conditional blocks that make fields required when `command` takes one
//!   of a set of values
//!
//! The schema is closed: fields it does not declare are rejected. It can be
//! rendered to a JSON Schema document with [`CommandSchema::to_document`];
//! the rendering is deterministic, so the same family always produces the
//! same bytes.
//!
//! # Examples
//!
//! ```
//! use switchbot_lib::schema::CommandSchema;
//! use serde_json::json;
//!
//! let schema = CommandSchema::builder("Fader")
//!     .commands(&["TurnOn", "SetLevel"])
//!     .integer("level", 0, 10)
//!     .require_when(&["SetLevel"], &["level"])
//!     .build();
//!
//! assert!(schema.validate(&json!({"command": "SetLevel", "level": 3})).is_ok());
//!
//! let err = schema.validate(&json!({"command": "SetLevel"})).unwrap_err();
//! assert!(err.mentions("/level"));
//! ```

mod validate;

use serde_json::{Map, Value, json};

/// JSON Schema dialect advertised by rendered documents.
pub const DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Name of the discriminating field in every parameter bag.
pub const COMMAND_FIELD: &str = "command";

/// Constraint on a single parameter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// An integer within an inclusive range.
    Integer {
        /// Smallest accepted value.
        minimum: Option<i64>,
        /// Largest accepted value.
        maximum: Option<i64>,
    },
    /// A string, optionally restricted.
    String {
        /// Accepted values, if the field is an enumeration.
        allowed: Option<&'static [&'static str]>,
        /// Regular expression the whole value must match.
        pattern: Option<&'static str>,
        /// Minimum length in characters.
        min_length: Option<usize>,
        /// Maximum length in characters.
        max_length: Option<usize>,
    },
    /// `true` or `false`.
    Boolean,
}

/// A named field and its constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name as it appears in the bag.
    pub name: &'static str,
    /// Constraint applied whenever the field is present.
    pub constraint: Constraint,
}

/// Fields required when `command` is one of `commands`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    /// Command names triggering the block.
    pub commands: &'static [&'static str],
    /// Fields that become required.
    pub required: &'static [&'static str],
}

impl Conditional {
    /// Returns `true` if the block applies to `command`.
    #[must_use]
    pub fn applies_to(&self, command: &str) -> bool {
        self.commands.contains(&command)
    }
}

/// Parameter schema of one command family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSchema {
    title: &'static str,
    commands: &'static [&'static str],
    fields: Vec<FieldSchema>,
    conditionals: Vec<Conditional>,
}

impl CommandSchema {
    /// Starts a schema for the family named `title`.
    #[must_use]
    pub fn builder(title: &'static str) -> CommandSchemaBuilder {
        CommandSchemaBuilder {
            schema: Self {
                title,
                commands: &[],
                fields: Vec::new(),
                conditionals: Vec::new(),
            },
        }
    }

    /// Family name.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Every accepted command name.
    #[must_use]
    pub fn commands(&self) -> &'static [&'static str] {
        self.commands
    }

    /// Returns `true` if `command` is one of the accepted names.
    #[must_use]
    pub fn accepts(&self, command: &str) -> bool {
        self.commands.contains(&command)
    }

    /// Parameter fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Conditional blocks, in declaration order.
    #[must_use]
    pub fn conditionals(&self) -> &[Conditional] {
        &self.conditionals
    }

    /// Fields required for `command`, across every matching block.
    pub fn required_for<'a>(&'a self, command: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.conditionals
            .iter()
            .filter(move |c| c.applies_to(command))
            .flat_map(|c| c.required.iter().copied())
    }

    /// Renders the schema as a JSON Schema document.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut properties = Map::new();
        properties.insert(
            COMMAND_FIELD.to_string(),
            json!({"type": "string", "enum": self.commands}),
        );
        for field in &self.fields {
            properties.insert(field.name.to_string(), constraint_document(&field.constraint));
        }

        let mut document = json!({
            "$schema": DIALECT,
            "title": self.title,
            "type": "object",
            "properties": properties,
            "required": [COMMAND_FIELD],
            "additionalProperties": false,
        });

        if !self.conditionals.is_empty() {
            let branches: Vec<Value> = self
                .conditionals
                .iter()
                .map(|c| {
                    let trigger = match c.commands {
                        [single] => json!({"const": single}),
                        many => json!({"enum": many}),
                    };
                    json!({
                        "if": {
                            "properties": {COMMAND_FIELD: trigger},
                            "required": [COMMAND_FIELD],
                        },
                        "then": {"required": c.required},
                    })
                })
                .collect();
            document["allOf"] = Value::Array(branches);
        }

        document
    }

    /// Renders the schema document as compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot occur for documents built
    /// by [`to_document`](Self::to_document).
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_document())
    }
}

fn constraint_document(constraint: &Constraint) -> Value {
    let mut doc = Map::new();
    match constraint {
        Constraint::Integer { minimum, maximum } => {
            doc.insert("type".into(), json!("integer"));
            if let Some(min) = minimum {
                doc.insert("minimum".into(), json!(min));
            }
            if let Some(max) = maximum {
                doc.insert("maximum".into(), json!(max));
            }
        }
        Constraint::String {
            allowed,
            pattern,
            min_length,
            max_length,
        } => {
            doc.insert("type".into(), json!("string"));
            if let Some(allowed) = allowed {
                doc.insert("enum".into(), json!(allowed));
            }
            if let Some(pattern) = pattern {
                doc.insert("pattern".into(), json!(pattern));
            }
            if let Some(min) = min_length {
                doc.insert("minLength".into(), json!(min));
            }
            if let Some(max) = max_length {
                doc.insert("maxLength".into(), json!(max));
            }
        }
        Constraint::Boolean => {
            doc.insert("type".into(), json!("boolean"));
        }
    }
    Value::Object(doc)
}

/// Builder for [`CommandSchema`].
#[derive(Debug)]
#[must_use]
pub struct CommandSchemaBuilder {
    schema: CommandSchema,
}

impl CommandSchemaBuilder {
    /// Sets the accepted command names.
    pub fn commands(mut self, commands: &'static [&'static str]) -> Self {
        self.schema.commands = commands;
        self
    }

    /// Adds a field with an arbitrary constraint.
    pub fn field(mut self, name: &'static str, constraint: Constraint) -> Self {
        self.schema.fields.push(FieldSchema { name, constraint });
        self
    }

    /// Adds an integer field bounded by `[min, max]`.
    pub fn integer(self, name: &'static str, min: i64, max: i64) -> Self {
        self.field(
            name,
            Constraint::Integer {
                minimum: Some(min),
                maximum: Some(max),
            },
        )
    }

    /// Adds a string field restricted to `allowed`.
    pub fn one_of(self, name: &'static str, allowed: &'static [&'static str]) -> Self {
        self.field(
            name,
            Constraint::String {
                allowed: Some(allowed),
                pattern: None,
                min_length: None,
                max_length: None,
            },
        )
    }

    /// Adds a string field matching `pattern`.
    pub fn pattern(self, name: &'static str, pattern: &'static str) -> Self {
        self.field(
            name,
            Constraint::String {
                allowed: None,
                pattern: Some(pattern),
                min_length: None,
                max_length: None,
            },
        )
    }

    /// Adds a string field whose length lies within `[min, max]`.
    pub fn text(self, name: &'static str, min: usize, max: usize) -> Self {
        self.field(
            name,
            Constraint::String {
                allowed: None,
                pattern: None,
                min_length: Some(min),
                max_length: Some(max),
            },
        )
    }

    /// Adds a boolean field.
    pub fn boolean(self, name: &'static str) -> Self {
        self.field(name, Constraint::Boolean)
    }

    /// Makes `required` mandatory when `command` is one of `commands`.
    pub fn require_when(
        mut self,
        commands: &'static [&'static str],
        required: &'static [&'static str],
    ) -> Self {
        self.schema.conditionals.push(Conditional { commands, required });
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> CommandSchema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curtain_like() -> CommandSchema {
        CommandSchema::builder("Curtain")
            .commands(&["TurnOn", "TurnOff", "SetPosition"])
            .one_of("mode", &["0", "1", "ff"])
            .integer("position", 0, 100)
            .require_when(&["SetPosition"], &["mode", "position"])
            .build()
    }

    #[test]
    fn document_shape() {
        let doc = curtain_like().to_document();
        assert_eq!(doc["type"], "object");
        assert_eq!(doc["additionalProperties"], false);
        assert_eq!(doc["required"], json!(["command"]));
        assert_eq!(
            doc["properties"]["command"]["enum"],
            json!(["TurnOn", "TurnOff", "SetPosition"])
        );
        assert_eq!(doc["properties"]["position"], json!({"type": "integer", "minimum": 0, "maximum": 100}));
        assert_eq!(
            doc["allOf"][0]["if"]["properties"]["command"],
            json!({"const": "SetPosition"})
        );
        assert_eq!(doc["allOf"][0]["then"]["required"], json!(["mode", "position"]));
    }

    #[test]
    fn multi_command_trigger_uses_enum() {
        let schema = CommandSchema::builder("Light")
            .commands(&["SetBrightness", "Dim"])
            .integer("brightness", 0, 100)
            .require_when(&["SetBrightness", "Dim"], &["brightness"])
            .build();
        assert_eq!(
            schema.to_document()["allOf"][0]["if"]["properties"]["command"],
            json!({"enum": ["SetBrightness", "Dim"]})
        );
    }

    #[test]
    fn document_is_byte_stable() {
        let first = curtain_like().to_bytes().unwrap();
        let second = curtain_like().to_bytes().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn families_without_conditionals_have_no_all_of() {
        let schema = CommandSchema::builder("Bot")
            .commands(&["TurnOn", "TurnOff", "Press"])
            .build();
        assert!(schema.to_document().get("allOf").is_none());
    }

    #[test]
    fn required_for_collects_matching_blocks() {
        let schema = curtain_like();
        assert_eq!(schema.required_for("SetPosition").collect::<Vec<_>>(), ["mode", "position"]);
        assert_eq!(schema.required_for("TurnOn").count(), 0);
    }
}
