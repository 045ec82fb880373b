// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation of parameter bags against a [`CommandSchema`].

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use regex::Regex;
use serde_json::Value;

use super::{COMMAND_FIELD, CommandSchema, Constraint};
use crate::error::{ValidationError, Violation};

/// Compiled string patterns, shared by every schema.
static PATTERNS: OnceLock<RwLock<HashMap<&'static str, Regex>>> = OnceLock::new();

/// Returns the compiled form of `pattern`, compiling it on first use.
fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    let cache = PATTERNS.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(re) = cache.read().ok().and_then(|map| map.get(pattern).cloned()) {
        return Ok(re);
    }
    let re = Regex::new(pattern)?;
    if let Ok(mut map) = cache.write() {
        map.insert(pattern, re.clone());
    }
    Ok(re)
}

impl CommandSchema {
    /// Validates a parameter bag, collecting every violation.
    ///
    /// The bag must be an object holding a `command` string from the
    /// enumeration. Declared fields must satisfy their constraint, fields
    /// required by a matching conditional block must be present and
    /// undeclared fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing every violation, each with the
    /// JSON pointer of the offending field.
    pub fn validate(&self, bag: &Value) -> Result<(), ValidationError> {
        let Value::Object(fields) = bag else {
            return Err(ValidationError::new(vec![Violation::new(
                "",
                format!("{bag} is not of type object"),
            )]));
        };

        let mut violations = Vec::new();

        let command = match fields.get(COMMAND_FIELD) {
            None => {
                violations.push(missing(COMMAND_FIELD));
                None
            }
            Some(Value::String(command)) => {
                if !self.accepts(command) {
                    violations.push(not_allowed(COMMAND_FIELD, bag_value(command), self.commands()));
                }
                Some(command.as_str())
            }
            Some(other) => {
                violations.push(Violation::new(
                    pointer(COMMAND_FIELD),
                    format!("{other} is not of type string"),
                ));
                None
            }
        };

        for field in self.fields() {
            if let Some(value) = fields.get(field.name) {
                check(field.name, &field.constraint, value, &mut violations);
            }
        }

        for name in fields.keys() {
            if name != COMMAND_FIELD && self.field(name).is_none() {
                violations.push(Violation::new(
                    pointer(name),
                    format!("additional property {name} is not allowed"),
                ));
            }
        }

        if let Some(command) = command {
            for name in self.required_for(command) {
                if !fields.contains_key(name) {
                    violations.push(missing(name));
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

fn check(name: &str, constraint: &Constraint, value: &Value, violations: &mut Vec<Violation>) {
    match constraint {
        Constraint::Integer { minimum, maximum } => {
            let Some(number) = value.as_i64() else {
                violations.push(wrong_type(name, value, "integer"));
                return;
            };
            if let Some(min) = minimum
                && number < *min
            {
                violations.push(Violation::new(
                    pointer(name),
                    format!("value {number} should be at least {min}"),
                ));
            }
            if let Some(max) = maximum
                && number > *max
            {
                violations.push(Violation::new(
                    pointer(name),
                    format!("value {number} should be at most {max}"),
                ));
            }
        }
        Constraint::String {
            allowed,
            pattern,
            min_length,
            max_length,
        } => {
            let Some(text) = value.as_str() else {
                violations.push(wrong_type(name, value, "string"));
                return;
            };
            if let Some(allowed) = allowed
                && !allowed.contains(&text)
            {
                violations.push(not_allowed(name, value.to_string(), allowed));
            }
            if let Some(pattern) = pattern {
                match compiled(*pattern) {
                    Ok(re) if re.is_match(text) => {}
                    Ok(_) => violations.push(Violation::new(
                        pointer(name),
                        format!("value {value} does not match pattern {pattern}"),
                    )),
                    Err(e) => violations.push(Violation::new(
                        pointer(name),
                        format!("pattern {pattern} is invalid: {e}"),
                    )),
                }
            }
            let length = text.chars().count();
            if let Some(min) = min_length
                && length < *min
            {
                violations.push(Violation::new(
                    pointer(name),
                    format!("value {value} should be at least {min} characters long"),
                ));
            }
            if let Some(max) = max_length
                && length > *max
            {
                violations.push(Violation::new(
                    pointer(name),
                    format!("value {value} should be at most {max} characters long"),
                ));
            }
        }
        Constraint::Boolean => {
            if !value.is_boolean() {
                violations.push(wrong_type(name, value, "boolean"));
            }
        }
    }
}

fn pointer(name: &str) -> String {
    format!("/{}", name.replace('~', "~0").replace('/', "~1"))
}

fn bag_value(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn missing(name: &str) -> Violation {
    Violation::new(pointer(name), format!("required property {name} is missing"))
}

fn not_allowed(name: &str, shown: String, allowed: &[&str]) -> Violation {
    Violation::new(
        pointer(name),
        format!(
            "value {shown} should be one of the allowed values: {}",
            allowed.join(", ")
        ),
    )
}

fn wrong_type(name: &str, value: &Value, expected: &str) -> Violation {
    Violation::new(pointer(name), format!("{value} is not of type {expected}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> CommandSchema {
        CommandSchema::builder("Curtain")
            .commands(&["TurnOn", "TurnOff", "SetPosition"])
            .one_of("mode", &["0", "1", "ff"])
            .integer("position", 0, 100)
            .pattern("password", r"^\d{6,12}$")
            .text("name", 1, 4)
            .boolean("enable")
            .require_when(&["SetPosition"], &["mode", "position"])
            .build()
    }

    #[test]
    fn accepts_valid_bag() {
        let bag = json!({"command": "SetPosition", "mode": "ff", "position": 75});
        assert!(schema().validate(&bag).is_ok());
    }

    #[test]
    fn unconditional_command_needs_no_fields() {
        assert!(schema().validate(&json!({"command": "TurnOn"})).is_ok());
    }

    #[test]
    fn missing_conditional_field_is_named() {
        let err = schema()
            .validate(&json!({"command": "SetPosition", "position": 10}))
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].path, "/mode");
        assert_eq!(err.violations()[0].reason, "required property mode is missing");
    }

    #[test]
    fn enum_violation_lists_allowed_values() {
        let err = schema()
            .validate(&json!({"command": "SetPosition", "mode": "00", "position": 75}))
            .unwrap_err();
        assert_eq!(
            err.violations()[0].reason,
            r#"value "00" should be one of the allowed values: 0, 1, ff"#
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let err = schema()
            .validate(&json!({
                "command": "SetPosition",
                "position": 101,
                "password": "12ab",
                "name": "",
                "enable": "yes",
                "speed": 3
            }))
            .unwrap_err();

        let paths: Vec<&str> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, ["/position", "/password", "/name", "/enable", "/speed", "/mode"]);
        assert_eq!(err.violations()[0].reason, "value 101 should be at most 100");
        assert_eq!(err.violations()[4].reason, "additional property speed is not allowed");
    }

    #[test]
    fn lower_bound_and_type() {
        let err = schema()
            .validate(&json!({"command": "SetPosition", "mode": "0", "position": -1}))
            .unwrap_err();
        assert_eq!(err.violations()[0].reason, "value -1 should be at least 0");

        let err = schema()
            .validate(&json!({"command": "SetPosition", "mode": "0", "position": 7.5}))
            .unwrap_err();
        assert_eq!(err.violations()[0].reason, "7.5 is not of type integer");
    }

    #[test]
    fn missing_command() {
        let err = schema().validate(&json!({})).unwrap_err();
        assert!(err.mentions("/command"));
    }

    #[test]
    fn non_object_bag() {
        let err = schema().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.violations()[0].path, "");
    }

    #[test]
    fn patterns_compile_once() {
        const PIN: &str = r"^[0-9]{4}$";
        let schema = CommandSchema::builder("Keypad")
            .commands(&["Unlock"])
            .pattern("pin", PIN)
            .build();

        assert!(schema.validate(&json!({"command": "Unlock", "pin": "1234"})).is_ok());
        let cached = PATTERNS.get().unwrap().read().unwrap().get(PIN).cloned().unwrap();
        assert!(schema.validate(&json!({"command": "Unlock", "pin": "12a4"})).is_err());
        assert_eq!(compiled(PIN).unwrap().as_str(), cached.as_str());
    }

    #[test]
    fn invalid_pattern_is_reported_not_cached() {
        const BROKEN: &str = r"^(unclosed$";
        let schema = CommandSchema::builder("Broken")
            .commands(&["Go"])
            .pattern("code", BROKEN)
            .build();

        let err = schema.validate(&json!({"command": "Go", "code": "x"})).unwrap_err();
        assert!(err.violations()[0].reason.starts_with("pattern ^(unclosed$ is invalid"));
        assert!(!PATTERNS.get().unwrap().read().unwrap().contains_key(BROKEN));
    }
}
