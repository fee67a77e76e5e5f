#![allow(dead_code)]

use chrono::NaiveDate;
use resource_controller::{ControllerConfig, FieldErrors, Resource, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gadget {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub added: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GadgetInput {
    pub name: String,
    pub kind: String,
    pub added: NaiveDate,
}

impl Resource for Gadget {
    type Id = u32;
    type Input = GadgetInput;
    const NAME: &'static str = "gadget";

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_input(id: u32, input: GadgetInput) -> Self {
        Self {
            id,
            name: input.name,
            kind: input.kind,
            added: input.added,
        }
    }

    fn apply_input(&mut self, input: GadgetInput) {
        self.name = input.name;
        self.kind = input.kind;
        self.added = input.added;
    }

    fn validate(input: &GadgetInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if input.name.trim().is_empty() {
            errors.insert("name".into(), vec!["required".into()]);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "kind" => Some(self.kind.as_str().into()),
            "id" => Some(self.id.into()),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.added)
    }

    fn category(&self) -> Option<String> {
        Some(self.kind.clone())
    }
}

pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn gadget(id: u32, name: &str, kind: &str, added: NaiveDate) -> Gadget {
    Gadget {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        added,
    }
}

pub fn input(name: &str, kind: &str) -> GadgetInput {
    GadgetInput {
        name: name.to_string(),
        kind: kind.to_string(),
        added: day(5, 1),
    }
}

/// Five gadgets: two drills, two saws, one sander.
pub fn gadgets() -> Vec<Gadget> {
    vec![
        gadget(1, "Alpha drill", "drill", day(1, 10)),
        gadget(2, "Beta saw", "saw", day(2, 12)),
        gadget(3, "Gamma drill", "drill", day(3, 5)),
        gadget(4, "Delta sander", "sander", day(3, 20)),
        gadget(5, "Epsilon saw", "saw", day(4, 1)),
    ]
}

pub fn next_id(records: &[Gadget]) -> u32 {
    records.iter().map(|g| g.id).max().unwrap_or(0) + 1
}

/// Fast retries so failure paths finish quickly.
pub fn test_config(list_retries: u32) -> ControllerConfig {
    ControllerConfig {
        list_retries,
        retry_delay_ms: 1,
        ..ControllerConfig::default()
    }
}
