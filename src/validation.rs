//! Form-level checks run by callers before a draft reaches the store.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{CreatePropertyInput, Property, UpdatePropertyInput};

pub const REQUIRED: &str = "This field is required";
pub const POSITIVE_PRICE: &str = "This field must be a positive number";
pub const IMAGE_REQUIRED: &str = "Please select an image for the property";

/// Field name to message, in field-name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.fields.get(field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, *message))
    }

    fn require_text(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.fields.insert(field, REQUIRED);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a complete draft
pub fn validate_draft(draft: &CreatePropertyInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.require_text("name", &draft.name);
    errors.require_text("address", &draft.address);
    errors.require_text("description", &draft.description);
    if !draft.price.is_finite() || draft.price <= 0.0 {
        errors.fields.insert("price", POSITIVE_PRICE);
    }
    if draft.image.trim().is_empty() {
        errors.fields.insert("image", IMAGE_REQUIRED);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check what `existing` would look like once `changes` are merged in
pub fn validate_update(
    existing: &Property,
    changes: &UpdatePropertyInput,
) -> Result<(), ValidationErrors> {
    let merged = CreatePropertyInput {
        name: changes.name.clone().unwrap_or_else(|| existing.name.clone()),
        address: changes
            .address
            .clone()
            .unwrap_or_else(|| existing.address.clone()),
        price: changes.price.unwrap_or(existing.price),
        description: changes
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone()),
        status: changes.status.unwrap_or(existing.status),
        image: changes.image.clone().unwrap_or_else(|| existing.image.clone()),
    };
    validate_draft(&merged)
}
