// ABOUTME: Field validation pipeline: required check, format checks, then configured rules
// ABOUTME: Custom rules resolve through a named registry; patterns compile once into an LRU cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use super::payload::is_checked;
use admin_panel_core::constants::form::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
use admin_panel_core::schema::{FieldConfig, FieldKind, ValidationRule};
use lru::LruCache;
use regex::Regex;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

const EMAIL_PATTERN: &str = r"[^\s@]+@[^\s@]+\.[^\s@]+";

const PATTERN_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Pure check of one input value; `Some(message)` rejects it
pub trait FieldValidator: Send + Sync {
    /// Validate a raw input value
    fn validate(&self, value: &str) -> Option<String>;
}

impl<F> FieldValidator for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn validate(&self, value: &str) -> Option<String> {
        self(value)
    }
}

/// Resolves validation rules to checks
pub struct ValidatorRegistry {
    custom: HashMap<String, Arc<dyn FieldValidator>>,
    patterns: Mutex<LruCache<String, Arc<Regex>>>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorRegistry {
    /// Registry with only the built-in rules
    #[must_use]
    pub fn new() -> Self {
        Self {
            custom: HashMap::new(),
            patterns: Mutex::new(LruCache::new(PATTERN_CACHE_CAPACITY)),
        }
    }

    /// Register or replace a custom validator
    pub fn register(&mut self, name: impl Into<String>, validator: impl FieldValidator + 'static) {
        self.custom.insert(name.into(), Arc::new(validator));
    }

    /// Whether a custom validator exists under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Validate one value.
    ///
    /// Order: required → email format → number format → rules in declaration
    /// order. The first failure wins. An empty optional value skips the format
    /// checks but still goes through custom validators.
    #[must_use]
    pub fn validate_field(&self, field: &FieldConfig, value: &str) -> Option<String> {
        let empty = match field.kind {
            FieldKind::Checkbox => !is_checked(value),
            _ => value.trim().is_empty(),
        };
        if empty {
            if field.required {
                return Some(REQUIRED_MESSAGE.to_owned());
            }
            return field
                .validation
                .iter()
                .filter(|rule| matches!(rule, ValidationRule::Custom { .. }))
                .find_map(|rule| self.apply_rule(field, rule, value));
        }

        let trimmed = value.trim();
        match field.kind {
            FieldKind::Email if !self.full_match(EMAIL_PATTERN, trimmed) => {
                return Some(EMAIL_MESSAGE.to_owned());
            }
            FieldKind::Number { .. } if trimmed.parse::<f64>().is_err() => {
                return Some("Please enter a valid number".to_owned());
            }
            _ => {}
        }

        field
            .validation
            .iter()
            .find_map(|rule| self.apply_rule(field, rule, value))
    }

    fn apply_rule(&self, field: &FieldConfig, rule: &ValidationRule, value: &str) -> Option<String> {
        let trimmed = value.trim();
        match rule {
            ValidationRule::MinLength { min } => (trimmed.chars().count() < *min)
                .then(|| format!("Must be at least {min} characters")),
            ValidationRule::MaxLength { max } => (trimmed.chars().count() > *max)
                .then(|| format!("Must be at most {max} characters")),
            ValidationRule::Pattern { pattern, message } => {
                (!self.full_match(pattern, trimmed)).then(|| message.clone())
            }
            ValidationRule::Range { min, max } => match trimmed.parse::<f64>() {
                Err(_) => Some("Please enter a valid number".to_owned()),
                Ok(n) if min.is_some_and(|min| n < min) => {
                    Some(format!("Must be at least {}", min.unwrap_or_default()))
                }
                Ok(n) if max.is_some_and(|max| n > max) => {
                    Some(format!("Must be at most {}", max.unwrap_or_default()))
                }
                Ok(_) => None,
            },
            ValidationRule::Custom { name } => match self.custom.get(name) {
                Some(validator) => validator.validate(value),
                None => {
                    warn!(validator = %name, field = %field.id, "Unknown validator, skipping");
                    None
                }
            },
        }
    }

    fn full_match(&self, pattern: &str, value: &str) -> bool {
        match self.compiled(pattern) {
            Some(regex) => regex.is_match(value),
            // A broken pattern must not block the form
            None => true,
        }
    }

    fn compiled(&self, pattern: &str) -> Option<Arc<Regex>> {
        let mut cache = self.patterns.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(found) = cache.get(pattern) {
            return Some(Arc::clone(found));
        }
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => {
                let regex = Arc::new(regex);
                cache.put(pattern.to_owned(), Arc::clone(&regex));
                Some(regex)
            }
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Invalid validation pattern");
                None
            }
        }
    }
}
