//! Small rule-based input validator.
//!
//! Handlers declare rules in order against the raw payload; every failed
//! rule becomes one entry in the 400 response body, in declaration order.
//! Payload string fields use `#[serde(default)]`, so an absent field fails
//! the same rule an empty one does.

use serde_json::Value;

use crate::error::{AppError, FieldError};

#[derive(Default)]
pub struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, path: &str, msg: &str) {
        self.errors.push(FieldError::new(path, msg));
    }

    pub fn require(&mut self, path: &str, value: &str, msg: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(path, msg);
        }
        self
    }

    pub fn min_len(&mut self, path: &str, value: &str, min: usize, msg: &str) -> &mut Self {
        if value.chars().count() < min {
            self.fail(path, msg);
        }
        self
    }

    pub fn exact_len(&mut self, path: &str, value: &str, len: usize, msg: &str) -> &mut Self {
        if value.chars().count() != len {
            self.fail(path, msg);
        }
        self
    }

    pub fn email(&mut self, path: &str, value: &str, msg: &str) -> &mut Self {
        if !looks_like_email(value) {
            self.fail(path, msg);
        }
        self
    }

    /// Amount fields arrive as loose JSON so a non-numeric value reports the
    /// declared message instead of a deserialization failure. Returns the
    /// parsed amount when every rule passed.
    pub fn amount(&mut self, path: &str, value: Option<&Value>) -> Option<f64> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            self.fail(path, "Amount is required");
            return None;
        };
        let Some(n) = value.as_f64() else {
            self.fail(path, "Amount must be a number");
            return None;
        };
        if n <= 0.0 {
            self.fail(path, "Amount must be greater than 0");
            return None;
        }
        Some(n)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || value.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
