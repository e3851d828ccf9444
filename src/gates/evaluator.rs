// src/gates/evaluator.rs

use crate::domain::listing::Listing;
use serde::Serialize;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// Message recorded for a validator that panicked instead of returning a verdict.
pub const VALIDATOR_FAILURE_MESSAGE: &str = "Validation check could not be completed";

/// What a single validator says about a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }

    /// Passes when `ok`, otherwise fails with `message`.
    pub fn check(ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::pass()
        } else {
            Self::fail(message)
        }
    }
}

pub type Validator = Arc<dyn Fn(&Listing) -> Verdict + Send + Sync>;

/// A named predicate over a listing. Required gates block publishing;
/// advisory ones only warn.
#[derive(Clone)]
pub struct ValidationGate {
    pub id: String,
    pub name: String,
    pub required: bool,
    validator: Validator,
}

impl ValidationGate {
    pub fn new<F>(id: impl Into<String>, name: impl Into<String>, required: bool, f: F) -> Self
    where
        F: Fn(&Listing) -> Verdict + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            required,
            validator: Arc::new(f),
        }
    }

    /// Runs the validator. A panic is contained and reported as a failed
    /// required result, whatever the gate's own `required` flag says.
    pub fn run(&self, listing: &Listing) -> GateResult {
        match catch_unwind(AssertUnwindSafe(|| (self.validator)(listing))) {
            Ok(verdict) => GateResult {
                id: self.id.clone(),
                name: self.name.clone(),
                required: self.required,
                is_valid: verdict.is_valid,
                message: verdict.message,
            },
            Err(_) => {
                error!(gate = %self.id, listing = %listing.id, "validator panicked");
                GateResult {
                    id: self.id.clone(),
                    name: self.name.clone(),
                    required: true,
                    is_valid: false,
                    message: Some(VALIDATOR_FAILURE_MESSAGE.to_string()),
                }
            }
        }
    }
}

impl fmt::Debug for ValidationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationGate")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Outcome of one gate against one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateResult {
    pub id: String,
    pub name: String,
    pub required: bool,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateReport {
    /// True iff every required gate passed.
    pub can_publish: bool,
    pub required_issues: Vec<GateResult>,
    /// Failed advisory gates.
    pub warnings: Vec<GateResult>,
    /// Every result, in gate order.
    pub all_results: Vec<GateResult>,
}

/// Evaluates every gate against `listing`. Gates are independent, so the
/// verdict does not depend on their order; `all_results` keeps it for display.
pub fn evaluate(listing: &Listing, gates: &[ValidationGate]) -> GateReport {
    let all_results: Vec<GateResult> = gates.iter().map(|gate| gate.run(listing)).collect();

    let (required_issues, warnings): (Vec<GateResult>, Vec<GateResult>) = all_results
        .iter()
        .filter(|r| !r.is_valid)
        .cloned()
        .partition(|r| r.required);

    GateReport {
        can_publish: required_issues.is_empty(),
        required_issues,
        warnings,
        all_results,
    }
}
