use std::fmt;

use serde::Serialize;

/// A single password composition rule that a password failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordViolation {
    EmptyOrWhitespace,
    LetterAndNumber,
    UpperAndLower,
}

impl PasswordViolation {
    /// Human-readable message for this violation.
    pub fn description(&self) -> &'static str {
        match self {
            PasswordViolation::EmptyOrWhitespace => "Value cannot be empty or whitespace",
            PasswordViolation::LetterAndNumber => {
                "Password must contain at least one letter and one number"
            }
            PasswordViolation::UpperAndLower => {
                "Password must contain at least one upper case and lower case letter"
            }
        }
    }
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of validating a password against the composition policy.
///
/// Violations are kept in rule order. The result is valid exactly when no
/// violation was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasswordValidationResult {
    violations: Vec<PasswordViolation>,
}

impl PasswordValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[PasswordViolation] {
        &self.violations
    }

    /// Violation messages in rule order.
    pub fn messages(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.description()).collect()
    }
}

impl fmt::Display for PasswordValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

type Rule = fn(&str) -> bool;

/// Composition rules, evaluated in order, paired with the violation recorded
/// when the rule does not hold.
const RULES: [(Rule, PasswordViolation); 2] = [
    (has_letter_and_number, PasswordViolation::LetterAndNumber),
    (has_upper_and_lower, PasswordViolation::UpperAndLower),
];

fn has_letter_and_number(password: &str) -> bool {
    password.chars().any(char::is_alphabetic) && password.chars().any(char::is_numeric)
}

fn has_upper_and_lower(password: &str) -> bool {
    password.chars().any(char::is_uppercase) && password.chars().any(char::is_lowercase)
}

/// Password composition policy.
///
/// A blank password yields only the `EmptyOrWhitespace` violation. Otherwise
/// every rule is evaluated and all failures are reported together.
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate password.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate password
    ///
    /// # Returns
    /// Result listing every violated rule (empty when the password is acceptable)
    pub fn validate(&self, password: &str) -> PasswordValidationResult {
        if password.trim().is_empty() {
            return PasswordValidationResult {
                violations: vec![PasswordViolation::EmptyOrWhitespace],
            };
        }

        let violations = RULES
            .iter()
            .filter(|(holds, _)| !holds(password))
            .map(|(_, violation)| *violation)
            .collect();

        PasswordValidationResult { violations }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}
