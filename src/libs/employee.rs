//! Employee directory entries and their validation rules.
//!
//! The limits match the onboarding form the dashboard used: short names
//! for first name, department and role, a bounded email address and an
//! optional avatar URL.

use crate::libs::attendance::EmployeeId;
use crate::libs::error::EmployeeError;
use serde::{Deserialize, Serialize};

const MAX_SHORT_FIELD: usize = 20;
const MAX_EMAIL: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub department: String,
    pub role: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies `changes` on top of this employee and validates the result.
    pub fn with_changes(&self, changes: &EmployeeChanges) -> Result<Employee, EmployeeError> {
        let merged = NewEmployee {
            first_name: changes.first_name.clone().unwrap_or_else(|| self.first_name.clone()),
            last_name: changes.last_name.clone().unwrap_or_else(|| self.last_name.clone()),
            email: changes.email.clone().unwrap_or_else(|| self.email.clone()),
            avatar: match &changes.avatar {
                Some(avatar) if avatar.is_empty() => None,
                Some(avatar) => Some(avatar.clone()),
                None => self.avatar.clone(),
            },
            department: changes.department.clone().unwrap_or_else(|| self.department.clone()),
            role: changes.role.clone().unwrap_or_else(|| self.role.clone()),
        }
        .validated()?;

        Ok(Employee {
            id: self.id,
            first_name: merged.first_name,
            last_name: merged.last_name,
            email: merged.email,
            avatar: merged.avatar,
            department: merged.department,
            role: merged.role,
        })
    }
}

/// Data required to onboard an employee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub department: String,
    pub role: String,
}

impl NewEmployee {
    /// Trims every field and checks it against the directory rules.
    pub fn validated(self) -> Result<NewEmployee, EmployeeError> {
        let employee = NewEmployee {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            avatar: self.avatar.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()),
            department: self.department.trim().to_string(),
            role: self.role.trim().to_string(),
        };

        required("first_name", &employee.first_name, Some(MAX_SHORT_FIELD))?;
        required("last_name", &employee.last_name, None)?;
        required("email", &employee.email, Some(MAX_EMAIL))?;
        if !looks_like_email(&employee.email) {
            return Err(invalid("email", "invalid email format"));
        }
        if let Some(avatar) = &employee.avatar {
            if !avatar.starts_with("http://") && !avatar.starts_with("https://") {
                return Err(invalid("avatar", "invalid URL"));
            }
        }
        required("department", &employee.department, Some(MAX_SHORT_FIELD))?;
        required("role", &employee.role, Some(MAX_SHORT_FIELD))?;

        Ok(employee)
    }
}

/// Partial update of an employee. `None` leaves a field unchanged; an empty
/// avatar removes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self == &EmployeeChanges::default()
    }
}

fn required(field: &'static str, value: &str, max: Option<usize>) -> Result<(), EmployeeError> {
    if value.is_empty() {
        return Err(invalid(field, "is required"));
    }
    match max {
        Some(max) if value.chars().count() > max => Err(invalid(field, &format!("must be {} characters or less", max))),
        _ => Ok(()),
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

fn invalid(field: &'static str, reason: &str) -> EmployeeError {
    EmployeeError::Validation {
        field,
        reason: reason.to_string(),
    }
}
