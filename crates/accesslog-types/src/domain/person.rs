use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a person is staff or a visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Guest,
}

impl Role {
    /// Single-character tag used in the on-disk record format
    pub fn tag(self) -> char {
        match self {
            Role::Employee => '&',
            Role::Guest => '%',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '&' => Some(Role::Employee),
            '%' => Some(Role::Guest),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employee => write!(f, "employee"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

/// A named employee or guest
///
/// Two people with the same name but different roles are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub role: Role,
}

impl Person {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn employee(name: impl Into<String>) -> Self {
        Self::new(name, Role::Employee)
    }

    pub fn guest(name: impl Into<String>) -> Self {
        Self::new(name, Role::Guest)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}
