// src/models/creator.rs

use serde::{Deserialize, Serialize};

/// Role attached to a verified caller identity.
/// Quiz creation and rebuild require `Teacher`; `Teacher` and `Admin` may
/// also see quizzes that are not `ready` yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// Privileged roles may view quizzes that have not reached `ready`.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

/// Caller identity injected by the (external) authentication layer.
/// The core trusts this value as already verified.
#[derive(Debug, Clone, Copy)]
pub struct Creator {
    pub id: i64,
    pub role: Role,
}
