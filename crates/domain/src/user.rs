//! Users and roles.

use std::collections::HashSet;

use common::UserId;
use serde::{Deserialize, Serialize};

/// Staff roles.
///
/// A regular customer holds no role at all; authorization checks are
/// membership tests over the user's role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access, including inventory management.
    Administrator,

    /// Customer-service access to other customers' carts and orders.
    CustomerService,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user identifier.
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// Contact email.
    pub email: String,

    /// Display name.
    pub full_name: String,

    roles: HashSet<Role>,
}

impl User {
    /// Creates a user with no roles (a regular customer).
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            full_name: full_name.into(),
            roles: HashSet::new(),
        }
    }

    /// Creates a user holding the given roles.
    pub fn with_roles(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            ..Self::new(id, username, email, full_name)
        }
    }

    /// Returns the user's roles.
    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    /// Returns true if the user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns true if the user holds any of the given roles.
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        required.iter().any(|r| self.roles.contains(r))
    }

    /// Grants a role to the user.
    pub fn grant_role(&mut self, role: Role) {
        self.roles.insert(role);
    }
}
