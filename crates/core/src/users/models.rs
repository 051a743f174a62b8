//! User models

use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use serde::Serialize;

use crate::{rows::RowError, users::errors::AuthError};

/// What a signed-in user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// List and search the catalogue
    Browse,

    /// Fill a cart and check out
    Purchase,

    /// Add, edit and remove products
    ManageInventory,

    /// Read sales totals and reports
    ViewReports,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Browse => "browse products",
            Capability::Purchase => "make purchases",
            Capability::ManageInventory => "manage inventory",
            Capability::ViewReports => "view reports",
        })
    }
}

/// View a user lands on after signing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dashboard {
    /// Product browsing and purchasing
    Market,

    /// Stock management and sales reporting
    Inventory,
}

impl Display for Dashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dashboard::Market => "market",
            Dashboard::Inventory => "inventory",
        })
    }
}

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer
    Buyer,

    /// Shop staff
    Worker,
}

impl Role {
    /// Whether this role grants `capability`.
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::Browse | Capability::Purchase => true,
            Capability::ManageInventory | Capability::ViewReports => self == Role::Worker,
        }
    }

    /// Shorthand for [`Capability::Browse`].
    pub fn can_browse(self) -> bool {
        self.allows(Capability::Browse)
    }

    /// Shorthand for [`Capability::Purchase`].
    pub fn can_purchase(self) -> bool {
        self.allows(Capability::Purchase)
    }

    /// Shorthand for [`Capability::ManageInventory`].
    pub fn can_manage_inventory(self) -> bool {
        self.allows(Capability::ManageInventory)
    }

    /// Shorthand for [`Capability::ViewReports`].
    pub fn can_view_reports(self) -> bool {
        self.allows(Capability::ViewReports)
    }

    /// The view this role is routed to.
    pub fn dashboard(self) -> Dashboard {
        match self {
            Role::Buyer => Dashboard::Market,
            Role::Worker => Dashboard::Inventory,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Buyer => "buyer",
            Role::Worker => "worker",
        })
    }
}

impl FromStr for Role {
    type Err = RowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "worker" => Ok(Role::Worker),
            _ => Err(RowError::UnknownRole(s.to_string())),
        }
    }
}

/// A user who can sign in.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Login name
    pub username: String,

    /// Plain-text password
    pub password: String,

    /// Role
    pub role: Role,
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl User {
    /// Create a user.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// Fail unless the user's role grants `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PermissionDenied`] if the role lacks the capability.
    pub fn require(&self, capability: Capability) -> Result<(), AuthError> {
        if self.role.allows(capability) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied {
                role: self.role,
                capability,
            })
        }
    }

    /// Parse `username,password,role[,...]`; trailing fields are ignored.
    pub(crate) fn from_fields(fields: &[&str]) -> Result<Self, RowError> {
        let [username, password, role, ..] = fields else {
            return Err(RowError::TooFewFields {
                expected: 3,
                found: fields.len(),
            });
        };

        Ok(Self::new(*username, *password, role.parse()?))
    }
}
