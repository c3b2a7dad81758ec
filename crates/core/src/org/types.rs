//! Role, user, department, and hierarchy link types.

use std::fmt;

use chrono::{DateTime, Utc};
use remedia_shared::types::{DepartmentId, UserId};
use serde::{Deserialize, Serialize};

/// Role held by a user within the organization.
///
/// Roles fall into three tiers:
/// - Oversight roles (`Admin`, `QualityManager`) see and drive every case.
/// - Department-scoped roles act only on cases in departments they manage.
/// - `Member` acts only on cases they created or were assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every case and every transition.
    Admin,
    /// Reviews submitted cases, assigns departments, and closes resolved cases.
    QualityManager,
    /// Manages a set of departments via explicit mapping rows.
    GroupManager,
    /// Manages the single department recorded on the user.
    DepartmentManager,
    /// Ordinary user; creates cases and tracks their own.
    Member,
    /// Oversees managers via director-manager mapping rows.
    Director,
    /// Franchise variant of the single-department manager.
    FranchiseDepartmentManager,
    /// Multi-department quality tracking for project sites.
    ProjectsQualityTracking,
    /// Multi-department quality tracking for branch sites.
    BranchesQualityTracking,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::QualityManager => "quality_manager",
            Self::GroupManager => "group_manager",
            Self::DepartmentManager => "department_manager",
            Self::Member => "member",
            Self::Director => "director",
            Self::FranchiseDepartmentManager => "franchise_department_manager",
            Self::ProjectsQualityTracking => "projects_quality_tracking",
            Self::BranchesQualityTracking => "branches_quality_tracking",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "quality_manager" => Some(Self::QualityManager),
            "group_manager" => Some(Self::GroupManager),
            "department_manager" => Some(Self::DepartmentManager),
            "member" => Some(Self::Member),
            "director" => Some(Self::Director),
            "franchise_department_manager" => Some(Self::FranchiseDepartmentManager),
            "projects_quality_tracking" => Some(Self::ProjectsQualityTracking),
            "branches_quality_tracking" => Some(Self::BranchesQualityTracking),
            _ => None,
        }
    }

    /// Returns true for oversight roles that see every case unconditionally.
    #[must_use]
    pub fn sees_everything(&self) -> bool {
        matches!(self, Self::Admin | Self::QualityManager)
    }

    /// Returns true for roles whose scope is the single department
    /// recorded on the user record.
    #[must_use]
    pub fn is_single_department_manager(&self) -> bool {
        matches!(self, Self::DepartmentManager | Self::FranchiseDepartmentManager)
    }

    /// Returns true for roles whose scope comes from department mapping rows.
    #[must_use]
    pub fn is_multi_department_manager(&self) -> bool {
        matches!(
            self,
            Self::GroupManager | Self::ProjectsQualityTracking | Self::BranchesQualityTracking
        )
    }

    /// Returns true for any role whose case visibility is bounded by a
    /// set of managed departments.
    #[must_use]
    pub fn is_department_scoped(&self) -> bool {
        self.is_single_department_manager()
            || self.is_multi_department_manager()
            || matches!(self, Self::Director)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Delivery address for out-of-band notifications, if known.
    pub email: Option<String>,
    /// Role held by the user.
    pub role: Role,
    /// Home department, if the user belongs to one.
    pub department_id: Option<DepartmentId>,
    /// Inactive users are denied all access and receive no notifications.
    pub active: bool,
}

impl User {
    /// Creates an active user with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role, department_id: Option<DepartmentId>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: None,
            role,
            department_id,
            active: true,
        }
    }
}

/// A department within the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Display name.
    pub name: String,
    /// The department's designated manager, if appointed.
    pub manager_id: Option<UserId>,
    /// Inactive departments no longer receive case assignments.
    pub active: bool,
}

impl Department {
    /// Creates an active department with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(),
            name: name.into(),
            manager_id: None,
            active: true,
        }
    }
}

/// Mapping row granting a multi-department manager oversight of one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentLink {
    /// The manager the grant applies to.
    pub user_id: UserId,
    /// The department the manager oversees.
    pub department_id: DepartmentId,
    /// When the grant was recorded.
    pub created_at: DateTime<Utc>,
}

impl DepartmentLink {
    /// Creates a link recorded now.
    #[must_use]
    pub fn new(user_id: UserId, department_id: DepartmentId) -> Self {
        Self {
            user_id,
            department_id,
            created_at: Utc::now(),
        }
    }
}

/// Mapping row placing a manager under a director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorLink {
    /// The director.
    pub director_id: UserId,
    /// The manager reporting to the director.
    pub manager_id: UserId,
    /// When the link was recorded.
    pub created_at: DateTime<Utc>,
}

impl DirectorLink {
    /// Creates a link recorded now.
    #[must_use]
    pub fn new(director_id: UserId, manager_id: UserId) -> Self {
        Self {
            director_id,
            manager_id,
            created_at: Utc::now(),
        }
    }
}
