//! Role-based section access model
//!
//! Maps (role, section) to an access level, with per-user overrides layered
//! on top of the role defaults. Resolution fails closed: a missing entry is
//! no access.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User roles for workflow and section authorization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Director,
    Merchandiser,
    Qc,
    Viewer,
}

impl UserRole {
    /// All roles, in privilege order
    pub fn all() -> &'static [UserRole] {
        &[
            UserRole::SuperAdmin,
            UserRole::Admin,
            UserRole::Director,
            UserRole::Merchandiser,
            UserRole::Qc,
            UserRole::Viewer,
        ]
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Admin => "Admin",
            UserRole::Director => "Director",
            UserRole::Merchandiser => "Merchandiser",
            UserRole::Qc => "QC",
            UserRole::Viewer => "Viewer",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::SuperAdmin => write!(f, "super_admin"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Director => write!(f, "director"),
            UserRole::Merchandiser => write!(f, "merchandiser"),
            UserRole::Qc => write!(f, "qc"),
            UserRole::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "director" => Ok(UserRole::Director),
            "merchandiser" => Ok(UserRole::Merchandiser),
            "qc" => Ok(UserRole::Qc),
            "viewer" => Ok(UserRole::Viewer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Named functional areas of a style document, each independently
/// access-controlled and (for content sections) independently approvable
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SectionId {
    Dashboard,
    Summary,
    TechPack,
    OrderSheet,
    Consumption,
    PpMeeting,
    MqControl,
    Commercial,
    QcInspect,
    UserManagement,
    RoleManagement,
}

impl SectionId {
    /// All sections, in display order
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Dashboard,
            SectionId::Summary,
            SectionId::TechPack,
            SectionId::OrderSheet,
            SectionId::Consumption,
            SectionId::PpMeeting,
            SectionId::MqControl,
            SectionId::Commercial,
            SectionId::QcInspect,
            SectionId::UserManagement,
            SectionId::RoleManagement,
        ]
    }

    /// Content sections that carry their own approval workflow
    pub fn approvable() -> &'static [SectionId] {
        &[
            SectionId::TechPack,
            SectionId::OrderSheet,
            SectionId::Consumption,
            SectionId::PpMeeting,
            SectionId::MqControl,
            SectionId::Commercial,
            SectionId::QcInspect,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "dashboard",
            SectionId::Summary => "summary",
            SectionId::TechPack => "tech_pack",
            SectionId::OrderSheet => "order_sheet",
            SectionId::Consumption => "consumption",
            SectionId::PpMeeting => "pp_meeting",
            SectionId::MqControl => "mq_control",
            SectionId::Commercial => "commercial",
            SectionId::QcInspect => "qc_inspect",
            SectionId::UserManagement => "user_management",
            SectionId::RoleManagement => "role_management",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "Dashboard",
            SectionId::Summary => "Summary",
            SectionId::TechPack => "Tech Pack",
            SectionId::OrderSheet => "Order Sheet",
            SectionId::Consumption => "Consumption",
            SectionId::PpMeeting => "PP Meeting",
            SectionId::MqControl => "MQ Control",
            SectionId::Commercial => "Commercial",
            SectionId::QcInspect => "QC Inspect",
            SectionId::UserManagement => "User Management",
            SectionId::RoleManagement => "Role Management",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dashboard" => Ok(SectionId::Dashboard),
            "summary" => Ok(SectionId::Summary),
            "tech_pack" => Ok(SectionId::TechPack),
            "order_sheet" => Ok(SectionId::OrderSheet),
            "consumption" => Ok(SectionId::Consumption),
            "pp_meeting" => Ok(SectionId::PpMeeting),
            "mq_control" => Ok(SectionId::MqControl),
            "commercial" => Ok(SectionId::Commercial),
            "qc_inspect" => Ok(SectionId::QcInspect),
            "user_management" => Ok(SectionId::UserManagement),
            "role_management" => Ok(SectionId::RoleManagement),
            _ => Err(format!("Unknown section: {}", s)),
        }
    }
}

/// Access level granted to a role or user for a section
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum AccessLevel {
    /// No access at all
    #[default]
    None,
    /// Read-only access
    View,
    /// Full read/write access
    Full,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::None => write!(f, "none"),
            AccessLevel::View => write!(f, "view"),
            AccessLevel::Full => write!(f, "full"),
        }
    }
}

/// A resolved section-to-level mapping for one user or role.
///
/// Sections absent from the map resolve to `AccessLevel::None`, so a map is
/// always total over `SectionId` even when sparsely stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessMap(pub BTreeMap<SectionId, AccessLevel>);

impl AccessMap {
    /// Resolve the level for a section (missing entries fail closed to None)
    pub fn level(&self, section: SectionId) -> AccessLevel {
        self.0.get(&section).copied().unwrap_or(AccessLevel::None)
    }

    /// True iff this map satisfies `required` for `section`: `full` satisfies
    /// everything, `view` satisfies only a `view` requirement, `none` nothing.
    pub fn has_access(&self, section: SectionId, required: AccessLevel) -> bool {
        match self.level(section) {
            AccessLevel::Full => true,
            AccessLevel::View => required == AccessLevel::View,
            AccessLevel::None => false,
        }
    }

    /// True iff the level for the section is exactly `view`
    pub fn is_view_only(&self, section: SectionId) -> bool {
        self.level(section) == AccessLevel::View
    }

    fn from_pairs(pairs: &[(SectionId, AccessLevel)]) -> Self {
        let mut map = BTreeMap::new();
        for section in SectionId::all() {
            map.insert(*section, AccessLevel::None);
        }
        for (section, level) in pairs {
            map.insert(*section, *level);
        }
        Self(map)
    }
}

/// Default section access for a role.
///
/// The match is exhaustive on purpose: adding a role forces this table to be
/// revisited at compile time.
pub fn role_defaults(role: UserRole) -> AccessMap {
    use AccessLevel::{Full, None as NoAccess, View};
    use SectionId::*;

    match role {
        // Full access to everything
        UserRole::SuperAdmin => AccessMap::from_pairs(&[
            (Dashboard, Full),
            (Summary, Full),
            (TechPack, Full),
            (OrderSheet, Full),
            (Consumption, Full),
            (PpMeeting, Full),
            (MqControl, Full),
            (Commercial, Full),
            (QcInspect, Full),
            (UserManagement, Full),
            (RoleManagement, Full),
        ]),

        // Full access except role management
        UserRole::Admin => AccessMap::from_pairs(&[
            (Dashboard, Full),
            (Summary, Full),
            (TechPack, Full),
            (OrderSheet, Full),
            (Consumption, Full),
            (PpMeeting, Full),
            (MqControl, Full),
            (Commercial, Full),
            (QcInspect, Full),
            (UserManagement, Full),
            (RoleManagement, NoAccess),
        ]),

        // Full on all content sections, no management access
        UserRole::Director => AccessMap::from_pairs(&[
            (Dashboard, Full),
            (Summary, Full),
            (TechPack, Full),
            (OrderSheet, Full),
            (Consumption, Full),
            (PpMeeting, Full),
            (MqControl, Full),
            (Commercial, Full),
            (QcInspect, Full),
        ]),

        // Styles, orders and consumption; no QC sections
        UserRole::Merchandiser => AccessMap::from_pairs(&[
            (Dashboard, Full),
            (Summary, Full),
            (TechPack, Full),
            (OrderSheet, Full),
            (Consumption, Full),
            (PpMeeting, Full),
            (Commercial, Full),
        ]),

        // QC-related sections only
        UserRole::Qc => AccessMap::from_pairs(&[
            (Dashboard, Full),
            (Summary, Full),
            (PpMeeting, Full),
            (MqControl, Full),
            (QcInspect, Full),
        ]),

        // Read-only on content sections, full on the two landing sections
        UserRole::Viewer => AccessMap::from_pairs(&[
            (Dashboard, Full),
            (Summary, Full),
            (TechPack, View),
            (OrderSheet, View),
            (Consumption, View),
            (PpMeeting, View),
            (MqControl, View),
            (Commercial, View),
            (QcInspect, View),
        ]),
    }
}

/// Resolve a user's effective access: role defaults with a per-user partial
/// override merged on top, override winning key-by-key. No override means
/// the pure role defaults.
pub fn effective_access(
    role: UserRole,
    overrides: Option<&BTreeMap<SectionId, AccessLevel>>,
) -> AccessMap {
    let mut map = role_defaults(role);
    if let Some(overrides) = overrides {
        for (section, level) in overrides {
            map.0.insert(*section, *level);
        }
    }
    map
}

/// Whether a role may manage user accounts
pub fn can_manage_users(role: UserRole) -> bool {
    matches!(role, UserRole::SuperAdmin | UserRole::Admin)
}

/// Whether a role may manage role definitions
pub fn can_manage_roles(role: UserRole) -> bool {
    role == UserRole::SuperAdmin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_implies_view() {
        for role in UserRole::all() {
            let access = role_defaults(*role);
            for section in SectionId::all() {
                if access.has_access(*section, AccessLevel::Full) {
                    assert!(
                        access.has_access(*section, AccessLevel::View),
                        "{} on {}: full must imply view",
                        role,
                        section
                    );
                }
            }
        }
    }

    #[test]
    fn test_defaults_cover_every_section() {
        for role in UserRole::all() {
            let access = role_defaults(*role);
            for section in SectionId::all() {
                // Every (role, section) pair resolves to exactly one level
                let _ = access.level(*section);
                assert!(access.0.contains_key(section));
            }
        }
    }

    #[test]
    fn test_super_admin_full_everywhere() {
        let access = role_defaults(UserRole::SuperAdmin);
        for section in SectionId::all() {
            assert_eq!(access.level(*section), AccessLevel::Full);
        }
    }

    #[test]
    fn test_admin_locked_out_of_role_management() {
        let access = role_defaults(UserRole::Admin);
        assert_eq!(access.level(SectionId::RoleManagement), AccessLevel::None);
        assert_eq!(access.level(SectionId::UserManagement), AccessLevel::Full);
    }

    #[test]
    fn test_merchandiser_matrix() {
        let access = role_defaults(UserRole::Merchandiser);
        assert_eq!(access.level(SectionId::TechPack), AccessLevel::Full);
        assert_eq!(access.level(SectionId::Commercial), AccessLevel::Full);
        assert_eq!(access.level(SectionId::MqControl), AccessLevel::None);
        assert_eq!(access.level(SectionId::QcInspect), AccessLevel::None);
        assert_eq!(access.level(SectionId::UserManagement), AccessLevel::None);
    }

    #[test]
    fn test_qc_matrix() {
        let access = role_defaults(UserRole::Qc);
        assert_eq!(access.level(SectionId::QcInspect), AccessLevel::Full);
        assert_eq!(access.level(SectionId::MqControl), AccessLevel::Full);
        assert_eq!(access.level(SectionId::TechPack), AccessLevel::None);
        assert_eq!(access.level(SectionId::OrderSheet), AccessLevel::None);
        assert_eq!(access.level(SectionId::Commercial), AccessLevel::None);
    }

    #[test]
    fn test_viewer_is_view_only_on_content() {
        let access = role_defaults(UserRole::Viewer);
        assert!(access.is_view_only(SectionId::TechPack));
        assert!(access.has_access(SectionId::TechPack, AccessLevel::View));
        assert!(!access.has_access(SectionId::TechPack, AccessLevel::Full));
        assert_eq!(access.level(SectionId::Dashboard), AccessLevel::Full);
        assert_eq!(access.level(SectionId::UserManagement), AccessLevel::None);
    }

    #[test]
    fn test_none_satisfies_nothing() {
        let access = role_defaults(UserRole::Qc);
        assert!(!access.has_access(SectionId::TechPack, AccessLevel::View));
        assert!(!access.has_access(SectionId::TechPack, AccessLevel::Full));
    }

    #[test]
    fn test_effective_access_without_override_is_defaults() {
        for role in UserRole::all() {
            assert_eq!(effective_access(*role, None), role_defaults(*role));
        }
    }

    #[test]
    fn test_effective_access_override_wins_per_key() {
        let mut overrides = BTreeMap::new();
        overrides.insert(SectionId::QcInspect, AccessLevel::Full);
        overrides.insert(SectionId::TechPack, AccessLevel::None);

        let access = effective_access(UserRole::Merchandiser, Some(&overrides));
        assert_eq!(access.level(SectionId::QcInspect), AccessLevel::Full);
        assert_eq!(access.level(SectionId::TechPack), AccessLevel::None);
        // Untouched keys keep their defaults
        assert_eq!(access.level(SectionId::OrderSheet), AccessLevel::Full);
    }

    #[test]
    fn test_empty_map_fails_closed() {
        let access = AccessMap::default();
        for section in SectionId::all() {
            assert_eq!(access.level(*section), AccessLevel::None);
            assert!(!access.has_access(*section, AccessLevel::View));
        }
    }

    #[test]
    fn test_management_helpers() {
        assert!(can_manage_users(UserRole::SuperAdmin));
        assert!(can_manage_users(UserRole::Admin));
        assert!(!can_manage_users(UserRole::Director));
        assert!(can_manage_roles(UserRole::SuperAdmin));
        assert!(!can_manage_roles(UserRole::Admin));
    }

    #[test]
    fn test_access_map_roundtrip() {
        let access = role_defaults(UserRole::Qc);
        let yaml = serde_yml::to_string(&access).unwrap();
        let parsed: AccessMap = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(access, parsed);

        let json = serde_json::to_string(&access).unwrap();
        let parsed: AccessMap = serde_json::from_str(&json).unwrap();
        assert_eq!(access, parsed);
    }
}
