//! crates/points_tracker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format.

/// The two children whose points the household tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Child {
    Adrian,
    Emma,
}

impl Child {
    /// The lowercase name used on the wire and in the stored files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Child::Adrian => "adrian",
            Child::Emma => "emma",
        }
    }
}

/// What a logged-in user is allowed to do with the points record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full read/write over both children's points and money fields.
    Admin,
    /// Read-only visibility, scoped by `child_view`.
    Viewer,
}

impl Role {
    /// The lowercase name used on the wire and in the stored files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
        }
    }
}

/// A single entry of the static credential list.
///
/// Loaded once at process start and never mutated by the running process.
/// The password is stored in plaintext, matching the credential file format.
#[derive(Debug, Clone)]
pub struct AppUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub child_view: Option<Child>,
}

/// The authenticated identity a session holds: everything the server needs
/// to answer "who is this and what may they see".
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub username: String,
    pub role: Role,
    pub child_view: Option<Child>,
}

impl UserIdentity {
    /// Builds the session identity for a credential record that passed
    /// authentication.
    pub fn from_user(user: &AppUser) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            child_view: user.child_view,
        }
    }

    /// How much of the points record this identity may read.
    pub fn visibility(&self) -> Visibility {
        match (self.role, self.child_view) {
            (Role::Admin, _) => Visibility::Everything,
            (Role::Viewer, Some(child)) => Visibility::OneChild(child),
            (Role::Viewer, None) => Visibility::Nothing,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The closed set of read scopes, derived from role + child scope so the
/// dispatch sites can match exhaustively instead of probing nullable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Admins read everything.
    Everything,
    /// A scoped viewer reads exactly one child's points.
    OneChild(Child),
    /// A viewer without a child scope sees no points at all.
    Nothing,
}

/// A money amount per child, used for both goals and savings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoneyByChild {
    pub adrian: f64,
    pub emma: f64,
}

/// The full persisted points state for both children.
///
/// Each child's sequence holds awarded point indices, conceptually 1..=20 and
/// each at most once. The UI enforces the range; storage does not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointsRecord {
    pub adrian: Vec<u32>,
    pub emma: Vec<u32>,
    pub goals: MoneyByChild,
    pub savings: MoneyByChild,
}

impl PointsRecord {
    /// Empties both point sequences. Goals and savings are kept as they are.
    pub fn clear_points(&mut self) {
        self.adrian.clear();
        self.emma.clear();
    }

    /// The record as seen by the given scope: admins get the full record, a
    /// scoped viewer gets the other child's sequence emptied, and an
    /// unscoped viewer gets both sequences emptied. Goals and savings pass
    /// through unfiltered in every case.
    pub fn restricted_to(&self, visibility: Visibility) -> PointsRecord {
        let (adrian, emma) = match visibility {
            Visibility::Everything => (self.adrian.clone(), self.emma.clone()),
            Visibility::OneChild(Child::Adrian) => (self.adrian.clone(), Vec::new()),
            Visibility::OneChild(Child::Emma) => (Vec::new(), self.emma.clone()),
            Visibility::Nothing => (Vec::new(), Vec::new()),
        };
        PointsRecord {
            adrian,
            emma,
            goals: self.goals,
            savings: self.savings,
        }
    }
}
