pub mod domain;
pub mod ports;

pub use domain::{AppUser, Child, MoneyByChild, PointsRecord, Role, UserIdentity, Visibility};
pub use ports::{CredentialService, PointsService, PortError, PortResult, SessionService};
