pub mod credentials_file;
pub mod points_file;
pub mod session_memory;

pub use credentials_file::FileCredentialStore;
pub use points_file::FilePointsStore;
pub use session_memory::MemorySessionStore;
