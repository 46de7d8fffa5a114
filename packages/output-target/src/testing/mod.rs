//! Testing Utilities
//!
//! In-memory file system and component metadata builders shared by unit and
//! integration tests.

pub mod fixtures;
pub mod mock_file_system;

pub use fixtures::*;
pub use mock_file_system::*;
