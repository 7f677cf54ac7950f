pub mod footer;
pub mod sidebar;
pub mod transcript;
