pub mod dimension;
pub mod major;
pub mod profile;
