pub mod contact;
pub mod nav;
pub mod profile;
pub mod theme;
