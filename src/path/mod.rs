pub mod jailed_path;
pub mod virtual_path;
