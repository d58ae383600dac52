pub mod layout_file;
pub mod provider;
