pub mod status;
pub mod uninstall;
pub mod update;
