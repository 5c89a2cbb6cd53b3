pub mod boxed;
pub mod format;
