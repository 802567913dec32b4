pub mod modules;
pub mod topics;
