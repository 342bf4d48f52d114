pub mod classify;
pub mod header;
pub mod history;
pub mod scaling;
pub mod session;
