// Contacts: the durable record, its store, and the intake pipeline that scores new leads.

pub mod handlers;
pub mod intake;
#[cfg(test)]
pub mod memory;
pub mod models;
pub mod store;
pub mod validation;
