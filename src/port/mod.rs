//! Port traits decoupling the engines from their collaborators.

mod store;

pub use store::PropertyStore;
