pub mod channel;
pub mod context;
pub mod error;
pub mod event;
pub mod feature;
pub mod registry;
