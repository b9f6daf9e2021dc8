pub mod reconcile;
pub mod relay;
pub mod remote;
