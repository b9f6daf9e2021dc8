pub mod ai;
pub mod completion;
pub mod speech;
