mod dispatch;
pub mod run;

pub use dispatch::dispatch;
