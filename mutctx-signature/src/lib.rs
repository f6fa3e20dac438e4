pub mod classify;
pub mod consts;

// re-exports
pub use classify::*;
