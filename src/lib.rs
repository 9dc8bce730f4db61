//! Fallblock (workspace facade crate).
//!
//! Re-exports the member crates under one `fallblock::{types,core,engine,input}`
//! path; the implementation lives in dedicated crates under `crates/`.

pub use fallblock_core as core;
pub use fallblock_engine as engine;
pub use fallblock_input as input;
pub use fallblock_types as types;
