// Matching: the ranking engine, personality code, display report, handlers.
// No I/O in engine/personality/report; handlers only read shared state.

pub mod engine;
pub mod handlers;
pub mod personality;
pub mod report;
