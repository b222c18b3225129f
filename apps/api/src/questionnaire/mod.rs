// Questionnaire flow: step definitions, profile assembly, in-flight answer
// storage, and the HTTP handlers tying them together.

pub mod builder;
pub mod handlers;
pub mod steps;
pub mod store;
