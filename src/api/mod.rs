//! Backend contract: wire types and the HTTP client

pub mod client;
pub mod types;

pub use client::{Backend, HttpBackend};
pub use types::{
    AnalyzeEndpoint, AnalyzeRequest, AnalyzeResponse, FoxOutput, GoalSpec, GoalType, Persona,
    PersonaListResponse, PersonaModule, ReplyOption,
};
