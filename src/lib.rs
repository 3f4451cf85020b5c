// NL2SQL Server Library
//
// This crate provides the HTTP layer and the SQL generation pipeline:
// handlers, routes, request/response models, the safety guard, the
// per-session memory store, and the collaborator seams (schema provider,
// AI translator, query executor).

pub mod config;
pub mod guard;
pub mod handlers;
pub mod lifecycle;
pub mod logging;
pub mod memory;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod routes;
