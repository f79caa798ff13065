//! Server-side API backend and business logic.
//!
//! This module contains the complete backend for PollStraw: REST endpoints,
//! the WebSocket live-results channel, business logic, data access, and the
//! infrastructure services around them. The backend uses Axum as the web
//! framework, SeaORM for database operations, and Redis (or an in-process
//! fallback) for cached results, vote markers and cross-instance fan-out.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP and WebSocket handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Authentication guards, client IP resolution and rate limits
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, cache, realtime hub, token keys)
//! - **Startup** (`startup`) - Initialization of database, cache, and the bootstrap admin
//! - **Router** (`router`) - Axum route configuration
//! - **Cache** (`cache/`) - Results cache, vote markers and the pub/sub bridge
//! - **Realtime** (`realtime/`) - Poll rooms and WebSocket sessions
//! - **Scheduler** (`scheduler/`) - Cron jobs for closing expired polls and purging tokens
//!
//! # Request Flow
//!
//! A typical request flows through these layers:
//!
//! 1. **Router** receives HTTP request, applies rate limits and routes to a controller
//! 2. **Middleware** resolves the caller's identity and IP
//! 3. **Controller** validates access, converts DTOs to params, calls service
//! 4. **Service** executes business logic, orchestrates data and cache operations
//! 5. **Data** queries database, converts entities to domain models
//! 6. **Service** returns domain model to controller, publishing realtime events if needed
//! 7. **Controller** converts domain model to DTO, returns HTTP response

pub mod cache;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod realtime;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
