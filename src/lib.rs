//! # Rota Rust Backend
//!
//! Volunteer shift scheduling and calendar grid engine.
//!
//! This crate provides the scheduling core for a multi-day, multi-location
//! volunteer rota: shift records are stored through a repository abstraction,
//! validated against their event window, and laid out onto calendar grids for
//! rendering by a host application (week-by-location and
//! day-by-all-locations views).
//!
//! ## Features
//!
//! - **Domain model**: events, locations, positions, volunteers, shifts and
//!   their assignments
//! - **Grid layout**: fractional row placement of shifts on a wrap-around
//!   day window, including shifts that cross midnight
//! - **Overlap resolution**: role-sticky column assignment for concurrent
//!   shifts
//! - **View aggregation**: render-ready week and day view structures
//! - **Roster operations**: capacity- and eligibility-checked volunteer
//!   assignment with notification-state bookkeeping
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and the public DTO surface
//! - [`models`]: domain entities and the time-grid model
//! - [`db`]: repository traits and the in-memory implementation
//! - [`services`]: grid layout, overlap resolution, scheduling and roster
//!   business logic
//! - [`views`]: week/day view aggregation for the rendering collaborator
//!
//! The grid core is a pure computation: each call receives a shift snapshot
//! fetched through the repository and returns positioned shifts that are
//! never persisted.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod views;
