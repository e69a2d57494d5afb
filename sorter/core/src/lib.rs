//! Sorter Core - Headless Animated Quicksort for number-sorter
//!
//! This crate provides the sorting and observation logic for
//! number-sorter, completely independent of any UI framework. It can
//! drive a desktop grid of number buttons, a TUI, a web view, or run
//! headless for testing and automation.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       UI Surfaces                          │
//! │   ┌─────────┐   ┌─────────┐   ┌────────────────────────┐  │
//! │   │ Desktop │   │   TUI   │   │   Headless / Tests     │  │
//! │   └────┬────┘   └────┬────┘   └───────────┬────────────┘  │
//! │        └─────────────┴────────────────────┘               │
//! │                       │                                   │
//! │               SurfaceRequest (up)                         │
//! │               SorterMessage  (down)                       │
//! │                       │                                   │
//! └───────────────────────┼───────────────────────────────────┘
//!                         │
//! ┌───────────────────────┼───────────────────────────────────┐
//! │                  SORTER CORE                              │
//! │  ┌────────────────────┴────────────────────────────────┐  │
//! │  │                 SortController                      │  │
//! │  │   ┌───────────────┐      ┌───────────────────────┐  │  │
//! │  │   │ SequenceStore │      │   AnimatedQuicksort   │  │  │
//! │  │   │  (dataset)    │      │ (direction, partition)│  │  │
//! │  │   └───────────────┘      └───────────────────────┘  │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SortController`]: orchestration facade; busy gate + background
//!   worker
//! - [`AnimatedQuicksort`]: the sorting engine and its direction/state
//!   machine
//! - [`SequenceStore`]: the mutable integer dataset
//! - [`ObservationEvent`]: one observable step of an in-flight sort
//! - [`SurfaceRequest`]: requests from a UI surface to the core
//! - [`SorterMessage`]: messages from the core to a UI surface
//!
//! # Quick Start
//!
//! ```ignore
//! use sorter_core::{SortController, SorterConfig, SorterMessage};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (controller, mut rx) = SortController::channel(SorterConfig::from_env());
//!
//!     // Build a dataset and kick off an animated sort.
//!     controller.request_generate(12).await.unwrap();
//!     controller.request_sort().await.unwrap();
//!
//!     // Render each message as it arrives.
//!     while let Some(message) = rx.recv().await {
//!         match message {
//!             SorterMessage::Observation(event) if event.is_terminal() => break,
//!             message => { /* render */ }
//!         }
//!     }
//! }
//! ```
//!
//! # Execution Models
//!
//! The engine itself is synchronous and stepped: call
//! [`AnimatedQuicksort::run_sort`] with a callback and drive it at
//! whatever pace you like. The controller adds the background/paced
//! model: one blocking worker at a time, events handed off through a
//! tokio channel, a configurable delay between steps, and cooperative
//! cancellation.
//!
//! # Module Overview
//!
//! - [`config`]: pacing, channel sizing, and generation bounds
//! - [`controller`]: orchestration facade and background worker
//! - [`engine`]: the animated quicksort and its direction/state machine
//! - [`error`]: error taxonomy
//! - [`events`]: observation events emitted while sorting
//! - [`messages`]: messages from the core to UI surfaces
//! - [`requests`]: requests from UI surfaces to the core
//! - [`store`]: the sequence store and dataset generation
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on any UI framework. It's pure
//! sorting and orchestration logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod messages;
pub mod requests;
pub mod store;

// Re-exports for convenience
pub use config::{SorterConfig, DEFAULT_LARGE_BOUND, DEFAULT_SMALL_BOUND};
pub use controller::SortController;
pub use engine::{AnimatedQuicksort, SortDirection, SortOutcome, SortState};
pub use error::SortError;
pub use events::ObservationEvent;
pub use messages::SorterMessage;
pub use requests::SurfaceRequest;
pub use store::SequenceStore;
