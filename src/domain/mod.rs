//! Domain layer containing business entities and store contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Durable store trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Background click persistence
//!
//! # Click Processing Flow
//!
//! 1. A short code resolves successfully
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] appends the click and bumps the counter, with retries
//! 4. Data lands in the store via [`repositories::ClickRepository`] and [`repositories::UrlRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
