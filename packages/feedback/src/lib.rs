#![doc = include_str!("../README.md")]

mod busy;
mod config;
mod dismiss;
mod error;
mod memory;
mod page;
mod timer;

#[cfg(feature = "web")]
mod bindings;
#[cfg(feature = "web")]
mod launch;
#[cfg(feature = "web")]
pub mod web;

pub use busy::{busy_markup, clear_busy, set_busy, BusyGuard, BUSY_INDICATOR, DEFAULT_BUSY_LABEL};
pub use config::{FeedbackConfig, DEFAULT_STARTUP_MESSAGE};
pub use dismiss::AutoDismiss;
pub use error::FeedbackError;
pub use memory::{MemoryElement, MemoryPage};
pub use page::{Page, PageElement};
pub use timer::{ManualScheduler, Scheduler, TimerHandle};

#[cfg(feature = "web")]
pub use bindings::{hide_loading, init_feedback, show_loading};
#[cfg(feature = "web")]
pub use launch::launch;
