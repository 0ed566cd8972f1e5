//! Inter-task communication channels
//!
//! Defines the static signals used between the Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// New target pulse width (µs), taken by the easer task
pub static TARGET: Signal<CriticalSectionRawMutex, i32> = Signal::new();

/// Target (µs) of a movement that has completed
pub static ARRIVED: Signal<CriticalSectionRawMutex, i32> = Signal::new();
