//! Waypoint sequence task
//!
//! Sends each configured waypoint to the easer task in turn, waits for the
//! servo to arrive, holds for the dwell time and moves on. Loops forever.

use defmt::*;
use embassy_time::Timer;
use heapless::Vec;

use glide_core::config::MAX_WAYPOINTS;

use crate::channels::{ARRIVED, TARGET};

#[embassy_executor::task]
pub async fn sequence_task(waypoints: Vec<i32, MAX_WAYPOINTS>, dwell_ms: u32) {
    info!(
        "Sequence task started: {} waypoints, {} ms dwell",
        waypoints.len(),
        dwell_ms
    );

    if waypoints.is_empty() {
        warn!("No waypoints, sequence idle");
        return;
    }

    loop {
        for (index, &target) in waypoints.iter().enumerate() {
            debug!("Waypoint {}: {} us", index, target);
            ARRIVED.reset();
            TARGET.signal(target);

            // Completion of an earlier movement may still be reported first
            while ARRIVED.wait().await != target {}

            Timer::after_millis(dwell_ms as u64).await;
        }
    }
}
