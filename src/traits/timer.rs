use std::time::Duration;

use crate::core::timer::StopSignal;

/// Host timer facility for the movement-key tick.
///
/// After `schedule_ticks` the host calls `Navigator::tick` with the same signal roughly
/// every `interval` until it returns `None`. Cancellation goes through the signal only.
pub trait TickScheduler {
    fn schedule_ticks(&mut self, interval: Duration, stop: StopSignal);
}
