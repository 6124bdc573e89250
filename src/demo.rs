//! # Demo Animation Driver
//!
//! Drives a [`SegmentController`] through the showcase sequence: count down from 9, flicker
//! random segment masks, count back up, flicker random digits. The controller itself knows
//! nothing about time; this module owns the cadence and calls the controller between ticks.
//!
//! Each phase is an async function built on `tokio::time`, so it can be cancelled at any
//! await point. Because every controller call fully determines the visual state, stopping
//! between frames never leaves a half-updated digit.
//!
//! After every update `on_frame` is called with the controller so the caller can redraw. A
//! failed frame (for instance a closed stdout) ends the animation and is returned to the caller.

use crate::config::DemoConfig;
use crate::controller::{Renderable, SegmentController};
use log::debug;
use rand::Rng;
use std::io;
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

/// Digits visited when counting from `from` to `to`, both clamped to 0-9.
///
/// The direction follows the unclamped inputs; the sequence is inclusive at both ends.
///
/// ```
/// use seven_seg_lib::demo::count_steps;
///
/// assert_eq!(count_steps(7, 9), vec![7, 8, 9]);
/// assert_eq!(count_steps(12, 7), vec![9, 8, 7]);
/// ```
pub fn count_steps(from: i64, to: i64) -> Vec<i64> {
    let (start, end) = (from.clamp(0, 9), to.clamp(0, 9));
    if from < to {
        (start..=end).collect()
    } else {
        (end..=start).rev().collect()
    }
}

/// Interval whose first tick fires one `delay` from now.
fn ticker(delay: Duration) -> Interval {
    // tokio rejects a zero period
    let delay = delay.max(Duration::from_millis(1));
    let mut interval = time::interval_at(Instant::now() + delay, delay);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Run `frame` every `delay` until `duration` has passed or a frame fails.
async fn repeat_for(
    duration: Duration,
    delay: Duration,
    mut frame: impl FnMut() -> io::Result<()>,
) -> io::Result<()> {
    let mut ticks = ticker(delay);
    let frames = async {
        loop {
            ticks.tick().await;
            if let Err(e) = frame() {
                break e;
            }
        }
    };
    match time::timeout(duration, frames).await {
        Ok(e) => Err(e),
        Err(_elapsed) => Ok(()),
    }
}

/// Show each digit from `from` to `to`, one per `delay`.
pub async fn count<P, F>(
    controller: &mut SegmentController<P>,
    from: i64,
    to: i64,
    delay: Duration,
    on_frame: &mut F,
) -> io::Result<()>
where
    P: Renderable,
    F: FnMut(&SegmentController<P>) -> io::Result<()>,
{
    debug!("counting {from} -> {to}");
    let mut ticks = ticker(delay);
    for digit in count_steps(from, to) {
        ticks.tick().await;
        controller.set_digit(digit);
        on_frame(controller)?;
    }
    Ok(())
}

/// Show a random 8-bit mask every `delay` for `duration`.
pub async fn random_segments<P, R, F>(
    controller: &mut SegmentController<P>,
    duration: Duration,
    delay: Duration,
    rng: &mut R,
    on_frame: &mut F,
) -> io::Result<()>
where
    P: Renderable,
    R: Rng,
    F: FnMut(&SegmentController<P>) -> io::Result<()>,
{
    debug!("random segments for {duration:?}");
    repeat_for(duration, delay, || {
        controller.set_segments(rng.gen());
        on_frame(controller)
    })
    .await
}

/// Show a random digit every `delay` for `duration`.
pub async fn random_digits<P, R, F>(
    controller: &mut SegmentController<P>,
    duration: Duration,
    delay: Duration,
    rng: &mut R,
    on_frame: &mut F,
) -> io::Result<()>
where
    P: Renderable,
    R: Rng,
    F: FnMut(&SegmentController<P>) -> io::Result<()>,
{
    debug!("random digits for {duration:?}");
    repeat_for(duration, delay, || {
        controller.set_digit(rng.gen_range(0..10));
        on_frame(controller)
    })
    .await
}

/// One full pass of the showcase: 9 down to 0, random segments, 0 up to 9, random digits.
pub async fn run_cycle<P, R, F>(
    controller: &mut SegmentController<P>,
    timings: &DemoConfig,
    rng: &mut R,
    on_frame: &mut F,
) -> io::Result<()>
where
    P: Renderable,
    R: Rng,
    F: FnMut(&SegmentController<P>) -> io::Result<()>,
{
    let count_delay = Duration::from_millis(timings.count_delay_ms);
    let random_delay = Duration::from_millis(timings.random_delay_ms);

    count(controller, 9, 0, count_delay, on_frame).await?;
    random_segments(
        controller,
        Duration::from_millis(timings.random_segments_ms),
        random_delay,
        rng,
        on_frame,
    )
    .await?;
    count(controller, 0, 9, count_delay, on_frame).await?;
    random_digits(
        controller,
        Duration::from_millis(timings.random_digits_ms),
        random_delay,
        rng,
        on_frame,
    )
    .await
}
