// Frame driver for the animated counter
use crate::domain::counter::{AnimatedCounter, CounterFrame};
use futures::stream::Stream;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};

/// Steps `counter` on a fixed frame interval and yields each frame,
/// finishing with the terminal one. Dropping the stream stops the animation.
pub fn animate(mut counter: AnimatedCounter, frame_interval: Duration) -> impl Stream<Item = CounterFrame> {
    async_stream::stream! {
        let origin = Instant::now();
        let mut ticker = interval(frame_interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let tick = ticker.tick().await;
            let now_ms = tick.duration_since(origin).as_secs_f64() * 1000.0;
            let frame = counter.step(now_ms);
            yield frame;
            if frame.done {
                break;
            }
        }
    }
}
