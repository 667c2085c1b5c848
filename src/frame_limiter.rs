use std::time::{Duration, Instant};

use bevy::prelude::*;

use crate::{config::GameConfig, consts::FRAME_RATE};

/// Caps the loop at a fixed number of iterations per second.
#[derive(Resource, Debug, Clone)]
pub struct FrameLimiter {
    frame: Duration,
    last: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / frame_rate.max(1),
            last: None,
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// How long to block so at least one frame has passed since the previous
    /// admitted frame. The first call never blocks.
    pub fn delay(&mut self, now: Instant) -> Duration {
        let wait = match self.last {
            Some(last) => self.frame.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        };
        self.last = Some(now + wait);
        wait
    }
}

impl FromWorld for FrameLimiter {
    fn from_world(world: &mut World) -> Self {
        let frame_rate = world
            .get_resource::<GameConfig>()
            .map_or(FRAME_RATE, |config| config.frame_rate);
        Self::new(frame_rate)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<FrameLimiter>()
        .add_systems(Last, limit_frame_rate);
}

fn limit_frame_rate(mut limiter: ResMut<FrameLimiter>) {
    let wait = limiter.delay(Instant::now());
    if !wait.is_zero() {
        std::thread::sleep(wait);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_budget() {
        assert_eq!(FrameLimiter::new(60).frame(), Duration::from_secs(1) / 60);
        assert_eq!(FrameLimiter::new(0).frame(), Duration::from_secs(1));
    }

    #[test]
    fn test_delay() {
        let mut limiter = FrameLimiter::new(50);
        let start = Instant::now();

        assert_eq!(limiter.delay(start), Duration::ZERO);

        // fast frame waits out the remainder
        let t = start + Duration::from_millis(5);
        assert_eq!(limiter.delay(t), Duration::from_millis(15));

        // deadline counts from where the previous wait ended
        let t = start + Duration::from_millis(30);
        assert_eq!(limiter.delay(t), Duration::from_millis(10));

        // slow frame is admitted immediately
        let t = start + Duration::from_millis(100);
        assert_eq!(limiter.delay(t), Duration::ZERO);
    }

    #[test]
    fn test_reads_config() {
        let mut world = World::new();
        world.insert_resource(GameConfig {
            frame_rate: 25,
            ..default()
        });
        let limiter = FrameLimiter::from_world(&mut world);
        assert_eq!(limiter.frame(), Duration::from_millis(40));
    }
}
