//! Basic usage example for `RecyclePool`.
//!
//! This example models a frame-driven game loop that fires projectiles every frame. Fabricating
//! a projectile is treated as expensive, so the loop recycles them through a pool instead of
//! constructing and dropping one per shot.

use recycle_pool::{LifecycleEvent, Poolable, RecyclePool};

#[derive(Default)]
struct Projectile {
    flight_time_ms: u32,
}

impl Poolable for Projectile {
    fn on_acquire(&mut self) {
        println!("  projectile armed");
    }

    fn on_release(&mut self) {
        println!("  projectile disarmed after {} ms of flight", self.flight_time_ms);
    }

    fn reset(&mut self) {
        self.flight_time_ms = 0;
    }
}

fn main() -> Result<(), recycle_pool::Error> {
    let mut pool = RecyclePool::builder()
        .initial_size(2)
        .factory(|| Ok(Projectile::default()))
        .observer(|event, _projectile: &Projectile| {
            if event == LifecycleEvent::Created {
                println!("  fabricated a brand-new projectile");
            }
        })
        .build()?;

    println!("Pool starts with {} idle projectiles", pool.len());

    for frame in 0..4 {
        println!("Frame {frame}:");

        // The first frame finds only two idle projectiles and fabricates a third; every
        // later frame is satisfied entirely from the holding area.
        let mut first = pool.acquire()?;
        let mut second = pool.acquire()?;
        let mut third = pool.acquire()?;

        first.flight_time_ms = 16;
        second.flight_time_ms = 32;
        third.flight_time_ms = 48;

        pool.release(first);
        pool.release(second);
        pool.release(third);
    }

    println!("Pool ends with {} idle projectiles", pool.len());

    pool.drain();
    println!("Drained; {} idle projectiles remain", pool.len());

    Ok(())
}
