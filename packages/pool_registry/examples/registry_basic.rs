//! Basic usage example for `PoolRegistry`.
//!
//! This example runs two independent pools under one registry: short-lived visual effects and
//! reusable network buffers. Each subsystem addresses its pool by key without knowing about
//! the other.

use pool_registry::PoolRegistry;
use recycle_pool::Poolable;

#[derive(Default)]
struct Explosion {
    frames_remaining: u32,
}

impl Poolable for Explosion {
    fn on_acquire(&mut self) {
        self.frames_remaining = 30;
    }

    fn reset(&mut self) {
        self.frames_remaining = 0;
    }
}

struct NetworkBuffer {
    bytes: Vec<u8>,
}

impl Poolable for NetworkBuffer {
    fn reset(&mut self) {
        self.bytes.clear();
    }
}

fn main() -> Result<(), pool_registry::Error> {
    let registry = PoolRegistry::instance();

    // Explicit creation picks the initial size; implicit creation below uses the default.
    registry.create_pool("vfx/explosions", 4, || Ok(Explosion::default()))?;

    let explosion = registry.get_object("vfx/explosions", || Ok(Explosion::default()))?;
    println!(
        "Acquired an explosion with {} frames to live; {} idle remain",
        explosion.frames_remaining,
        registry.idle_count("vfx/explosions")?
    );
    registry.return_object("vfx/explosions", explosion)?;

    // No pool exists under this key yet, so the first get creates one implicitly.
    let mut buffer = registry.get_object("net/buffers", || {
        Ok(NetworkBuffer {
            bytes: Vec::with_capacity(64 * 1024),
        })
    })?;
    buffer.bytes.extend_from_slice(b"frame payload");
    println!("Filled a pooled buffer with {} bytes", buffer.bytes.len());
    registry.return_object("net/buffers", buffer)?;

    println!("Registry manages {} pools", registry.pool_count());

    // Tear both pools down; their idle instances are dropped.
    registry.destroy_pool("vfx/explosions")?;
    registry.destroy_pool("net/buffers")?;
    println!("Registry manages {} pools after teardown", registry.pool_count());

    Ok(())
}
