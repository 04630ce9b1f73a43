/// Monotonic time since boot.
pub trait Uptime {
    fn now_ms(&self) -> u64;
}
