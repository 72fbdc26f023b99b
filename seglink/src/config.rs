use seglink_driver::time::Duration;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Idle timeout: countdown duration armed on an idle-line signal.
    ///
    /// Truncated to whole milliseconds; must fit in `u16` milliseconds.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10),
        }
    }
}
