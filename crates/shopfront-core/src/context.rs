//! Page session identity.

use std::fmt;

/// Identifier for one page session, used to correlate log entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an ID from a millisecond timestamp and a random fraction.
    ///
    /// Browsers have no `SystemTime`, so the host supplies both inputs
    /// (`Date.now()` and `Math.random()` on the web).
    pub fn from_parts(timestamp_ms: f64, random: f64) -> Self {
        let ts = timestamp_ms.max(0.0) as u64;
        let salt = (random.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32;
        Self(format!("{:x}-{:08x}", ts, salt))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self("local".to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
