//! Buffer pool configuration.

use crate::{Error, Result};

/// Largest pool the builder accepts.
pub const MAX_CAPACITY: usize = 65536;

/// Configuration for a [`BufferPool`](crate::BufferPool).
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of slots, fixed for the pool's lifetime.
    pub capacity: usize,
    /// Rate stamped on buffers created by `allocate`.
    pub sample_rate: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            sample_rate: 48000,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(Error::InvalidConfig(format!(
                "capacity {} out of range (1-{})",
                self.capacity, MAX_CAPACITY
            )));
        }
        if self.sample_rate < 8000 || self.sample_rate > 384000 {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.sample_rate, 48000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_capacity() {
        let config = PoolConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = PoolConfig {
            capacity: MAX_CAPACITY + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_sample_rate() {
        let config = PoolConfig {
            sample_rate: 1000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
