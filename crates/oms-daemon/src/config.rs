//! Process configuration, read from the environment.
//!
//! Only plumbing lives here (where to listen, how deep the event bus is).
//! Order state is never persisted, so nothing here survives a restart.

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};

pub const ADDR_ENV: &str = "OMS_DAEMON_ADDR";
pub const BUS_CAPACITY_ENV: &str = "OMS_EVENT_BUS_CAPACITY";

pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
    8000,
);
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub bind_addr: SocketAddr,
    /// Slots in the broadcast channel behind `/v1/stream`. Slow subscribers
    /// that fall further behind than this lose messages.
    pub event_bus_capacity: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_ADDR,
            event_bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys fall back to
    /// defaults; set-but-malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = non_blank(lookup(ADDR_ENV)) {
            cfg.bind_addr = raw
                .parse()
                .with_context(|| format!("{ADDR_ENV} is not a socket address: '{raw}'"))?;
        }

        if let Some(raw) = non_blank(lookup(BUS_CAPACITY_ENV)) {
            let capacity: usize = raw
                .parse()
                .with_context(|| format!("{BUS_CAPACITY_ENV} is not an integer: '{raw}'"))?;
            if capacity == 0 {
                bail!("{BUS_CAPACITY_ENV} must be greater than zero");
            }
            cfg.event_bus_capacity = capacity;
        }

        Ok(cfg)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
