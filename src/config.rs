//! Node Configuration
//!
//! Command-line configuration for a cluster node, plus the narrower per-subsystem
//! settings (`SearchConfig`, `ConsumerConfig`) that are derived from it.

use clap::Parser;
use std::net::SocketAddr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Parser)]
#[command(name = "commerce-node", about = "Service registry and product search node")]
pub struct NodeConfig {
    /// HTTP listen address.
    #[arg(long, default_value = "127.0.0.1:6000")]
    pub bind: SocketAddr,

    /// Largest page size a search request may ask for.
    #[arg(long, default_value_t = 100)]
    pub max_page_size: usize,

    /// Page size used when a search request omits `limit`.
    #[arg(long, default_value_t = 10)]
    pub default_page_size: usize,

    /// Number of sequential consumer lanes events are hashed onto.
    #[arg(long, default_value_t = 4)]
    pub consumer_lanes: usize,

    /// Attempts per event before a storage failure is given up on.
    #[arg(long, default_value_t = 3)]
    pub apply_attempts: usize,

    /// Capacity of the inbound event channel.
    #[arg(long, default_value_t = 1024)]
    pub event_buffer: usize,

    /// Default log filter; `RUST_LOG` takes precedence when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl NodeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(Error::invalid("--max-page-size must be > 0"));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(Error::invalid(format!(
                "--default-page-size must be within 1..={}",
                self.max_page_size
            )));
        }
        if self.consumer_lanes == 0 {
            return Err(Error::invalid("--consumer-lanes must be > 0"));
        }
        if self.apply_attempts == 0 {
            return Err(Error::invalid("--apply-attempts must be > 0"));
        }
        if self.event_buffer == 0 {
            return Err(Error::invalid("--event-buffer must be > 0"));
        }
        Ok(())
    }

    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            max_page_size: self.max_page_size,
            default_page_size: self.default_page_size,
        }
    }

    pub fn consumer(&self) -> ConsumerConfig {
        ConsumerConfig {
            lanes: self.consumer_lanes,
            apply_attempts: self.apply_attempts,
            lane_buffer: self.event_buffer,
            ..ConsumerConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_page_size: usize,
    pub default_page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsumerConfig {
    pub lanes: usize,
    pub apply_attempts: usize,
    pub lane_buffer: usize,
    /// First retry delay; doubles per attempt up to `max_backoff_ms`.
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            lanes: 4,
            apply_attempts: 3,
            lane_buffer: 1024,
            initial_backoff_ms: 150,
            max_backoff_ms: 1200,
        }
    }
}
