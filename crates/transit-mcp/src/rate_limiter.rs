// Dweve Transit MCP - Canadian Public Transit Network Database access
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Request rate limiting for the stdio transport.
//!
//! A token bucket: `capacity` tokens to start with, refilled continuously at
//! `refill_per_second`, one token per request. Requests arriving on an empty
//! bucket are rejected by the server with error `-32005`.

use std::time::Instant;
use tracing::warn;

/// Token bucket rate limiter.
///
/// # Examples
///
/// ```
/// use transit_mcp::RateLimiter;
///
/// // Bursts of 200, 100 requests/second sustained
/// let mut limiter = RateLimiter::new(200, 100);
/// assert!(limiter.check_limit());
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    capacity: f64,
    refill_per_second: f64,
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a full bucket of `capacity` tokens refilled at `refill_per_second`.
    ///
    /// # Panics
    ///
    /// Panics if either argument is zero.
    pub fn new(capacity: usize, refill_per_second: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        assert!(refill_per_second > 0, "refill_per_second must be positive");

        Self {
            capacity: capacity as f64,
            refill_per_second: refill_per_second as f64,
            tokens: capacity as f64,
            last_refill: Instant::now(),
        }
    }

    /// Take one token. Returns `false` when the bucket is empty.
    pub fn check_limit(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            warn!(
                "Rate limit exceeded (burst={}, rate={}/s)",
                self.capacity, self.refill_per_second
            );
            false
        }
    }

    /// Whole tokens currently available.
    pub fn tokens(&mut self) -> usize {
        self.refill();
        self.tokens.floor() as usize
    }

    /// Refill the bucket to capacity.
    pub fn reset(&mut self) {
        self.tokens = self.capacity;
        self.last_refill = Instant::now();
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_second).min(self.capacity);
        self.last_refill = now;
    }
}
