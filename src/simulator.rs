use std::f64::consts::PI;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::config::LatencyProfile;

/// Body returned by every simulated request.
pub const SAMPLE_RESPONSE: &str = "Sample response.";

/// Something that serves a request for an endpoint and takes a while
/// doing it. The analytics core only times it.
pub trait Processor: Send + Sync {
    fn process(&self, endpoint: &str) -> impl Future<Output = String> + Send;
}

/// Stand-in backend whose latency per endpoint is Gaussian with the
/// parameters from an injected [`LatencyProfile`].
pub struct SimulatedBackend {
    profile: LatencyProfile,
    rng: Mutex<StdRng>,
}

impl SimulatedBackend {
    pub fn new(profile: LatencyProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn profile(&self) -> &LatencyProfile {
        &self.profile
    }

    /// Draw the next delay for `endpoint` (Box–Muller), rounded to whole
    /// microseconds. Draws below 1 μs produce no delay.
    pub fn next_delay(&self, endpoint: &str) -> Duration {
        let params = self.profile.params_for(endpoint);
        let (u1, u2) = {
            let mut rng = self.rng.lock();
            (
                rng.gen_range(f64::EPSILON..=1.0),
                rng.gen_range(0.0..=1.0),
            )
        };

        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        let us = (z * params.std_dev_us + params.mean_us).round();
        if us >= 1.0 {
            Duration::from_micros(us as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl Processor for SimulatedBackend {
    async fn process(&self, endpoint: &str) -> String {
        let delay = self.next_delay(endpoint);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        SAMPLE_RESPONSE.to_owned()
    }
}
