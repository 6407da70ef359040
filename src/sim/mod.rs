pub mod agent;
pub mod requester;

pub use agent::{Agent, FragmentAwareAgent, KspAgent};
pub use requester::UniformRequester;

use crate::data::{Action, Request};
use crate::error::Result;
use crate::network::NetworkState;

/// Result of one simulation step. The reward convention (+1 served,
/// -1 blocked) is kept for external learners observing the loop.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub is_success: bool,
    pub reward: f64,
}

/// Aggregate statistics of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub n_requests: usize,
    pub n_blocked: usize,
    pub mean_util: f64,
}

impl RunStats {
    pub fn blocking_probability(&self) -> f64 {
        if self.n_requests == 0 {
            return 0.0;
        }

        self.n_blocked as f64 / self.n_requests as f64
    }
}

/// The single-threaded request/release cycle: request arrives, the agent
/// decides, the engine commits or blocks, time advances, expired
/// reservations release. No operation suspends and nothing is shared.
pub struct Simulation {
    net: NetworkState,
    requester: UniformRequester,
}

impl Simulation {
    pub fn new(net: NetworkState, requester: UniformRequester) -> Self {
        Self { net, requester }
    }

    pub fn net(&self) -> &NetworkState {
        &self.net
    }

    /// Fresh episode: all slots free, requester rewound. Returns the first
    /// request. Calling twice in a row yields the same starting state.
    pub fn reset(&mut self) -> Request {
        self.net.init();
        self.requester.init();
        self.requester.request()
    }

    /// Applies one decision and advances time to the next arrival.
    pub fn step(&mut self, action: Option<&Action>) -> Result<StepOutcome> {
        let mut is_success = false;

        if let Some(act) = action {
            if self.net.is_assignable(&act.path, act.slot_index, act.n_slot) {
                self.net.assign(&act.path, act.slot_index, act.n_slot, act.duration)?;
                is_success = true;
            }
        }

        let interval = self.requester.time_interval();
        self.net.spend_time(interval);

        Ok(StepOutcome { is_success, reward: if is_success { 1.0 } else { -1.0 } })
    }

    /// Runs a whole episode of `n_requests` against the agent.
    pub fn run(&mut self, agent: &mut dyn Agent, n_requests: usize) -> Result<RunStats> {
        let mut request = self.reset();
        let mut n_blocked = 0;
        let mut util_sum = 0.0;

        for _ in 0..n_requests {
            let action = agent.act(&self.net, &request)?;
            let outcome = self.step(action.as_ref())?;

            if !outcome.is_success {
                n_blocked += 1;
            }
            util_sum += self.net.resource_util();

            request = self.requester.request();
        }

        let stats = RunStats { n_requests, n_blocked, mean_util: if n_requests > 0 { util_sum / n_requests as f64 } else { 0.0 } };

        log::info!(
            "Episode finished on {}: {} requests, {} blocked (bp = {:.4}), mean utilization {:.4}",
            self.net.name(),
            stats.n_requests,
            stats.n_blocked,
            stats.blocking_probability(),
            stats.mean_util
        );

        Ok(stats)
    }
}
