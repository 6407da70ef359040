use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

use crate::data::Request;
use crate::network::NodeId;

/// Traffic generator drawing uniformly over node pairs and bandwidths, with
/// exponentially distributed holding and inter-arrival times.
///
/// All draws come from one explicitly seeded generator; two requesters with
/// the same seed emit the same request stream.
#[derive(Debug, Clone)]
pub struct UniformRequester {
    seed: u64,
    rng: StdRng,
    pairs: Vec<(NodeId, NodeId)>,
    holding_time: Exp<f64>,
    inter_arrival: Exp<f64>,
}

const MIN_BANDWIDTH: u32 = 25;
const MAX_BANDWIDTH: u32 = 100;

impl UniformRequester {
    /// `avg_service_time` is the mean holding time per request;
    /// `avg_arrival_rate` is the mean number of requests per unit time.
    pub fn new(n_nodes: usize, avg_service_time: f64, avg_arrival_rate: f64, seed: u64) -> Self {
        let mut pairs = Vec::new();
        for s in 0..n_nodes {
            for d in (s + 1)..n_nodes {
                pairs.push((s, d));
            }
        }

        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            pairs,
            holding_time: Exp::new(1.0 / avg_service_time).expect("average service time must be positive"),
            inter_arrival: Exp::new(avg_arrival_rate).expect("average arrival rate must be positive"),
        }
    }

    /// Rewinds the generator to the start of its stream.
    pub fn init(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.init();
    }

    /// A uniformly drawn unordered source-destination pair.
    pub fn source_destination(&mut self) -> (NodeId, NodeId) {
        let idx = self.rng.random_range(0..self.pairs.len());
        self.pairs[idx]
    }

    pub fn bandwidth(&mut self) -> u32 {
        self.rng.random_range(MIN_BANDWIDTH..=MAX_BANDWIDTH)
    }

    /// Holding time of the next request.
    pub fn duration(&mut self) -> f64 {
        self.holding_time.sample(&mut self.rng)
    }

    /// Time until the next request arrives.
    pub fn time_interval(&mut self) -> f64 {
        self.inter_arrival.sample(&mut self.rng)
    }

    pub fn request(&mut self) -> Request {
        let (source, destination) = self.source_destination();
        Request { source, destination, bandwidth: self.bandwidth(), duration: self.duration() }
    }
}
