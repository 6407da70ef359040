use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use rsa_sim::sim::{FragmentAwareAgent, KspAgent, Simulation, UniformRequester};
use rsa_sim::{AssignmentPolicy, NetworkState, RoutingCache, TopologyKind, logger};

/// Routing and spectrum assignment simulation over an elastic optical
/// network topology.
#[derive(Debug, Parser)]
#[command(name = "rsa_sim")]
struct Args {
    /// Topology to simulate: nsf, janet, lattice3x3 or rnp
    #[arg(long, default_value = "nsf")]
    topology: TopologyKind,

    /// Frequency slots per link
    #[arg(long, default_value_t = 80)]
    n_slot: usize,

    /// Candidate paths per node pair
    #[arg(long, default_value_t = 5)]
    k: usize,

    /// Assignment policy: first-fit, random, entropy-edge, entropy-path
    /// or fragment-aware
    #[arg(long, default_value = "first-fit")]
    policy: String,

    /// Guard-band slots added to every reservation
    #[arg(long, default_value_t = 0)]
    guard: usize,

    /// Number of requests to simulate
    #[arg(long, default_value_t = 10_000)]
    n_requests: usize,

    /// Mean holding time per request
    #[arg(long, default_value_t = 10.0)]
    avg_service_time: f64,

    /// Mean request arrivals per unit time
    #[arg(long, default_value_t = 1.0)]
    avg_arrival_rate: f64,

    /// Seed for the requester and any randomized policy
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    let net = NetworkState::build(args.topology, args.n_slot, true)
        .with_context(|| format!("building the {} network", args.topology))?;

    log::info!("Simulating {} requests on {} with policy '{}'", args.n_requests, net.name(), args.policy);

    let cache = RoutingCache::build(&net, args.k);
    let requester = UniformRequester::new(net.n_nodes(), args.avg_service_time, args.avg_arrival_rate, args.seed);
    let mut simulation = Simulation::new(net, requester);

    let stats = if args.policy == "fragment-aware" {
        let mut agent = FragmentAwareAgent::new(cache, args.guard);
        simulation.run(&mut agent, args.n_requests)?
    } else {
        let policy: AssignmentPolicy = args.policy.parse()?;
        let mut agent = KspAgent::new(cache, policy, args.guard, args.seed);
        simulation.run(&mut agent, args.n_requests)?
    };

    let header = format!("=== {} / {} ===", args.topology, args.policy);
    let bp = format!("{:.4}", stats.blocking_probability());

    println!();
    println!("{}", header.as_str().bold());
    println!("requests:             {}", stats.n_requests);
    println!("blocked:              {}", stats.n_blocked);
    println!("blocking probability: {}", if stats.n_blocked == 0 { bp.as_str().green() } else { bp.as_str().yellow() });
    println!("mean utilization:     {:.4}", stats.mean_util);

    Ok(())
}
