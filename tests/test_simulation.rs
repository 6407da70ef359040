use rsa_sim::sim::{Agent, FragmentAwareAgent, KspAgent, Simulation, UniformRequester};
use rsa_sim::{AssignmentPolicy, NetworkState, Request, RoutingCache, TopologyKind};

const N_SLOT: usize = 40;

fn nsf() -> NetworkState {
    NetworkState::build(TopologyKind::Nsf, N_SLOT, true).unwrap()
}

#[test]
fn requester_streams_are_reproducible() {
    let mut a = UniformRequester::new(14, 10.0, 1.0, 123);
    let mut b = UniformRequester::new(14, 10.0, 1.0, 123);

    for _ in 0..20 {
        assert_eq!(a.request(), b.request(), "same seed must emit the same stream");
    }

    // Rewinding replays the stream from the start.
    let first = {
        a.init();
        a.request()
    };
    b.init();
    assert_eq!(first, b.request());

    let mut c = UniformRequester::new(14, 10.0, 1.0, 124);
    a.init();
    let differs = (0..20).any(|_| c.request() != a.request());
    assert!(differs, "different seeds should not replay the same stream");
}

#[test]
fn requester_respects_the_configured_ranges() {
    let mut requester = UniformRequester::new(14, 10.0, 1.0, 5);

    for _ in 0..200 {
        let req = requester.request();
        assert!(req.source < req.destination, "pairs are canonical");
        assert!(req.destination < 14);
        assert!((25..=100).contains(&req.bandwidth));
        assert!(req.duration > 0.0);
        assert!(requester.time_interval() > 0.0);
    }
}

#[test]
fn first_fit_agent_serves_the_first_request_at_index_zero() {
    let net = nsf();
    let cache = RoutingCache::build(&net, 3);
    let mut agent = KspAgent::new(cache, AssignmentPolicy::FirstFit, 0, 0);

    let request = Request { source: 0, destination: 3, bandwidth: 50, duration: 4.0 };
    let action = agent.act(&net, &request).unwrap().expect("an empty network cannot block");

    assert_eq!(action.path.nodes, vec![0, 1, 3], "the shortest path comes first in the cache");
    assert_eq!(action.slot_index, 0);
    // 1800 length units puts a slot at 2 x 12.5 bandwidth units.
    assert_eq!(action.n_slot, 2);
    assert_eq!(action.duration, 4.0);
}

#[test]
fn agent_falls_through_to_a_longer_path_when_the_shortest_is_full() {
    let mut net = nsf();
    let cache = RoutingCache::build(&net, 3);
    let mut agent = KspAgent::new(cache, AssignmentPolicy::FirstFit, 0, 0);

    // Saturate the direct 0-2 link completely.
    net.assign(&rsa_sim::Path::new(vec![0, 2]), 0, N_SLOT, 100.0).unwrap();

    let request = Request { source: 0, destination: 2, bandwidth: 50, duration: 1.0 };
    let action = agent.act(&net, &request).unwrap().expect("detours remain free");
    assert_ne!(action.path.nodes, vec![0, 2]);
    assert!(net.is_assignable(&action.path, action.slot_index, action.n_slot));
}

#[test]
fn agent_reports_blocking_when_every_candidate_is_full() {
    let mut net = NetworkState::build(TopologyKind::Nsf, 2, true).unwrap();
    let cache = RoutingCache::build(&net, 2);
    let mut agent = KspAgent::new(cache, AssignmentPolicy::FirstFit, 0, 0);

    // Fill both candidate paths completely.
    for path in [vec![0, 2], vec![0, 1, 2]] {
        net.assign(&rsa_sim::Path::new(path), 0, 2, 50.0).unwrap();
    }

    let request = Request { source: 0, destination: 2, bandwidth: 25, duration: 1.0 };
    assert!(agent.act(&net, &request).unwrap().is_none());
}

#[test]
fn fragment_aware_agent_picks_an_assignable_boundary_placement() {
    let mut net = nsf();
    let cache = RoutingCache::build(&net, 3);
    let mut agent = FragmentAwareAgent::new(cache, 0);

    // Leave a mid-spectrum hole on the shortest path.
    net.assign(&rsa_sim::Path::new(vec![0, 1, 3]), 10, 4, 50.0).unwrap();

    let request = Request { source: 0, destination: 3, bandwidth: 50, duration: 2.0 };
    let action = agent.act(&net, &request).unwrap().expect("plenty of spectrum is left");

    assert!(net.is_assignable(&action.path, action.slot_index, action.n_slot));
}

#[test]
fn episode_statistics_stay_consistent() {
    let net = nsf();
    let cache = RoutingCache::build(&net, 3);
    let requester = UniformRequester::new(net.n_nodes(), 25.0, 4.0, 7);
    let mut simulation = Simulation::new(net, requester);
    let mut agent = KspAgent::new(cache, AssignmentPolicy::FirstFit, 0, 7);

    let stats = simulation.run(&mut agent, 300).unwrap();

    assert_eq!(stats.n_requests, 300);
    assert!(stats.n_blocked <= stats.n_requests);
    assert!((0.0..=1.0).contains(&stats.blocking_probability()));
    assert!((0.0..=1.0).contains(&stats.mean_util));
}

#[test]
fn reset_restores_the_identical_starting_state() {
    let net = nsf();
    let requester = UniformRequester::new(net.n_nodes(), 10.0, 1.0, 3);
    let mut simulation = Simulation::new(net, requester);

    let first = simulation.reset();
    let snapshot_once = simulation.net().snapshot().unwrap();

    let again = simulation.reset();
    let snapshot_twice = simulation.net().snapshot().unwrap();

    assert_eq!(first, again, "rewound requester must replay the first request");
    assert_eq!(snapshot_once, snapshot_twice);
    assert_eq!(simulation.net().resource_util(), 0.0);
}

#[test]
fn run_with_random_policy_is_reproducible() {
    let build = || {
        let net = nsf();
        let cache = RoutingCache::build(&net, 3);
        let requester = UniformRequester::new(net.n_nodes(), 25.0, 4.0, 11);
        (Simulation::new(net, requester), KspAgent::new(cache, AssignmentPolicy::Random, 0, 11))
    };

    let (mut sim_a, mut agent_a) = build();
    let (mut sim_b, mut agent_b) = build();

    let stats_a = sim_a.run(&mut agent_a, 200).unwrap();
    let stats_b = sim_b.run(&mut agent_b, 200).unwrap();

    assert_eq!(stats_a, stats_b, "seeded randomness must make whole runs repeatable");
}
