use rsa_sim::routing::Path;
use rsa_sim::{Error, NetworkState, TopologyKind};

const N_SLOT: usize = 10;

fn nsf() -> NetworkState {
    NetworkState::build(TopologyKind::Nsf, N_SLOT, true).expect("NSF carries published lengths")
}

#[test]
fn assignment_updates_slot_and_time_vectors() {
    // Setup: NSF, 14 nodes, 10 slots per link.
    let mut net = nsf();
    let path = Path::new(vec![0, 1, 3]);

    // Execution
    net.assign(&path, 0, 3, 2.0).expect("empty network must accept the first assignment");

    // Verification: both path links carry the reservation, everything else is free.
    for (a, b) in [(0, 1), (1, 3)] {
        let link = net.link_by_pair(a, b).unwrap();
        let expected_free = [false, false, false, true, true, true, true, true, true, true];
        assert_eq!(link.table.free_bits(), &expected_free[..], "slot vector of link {}-{}", a, b);

        let expected_time = [2.0, 2.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(link.table.remaining_times(), &expected_time[..], "time vector of link {}-{}", a, b);
    }

    for (_, link) in net.links() {
        if [(0, 1), (1, 3)].contains(&(link.source, link.target)) {
            continue;
        }
        assert_eq!(link.table.count_free(), N_SLOT, "link {}-{} must stay untouched", link.source, link.target);
    }
}

#[test]
fn spend_time_releases_only_after_the_full_duration() {
    let mut net = nsf();
    let path = Path::new(vec![0, 1, 3]);
    net.assign(&path, 0, 3, 2.0).unwrap();

    // 2.0 - 1.2 > 0: remaining time shrinks, nothing is freed yet.
    net.spend_time(1.2);
    let link = net.link_by_pair(0, 1).unwrap();
    for i in 0..3 {
        assert!((link.table.remaining_times()[i] - 0.8).abs() < 1e-12, "remaining time after partial spend, slot {}", i);
        assert!(!link.table.free_bits()[i]);
    }
    assert!(!net.is_assignable(&path, 0, 3));

    // Reaching exactly 0 frees the slots in the same update.
    net.spend_time(0.8);
    assert!(net.is_assignable(&path, 0, 3));
    let link = net.link_by_pair(1, 3).unwrap();
    assert_eq!(link.table.count_free(), N_SLOT);
}

#[test]
fn assign_then_is_assignable_reports_the_range_taken() {
    let mut net = nsf();
    let path = Path::new(vec![0, 1, 3]);

    assert!(net.is_assignable(&path, 0, 3));
    net.assign(&path, 0, 3, 5.0).unwrap();
    assert!(!net.is_assignable(&path, 0, 3));
    assert!(!net.is_assignable(&path, 2, 2), "overlapping range must be refused");
    assert!(net.is_assignable(&path, 3, 7), "the remaining slots stay assignable");
}

#[test]
fn range_past_the_table_is_a_normal_negative() {
    let net = nsf();
    let path = Path::new(vec![0, 1]);

    assert!(!net.is_assignable(&path, 8, 3));
    assert!(!net.is_assignable(&path, 0, N_SLOT + 1));
    assert!(net.is_assignable(&path, 0, N_SLOT));
}

#[test]
fn conflicting_assignment_fails_without_touching_state() {
    let mut net = nsf();

    // Occupy the middle link of the longer path first.
    net.assign(&Path::new(vec![1, 3]), 0, 2, 3.0).unwrap();

    // The two-link path now conflicts on 1-3; 0-1 must stay fully free.
    let err = net.assign(&Path::new(vec![0, 1, 3]), 0, 2, 3.0).unwrap_err();
    assert!(matches!(err, Error::Conflict { source: 1, target: 3, start: 0, end: 2 }), "unexpected error: {:?}", err);

    let untouched = net.link_by_pair(0, 1).unwrap();
    assert_eq!(untouched.table.count_free(), N_SLOT, "a refused assignment must not leave partial reservations");
}

#[test]
fn resource_util_tracks_occupied_cells() {
    let mut net = nsf();
    assert_eq!(net.resource_util(), 0.0);

    net.assign(&Path::new(vec![0, 1, 3]), 0, 3, 2.0).unwrap();

    // 2 links x 3 slots out of 22 links x 10 slots.
    let expected = 6.0 / 220.0;
    assert!((net.resource_util() - expected).abs() < 1e-12);

    net.spend_time(2.0);
    assert_eq!(net.resource_util(), 0.0);
}

#[test]
fn resource_util_stays_in_unit_interval() {
    let mut net = nsf();

    for start in [0, 3, 6] {
        let _ = net.assign(&Path::new(vec![0, 1, 3]), start, 3, 1.0);
        let util = net.resource_util();
        assert!((0.0..=1.0).contains(&util), "utilization {} left [0, 1]", util);
        net.spend_time(0.4);
    }
}

#[test]
fn init_is_idempotent() {
    let mut net = nsf();
    net.assign(&Path::new(vec![0, 1, 3]), 0, 3, 2.0).unwrap();

    net.init();
    let once = net.snapshot().unwrap();
    net.init();
    let twice = net.snapshot().unwrap();

    assert_eq!(once, twice);
    assert_eq!(net.resource_util(), 0.0);
}

#[test]
fn snapshot_round_trip_reproduces_every_link() {
    let mut net = nsf();
    net.assign(&Path::new(vec![0, 1, 3]), 0, 3, 2.0).unwrap();
    net.assign(&Path::new(vec![8, 11, 13]), 4, 2, 7.5).unwrap();
    net.spend_time(0.5);

    let restored = NetworkState::restore(&net.snapshot().unwrap()).unwrap();

    assert_eq!(restored.n_nodes(), net.n_nodes());
    assert_eq!(restored.n_slot(), net.n_slot());
    for (id, link) in net.links() {
        let twin = restored.link(id);
        assert_eq!((twin.source, twin.target, twin.weight), (link.source, link.target, link.weight));
        assert_eq!(twin.table, link.table, "occupancy and remaining time of link {}-{}", link.source, link.target);
    }

    // The rebuilt index answers queries like the original.
    assert!(!restored.is_assignable(&Path::new(vec![0, 1, 3]), 0, 3));
    assert!((restored.resource_util() - net.resource_util()).abs() < 1e-12);
}

#[test]
fn weighted_build_needs_published_lengths() {
    let err = NetworkState::build(TopologyKind::Janet, N_SLOT, true).unwrap_err();
    assert!(matches!(err, Error::WeightsUnavailable(_)));

    assert!(NetworkState::build(TopologyKind::Janet, N_SLOT, false).is_ok());
}

#[test]
fn distance_sums_link_lengths() {
    let net = nsf();
    let distance = net.distance(&Path::new(vec![0, 1, 3])).unwrap();
    assert!((distance - 1800.0).abs() < 1e-12, "0-1 (1050) plus 1-3 (750)");

    let unweighted = NetworkState::build(TopologyKind::Rnp, N_SLOT, false).unwrap();
    assert!(matches!(unweighted.distance(&Path::new(vec![0, 1])), Err(Error::WeightsUnavailable(_))));
}

#[test]
fn path_slot_is_the_and_over_all_links() {
    let mut net = nsf();
    net.assign(&Path::new(vec![0, 1]), 0, 2, 1.0).unwrap();
    net.assign(&Path::new(vec![1, 3]), 5, 1, 1.0).unwrap();

    let combined = net.path_slot(&Path::new(vec![0, 1, 3]));
    let expected = [false, false, true, true, true, false, true, true, true, true];
    assert_eq!(combined, expected, "a slot is usable end-to-end only if free on every link");
}
