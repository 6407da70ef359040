//! Literature topology tables: node coordinates, undirected edge lists and,
//! where published, per-edge physical lengths. Pure data.

use crate::network::NodeId;

// U.S. National Science Foundation Network (NSFNET), 14 nodes.
pub(super) const NSF_WEIGHTED_EDGES: &[(NodeId, NodeId, f64)] = &[
    (0, 1, 1050.0),
    (0, 2, 1500.0),
    (0, 7, 2400.0),
    (1, 2, 600.0),
    (1, 3, 750.0),
    (2, 5, 1800.0),
    (3, 4, 600.0),
    (3, 10, 1950.0),
    (4, 5, 1200.0),
    (4, 6, 600.0),
    (5, 9, 1050.0),
    (5, 13, 1800.0),
    (6, 7, 750.0),
    (6, 9, 1350.0),
    (7, 8, 750.0),
    (8, 9, 750.0),
    (8, 11, 300.0),
    (8, 12, 300.0),
    (10, 11, 600.0),
    (10, 12, 750.0),
    (11, 13, 300.0),
    (12, 13, 150.0),
];

pub(super) const NSF_POSITIONS: &[(f64, f64)] = &[
    (1.00, 0.90),
    (0.70, 0.70),
    (1.20, 0.50),
    (1.50, 0.74),
    (2.10, 0.66),
    (3.10, 0.45),
    (2.95, 0.70),
    (3.70, 0.75),
    (4.60, 0.80),
    (5.80, 0.50),
    (5.40, 0.90),
    (6.50, 0.90),
    (7.30, 0.80),
    (6.50, 0.60),
];

// U.K. Joint Academic Network (JANET), 7 nodes. No published lengths.
pub(super) const JANET_EDGES: &[(NodeId, NodeId)] =
    &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 4), (3, 4), (3, 5), (4, 6), (5, 6)];

pub(super) const JANET_POSITIONS: &[(f64, f64)] =
    &[(1.50, 4.00), (1.00, 3.00), (2.00, 3.00), (1.00, 2.00), (2.00, 2.00), (1.00, 1.00), (2.00, 1.00)];

// 3x3 lattice, 9 nodes. The literature table carries zero-length edges.
pub(super) const LATTICE3X3_WEIGHTED_EDGES: &[(NodeId, NodeId, f64)] = &[
    (0, 1, 0.0),
    (0, 3, 0.0),
    (1, 2, 0.0),
    (1, 4, 0.0),
    (2, 5, 0.0),
    (3, 4, 0.0),
    (3, 6, 0.0),
    (4, 5, 0.0),
    (4, 7, 0.0),
    (5, 8, 0.0),
    (6, 7, 0.0),
    (7, 8, 0.0),
];

pub(super) const LATTICE3X3_POSITIONS: &[(f64, f64)] = &[
    (0.0, 0.0),
    (100.0, 0.0),
    (200.0, 0.0),
    (0.0, 100.0),
    (100.0, 100.0),
    (200.0, 100.0),
    (0.0, 200.0),
    (100.0, 200.0),
    (200.0, 200.0),
];

// Rede Nacional de Pesquisa (Rede Ipe / RNP), 28 nodes. No published lengths.
pub(super) const RNP_EDGES: &[(NodeId, NodeId)] = &[
    (0, 1),
    (1, 3),
    (1, 4),
    (2, 4),
    (3, 4),
    (3, 7),
    (3, 17),
    (3, 19),
    (3, 25),
    (4, 6),
    (4, 12),
    (5, 25),
    (6, 7),
    (7, 8),
    (7, 11),
    (7, 18),
    (7, 19),
    (8, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (11, 13),
    (11, 15),
    (13, 14),
    (14, 15),
    (15, 16),
    (15, 19),
    (16, 17),
    (17, 18),
    (18, 19),
    (18, 20),
    (18, 22),
    (20, 21),
    (21, 22),
    (22, 23),
    (23, 24),
    (24, 25),
    (24, 26),
    (26, 27),
];

pub(super) const RNP_POSITIONS: &[(f64, f64)] = &[
    (5.00, 3.25),
    (5.50, 3.75),
    (8.25, 3.75),
    (4.00, 5.00),
    (9.00, 3.00),
    (3.00, 3.00),
    (9.00, 4.00),
    (9.50, 5.00),
    (10.50, 5.00),
    (10.50, 3.00),
    (10.50, 1.00),
    (9.50, 1.00),
    (9.00, 2.00),
    (8.00, 2.00),
    (7.00, 2.00),
    (6.00, 2.00),
    (6.00, 1.00),
    (4.00, 1.00),
    (2.00, 1.00),
    (6.00, 5.50),
    (1.00, 1.00),
    (1.00, 2.00),
    (2.00, 2.00),
    (2.00, 4.00),
    (2.00, 5.00),
    (3.00, 5.00),
    (1.00, 5.00),
    (1.00, 4.00),
];
