use std::collections::{BTreeMap, BTreeSet, VecDeque};

use ndarray::{array, Array2};
use voronizer_rust::{
    cluster, voronoi, ClusterConfig, GrowError, GrowthConfig, LabelGrid, RegionLabeler, NOISE,
};

/// Deterministic pseudo-random foreground pattern.
fn pattern(height: usize, width: usize, seed: u64) -> Array2<u8> {
    let mut state = seed;
    Array2::from_shape_fn((height, width), |_| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        if (state >> 33) % 3 == 0 { 255 } else { 0 }
    })
}

/// Reference 4-connected components via plain BFS.
fn components(mask: &Array2<u8>) -> Vec<Vec<(usize, usize)>> {
    let (height, width) = mask.dim();
    let mut seen = Array2::from_elem((height, width), false);
    let mut out = Vec::new();
    for ((r, c), &v) in mask.indexed_iter() {
        if v == 0 || seen[[r, c]] {
            continue;
        }
        let mut cells = Vec::new();
        let mut queue = VecDeque::from([(r, c)]);
        seen[[r, c]] = true;
        while let Some((y, x)) = queue.pop_front() {
            cells.push((y, x));
            let candidates = [
                (y.wrapping_sub(1), x),
                (y + 1, x),
                (y, x.wrapping_sub(1)),
                (y, x + 1),
            ];
            for (ny, nx) in candidates {
                if ny < height && nx < width && mask[[ny, nx]] > 0 && !seen[[ny, nx]] {
                    seen[[ny, nx]] = true;
                    queue.push_back((ny, nx));
                }
            }
        }
        out.push(cells);
    }
    out
}

#[test]
fn test_threshold_law_matches_reference_components() {
    for seed in 1..6 {
        let mask = pattern(37, 29, seed);
        let result = cluster(mask.view(), 5).unwrap();
        let mut seen_labels = BTreeSet::new();

        for cells in components(&mask) {
            let labels: BTreeSet<i32> = cells.iter().map(|&(r, c)| result.labels[[r, c]]).collect();
            assert_eq!(labels.len(), 1, "component split across labels");
            let label = *labels.iter().next().unwrap();
            if cells.len() < 5 {
                assert_eq!(label, NOISE);
            } else {
                assert!(label > 0);
                assert!(seen_labels.insert(label), "label {label} reused");
            }
        }
        assert_eq!(seen_labels.len(), result.components);
    }
}

#[test]
fn test_cluster_is_deterministic() {
    let mask = pattern(40, 40, 9);
    let a = cluster(mask.view(), 3).unwrap();
    let b = cluster(mask.view(), 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_cluster_then_voronoi_covers_grid() {
    let mask = pattern(32, 48, 4);
    let labeler = RegionLabeler::default();
    let clusters = labeler
        .cluster(mask.view(), &ClusterConfig::new(3).unwrap())
        .unwrap();
    assert!(clusters.components > 0);

    let cells = labeler.voronoi(clusters.seeds().view()).unwrap();
    assert!(cells.labels.iter().all(|&l| l > 0));
    assert!(cells.waves <= 32 + 48);

    // Every kept component keeps its own label after propagation.
    for ((r, c), &label) in clusters.labels.indexed_iter() {
        if label > 0 {
            assert_eq!(cells.labels[[r, c]], label);
        }
    }
}

#[test]
fn test_voronoi_nearest_seed_on_a_line() {
    let seeds = array![[3, 0, 0, 0, 0, 0, 0, 0, 0, 8]];
    let result = voronoi(seeds.view()).unwrap();
    assert_eq!(result.labels, array![[3, 3, 3, 3, 3, 8, 8, 8, 8, 8]]);
}

#[test]
fn test_parallel_labeler_matches_default() {
    let mask = pattern(90, 70, 2);
    let sequential = RegionLabeler::new(GrowthConfig::default().sequential());
    let parallel = RegionLabeler::new(GrowthConfig::default().with_parallel_min_wave(1));

    let seeds = sequential
        .cluster(mask.view(), &ClusterConfig::new(2).unwrap())
        .unwrap()
        .seeds();
    let a = sequential.voronoi(seeds.view()).unwrap();
    let b = parallel.voronoi(seeds.view()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_grid_from_rows_shape_errors() {
    let err = LabelGrid::from_rows(&[vec![1, 0, 0], vec![0, 0]]).unwrap_err();
    assert!(matches!(err, GrowError::InvalidGridShape { .. }));

    let grid = LabelGrid::from_rows(&[vec![0, 2], vec![0, 0]]).unwrap();
    let result = RegionLabeler::default().voronoi_grid(grid).unwrap();
    assert!(result.labels.iter().all(|&l| l == 2));

    let sizes: BTreeMap<i32, usize> = result.groups.iter().map(|(&k, v)| (k, v.len())).collect();
    assert_eq!(sizes, BTreeMap::from([(2, 4)]));
}
