use plasma_energy_histogram::domain::ELECTRON_MASS_EV;
use plasma_energy_histogram::{EnergyHistogramEngine, UnitSystem};

const SETTINGS: &str = r#"{
    "minEnergyEv": 0.0,
    "maxEnergyEv": 64.0,
    "workersPerGroup": 2,
    "supercellSize": [4, 4, 4],
    "averagingRegionCells": [8, 4, 4]
}"#;

#[test]
fn engine_smoke_compute() {
    let mut engine = EnergyHistogramEngine::new(SETTINGS, 4, 1, 1, 1, 0, 0, 8).unwrap();
    engine.enable_perf_metrics(true);
    assert_eq!(engine.region_count(), 2);
    assert_eq!(engine.num_bins(), 64);

    let p = UnitSystem::natural_ev().momentum_for_kinetic_energy(10.5, ELECTRON_MASS_EV);
    // supercell x=1 is the first core supercell (guard band of 1)
    assert!(engine.add_particle(1, 0, 0, p, 0.0, 0.0, 1.0));
    assert!(engine.add_particle(2, 0, 0, 2.0 * p, 0.0, 0.0, 2.0));
    assert!(!engine.add_particle(9, 0, 0, p, 0.0, 0.0, 1.0));

    engine.compute().unwrap();
    let h = engine.region_histogram(0);
    assert_eq!(h.len(), 64);
    assert!((h[10] - 3.0).abs() < 1e-9);
    assert!(engine.region_histogram(1).iter().all(|&v| v == 0.0));
    assert!(engine.region_histogram(7).is_empty());

    let edges = engine.bin_edges_ev();
    assert_eq!(edges.len(), 65);
    assert_eq!(edges[64], 64.0);

    let stats = engine.get_launch_stats();
    assert_eq!(stats.groups(), 4);
    assert_eq!(stats.particles_binned(), 2);

    engine.clear_histograms();
    engine.clear_particles();
    engine.compute().unwrap();
    assert!(engine.region_histogram(0).iter().all(|&v| v == 0.0));
}

#[test]
fn engine_refuses_unphysical_particles() {
    let mut engine = EnergyHistogramEngine::new(SETTINGS, 4, 1, 1, 1, 0, 0, 8).unwrap();
    assert!(!engine.add_particle(1, 0, 0, 0.0, 0.0, 0.0, -2.0));
    assert!(!engine.add_particle(1, 0, 0, 0.0, 0.0, 0.0, 0.0));
    assert!(!engine.add_particle(1, 0, 0, 0.0, 0.0, 0.0, f64::NAN));
    assert!(!engine.add_particle(1, 0, 0, f64::INFINITY, 0.0, 0.0, 1.0));

    engine.compute().unwrap();
    for region in 0..engine.region_count() {
        assert!(engine.region_histogram(region).iter().all(|&v| v == 0.0));
    }
}
