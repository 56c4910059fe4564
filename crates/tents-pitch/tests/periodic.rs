//! Integration test: pitching on periodic meshes.
//!
//! Every image of a periodic master vertex gets its own tent; the images'
//! tents share times, level, and dependencies and list each other as twins.

use tents_mesh::WaveSpeedField;
use tents_pitch::verify::{check_all, check_periodic_twins};
use tents_pitch::{PitchConfig, PitchingMethod, TentPitchedSlab};
use tents_test_utils::{periodic_line, periodic_square};

#[test]
fn periodic_line_keeps_end_times_equal() {
    let mut slab = TentPitchedSlab::new(periodic_line(6, 0.5), PitchConfig::default()).unwrap();
    slab.pitch_tents(0.8, &WaveSpeedField::Constant(1.0)).unwrap();
    assert_eq!(check_all(&slab), Ok(()));
    let top = slab.front_top();
    assert_eq!(top[0], top[6]);
    let twinned = slab
        .tents()
        .iter()
        .filter(|t| !t.periodic_twins().is_empty())
        .count();
    // Tents at vertices 0 and 6 always come in pairs.
    assert!(twinned >= 2 && twinned % 2 == 0);
}

#[test]
fn periodic_square_corner_has_four_twins() {
    for method in [PitchingMethod::VolumeGradient, PitchingMethod::EdgeGradient] {
        let mut slab =
            TentPitchedSlab::new(periodic_square(3), PitchConfig::with_method(method)).unwrap();
        slab.pitch_tents(0.2, &WaveSpeedField::Constant(1.0)).unwrap();
        assert_eq!(check_all(&slab), Ok(()), "{method}");
        // The corners are the four images of master 0.
        let corner = slab
            .tents()
            .iter()
            .find(|t| t.vertex().0 == 0)
            .unwrap();
        assert_eq!(corner.periodic_twins().len(), 3);
    }
}

#[test]
fn periodic_resume_preserves_consistency() {
    let graph = std::sync::Arc::new(periodic_square(2));
    let speeds = WaveSpeedField::Constant(1.0);
    let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
    slab.pitch_tents(0.25, &speeds).unwrap();
    let bottom = slab.front_top().to_vec();
    slab.pitch_tents_from(&bottom, 0.25, &speeds).unwrap();
    assert_eq!(check_periodic_twins(&slab), Ok(()));
    assert!(slab.front_top().iter().all(|&t| t == 0.5));
}
