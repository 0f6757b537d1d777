// Test intent: verifies planner caching behavior including invalid sizes.
use std::sync::Arc;

use ditfft::{Complex64, FftError, FftPlanner, Normalization};

#[test]
fn plan_is_cached_per_size() {
    let mut planner = FftPlanner::<f64>::new();
    assert!(planner.is_empty());
    let a = planner.plan(64).unwrap();
    let b = planner.plan(64).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.twiddles().as_ptr(), b.twiddles().as_ptr());
    planner.plan(8).unwrap();
    assert_eq!(planner.len(), 2);
}

#[test]
fn invalid_sizes_are_not_cached() {
    let mut planner = FftPlanner::<f64>::new();
    assert_eq!(
        planner.plan(12).unwrap_err(),
        FftError::NonPowerOfTwo { size: 12 }
    );
    assert_eq!(
        planner.plan(1).unwrap_err(),
        FftError::SizeTooSmall { size: 1 }
    );
    assert!(planner.is_empty());
}

#[test]
fn shared_handles_see_mode_changes() {
    let mut planner = FftPlanner::<f64>::new();
    let a = planner.plan(4).unwrap();
    a.set_normalization(Normalization::OneOverN);
    let b = planner.plan(4).unwrap();
    assert_eq!(b.normalization(), Normalization::OneOverN);
    let out = b.transform_vec(&[Complex64::new(1.0, 0.0); 4]).unwrap();
    assert_eq!(out[0], Complex64::new(1.0, 0.0));
}

#[test]
fn clear_keeps_outstanding_handles() {
    let mut planner = FftPlanner::<f32>::default();
    let engine = planner.plan(16).unwrap();
    planner.clear();
    assert!(planner.is_empty());
    assert_eq!(engine.size(), 16);
    let fresh = planner.plan(16).unwrap();
    assert!(!Arc::ptr_eq(&engine, &fresh));
}
