//! Property tests for drag gestures.
//!
//! A placeholder drag must land the dragged region exactly where a chain of
//! adjacent swaps would, and no gesture in either mode may lose a region or
//! break the sum-to-one invariant.

use proptest::prelude::*;
use slat_core::{Orientation, ReorderMode};
use slat_input::{ReorderSettings, ReorderablePane};
use slat_layout::LayoutModel;

const EXTENT: f32 = 1000.0;
const EPS: f64 = 1e-9;

fn fractions_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.05f64..1.0, 1..8)
}

fn pane_with(fractions: &[f64], mode: ReorderMode) -> ReorderablePane {
    let settings = ReorderSettings {
        mode,
        drag_threshold: 0.0,
        ..Default::default()
    };
    let mut pane = ReorderablePane::new(Orientation::Horizontal, settings);
    pane.attach((1..=fractions.len() as u64).collect(), Some(fractions.to_vec()))
        .expect("generated fractions are positive");
    pane.set_container_extent(EXTENT, 100.0);
    pane
}

/// Pixel at the middle of the region at `index`.
fn center_of(model: &LayoutModel, index: usize) -> f32 {
    let start: f64 = model.fractions()[..index].iter().sum();
    let mid = start + model.fractions()[index] / 2.0;
    (mid * f64::from(EXTENT)) as f32
}

/// Walk the region at `from` to `to` one neighbor at a time.
fn adjacent_swaps(model: &mut LayoutModel, from: usize, to: usize) {
    let mut at = from;
    while at < to {
        model.swap(at, at + 1).unwrap();
        at += 1;
    }
    while at > to {
        model.swap(at, at - 1).unwrap();
        at -= 1;
    }
}

proptest! {
    #[test]
    fn placeholder_matches_adjacent_swaps(
        fractions in fractions_strategy(),
        dragged in 0usize..8,
        target in -0.2f64..1.2,
    ) {
        let mut pane = pane_with(&fractions, ReorderMode::PlaceholderInsert);
        prop_assume!(dragged < pane.model().len());
        let region = pane.model().regions()[dragged];
        let original = pane.model().clone();

        let x = center_of(pane.model(), dragged);
        prop_assert!(pane.on_pointer_down(region, x, 50.0));
        let target_x = (target * f64::from(EXTENT)) as f32;
        pane.on_pointer_move(target_x, 50.0);
        pane.on_pointer_up(target_x, 50.0);

        let landed = pane.model().position_of(region).unwrap();
        let mut expected = original.clone();
        adjacent_swaps(&mut expected, dragged, landed);

        prop_assert_eq!(pane.model().regions(), expected.regions());
        prop_assert!(pane.model().is_normalized());
        prop_assert!(expected.is_normalized());

        // Each region keeps its pre-drag size
        for (i, id) in pane.model().regions().iter().enumerate() {
            let before = original.fractions()[original.position_of(*id).unwrap()];
            prop_assert!((pane.model().fractions()[i] - before).abs() < EPS);
        }
    }

    #[test]
    fn direct_swap_keeps_every_region(
        fractions in fractions_strategy(),
        dragged in 0usize..8,
        samples in proptest::collection::vec(-0.2f64..1.2, 1..30),
    ) {
        let mut pane = pane_with(&fractions, ReorderMode::DirectSwap);
        prop_assume!(dragged < pane.model().len());
        let region = pane.model().regions()[dragged];
        let mut sorted = pane.model().regions().to_vec();
        sorted.sort_unstable();

        let x = center_of(pane.model(), dragged);
        pane.on_pointer_down(region, x, 50.0);
        for s in samples {
            pane.on_pointer_move((s * f64::from(EXTENT)) as f32, 50.0);

            let mut now = pane.model().regions().to_vec();
            now.sort_unstable();
            prop_assert_eq!(&now, &sorted);
            prop_assert!(pane.model().is_normalized());
            prop_assert!(pane.model().fractions().iter().all(|f| *f > 0.0));
        }
        pane.on_pointer_up(0.0, 50.0);
        prop_assert!(pane.gesture_state().is_idle());
    }

    #[test]
    fn cancel_always_returns_to_press_state(
        fractions in fractions_strategy(),
        dragged in 0usize..8,
        samples in proptest::collection::vec(-0.2f64..1.2, 1..30),
        placeholder in any::<bool>(),
    ) {
        let mode = if placeholder {
            ReorderMode::PlaceholderInsert
        } else {
            ReorderMode::DirectSwap
        };
        let mut pane = pane_with(&fractions, mode);
        prop_assume!(dragged < pane.model().len());
        let region = pane.model().regions()[dragged];
        let before = pane.model().snapshot();

        pane.on_pointer_down(region, center_of(pane.model(), dragged), 50.0);
        for s in samples {
            pane.on_pointer_move((s * f64::from(EXTENT)) as f32, 50.0);
        }
        pane.cancel();

        prop_assert_eq!(pane.model().regions(), before.regions.as_slice());
        for (a, b) in pane.model().fractions().iter().zip(&before.fractions) {
            prop_assert!((a - b).abs() < EPS);
        }
    }
}
