//! Property tests for the layout model.
//!
//! Random operation streams are applied to a model and after every step the
//! fractions must stay positive and sum to one, whether the operation was
//! accepted or rejected.

use proptest::prelude::*;
use slat_layout::{DividerProjector, FractionPolicy, LayoutModel};
use slat_core::Orientation;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
enum Op {
    Insert { index: usize, share: Option<f64> },
    Remove { index: usize },
    Swap { i: usize, j: usize },
    Move { from: usize, to: usize },
    SetFraction { index: usize, value: f64 },
    DragDivider { index: usize, position: f64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..10, proptest::option::of(0.01f64..0.99))
            .prop_map(|(index, share)| Op::Insert { index, share }),
        (0usize..10).prop_map(|index| Op::Remove { index }),
        (0usize..10, 0usize..10).prop_map(|(i, j)| Op::Swap { i, j }),
        (0usize..10, 0usize..10).prop_map(|(from, to)| Op::Move { from, to }),
        (0usize..10, -0.5f64..1.5).prop_map(|(index, value)| Op::SetFraction { index, value }),
        (0usize..10, -0.5f64..1.5).prop_map(|(index, position)| Op::DragDivider { index, position }),
    ]
}

fn fractions_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.05f64..1.0, 1..8)
}

fn model_from(fractions: Vec<f64>) -> LayoutModel {
    let regions = (1..=fractions.len() as u64).collect();
    LayoutModel::with_regions(Orientation::Horizontal, regions, Some(fractions))
        .expect("generated fractions are positive")
}

fn assert_invariants(model: &LayoutModel) {
    assert_eq!(model.regions().len(), model.fractions().len());
    assert!(model.is_normalized(), "fractions drifted: {:?}", model.fractions());
    assert_eq!(model.dividers().len(), model.len().saturating_sub(1));
}

proptest! {
    #[test]
    fn sum_is_one_after_any_operation(
        fractions in fractions_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut model = model_from(fractions);
        let mut next_id = 100;
        assert_invariants(&model);

        for op in ops {
            let before = model.snapshot();
            let result = match op {
                Op::Insert { index, share } => {
                    next_id += 1;
                    let policy = share.map_or(FractionPolicy::EqualShare, FractionPolicy::Exact);
                    model.insert(next_id, index, policy).map(|_| ())
                }
                Op::Remove { index } => model.remove(index).map(|_| ()),
                Op::Swap { i, j } => model.swap(i, j),
                Op::Move { from, to } => model.move_region(from, to),
                Op::SetFraction { index, value } => model.set_fraction(index, value),
                Op::DragDivider { index, position } => {
                    model.drag_divider(index, position, 0.01).map(|_| ())
                }
            };
            if result.is_err() {
                prop_assert_eq!(model.snapshot(), before);
            }
            assert_invariants(&model);
        }
    }

    #[test]
    fn dividers_round_trip(fractions in fractions_strategy()) {
        let model = model_from(fractions);
        let dividers = DividerProjector::fractions_to_dividers(model.fractions());
        prop_assert!(DividerProjector::is_strictly_increasing(&dividers));
        let back = DividerProjector::dividers_to_fractions(&dividers, 1.0).unwrap();
        prop_assert_eq!(back.len(), model.len());
        for (a, b) in back.iter().zip(model.fractions()) {
            prop_assert!((a - b).abs() < EPS);
        }
    }

    #[test]
    fn swap_twice_restores_order(fractions in fractions_strategy(), i in 0usize..8, j in 0usize..8) {
        let mut model = model_from(fractions);
        prop_assume!(i < model.len() && j < model.len());
        let order = model.regions().to_vec();

        if model.swap(i, j).is_ok() {
            model.swap(i, j).unwrap();
        }
        prop_assert_eq!(model.regions(), order.as_slice());
    }

    #[test]
    fn adjacent_swap_keeps_each_region_size(fractions in fractions_strategy(), i in 0usize..8) {
        let mut model = model_from(fractions);
        prop_assume!(i + 1 < model.len());
        let a = model.fractions()[i];
        let b = model.fractions()[i + 1];

        model.swap(i, i + 1).unwrap();
        prop_assert!((model.fractions()[i] - b).abs() < EPS);
        prop_assert!((model.fractions()[i + 1] - a).abs() < EPS);
    }
}
