#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use transom::model::{ModelGraph, SourceObject, SourceValue};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// The tri-state a generated numeric field can take.
#[derive(Clone, Debug)]
pub enum GenNumeric {
    Explicit(f64),
    Autosized,
    Unset,
}

fn arb_numeric() -> impl Strategy<Value = GenNumeric> {
    prop_oneof![
        (0.1f64..5_000.0).prop_map(GenNumeric::Explicit),
        Just(GenNumeric::Autosized),
        Just(GenNumeric::Unset),
    ]
}

/// One generated coil: which schedule/curve it references (by index) and its
/// capacity tri-state.
#[derive(Clone, Debug)]
pub struct GenCoil {
    pub schedule: Option<prop::sample::Index>,
    pub curve: Option<prop::sample::Index>,
    pub capacity: GenNumeric,
    pub sensible_heat_ratio: GenNumeric,
}

fn arb_coil() -> impl Strategy<Value = GenCoil> {
    (
        prop::option::of(any::<prop::sample::Index>()),
        prop::option::of(any::<prop::sample::Index>()),
        arb_numeric(),
        arb_numeric(),
    )
        .prop_map(|(schedule, curve, capacity, sensible_heat_ratio)| GenCoil {
            schedule,
            curve,
            capacity,
            sensible_heat_ratio,
        })
}

/// A random model graph: schedules and curves shared by a random set of
/// coils. Always structurally valid; shared references are the point.
pub fn arb_model(
    max_schedules: usize,
    max_curves: usize,
    max_coils: usize,
) -> impl Strategy<Value = ModelGraph> {
    (
        prop::collection::vec(0.0f64..100.0, 1..=max_schedules),
        prop::collection::vec(-2.0f64..2.0, 1..=max_curves),
        prop::collection::vec(arb_coil(), 0..=max_coils),
    )
        .prop_map(|(schedule_values, curve_coefficients, coils)| {
            let mut graph = ModelGraph::new();

            let schedules: Vec<_> = schedule_values
                .iter()
                .enumerate()
                .map(|(i, &value)| {
                    graph.add(
                        SourceObject::named("Schedule:Constant", format!("Schedule {}", i))
                            .with_field("Hourly Value", SourceValue::Real(value)),
                    )
                })
                .collect();

            let curves: Vec<_> = curve_coefficients
                .iter()
                .enumerate()
                .map(|(i, &coefficient)| {
                    graph.add(
                        SourceObject::named("Curve:Biquadratic", format!("Curve {}", i))
                            .with_field("Coefficient1 Constant", SourceValue::Real(coefficient))
                            .with_field("Coefficient2 x", SourceValue::Real(0.1))
                            .with_field("Coefficient3 x**2", SourceValue::Real(0.0))
                            .with_field("Coefficient4 y", SourceValue::Real(0.05))
                            .with_field("Coefficient5 y**2", SourceValue::Real(0.0))
                            .with_field("Coefficient6 x*y", SourceValue::Real(0.0)),
                    )
                })
                .collect();

            for (i, coil) in coils.into_iter().enumerate() {
                let mut object = SourceObject::named(
                    "Coil:Cooling:DX:VariableRefrigerantFlow",
                    format!("Coil {}", i),
                );
                if let Some(index) = coil.schedule {
                    object.set_field(
                        "Availability Schedule Name",
                        SourceValue::Reference(*index.get(&schedules)),
                    );
                }
                if let Some(index) = coil.curve {
                    object.set_field(
                        "Cooling Capacity Ratio Modifier Function of Temperature Curve Name",
                        SourceValue::Reference(*index.get(&curves)),
                    );
                }
                match coil.capacity {
                    GenNumeric::Explicit(value) => object.set_field(
                        "Gross Rated Total Cooling Capacity",
                        SourceValue::Real(value),
                    ),
                    GenNumeric::Autosized => object.set_field(
                        "Gross Rated Total Cooling Capacity",
                        SourceValue::Autosize,
                    ),
                    GenNumeric::Unset => {}
                }
                match coil.sensible_heat_ratio {
                    GenNumeric::Explicit(value) => object.set_field(
                        "Gross Rated Sensible Heat Ratio",
                        SourceValue::Real(value),
                    ),
                    GenNumeric::Autosized => object.set_field(
                        "Gross Rated Sensible Heat Ratio",
                        SourceValue::Autosize,
                    ),
                    GenNumeric::Unset => {}
                }
                graph.add(object);
            }

            graph
        })
}
