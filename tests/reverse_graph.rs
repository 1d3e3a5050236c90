//! Reverse translation and full round-trip properties.

mod common;

use transom::model::NumericInput;
use transom::schema::builtin;
use transom::translate::{ForwardTranslator, ReverseTranslator};
use transom::workspace::{TargetRecord, TargetValue, Workspace};

#[test]
fn autosize_tri_state_round_trips() {
    let registry = builtin();
    let graph = common::vrf_installation();

    let forward = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let coil = forward.workspace.find_by_name("TU A Cooling Coil").unwrap();
    assert_eq!(
        coil.get("Gross Rated Total Cooling Capacity")
            .and_then(|v| v.text()),
        Some("Autosize")
    );

    let reverse = ReverseTranslator::new(&registry)
        .translate(&forward.workspace)
        .unwrap();
    let coil = reverse
        .model
        .objects()
        .find(|o| o.name.as_deref() == Some("TU A Cooling Coil"))
        .unwrap();

    assert!(coil
        .numeric_input("Gross Rated Total Cooling Capacity")
        .is_autosized());
    assert_eq!(coil.real("Gross Rated Total Cooling Capacity"), None);
    assert_eq!(
        coil.numeric_input("Gross Rated Sensible Heat Ratio"),
        NumericInput::Explicit(0.75)
    );
}

#[test]
fn vrf_installation_round_trips_through_the_workspace() {
    let registry = builtin();
    let graph = common::vrf_installation();

    let forward = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let reverse = ReverseTranslator::new(&registry)
        .translate(&forward.workspace)
        .unwrap();
    assert!(reverse.report.is_clean(), "{}", reverse.report);

    // The terminal list folded back into the condensing unit.
    assert_eq!(reverse.model.len(), graph.len());
    let vrf = reverse
        .model
        .objects()
        .find(|o| o.name.as_deref() == Some("VRF Outdoor Unit"))
        .unwrap();
    let terminals = vrf.reference_list("Terminals").unwrap();
    assert_eq!(terminals.len(), 2);

    let terminal_names: Vec<&str> = terminals
        .iter()
        .filter_map(|&h| reverse.model.get(h))
        .filter_map(|o| o.name.as_deref())
        .collect();
    assert_eq!(terminal_names, ["TU A", "TU B"]);

    // A second forward pass over the rebuilt model reproduces the workspace
    // exactly.
    let second = ForwardTranslator::new(&registry)
        .translate(&reverse.model)
        .unwrap();
    assert_eq!(second.workspace, forward.workspace);
}

#[test]
fn shared_schedule_reverses_to_a_single_object() {
    let registry = builtin();
    let mut workspace = Workspace::new();

    let mut schedule = TargetRecord::new("Schedule:Constant", "Always On");
    schedule.set("Hourly Value", TargetValue::Number(1.0));
    workspace.push(schedule);

    for name in ["Coil A", "Coil B"] {
        let mut coil = TargetRecord::new("Coil:Cooling:DX:VariableRefrigerantFlow", name);
        coil.set(
            "Availability Schedule Name",
            TargetValue::Reference("Always On".into()),
        );
        workspace.push(coil);
    }

    let reverse = ReverseTranslator::new(&registry)
        .translate(&workspace)
        .unwrap();

    let schedules: Vec<_> = reverse
        .model
        .objects()
        .filter(|o| o.object_type == "Schedule:Constant".into())
        .collect();
    assert_eq!(schedules.len(), 1);
    let schedule_handle = schedules[0].handle;

    for coil in reverse
        .model
        .objects()
        .filter(|o| o.object_type == "Coil:Cooling:DX:VariableRefrigerantFlow".into())
    {
        assert_eq!(
            coil.reference("Availability Schedule Name"),
            Some(schedule_handle)
        );
    }
}

#[test]
fn companion_records_reverse_into_a_mutual_pair() {
    let registry = builtin();
    let mut workspace = Workspace::new();

    let mut cooling = TargetRecord::new(
        "HeatPump:WaterToWater:EquationFit:Cooling",
        "GSHP Cooling",
    );
    cooling.set(
        "Companion Heating Heat Pump Name",
        TargetValue::Reference("GSHP Heating".into()),
    );
    workspace.push(cooling);

    let mut heating = TargetRecord::new(
        "HeatPump:WaterToWater:EquationFit:Heating",
        "GSHP Heating",
    );
    heating.set(
        "Companion Cooling Heat Pump Name",
        TargetValue::Reference("GSHP Cooling".into()),
    );
    workspace.push(heating);

    let reverse = ReverseTranslator::new(&registry)
        .translate(&workspace)
        .unwrap();
    assert!(reverse.report.is_clean(), "{}", reverse.report);
    assert_eq!(reverse.model.len(), 2);

    let cooling = reverse
        .model
        .objects()
        .find(|o| o.name.as_deref() == Some("GSHP Cooling"))
        .unwrap();
    let heating = reverse
        .model
        .objects()
        .find(|o| o.name.as_deref() == Some("GSHP Heating"))
        .unwrap();

    assert_eq!(
        cooling.reference("Companion Heating Heat Pump Name"),
        Some(heating.handle)
    );
    assert_eq!(
        heating.reference("Companion Cooling Heat Pump Name"),
        Some(cooling.handle)
    );
}

#[test]
fn companion_cycle_round_trips() {
    let registry = builtin();
    let (graph, _, _) = common::companion_heat_pumps();

    let forward = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let reverse = ReverseTranslator::new(&registry)
        .translate(&forward.workspace)
        .unwrap();
    let second = ForwardTranslator::new(&registry)
        .translate(&reverse.model)
        .unwrap();

    assert_eq!(second.workspace, forward.workspace);
}
