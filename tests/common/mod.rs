#![allow(dead_code)]

use transom::model::{ModelGraph, ObjectHandle, SourceObject, SourceValue};

pub fn constant_schedule(name: &str, value: f64) -> SourceObject {
    SourceObject::named("Schedule:Constant", name)
        .with_field("Hourly Value", SourceValue::Real(value))
}

pub fn quadratic_curve(name: &str) -> SourceObject {
    SourceObject::named("Curve:Quadratic", name)
        .with_field("Coefficient1 Constant", SourceValue::Real(0.8))
        .with_field("Coefficient2 x", SourceValue::Real(0.2))
        .with_field("Coefficient3 x**2", SourceValue::Real(0.0))
}

pub fn biquadratic_curve(name: &str) -> SourceObject {
    SourceObject::named("Curve:Biquadratic", name)
        .with_field("Coefficient1 Constant", SourceValue::Real(1.0))
        .with_field("Coefficient2 x", SourceValue::Real(0.1))
        .with_field("Coefficient3 x**2", SourceValue::Real(0.01))
        .with_field("Coefficient4 y", SourceValue::Real(0.05))
        .with_field("Coefficient5 y**2", SourceValue::Real(0.002))
        .with_field("Coefficient6 x*y", SourceValue::Real(0.0))
}

pub fn cooling_coil(
    name: &str,
    schedule: Option<ObjectHandle>,
    temperature_curve: Option<ObjectHandle>,
) -> SourceObject {
    let mut coil = SourceObject::named("Coil:Cooling:DX:VariableRefrigerantFlow", name)
        .with_field("Gross Rated Total Cooling Capacity", SourceValue::Autosize)
        .with_field("Gross Rated Sensible Heat Ratio", SourceValue::Real(0.75));
    if let Some(schedule) = schedule {
        coil.set_field("Availability Schedule Name", SourceValue::Reference(schedule));
    }
    if let Some(curve) = temperature_curve {
        coil.set_field(
            "Cooling Capacity Ratio Modifier Function of Temperature Curve Name",
            SourceValue::Reference(curve),
        );
    }
    coil
}

pub fn terminal_unit(
    name: &str,
    schedule: Option<ObjectHandle>,
    cooling_coil: Option<ObjectHandle>,
) -> SourceObject {
    let mut tu = SourceObject::named("ZoneHVAC:TerminalUnit:VariableRefrigerantFlow", name)
        .with_field(
            "Supply Air Flow Rate During Cooling Operation",
            SourceValue::Autosize,
        );
    if let Some(schedule) = schedule {
        tu.set_field(
            "Terminal Unit Availability Schedule",
            SourceValue::Reference(schedule),
        );
    }
    if let Some(coil) = cooling_coil {
        tu.set_field("Cooling Coil Object Name", SourceValue::Reference(coil));
    }
    tu
}

pub fn vrf_system(name: &str, terminals: Vec<ObjectHandle>) -> SourceObject {
    SourceObject::named("AirConditioner:VariableRefrigerantFlow", name)
        .with_field("Gross Rated Cooling COP", SourceValue::Real(3.3))
        .with_field("Terminals", SourceValue::ReferenceList(terminals))
}

/// A complete VRF installation: shared schedule, curves, coils, two
/// terminals, and the condensing unit that lists them.
pub fn vrf_installation() -> ModelGraph {
    let mut graph = ModelGraph::new();

    let always_on = graph.add(constant_schedule("Always On", 1.0));
    let cap_ft = graph.add(biquadratic_curve("VRF Cool Cap FT"));
    let coil_a = graph.add(cooling_coil("TU A Cooling Coil", Some(always_on), Some(cap_ft)));
    let coil_b = graph.add(cooling_coil("TU B Cooling Coil", Some(always_on), Some(cap_ft)));
    let tu_a = graph.add(terminal_unit("TU A", Some(always_on), Some(coil_a)));
    let tu_b = graph.add(terminal_unit("TU B", Some(always_on), Some(coil_b)));
    graph.add(vrf_system("VRF Outdoor Unit", vec![tu_a, tu_b]));

    graph
}

/// A mutually-referencing water-to-water heat pump pair.
pub fn companion_heat_pumps() -> (ModelGraph, ObjectHandle, ObjectHandle) {
    let mut graph = ModelGraph::new();

    let mut cooling = SourceObject::named(
        "HeatPump:WaterToWater:EquationFit:Cooling",
        "Ground Loop HP Cooling",
    )
    .with_field("Reference Cooling Capacity", SourceValue::Autosize)
    .with_field("Reference Coefficient of Performance", SourceValue::Real(7.5));
    let mut heating = SourceObject::named(
        "HeatPump:WaterToWater:EquationFit:Heating",
        "Ground Loop HP Heating",
    )
    .with_field("Reference Heating Capacity", SourceValue::Autosize)
    .with_field("Reference Coefficient of Performance", SourceValue::Real(3.5));

    let cooling_handle = cooling.handle;
    let heating_handle = heating.handle;
    cooling.set_field(
        "Companion Heating Heat Pump Name",
        SourceValue::Reference(heating_handle),
    );
    heating.set_field(
        "Companion Cooling Heat Pump Name",
        SourceValue::Reference(cooling_handle),
    );

    graph.add(cooling);
    graph.add(heating);
    (graph, cooling_handle, heating_handle)
}
