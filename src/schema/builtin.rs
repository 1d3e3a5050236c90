//! Built-in schema registry.
//!
//! A representative slice of the engine dictionary, large enough to exercise
//! every translator behavior: schedules and performance curves shared across
//! equipment, a variable refrigerant flow system with its terminal units and
//! synthesized terminal-unit list, and the companion water-to-water heat pump
//! pair. The CLI and the test suite use this registry when no schema file is
//! supplied.

use super::registry::{
    FieldDescriptor, MemberList, ObjectSchema, ObjectType, Precondition, SchemaRegistry,
};

/// Builds the built-in registry.
pub fn builtin() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    registry.insert(
        ObjectSchema::new("Schedule:Constant")
            .field(FieldDescriptor::alpha("Schedule Type Limits Name"))
            .field(FieldDescriptor::real("Hourly Value").required()),
    );

    registry.insert(
        ObjectSchema::new("Curve:Quadratic")
            .field(FieldDescriptor::real("Coefficient1 Constant").required())
            .field(FieldDescriptor::real("Coefficient2 x").required())
            .field(FieldDescriptor::real("Coefficient3 x**2").required())
            .field(FieldDescriptor::real("Minimum Value of x"))
            .field(FieldDescriptor::real("Maximum Value of x")),
    );

    registry.insert(
        ObjectSchema::new("Curve:Biquadratic")
            .field(FieldDescriptor::real("Coefficient1 Constant").required())
            .field(FieldDescriptor::real("Coefficient2 x").required())
            .field(FieldDescriptor::real("Coefficient3 x**2").required())
            .field(FieldDescriptor::real("Coefficient4 y").required())
            .field(FieldDescriptor::real("Coefficient5 y**2").required())
            .field(FieldDescriptor::real("Coefficient6 x*y").required())
            .field(FieldDescriptor::real("Minimum Value of x"))
            .field(FieldDescriptor::real("Maximum Value of x"))
            .field(FieldDescriptor::real("Minimum Value of y"))
            .field(FieldDescriptor::real("Maximum Value of y")),
    );

    registry.insert(
        ObjectSchema::new("Curve:QuadLinear")
            .field(FieldDescriptor::real("Coefficient1 Constant").required())
            .field(FieldDescriptor::real("Coefficient2 w").required())
            .field(FieldDescriptor::real("Coefficient3 x").required())
            .field(FieldDescriptor::real("Coefficient4 y").required())
            .field(FieldDescriptor::real("Coefficient5 z").required()),
    );

    registry.insert(
        ObjectSchema::new("Coil:Cooling:DX:VariableRefrigerantFlow")
            .field(FieldDescriptor::reference(
                "Availability Schedule Name",
                "Schedules",
            ))
            .field(FieldDescriptor::real("Gross Rated Total Cooling Capacity").autosizable())
            .field(FieldDescriptor::real("Gross Rated Sensible Heat Ratio").autosizable())
            .field(FieldDescriptor::reference(
                "Cooling Capacity Ratio Modifier Function of Temperature Curve Name",
                "BivariateFunctions",
            ))
            .field(FieldDescriptor::reference(
                "Cooling Capacity Modifier Curve Function of Flow Fraction Name",
                "UnivariateFunctions",
            )),
    );

    registry.insert(
        ObjectSchema::new("Coil:Heating:DX:VariableRefrigerantFlow")
            .field(FieldDescriptor::reference(
                "Availability Schedule Name",
                "Schedules",
            ))
            .field(FieldDescriptor::real("Gross Rated Heating Capacity").autosizable())
            .field(FieldDescriptor::reference(
                "Heating Capacity Ratio Modifier Function of Temperature Curve Name",
                "BivariateFunctions",
            ))
            .field(FieldDescriptor::reference(
                "Heating Capacity Modifier Function of Flow Fraction Curve Name",
                "UnivariateFunctions",
            )),
    );

    registry.insert(
        ObjectSchema::new("ZoneHVAC:TerminalUnit:VariableRefrigerantFlow")
            .field(FieldDescriptor::reference(
                "Terminal Unit Availability Schedule",
                "Schedules",
            ))
            .field(
                FieldDescriptor::real("Supply Air Flow Rate During Cooling Operation")
                    .autosizable(),
            )
            .field(
                FieldDescriptor::real("Supply Air Flow Rate During Heating Operation")
                    .autosizable(),
            )
            .field(FieldDescriptor::reference(
                "Cooling Coil Object Name",
                "VRFCoolingCoils",
            ))
            .field(FieldDescriptor::reference(
                "Heating Coil Object Name",
                "VRFHeatingCoils",
            ))
            .field(FieldDescriptor::real("Zone Terminal Unit On Parasitic Electric Energy Use"))
            .field(FieldDescriptor::real("Zone Terminal Unit Off Parasitic Electric Energy Use")),
    );

    registry.insert(
        ObjectSchema::new("ZoneTerminalUnitList")
            .extensible("Zone Terminal Unit Name", "ZoneTerminalUnits"),
    );

    registry.insert(
        ObjectSchema::new("AirConditioner:VariableRefrigerantFlow")
            .field(FieldDescriptor::reference(
                "Availability Schedule Name",
                "Schedules",
            ))
            .field(FieldDescriptor::real("Gross Rated Total Cooling Capacity").autosizable())
            .field(FieldDescriptor::real("Gross Rated Cooling COP"))
            .field(FieldDescriptor::real(
                "Minimum Condenser Inlet Node Temperature in Cooling Mode",
            ))
            .field(FieldDescriptor::real(
                "Maximum Condenser Inlet Node Temperature in Cooling Mode",
            ))
            .field(FieldDescriptor::reference(
                "Cooling Capacity Ratio Modifier Function of Low Temperature Curve Name",
                "BivariateFunctions",
            ))
            .field(FieldDescriptor::reference(
                "Cooling Capacity Ratio Boundary Curve Name",
                "UnivariateFunctions",
            ))
            .field(FieldDescriptor::real("Gross Rated Heating Capacity").autosizable())
            .field(FieldDescriptor::reference(
                "Heating Capacity Ratio Modifier Function of Low Temperature Curve Name",
                "BivariateFunctions",
            ))
            .field(FieldDescriptor::alpha("Zone Terminal Unit List Name").required())
            .field(FieldDescriptor::choice(
                "Master Thermostat Priority Control Type",
                [
                    "LoadPriority",
                    "ZonePriority",
                    "ThermostatOffsetPriority",
                    "MasterThermostatPriority",
                    "Scheduled",
                ],
            ))
            .field(FieldDescriptor::yes_no("Heat Pump Waste Heat Recovery"))
            .field(FieldDescriptor::alpha("Condenser Inlet Node Name"))
            .field(FieldDescriptor::alpha("Condenser Outlet Node Name"))
            .precondition(Precondition::NonEmptyList {
                field: "Terminals".into(),
            })
            .member_list(MemberList {
                list_type: ObjectType::new("ZoneTerminalUnitList"),
                parent_field: "Zone Terminal Unit List Name".into(),
                member_source_field: "Terminals".into(),
                name_suffix: " Terminal List".into(),
            }),
    );

    registry.insert(
        ObjectSchema::new("HeatPump:WaterToWater:EquationFit:Cooling")
            .field(FieldDescriptor::alpha("Source Side Inlet Node Name"))
            .field(FieldDescriptor::alpha("Source Side Outlet Node Name"))
            .field(FieldDescriptor::alpha("Load Side Inlet Node Name"))
            .field(FieldDescriptor::alpha("Load Side Outlet Node Name"))
            .field(FieldDescriptor::real("Reference Load Side Flow Rate").autosizable())
            .field(FieldDescriptor::real("Reference Source Side Flow Rate").autosizable())
            .field(FieldDescriptor::real("Reference Cooling Capacity").autosizable())
            .field(FieldDescriptor::real("Reference Cooling Power Consumption").autosizable())
            .field(FieldDescriptor::reference(
                "Cooling Capacity Curve Name",
                "QuadLinearFunctions",
            ))
            .field(FieldDescriptor::reference(
                "Cooling Compressor Power Curve Name",
                "QuadLinearFunctions",
            ))
            .field(FieldDescriptor::real("Reference Coefficient of Performance"))
            .field(FieldDescriptor::real("Sizing Factor"))
            .field(FieldDescriptor::reference(
                "Companion Heating Heat Pump Name",
                "WaterToWaterHeatPumpsHeating",
            )),
    );

    registry.insert(
        ObjectSchema::new("HeatPump:WaterToWater:EquationFit:Heating")
            .field(FieldDescriptor::alpha("Source Side Inlet Node Name"))
            .field(FieldDescriptor::alpha("Source Side Outlet Node Name"))
            .field(FieldDescriptor::alpha("Load Side Inlet Node Name"))
            .field(FieldDescriptor::alpha("Load Side Outlet Node Name"))
            .field(FieldDescriptor::real("Reference Load Side Flow Rate").autosizable())
            .field(FieldDescriptor::real("Reference Source Side Flow Rate").autosizable())
            .field(FieldDescriptor::real("Reference Heating Capacity").autosizable())
            .field(FieldDescriptor::real("Reference Heating Power Consumption").autosizable())
            .field(FieldDescriptor::reference(
                "Heating Capacity Curve Name",
                "QuadLinearFunctions",
            ))
            .field(FieldDescriptor::reference(
                "Heating Compressor Power Curve Name",
                "QuadLinearFunctions",
            ))
            .field(FieldDescriptor::real("Reference Coefficient of Performance"))
            .field(FieldDescriptor::real("Sizing Factor"))
            .field(FieldDescriptor::reference(
                "Companion Cooling Heat Pump Name",
                "WaterToWaterHeatPumpsCooling",
            )),
    );

    registry.add_reference_group("Schedules", ["Schedule:Constant"]);
    registry.add_reference_group("UnivariateFunctions", ["Curve:Quadratic"]);
    registry.add_reference_group("BivariateFunctions", ["Curve:Biquadratic"]);
    registry.add_reference_group("QuadLinearFunctions", ["Curve:QuadLinear"]);
    registry.add_reference_group(
        "VRFCoolingCoils",
        ["Coil:Cooling:DX:VariableRefrigerantFlow"],
    );
    registry.add_reference_group(
        "VRFHeatingCoils",
        ["Coil:Heating:DX:VariableRefrigerantFlow"],
    );
    registry.add_reference_group(
        "ZoneTerminalUnits",
        ["ZoneHVAC:TerminalUnit:VariableRefrigerantFlow"],
    );
    registry.add_reference_group(
        "WaterToWaterHeatPumpsCooling",
        ["HeatPump:WaterToWater:EquationFit:Cooling"],
    );
    registry.add_reference_group(
        "WaterToWaterHeatPumpsHeating",
        ["HeatPump:WaterToWater:EquationFit:Heating"],
    );

    registry
}
