//! Forward translation properties: at-most-once emission, dependency
//! ordering, skip semantics, list aggregation, and the recursion bound.

mod common;

use std::collections::HashMap;

use transom::error::TransomError;
use transom::model::{ModelGraph, SourceObject, SourceValue};
use transom::schema::{builtin, FieldDescriptor, ObjectSchema};
use transom::translate::{
    ForwardTranslator, TranslateOptions, TranslationIssueCode, TranslationSeverity,
};
use transom::workspace::{TargetValue, Workspace};

/// Every reference in the workspace must name a record emitted at or before
/// the referencing record's own position.
fn assert_referenced_before_referencer(workspace: &Workspace) {
    let positions: HashMap<&str, usize> = workspace
        .records()
        .iter()
        .enumerate()
        .map(|(pos, record)| (record.name.as_str(), pos))
        .collect();

    for (pos, record) in workspace.records().iter().enumerate() {
        let referenced = record
            .fields
            .values()
            .chain(record.extensions.iter().flat_map(|g| g.values.values()))
            .filter_map(TargetValue::reference_name);
        for name in referenced {
            let target = positions
                .get(name)
                .unwrap_or_else(|| panic!("'{}' references unknown record '{}'", record.name, name));
            assert!(
                *target < pos,
                "'{}' (position {}) references '{}' (position {})",
                record.name,
                pos,
                name,
                target
            );
        }
    }
}

#[test]
fn shared_curve_is_translated_exactly_once() {
    let registry = builtin();
    let mut graph = ModelGraph::new();
    let curve = graph.add(common::biquadratic_curve("Shared Cap FT"));
    for i in 0..3 {
        graph.add(common::cooling_coil(
            &format!("Coil {}", i),
            None,
            Some(curve),
        ));
    }

    let translation = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let workspace = translation.workspace;

    let curves: Vec<_> = workspace
        .records()
        .iter()
        .filter(|r| r.object_type == "Curve:Biquadratic".into())
        .collect();
    assert_eq!(curves.len(), 1);

    // The identity map agrees: one entry per object, and the curve's entry
    // points at the single emitted curve record.
    assert_eq!(translation.identity_map.len(), workspace.len());
    let curve_position = *translation.identity_map.lookup(&curve).unwrap();
    assert_eq!(
        workspace.get(curve_position).map(|r| r.name.as_str()),
        Some("Shared Cap FT")
    );

    for coil in workspace
        .records()
        .iter()
        .filter(|r| r.object_type == "Coil:Cooling:DX:VariableRefrigerantFlow".into())
    {
        assert_eq!(
            coil.get("Cooling Capacity Ratio Modifier Function of Temperature Curve Name")
                .and_then(|v| v.reference_name()),
            Some("Shared Cap FT")
        );
    }
}

#[test]
fn emission_order_is_referenced_before_referencer() {
    let registry = builtin();
    let graph = common::vrf_installation();

    let translation = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    assert!(translation.report.is_clean(), "{}", translation.report);

    // Every object plus the synthesized terminal list.
    assert_eq!(translation.workspace.len(), graph.len() + 1);
    assert_referenced_before_referencer(&translation.workspace);
}

#[test]
fn translation_is_deterministic() {
    let registry = builtin();
    let graph = common::vrf_installation();

    let translator = ForwardTranslator::new(&registry);
    let first = translator.translate(&graph).unwrap();
    let second = translator.translate(&graph).unwrap();
    assert_eq!(first.workspace, second.workspace);
}

#[test]
fn companion_objects_resolve_through_the_placeholder() {
    let registry = builtin();
    let (graph, _, _) = common::companion_heat_pumps();

    let translation = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let workspace = translation.workspace;

    assert_eq!(workspace.len(), 2);
    let cooling = workspace.find_by_name("Ground Loop HP Cooling").unwrap();
    let heating = workspace.find_by_name("Ground Loop HP Heating").unwrap();

    assert_eq!(
        cooling
            .get("Companion Heating Heat Pump Name")
            .and_then(|v| v.reference_name()),
        Some("Ground Loop HP Heating")
    );
    assert_eq!(
        heating
            .get("Companion Cooling Heat Pump Name")
            .and_then(|v| v.reference_name()),
        Some("Ground Loop HP Cooling")
    );
    assert!(translation.report.is_clean(), "{}", translation.report);
}

#[test]
fn skipped_object_is_absent_from_output_and_references_to_it_unset() {
    let mut registry = builtin();
    registry.add_reference_group("VRFSystems", ["AirConditioner:VariableRefrigerantFlow"]);
    registry.insert(
        ObjectSchema::new("ZoneHVAC:EquipmentList").field(FieldDescriptor::reference(
            "Zone Equipment 1 Name",
            "VRFSystems",
        )),
    );

    let mut graph = ModelGraph::new();
    // Zero terminals: the structural precondition fails.
    let vrf = graph.add(common::vrf_system("Empty VRF", vec![]));
    graph.add(
        SourceObject::named("ZoneHVAC:EquipmentList", "Zone 1 Equipment")
            .with_field("Zone Equipment 1 Name", SourceValue::Reference(vrf)),
    );

    let translation = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let workspace = translation.workspace;

    assert!(workspace.find_by_name("Empty VRF").is_none());

    let sibling = workspace.find_by_name("Zone 1 Equipment").unwrap();
    assert!(!sibling.has_field("Zone Equipment 1 Name"));

    let skip_notes: Vec<_> = translation
        .report
        .issues_with_code(TranslationIssueCode::SkippedNoOp)
        .collect();
    assert_eq!(skip_notes.len(), 1);
    assert_eq!(skip_notes[0].severity, TranslationSeverity::Info);
    assert_eq!(
        translation
            .report
            .issues_with_code(TranslationIssueCode::UnresolvableReference)
            .count(),
        1
    );
}

#[test]
fn member_list_names_exactly_the_survivors_in_order() {
    let mut registry = builtin();
    // Make the terminal schema demand an availability schedule so one
    // terminal can fail its required-field pre-scan.
    let mut tu_schema = registry
        .schema_for(&"ZoneHVAC:TerminalUnit:VariableRefrigerantFlow".into())
        .unwrap()
        .clone();
    for field in &mut tu_schema.fields {
        if field.name == "Terminal Unit Availability Schedule" {
            field.required = true;
        }
    }
    registry.insert(tu_schema);

    let mut graph = ModelGraph::new();
    let always_on = graph.add(common::constant_schedule("Always On", 1.0));
    let tu_1 = graph.add(common::terminal_unit("TU 1", Some(always_on), None));
    // No schedule: abandoned by the pre-scan.
    let tu_2 = graph.add(common::terminal_unit("TU 2", None, None));
    let tu_3 = graph.add(common::terminal_unit("TU 3", Some(always_on), None));
    graph.add(common::vrf_system("VRF", vec![tu_1, tu_2, tu_3]));

    let translation = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let workspace = translation.workspace;

    let vrf = workspace.find_by_name("VRF").unwrap();
    assert_eq!(
        vrf.get("Zone Terminal Unit List Name").and_then(|v| v.text()),
        Some("VRF Terminal List")
    );

    let list = workspace.find_by_name("VRF Terminal List").unwrap();
    let members: Vec<&str> = list
        .extensions
        .iter()
        .filter_map(|g| g.get("Zone Terminal Unit Name"))
        .filter_map(|v| v.reference_name())
        .collect();
    assert_eq!(members, ["TU 1", "TU 3"]);

    assert!(workspace.find_by_name("TU 2").is_none());
    assert_eq!(
        translation
            .report
            .issues_with_code(TranslationIssueCode::MissingRequiredField)
            .count(),
        1
    );
    assert_referenced_before_referencer(&workspace);
}

#[test]
fn wrong_type_reference_degrades_only_that_field() {
    let registry = builtin();
    let mut graph = ModelGraph::new();
    let schedule = graph.add(common::constant_schedule("Always On", 1.0));
    // A schedule where a biquadratic curve belongs.
    graph.add(
        common::cooling_coil("Miswired Coil", Some(schedule), None).with_field(
            "Cooling Capacity Ratio Modifier Function of Temperature Curve Name",
            SourceValue::Reference(schedule),
        ),
    );

    let translation = ForwardTranslator::new(&registry).translate(&graph).unwrap();
    let coil = translation.workspace.find_by_name("Miswired Coil").unwrap();

    // The bad field is unset; the rest of the record is intact.
    assert!(
        !coil.has_field("Cooling Capacity Ratio Modifier Function of Temperature Curve Name")
    );
    assert_eq!(
        coil.get("Availability Schedule Name")
            .and_then(|v| v.reference_name()),
        Some("Always On")
    );
    assert_eq!(
        translation
            .report
            .issues_with_code(TranslationIssueCode::UnresolvableReference)
            .count(),
        1
    );
}

#[test]
fn deep_reference_chains_hit_the_recursion_bound() {
    let mut registry = builtin();
    registry.add_reference_group("Ducts", ["Duct"]);
    registry.insert(
        ObjectSchema::new("Duct").field(FieldDescriptor::reference("Next Duct Name", "Ducts")),
    );

    let mut graph = ModelGraph::new();
    let mut ducts = Vec::new();
    for i in 0..10 {
        ducts.push(SourceObject::named("Duct", format!("Duct {}", i)));
    }
    for i in 0..9 {
        let next = ducts[i + 1].handle;
        ducts[i].set_field("Next Duct Name", SourceValue::Reference(next));
    }
    for duct in ducts {
        graph.add(duct);
    }

    let options = TranslateOptions {
        max_depth: 4,
        ..TranslateOptions::default()
    };
    let result = ForwardTranslator::new(&registry)
        .with_options(options)
        .translate(&graph);

    assert!(matches!(
        result,
        Err(TransomError::RecursionLimitExceeded { limit: 4, .. })
    ));
}

#[test]
fn companion_cycle_does_not_consume_the_recursion_bound() {
    let registry = builtin();
    let (graph, _, _) = common::companion_heat_pumps();

    // The placeholder breaks the cycle; two frames are all a pair needs.
    let options = TranslateOptions {
        max_depth: 3,
        ..TranslateOptions::default()
    };
    let translation = ForwardTranslator::new(&registry)
        .with_options(options)
        .translate(&graph)
        .unwrap();
    assert_eq!(translation.workspace.len(), 2);
}
