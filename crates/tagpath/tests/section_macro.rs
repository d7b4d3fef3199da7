// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::float_cmp)] // Test assertions with constants

//! End-to-end: `#[section]` registration, typed paths, encode, compile.

mod common;

use common::{
    setup, ButtonsSection, ButtonsSectionPath, JobsSectionPath, LabelProvider,
    LabelProviderPath, TechnologiesSectionPath, UiSectionPath,
};
use tagpath::{Label, LabelConsumer, LabelEncoder, LabelError, Path, SectionKey, Value};

fn root() -> Path<LabelProvider> {
    Path::root()
}

#[test]
fn test_generated_registration() {
    let (registry, _compiler) = setup();
    // j, t, ui + dev, qa, pm + c# + btn + ok, save
    assert_eq!(registry.len(), 10);

    let save = registry
        .resolve(SectionKey::of::<ButtonsSection>(), "save")
        .expect("save registered");
    let parameters: Vec<_> = save
        .parameters()
        .iter()
        .map(|p| (p.name, p.tag, p.kind.name()))
        .collect();
    assert_eq!(
        parameters,
        vec![
            ("item", "item", "string"),
            ("count", "n", "int"),
            ("ratio", "ratio", "float"),
        ]
    );
}

#[test]
fn test_scenario_plain_value() {
    let (registry, compiler) = setup();
    let label = LabelEncoder::new(&registry)
        .encode(&root().jobs().qa())
        .unwrap()
        .unwrap();
    assert_eq!(label.identifier(), "j_qa");
    assert!(label.parameters().is_empty());

    let consumer = compiler.build(&label).unwrap().unwrap();
    assert_eq!(
        consumer.get_label(&LabelProvider::default()).unwrap(),
        "Quality Assurance Engineer"
    );
}

#[test]
fn test_scenario_call() {
    let (registry, compiler) = setup();
    let label = LabelEncoder::new(&registry)
        .encode(&root().jobs().dev("Senior"))
        .unwrap()
        .unwrap();
    assert_eq!(label.identifier(), "j_dev");
    assert_eq!(label.parameter("xp"), Some(&Value::from("Senior")));

    let consumer = compiler.build(&label).unwrap().unwrap();
    assert_eq!(
        consumer.get_label(&LabelProvider::default()).unwrap(),
        "Senior Software Developer"
    );
}

#[test]
fn test_scenario_flags() {
    let (registry, compiler) = setup();
    let label = LabelEncoder::new(&registry)
        .encode(&root().technologies().csharp(true, true, false))
        .unwrap()
        .unwrap();
    assert_eq!(label.identifier(), "t_c#");
    let keys: Vec<_> = label.parameters().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["asp", "ef", "blazor"]);
    assert_eq!(label.parameter("blazor"), Some(&Value::Bool(false)));

    let consumer = compiler.build(&label).unwrap().unwrap();
    assert_eq!(
        consumer.get_label(&LabelProvider::default()).unwrap(),
        "C#; ASP.NET Core; EF Core"
    );
}

#[test]
fn test_scenario_missing_parameter() {
    let (_registry, compiler) = setup();
    let consumer = compiler.build(&Label::new("j_dev")).unwrap().unwrap();
    assert_eq!(
        consumer.get_label(&LabelProvider::default()).unwrap(),
        " Software Developer"
    );
}

#[test]
fn test_nested_sections() {
    let (registry, compiler) = setup();
    let encoder = LabelEncoder::new(&registry);

    let ok = encoder
        .encode(&root().ui().buttons().ok())
        .unwrap()
        .unwrap();
    assert_eq!(ok, Label::new("ui_btn_ok"));

    let save = encoder
        .encode(&root().ui().buttons().save("file", 3u32, 0.5))
        .unwrap()
        .unwrap();
    assert_eq!(save.identifier(), "ui_btn_save");

    let provider = LabelProvider::default();
    let render = |label: &Label| {
        compiler
            .build(label)
            .unwrap()
            .unwrap()
            .get_label(&provider)
            .unwrap()
    };
    assert_eq!(render(&ok), "OK");
    assert_eq!(render(&save), "Save 3 file (0.5)");
    assert_eq!(
        render(&Label::new("ui_btn_save").with_parameter("item", "draft")),
        "Save 0 draft (0.0)"
    );
}

#[test]
fn test_unknown_identifier() {
    let (_registry, compiler) = setup();
    let err = compiler.build(&Label::new("zz_unknown")).unwrap_err();
    assert!(matches!(err, LabelError::UnknownSegment { .. }));
    assert!(err.to_string().contains("zz_unknown"));
}

#[test]
fn test_consumer_trait_object() {
    let (_registry, compiler) = setup();
    let consumer: Box<dyn LabelConsumer<LabelProvider>> =
        Box::new(compiler.build(&Label::new("j_pm")).unwrap().unwrap());
    assert_eq!(
        consumer.get_label(&LabelProvider::default()).unwrap(),
        "Project Manager"
    );
}
