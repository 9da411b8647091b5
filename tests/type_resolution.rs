use std::sync::Arc;

use gedcom7::{GedcomError, Parser, PayloadKind, Schema, loads};

const V7: &str = "https://gedcom.io/terms/v7/";

#[test]
fn pseudostructures_and_records() {
    let document = loads("0 HEAD\n0 @F1@ FAM\n0 @S1@ SOUR\n0 TRLR\n").unwrap();
    let types: Vec<&str> = document
        .records()
        .iter()
        .map(|record| record.type_id().unwrap())
        .collect();
    assert_eq!(
        types,
        [
            "HEAD pseudostructure".to_owned(),
            format!("{V7}record-FAM"),
            format!("{V7}record-SOUR"),
            "TRLR pseudostructure".to_owned(),
        ]
    );
}

#[test]
fn same_tag_different_parents() {
    let document = loads("0 HEAD\n1 SOUR app\n0 @I1@ INDI\n1 SOUR @S1@\n0 @S1@ SOUR\n").unwrap();
    let records = document.records();
    let header_source = records[0].first_child_with_tag("SOUR").unwrap();
    let citation = records[1].first_child_with_tag("SOUR").unwrap();
    assert_eq!(header_source.type_id().unwrap(), format!("{V7}HEAD-SOUR"));
    assert_eq!(citation.type_id().unwrap(), format!("{V7}SOUR"));
    assert_eq!(records[2].type_id().unwrap(), format!("{V7}record-SOUR"));
}

#[test]
fn unknown_tags_do_not_resolve() {
    let document = loads("0 @X1@ NOPE\n0 @I1@ INDI\n1 GIVN misplaced\n").unwrap();
    let records = document.records();
    assert_eq!(
        records[0].type_id(),
        Err(GedcomError::UnresolvedType {
            tag: "NOPE".into(),
            parent: "the document root".into(),
        })
    );
    let misplaced = records[1].children()[0];
    assert!(matches!(
        misplaced.type_id(),
        Err(GedcomError::UnresolvedType { ref tag, .. }) if tag == "GIVN"
    ));
    // the value cannot be cast without a type
    assert!(misplaced.value().is_err());
    assert!(records[1].type_id().is_ok());
}

#[test]
fn children_of_unresolved_parents_fail_too() {
    let document = loads("0 @X1@ NOPE\n1 NAME x\n").unwrap();
    let child = document.records()[0].children()[0];
    assert!(child.type_id().is_err());
}

#[test]
fn type_ids_are_cached() {
    let document = loads("0 @I1@ INDI\n1 NAME John /Doe/\n").unwrap();
    let name = document.records()[0].children()[0];
    let first = name.type_id().unwrap();
    let second = name.type_id().unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn value_as_ignores_the_schema() {
    let document = loads("0 @I1@ INDI\n1 NOTE 42\n1 NOTE\n").unwrap();
    let notes = document.records()[0].children();
    assert_eq!(
        notes[0].value().unwrap(),
        Some(gedcom7::Value::Text("42".into()))
    );
    assert_eq!(
        notes[0].value_as(PayloadKind::Integer).unwrap(),
        Some(gedcom7::Value::Integer(42))
    );
    assert!(notes[0].value_as(PayloadKind::Age).is_err());
    assert_eq!(notes[1].value_as(PayloadKind::Integer), Ok(None));
}

#[test]
fn custom_schema() {
    let json = r#"{
        "substructures": {
            "": { "REC": "https://example.com/rec" },
            "https://example.com/rec": { "NUM": "https://example.com/num" }
        },
        "payloads": {
            "https://example.com/rec": null,
            "https://example.com/num": "http://www.w3.org/2001/XMLSchema#nonNegativeInteger"
        }
    }"#;
    let schema = Arc::new(Schema::from_json(json).unwrap());
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.payload_kind("https://example.com/rec"), Some(PayloadKind::Untyped));
    let document = Parser::with_schema(schema).parse("0 REC\n1 NUM 7\n").unwrap();
    let number = document.records()[0].children()[0];
    assert_eq!(number.type_id().unwrap(), "https://example.com/num");
    assert_eq!(number.value().unwrap(), Some(gedcom7::Value::Integer(7)));
    // HEAD needs no schema entry
    let document = Parser::with_schema(Arc::new(Schema::from_json(json).unwrap()))
        .parse("0 HEAD\n0 INDI\n")
        .unwrap();
    assert_eq!(document.records()[0].type_id().unwrap(), "HEAD pseudostructure");
    assert!(document.records()[1].type_id().is_err());
}

#[test]
fn broken_schema_json() {
    assert!(matches!(
        Schema::from_json("{ \"substructures\": {} }"),
        Err(GedcomError::Schema(_))
    ));
    assert!(matches!(
        Schema::from_path("does/not/exist.json"),
        Err(GedcomError::Schema(_))
    ));
}

#[test]
fn built_in_schema_is_shared() {
    let first = Schema::gedcom7();
    let second = Schema::gedcom7();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.contains_type(&format!("{V7}record-INDI")));
    assert_eq!(
        first.payload_kind(&format!("{V7}DATE")),
        Some(PayloadKind::DateValue)
    );
    assert_eq!(
        first.payload_kind(&format!("{V7}FAMS")),
        Some(PayloadKind::Pointer)
    );
}

// one structure per level in `levels`, each nested in the previous one
fn nested(tag: &str, levels: std::ops::Range<usize>) -> String {
    levels.map(|level| format!("{level} {tag} x\n")).collect()
}

#[test]
fn deep_nesting_fails_at_the_first_misplaced_level() {
    let document = loads(&format!("0 @I1@ INDI\n{}", nested("NOTE", 1..20_001))).unwrap();
    assert_eq!(document.structure_count(), 20_001);
    let deepest = document.nodes().last().unwrap();
    assert_eq!(deepest.level(), 20_000);
    assert!(matches!(
        deepest.type_id(),
        Err(GedcomError::UnresolvedType { ref tag, ref parent }) if tag == "NOTE" && *parent == format!("{V7}NOTE")
    ));
    // the levels above the misplaced one keep their types
    let note = document.records()[0].children()[0];
    assert_eq!(note.type_id().unwrap(), format!("{V7}NOTE"));
}

#[test]
fn deep_nesting_resolves_under_a_recursive_schema() {
    let json = r#"{
        "substructures": {
            "": { "REC": "https://example.com/rec" },
            "https://example.com/rec": { "REC": "https://example.com/rec" }
        },
        "payloads": { "https://example.com/rec": "http://www.w3.org/2001/XMLSchema#string" }
    }"#;
    let parser = Parser::with_schema(Arc::new(Schema::from_json(json).unwrap()));
    let document = parser.parse(&nested("REC", 0..20_000)).unwrap();
    let deepest = document.nodes().last().unwrap();
    assert_eq!(deepest.type_id().unwrap(), "https://example.com/rec");
    assert_eq!(deepest.value().unwrap(), Some(gedcom7::Value::Text("x".into())));
}
