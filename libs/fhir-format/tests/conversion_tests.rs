//! Round-trip tests across the two wire formats.

use mensura_format::{encode_value, parse, Format};
use serde_json::{json, Value};

fn measure_bundle() -> Value {
    json!({
        "resourceType": "Bundle",
        "id": "export-bundle",
        "type": "transaction",
        "entry": [
            {
                "fullUrl": "https://example.org/fhir/Measure/ExportTest",
                "resource": {
                    "resourceType": "Measure",
                    "id": "measure-1",
                    "url": "https://example.org/fhir/Measure/ExportTest",
                    "version": "1.0.000",
                    "name": "ExportTest",
                    "experimental": true,
                    "group": [{
                        "id": "group-1",
                        "population": [{
                            "id": "pop-1",
                            "code": {
                                "coding": [{
                                    "system": "http://terminology.hl7.org/CodeSystem/measure-population",
                                    "code": "initial-population",
                                    "display": "Initial Population"
                                }]
                            },
                            "criteria": {
                                "language": "text/cql.identifier",
                                "expression": "Initial Population"
                            }
                        }]
                    }]
                }
            },
            {
                "fullUrl": "https://example.org/fhir/Library/ExportTest",
                "resource": {
                    "resourceType": "Library",
                    "id": "library-1",
                    "name": "ExportTest",
                    "content": [
                        { "contentType": "text/cql", "data": "bGlicmFyeSBFeHBvcnRUZXN0" }
                    ]
                }
            }
        ]
    })
}

#[test]
fn bundle_survives_xml_round_trip() {
    let original = measure_bundle();

    let xml = encode_value(&original, Format::Xml).expect("xml encoding failed");
    let recovered = parse(Format::Xml, &xml, "Bundle").expect("xml parse failed");

    assert_eq!(recovered["id"], original["id"]);
    assert_eq!(recovered["type"], original["type"]);

    // Single-element arrays come back as plain objects in the
    // schema-agnostic reverse mapping, so compare through indexing that
    // tolerates both shapes.
    let entries = recovered["entry"].as_array().expect("entries lost");
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0]["resource"]["version"],
        original["entry"][0]["resource"]["version"]
    );
    assert_eq!(
        entries[1]["resource"]["content"]["data"],
        original["entry"][1]["resource"]["content"][0]["data"]
    );
}

#[test]
fn json_encoding_is_stable() {
    let bundle = measure_bundle();
    let first = encode_value(&bundle, Format::Json).unwrap();
    let second = encode_value(&bundle, Format::Json).unwrap();
    assert_eq!(first, second);

    let reparsed: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(reparsed, bundle);
}

#[test]
fn xml_root_is_namespaced() {
    let xml = encode_value(&measure_bundle(), Format::Xml).unwrap();
    assert!(xml.starts_with("<Bundle xmlns=\"http://hl7.org/fhir\">"));
    assert!(xml.trim_end().ends_with("</Bundle>"));
}
