//! JSON interchange
//!
//! Programs loaded from a front end's JSON dump, and the result export.

mod common;

use codegraph_provenance::{
    tags, EngineConfig, IcfgProvider, InMemoryIcfg, MethodSignature, ProgramValue,
    SymbolicExecution,
};
use common::*;
use pretty_assertions::assert_eq;

/// `greeting() { r0 = "hi"; return r0 }` and `main() { r1 = greeting() }`
const PROGRAM: &str = r#"{
  "methods": [
    {
      "signature": {"declaring_type": "com.app.Main", "name": "greeting", "parameter_types": [], "return_type": "java.lang.String"},
      "statements": [
        {
          "stmt": "assign",
          "target": {
            "kind": "local",
            "method": {"declaring_type": "com.app.Main", "name": "greeting", "parameter_types": [], "return_type": "java.lang.String"},
            "name": "r0",
            "ty": "java.lang.String"
          },
          "rhs": {"expr": "use", "value": {"kind": "constant", "literal": {"kind": "string", "value": "hi"}}}
        },
        {
          "stmt": "return",
          "value": {
            "kind": "local",
            "method": {"declaring_type": "com.app.Main", "name": "greeting", "parameter_types": [], "return_type": "java.lang.String"},
            "name": "r0",
            "ty": "java.lang.String"
          }
        }
      ]
    },
    {
      "signature": {"declaring_type": "com.app.Main", "name": "main", "return_type": "void"},
      "statements": [
        {
          "stmt": "assign",
          "target": {
            "kind": "local",
            "method": {"declaring_type": "com.app.Main", "name": "main", "parameter_types": [], "return_type": "void"},
            "name": "r1",
            "ty": "java.lang.String"
          },
          "rhs": {
            "expr": "invoke",
            "invoke": {
              "kind": "static",
              "method": {"declaring_type": "com.app.Main", "name": "greeting", "parameter_types": [], "return_type": "java.lang.String"}
            }
          }
        },
        {"stmt": "nop"},
        {"stmt": "return"}
      ]
    }
  ]
}"#;

fn main_sig() -> MethodSignature {
    MethodSignature::of("com.app.Main", "main", &[], "void")
}

fn r1() -> ProgramValue {
    ProgramValue::local(&main_sig(), "r1", STRING)
}

#[test]
fn test_program_from_json() {
    let icfg = InMemoryIcfg::from_json(PROGRAM).unwrap();
    assert_eq!(icfg.num_methods(), 2);
    assert_eq!(icfg.method_body(&main_sig()).map(|b| b.len()), Some(3));

    let greeting = MethodSignature::of("com.app.Main", "greeting", &[], STRING);
    assert_eq!(icfg.callers_of(&greeting).len(), 1);

    let result = SymbolicExecution::new(&icfg, EngineConfig::default())
        .analyze(&[main_sig()])
        .unwrap();
    assert_eq!(constants_of(&result, &r1()), vec!["hi".to_string()]);
    assert!(result.converged());
}

#[test]
fn test_json_roundtrip_preserves_analysis() {
    let icfg = InMemoryIcfg::from_json(PROGRAM).unwrap();
    let reloaded = InMemoryIcfg::from_json(&icfg.to_json().unwrap()).unwrap();
    assert_eq!(reloaded.methods(), icfg.methods());

    let first = SymbolicExecution::new(&icfg, EngineConfig::default())
        .analyze(&[main_sig()])
        .unwrap();
    let second = SymbolicExecution::new(&reloaded, EngineConfig::default())
        .analyze(&[main_sig()])
        .unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_malformed_program_rejected() {
    assert!(InMemoryIcfg::from_json(r#"{"methods": [{"signature": {}}]}"#).is_err());
    assert!(InMemoryIcfg::from_json(r#"{"methods": [], "extra": 1}"#).is_ok());
}

#[test]
fn test_result_export_layout() {
    let m = MethodBuilder::new(app_method("now", &[], "long"));
    let l0 = m.local("l0", "long");
    let sig = m.signature().clone();
    let icfg = ProgramBuilder::new()
        .with_method(
            m.call(&l0, static_call(api("java.lang.System", "currentTimeMillis", &[], "long"), vec![]))
                .ret(Some(&l0)),
        )
        .build();

    let result = SymbolicExecution::new(&icfg, EngineConfig::default())
        .analyze(&[sig])
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    for key in ["values", "histories", "returns", "diagnostics", "stats"] {
        assert!(parsed.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(parsed["returns"].as_array().map(Vec::len), Some(1));
    assert_eq!(parsed["returns"][0]["method"]["name"], "now");
    assert_eq!(parsed["stats"]["worklist_iterations"], 1);
    assert_eq!(parsed["diagnostics"].as_array().map(Vec::len), Some(0));

    let tagged = parsed["values"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|v| v["tags"].as_array().is_some_and(|t| t.iter().any(|t| t == tags::NOW)))
        .count();
    assert!(tagged >= 1);
}
