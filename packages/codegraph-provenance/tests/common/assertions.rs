//! Result assertions

use codegraph_provenance::{ProgramValue, SymbolicExecutionResult, SymbolicValue};

/// Values of the latest binding of `value`, panicking when there are none
pub fn latest<'r>(result: &'r SymbolicExecutionResult, value: &ProgramValue) -> Vec<&'r SymbolicValue> {
    let values = result.last_values_of(value);
    assert!(!values.is_empty(), "no binding recorded for {}", value);
    values
}

pub fn assert_tagged(result: &SymbolicExecutionResult, value: &ProgramValue, tag: &str) {
    let values = latest(result, value);
    assert!(
        values.iter().any(|v| v.has_tag(tag)),
        "{} is not tagged {}: {:?}",
        value,
        tag,
        values.iter().map(|v| v.tags()).collect::<Vec<_>>()
    );
}

pub fn assert_not_tagged(result: &SymbolicExecutionResult, value: &ProgramValue, tag: &str) {
    let values = result.last_values_of(value);
    assert!(
        values.iter().all(|v| !v.has_tag(tag)),
        "{} unexpectedly tagged {}",
        value,
        tag
    );
}

/// Literal texts among the latest values of `value`
pub fn constants_of(result: &SymbolicExecutionResult, value: &ProgramValue) -> Vec<String> {
    latest(result, value)
        .iter()
        .filter_map(|v| v.as_constant())
        .map(|lit| lit.as_text())
        .collect()
}
