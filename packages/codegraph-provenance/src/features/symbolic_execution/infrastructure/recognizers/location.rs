//! Location recognizers: current location and distance computations

use super::{bind_derived, derived_value, ApiShape, CallShape, Inherit, MethodRecognizer, Receives, RecognizerChain, TaggedCallRecognizer};
use crate::features::symbolic_execution::domain::{tags, Binding, SymbolicValueId};
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::features::symbolic_execution::infrastructure::tag_propagation::{propagate_mutually, propagate_tags};

pub const LOCATION_TYPES: &[&str] = &["android.location.Location"];

pub const LAST_KNOWN_LOCATION: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "last_known_location",
    ApiShape::new(
        &[
            "android.location.LocationManager",
            "com.google.android.gms.location.LocationResult",
        ],
        &["getLastKnownLocation", "getLastLocation"],
    ),
    &[tags::HERE],
);

const DISTANCE_TO: ApiShape = ApiShape::new(LOCATION_TYPES, &["distanceTo"]);
const DISTANCE_BETWEEN: ApiShape = ApiShape::new(LOCATION_TYPES, &["distanceBetween"]);

/// `a.distanceTo(b)`: float result tagged `#distance`, `a` and `b` share tags
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceToRecognizer;

impl MethodRecognizer for DistanceToRecognizer {
    fn name(&self) -> &'static str {
        "location_distance_to"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&DISTANCE_TO) {
            return None;
        }
        let (from, to) = (call.receiver()?, call.arg(0)?);
        let mut bindings = Vec::new();
        let mut locations = ctx.operand(from, &mut bindings);
        locations.extend(ctx.operand(to, &mut bindings));
        propagate_mutually(ctx.values, &locations);

        let result = derived_value(call, ctx, &[tags::DISTANCE], Inherit::Nothing);
        propagate_tags(ctx.values, &locations, &[result]);
        bindings.extend(bind_derived(call, Receives::Result, result));
        Some(bindings)
    }
}

/// `Location.distanceBetween(lat1, lon1, lat2, lon2, results)`
///
/// The four coordinates share tags; the results array is bound to a value
/// tagged `#distance` carrying them too.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceBetweenRecognizer;

impl MethodRecognizer for DistanceBetweenRecognizer {
    fn name(&self) -> &'static str {
        "location_distance_between"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&DISTANCE_BETWEEN) || call.invoke.args.len() < 5 {
            return None;
        }
        let mut bindings = Vec::new();
        let mut coordinates: Vec<SymbolicValueId> = Vec::new();
        for coordinate in &call.invoke.args[..4] {
            coordinates.extend(ctx.operand(coordinate, &mut bindings));
        }
        propagate_mutually(ctx.values, &coordinates);

        let result = derived_value(call, ctx, &[tags::DISTANCE], Inherit::Nothing);
        propagate_tags(ctx.values, &coordinates, &[result]);
        if let Some(results) = call.arg(4) {
            bindings.push(Binding::new(results.clone(), result));
        }
        Some(bindings)
    }
}

/// Location family, in precedence order
pub fn chain() -> RecognizerChain {
    RecognizerChain::new()
        .with(LAST_KNOWN_LOCATION)
        .with(DistanceToRecognizer)
        .with(DistanceBetweenRecognizer)
}
