use serde_json::Value;

use crate::route::BuiltRoute;

/// The risk-scoring algorithm is an external collaborator (spec.md §1
/// Non-goals): this crate only defines the contract it is invoked through
/// and consumes whatever it returns as an opaque JSON value. A callback
/// that throws/panics is the caller's concern; the engine here only ever
/// sees it through `call`, which already swallows a returned `None` into a
/// simply-omitted field (§4.H step 7, §7 "non-fatal auxiliary failure").
pub type RiskFn = dyn Fn(&BuiltRoute) -> Option<Value> + Send + Sync;
