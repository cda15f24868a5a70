use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QueryError, QueryErrorCode};
use crate::route::RouteResult;

/// The engine's public result (§6 "Query response"). Always returned, even
/// on failure — the query path never throws to its caller (§7).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub success: bool,
    pub routes: Vec<RouteResult>,
    pub alternatives: Option<Vec<RouteResult>>,
    pub risk_assessment: Option<Value>,
    pub execution_time_ms: u64,
    pub graph_available: bool,
    pub graph_version: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<QueryErrorCode>,
    pub missing_nodes: Vec<String>,
}

impl QueryResponse {
    pub(crate) fn success(
        primary: RouteResult,
        alternatives: Vec<RouteResult>,
        risk_assessment: Option<Value>,
        execution_time_ms: u64,
        graph_version: String,
    ) -> Self {
        Self {
            success: true,
            routes: vec![primary],
            alternatives: if alternatives.is_empty() { None } else { Some(alternatives) },
            risk_assessment,
            execution_time_ms,
            graph_available: true,
            graph_version: Some(graph_version),
            error: None,
            error_code: None,
            missing_nodes: Vec::new(),
        }
    }

    pub(crate) fn failure(error: QueryError, execution_time_ms: u64, graph_version: Option<String>) -> Self {
        let graph_available = error.code != QueryErrorCode::GraphUnavailable;
        Self {
            success: false,
            routes: Vec::new(),
            alternatives: None,
            risk_assessment: None,
            execution_time_ms,
            graph_available,
            graph_version,
            missing_nodes: error.missing_nodes.clone(),
            error: Some(error.message),
            error_code: Some(error.code),
        }
    }
}
