//! Shop Model

use serde::{Deserialize, Serialize};

/// Shop entity. Reference data only, no workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub contact_info: Option<String>,
}
