//! Branch Model (sucursal)

use serde::{Deserialize, Serialize};

/// Branch entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true", alias = "active")]
    pub is_active: bool,
}

pub(crate) fn default_true() -> bool {
    true
}
