//! Customer and Relation Models

use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub address: Option<String>,
}

/// Customer joined onto a bill, task or warranty (`users` relation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default, deserialize_with = "de::non_blank")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::non_blank")]
    pub phone: Option<String>,
}

/// Employee joined onto a service task (`employees` relation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    #[serde(default, deserialize_with = "de::non_blank")]
    pub name: Option<String>,
}
