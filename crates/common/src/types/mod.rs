use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// The single entity type managed by the record store.
///
/// `number` is the caller-assigned identifier and doubles as the map key;
/// `age` carries no range constraint beyond being a JSON integer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub number: String,
    pub name: String,
    pub age: i64,
}
