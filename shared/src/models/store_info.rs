//! Store Info Model

use serde::{Deserialize, Serialize};

/// Store identity printed at the top of every receipt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub phone: Option<String>,
    /// Logo image reference (path or URL)
    pub logo: Option<String>,
}

impl StoreInfo {
    /// Phone number, treating an empty string as absent
    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    /// Logo reference, treating an empty string as absent
    pub fn logo(&self) -> Option<&str> {
        non_empty(self.logo.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
