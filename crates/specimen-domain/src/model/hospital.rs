//! Hospital - The originating institution of a sample
//!
//! Hospitals are immutable once registered. Samples reference them by id.

/// Unique identifier for a Hospital (assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HospitalId(String);

impl HospitalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl core::fmt::Display for HospitalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hospital registration request, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHospital {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hospital {
    id: HospitalId,
    name: String,
    address: String,
}

impl Hospital {
    pub fn new(id: HospitalId, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
        }
    }

    /// Materialize a registration request under a store-assigned id
    pub fn from_new(id: HospitalId, new: NewHospital) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
        }
    }

    pub fn id(&self) -> &HospitalId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
