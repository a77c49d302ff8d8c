use serde::{Deserialize, Serialize};

/// An employee record as stored in the directory file.
///
/// `photo` holds a `/uploads/...` reference to a stored photo file, or the
/// empty string when the employee has no photo. It is never null on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub address: String,
    #[serde(default)]
    pub photo: String,
}

/// Field changes applied by an update. `id` is immutable and therefore not
/// part of the change set; `photo` is only overwritten when a new upload
/// accompanied the request.
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub photo: Option<String>,
}
