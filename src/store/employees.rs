use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use super::models::{Employee, EmployeeUpdate};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Employee ID already exists: {0}")]
    DuplicateId(String),
    #[error("Employee not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The authoritative employee collection, persisted as a JSON array in a
/// single file. Every mutation reads the full collection, applies the change,
/// and rewrites the file wholesale. The mutex covers the whole
/// read-modify-write cycle so concurrent requests cannot lose updates.
pub struct EmployeeStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl EmployeeStore {
    /// Open a store backed by the given data file. The file itself is
    /// created lazily on the first mutation; a missing file means an empty
    /// directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// All records in insertion order. Unreadable or corrupt storage yields
    /// the empty collection rather than an error.
    pub fn list(&self) -> Vec<Employee> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load()
    }

    pub fn get(&self, id: &str) -> Option<Employee> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load().into_iter().find(|e| e.id == id)
    }

    /// Append a new record. Fails if the id is already taken; the stored
    /// collection is left untouched in that case.
    pub fn insert(&self, employee: Employee) -> Result<Employee, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut employees = self.load();
        if employees.iter().any(|e| e.id == employee.id) {
            return Err(StoreError::DuplicateId(employee.id));
        }
        employees.push(employee.clone());
        self.persist(&employees)?;
        Ok(employee)
    }

    /// Overwrite a record's mutable fields. `photo` changes only when the
    /// update carries a new reference.
    pub fn update(&self, id: &str, changes: EmployeeUpdate) -> Result<Employee, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut employees = self.load();
        let employee = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        employee.name = changes.name;
        employee.mobile = changes.mobile;
        employee.address = changes.address;
        if let Some(photo) = changes.photo {
            employee.photo = photo;
        }

        let updated = employee.clone();
        self.persist(&employees)?;
        Ok(updated)
    }

    /// Remove a record, returning it. Removal is immediate and permanent.
    pub fn delete(&self, id: &str) -> Result<Employee, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut employees = self.load();
        let idx = employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = employees.remove(idx);
        self.persist(&employees)?;
        Ok(removed)
    }

    fn load(&self) -> Vec<Employee> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read employee data file");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(employees) => employees,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Employee data file is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Rewrite the data file. Writes to a sibling temp file and renames it
    /// into place so a failed write never leaves a truncated file.
    fn persist(&self, employees: &[Employee]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(employees)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &data)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
