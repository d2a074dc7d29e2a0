//! Catalog sources that supply roles and users to the resolver.

use crate::{error::Result, role::Role, user::User};

/// Something that can produce the role and user catalogs.
pub trait CatalogSource {
    /// Read the role catalog.
    fn roles(&self) -> Result<Vec<Role>>;

    /// Read the user catalog.
    fn users(&self) -> Result<Vec<User>>;
}

/// In-memory catalogs.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    roles: Vec<Role>,
    users: Vec<User>,
}

impl MemorySource {
    /// Create an empty memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Add several roles.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Add a user.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Add several users.
    pub fn with_users(mut self, users: impl IntoIterator<Item = User>) -> Self {
        self.users.extend(users);
        self
    }
}

impl CatalogSource for MemorySource {
    fn roles(&self) -> Result<Vec<Role>> {
        Ok(self.roles.clone())
    }

    fn users(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }
}

/// JSON catalogs (requires persistence feature).
///
/// A catalog is a JSON array of records: roles look like
/// `{"id": 2, "parent": 1}`, users like `{"id": 3, "name": "Sam", "role": 2}`.
#[cfg(feature = "persistence")]
pub mod file_storage {
    use super::*;
    use crate::error::Error;
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use std::{
        fs::File,
        io::BufReader,
        path::{Path, PathBuf},
    };

    /// Parse a role catalog. Anything but an array is rejected.
    pub fn roles_from_value(value: &Value) -> Result<Vec<Role>> {
        records_from_value(value, "roles")
    }

    /// Parse a user catalog. Anything but an array is rejected.
    pub fn users_from_value(value: &Value) -> Result<Vec<User>> {
        records_from_value(value, "users")
    }

    fn records_from_value<T: DeserializeOwned>(value: &Value, catalog: &str) -> Result<Vec<T>> {
        let records = value
            .as_array()
            .ok_or_else(|| Error::InvalidArgument(format!("{catalog} must be an array")))?;

        records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                serde_json::from_value::<T>(record.clone()).map_err(|e| {
                    Error::InvalidArgument(format!("{catalog}[{position}] is malformed: {e}"))
                })
            })
            .collect()
    }

    fn read_value(path: &Path) -> Result<Value> {
        let file = File::open(path).map_err(|e| {
            Error::Storage(format!(
                "Failed to open catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads the two catalogs from JSON files.
    #[derive(Debug, Clone)]
    pub struct FileSource {
        roles_path: PathBuf,
        users_path: PathBuf,
    }

    impl FileSource {
        /// Create a file source from the paths of the two catalogs.
        pub fn new(roles_path: impl AsRef<Path>, users_path: impl AsRef<Path>) -> Self {
            Self {
                roles_path: roles_path.as_ref().to_path_buf(),
                users_path: users_path.as_ref().to_path_buf(),
            }
        }

        /// Get the role catalog path.
        pub fn roles_path(&self) -> &Path {
            &self.roles_path
        }

        /// Get the user catalog path.
        pub fn users_path(&self) -> &Path {
            &self.users_path
        }
    }

    impl CatalogSource for FileSource {
        fn roles(&self) -> Result<Vec<Role>> {
            roles_from_value(&read_value(&self.roles_path)?)
        }

        fn users(&self) -> Result<Vec<User>> {
            users_from_value(&read_value(&self.users_path)?)
        }
    }
}

#[cfg(feature = "persistence")]
pub use file_storage::{roles_from_value, users_from_value, FileSource};
