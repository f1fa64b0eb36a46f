//! Storage access checks, served on their own channel.

use crate::bridge::codec::{MethodCall, Value};
use crate::bridge::host::{MethodCallHandler, Responder};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default name of the permissions channel.
pub const CHANNEL: &str = "channel";

/// Checks read access to every storage root.
pub const INITIALIZE_PERMISSIONS: &str = "initialize_permissions";

/// Result of checking one storage root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessGrant {
    pub root: PathBuf,
    pub granted: bool,
}

impl From<&AccessGrant> for Value {
    fn from(grant: &AccessGrant) -> Self {
        Value::Map(
            [
                (
                    "root".to_string(),
                    Value::from(grant.root.to_string_lossy().into_owned()),
                ),
                ("granted".to_string(), Value::from(grant.granted)),
            ]
            .into_iter()
            .collect(),
        )
    }
}

/// Canonical path of `root` once its entries have been listed.
///
/// Shared by the access check and the filesystem index.
pub(crate) fn open_root(root: &Path) -> io::Result<PathBuf> {
    let path = root.canonicalize()?;
    std::fs::read_dir(&path)?;
    Ok(path)
}

fn can_list(root: &Path) -> bool {
    match open_root(root) {
        Ok(_) => true,
        Err(e) => {
            debug!("Cannot list {:?}: {}", root, e);
            false
        }
    }
}

/// A root is granted when it exists and its entries can be listed.
pub fn check_storage_access(roots: &[PathBuf]) -> Vec<AccessGrant> {
    roots
        .iter()
        .map(|root| AccessGrant {
            root: root.clone(),
            granted: can_list(root),
        })
        .collect()
}

/// Answers `initialize_permissions` for a fixed set of roots.
pub struct PermissionHandler {
    roots: Vec<PathBuf>,
}

impl PermissionHandler {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl MethodCallHandler for PermissionHandler {
    fn on_method_call(&self, call: &MethodCall, result: &mut Responder) {
        if call.method != INITIALIZE_PERMISSIONS {
            debug!("Ignoring unknown method: {}", call.method);
            return;
        }

        let grants = check_storage_access(&self.roots);
        for grant in grants.iter().filter(|g| !g.granted) {
            warn!("Storage access not granted for {:?}", grant.root);
        }

        result.success(Value::List(grants.iter().map(Value::from).collect()));
    }
}
