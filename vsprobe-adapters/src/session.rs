//! The session abstraction the checks are written against.

use async_trait::async_trait;

use vsprobe_types::{Counter, DatastoreSummary, EntityRef, HostSummary, VmSummary};

use crate::AdapterError;

/// An authenticated session with a management server.
///
/// Implementations return inventory in the order the server lists it; checks
/// rely on that order for their performance data.
#[async_trait]
pub trait Session: Send + Sync {
    /// List datastores. When `tag` is set, only datastores whose name
    /// contains it are returned.
    async fn list_datastores(&self, tag: Option<&str>)
        -> Result<Vec<DatastoreSummary>, AdapterError>;

    /// List hosts. When `name` is set, only the host with exactly that name
    /// is returned.
    async fn list_hosts(&self, name: Option<&str>) -> Result<Vec<HostSummary>, AdapterError>;

    /// List powered-on virtual machines.
    async fn list_powered_on_vms(&self) -> Result<Vec<VmSummary>, AdapterError>;

    /// Most recent value of `counter` for `entity`, or `None` when the
    /// server has no data point for it.
    async fn get_statistic(
        &self,
        entity: &EntityRef,
        counter: Counter,
    ) -> Result<Option<f64>, AdapterError>;

    /// Human-readable description of the session target, for logs.
    fn description(&self) -> &str;
}
