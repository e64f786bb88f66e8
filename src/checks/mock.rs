//! In-memory session for exercising checks without a vCenter.

use std::collections::HashMap;

use async_trait::async_trait;
use vsprobe_adapters::{AdapterError, Session};
use vsprobe_types::{Counter, DatastoreSummary, EntityRef, HostSummary, VmSummary};

#[derive(Debug, Default)]
pub(crate) struct MockSession {
    datastores: Vec<DatastoreSummary>,
    hosts: Vec<HostSummary>,
    vms: Vec<VmSummary>,
    stats: HashMap<(String, Counter), f64>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datastore(mut self, ds: DatastoreSummary) -> Self {
        self.datastores.push(ds);
        self
    }

    pub fn host(mut self, id: &str, name: &str) -> Self {
        self.hosts.push(HostSummary {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn vm(mut self, id: &str, name: &str) -> Self {
        self.vms.push(VmSummary {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn stat(mut self, id: &str, counter: Counter, value: f64) -> Self {
        self.stats.insert((id.to_string(), counter), value);
        self
    }
}

#[async_trait]
impl Session for MockSession {
    async fn list_datastores(
        &self,
        tag: Option<&str>,
    ) -> Result<Vec<DatastoreSummary>, AdapterError> {
        Ok(self
            .datastores
            .iter()
            .filter(|ds| tag.map_or(true, |t| ds.name.contains(t)))
            .cloned()
            .collect())
    }

    async fn list_hosts(&self, name: Option<&str>) -> Result<Vec<HostSummary>, AdapterError> {
        Ok(self
            .hosts
            .iter()
            .filter(|h| name.map_or(true, |n| h.name == n))
            .cloned()
            .collect())
    }

    async fn list_powered_on_vms(&self) -> Result<Vec<VmSummary>, AdapterError> {
        Ok(self.vms.clone())
    }

    async fn get_statistic(
        &self,
        entity: &EntityRef,
        counter: Counter,
    ) -> Result<Option<f64>, AdapterError> {
        Ok(self.stats.get(&(entity.id.clone(), counter)).copied())
    }

    fn description(&self) -> &str {
        "mock"
    }
}
