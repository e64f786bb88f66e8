//! Inventory objects returned by a management server session.
//!
//! These are deliberately small: they carry only what the checks need, and
//! adapters convert their wire formats into them.

use core::fmt;

/// A datastore as listed by the management server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatastoreSummary {
    /// Managed object identifier (e.g. `datastore-12`).
    pub id: String,
    pub name: String,
    /// Capacity in bytes. Absent when the datastore is inaccessible.
    pub capacity: Option<u64>,
    /// Free space in bytes. Absent when the datastore is inaccessible.
    pub free_space: Option<u64>,
    /// Space promised to thin-provisioned disks but not yet written.
    pub uncommitted: Option<u64>,
}

/// An ESX host as listed by the management server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostSummary {
    pub id: String,
    pub name: String,
}

/// A virtual machine as listed by the management server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VmSummary {
    pub id: String,
    pub name: String,
}

/// Kind of managed entity a statistic is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Host,
    VirtualMachine,
}

impl EntityKind {
    /// Resource type name used by the statistics service.
    pub fn resource_type(&self) -> &'static str {
        match self {
            EntityKind::Host => "HOST",
            EntityKind::VirtualMachine => "VM",
        }
    }
}

/// Reference to an entity for statistics queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn host(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Host,
            id: id.into(),
        }
    }

    pub fn vm(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::VirtualMachine,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.resource_type(), self.id)
    }
}

/// Performance counters the probe knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Host CPU usage, hundredths of a percent.
    CpuUsage,
    /// Host memory usage, hundredths of a percent.
    MemUsage,
    /// Virtual disk read latency, microseconds.
    DiskReadLatency,
    /// Virtual disk write latency, microseconds.
    DiskWriteLatency,
}

impl Counter {
    /// Counter name as exposed by the performance manager.
    pub fn key(&self) -> &'static str {
        match self {
            Counter::CpuUsage => "cpu.usage.average",
            Counter::MemUsage => "mem.usage.average",
            Counter::DiskReadLatency => "virtualDisk.readLatencyUS.latest",
            Counter::DiskWriteLatency => "virtualDisk.writeLatencyUS.latest",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
