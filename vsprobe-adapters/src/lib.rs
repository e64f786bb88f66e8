//! # vsprobe-adapters
//!
//! Adapters for talking to virtualization management servers.
//!
//! The checks in `vsprobe` are written against the [`Session`] trait; this
//! crate provides the trait and the implementations behind it.
//!
//! ## Supported Systems
//!
//! - **vCenter** (`vsphere` feature) - Lists datastores, hosts and VMs and reads
//!   performance counters via the vSphere Automation REST API
//!
//! ## Quick Start (vCenter)
//!
//! ```rust,ignore
//! use vsprobe_adapters::vsphere::VsphereAdapter;
//! use vsprobe_adapters::Session;
//! use vsprobe_types::{Counter, EntityRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = VsphereAdapter::builder()
//!         .endpoint("https://vcenter.example.com")
//!         .credentials("monitor@vsphere.local", "secret")
//!         .build()?
//!         .connect()
//!         .await?;
//!
//!     for host in session.list_hosts(None).await? {
//!         let cpu = session
//!             .get_statistic(&EntityRef::host(&host.id), Counter::CpuUsage)
//!             .await?;
//!         println!("{}: {:?}", host.name, cpu);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod session;

#[cfg(feature = "vsphere")]
pub mod vsphere;

pub use error::AdapterError;
pub use session::Session;

// Re-export types for convenience
pub use vsprobe_types::{Counter, DatastoreSummary, EntityRef, HostSummary, VmSummary};
