//! vCenter adapter using the vSphere Automation REST API.
//!
//! A session is created with `POST /api/session` (HTTP basic auth) and the
//! returned token is sent as `vmware-api-session-id` on every later request.
//!
//! ## Endpoints Used
//!
//! - `GET /api/vcenter/datastore` - datastore capacity and free space
//! - `GET /api/vcenter/host` - ESX hosts, optionally filtered by name
//! - `GET /api/vcenter/vm?power_states=POWERED_ON` - running virtual machines
//! - `GET /api/stats/data/dp` - performance counter data points
//!
//! ## Limitations
//!
//! The stock datastore list response carries capacity and free space only.
//! Uncommitted space is read when the response includes an `uncommitted`
//! field and is otherwise left unset, in which case no over-provisioning
//! figure exists for that datastore and only its usage is evaluated.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vsprobe_adapters::vsphere::VsphereAdapter;
//! use vsprobe_adapters::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = VsphereAdapter::builder()
//!         .endpoint("vcenter.example.com")
//!         .credentials("monitor@vsphere.local", "secret")
//!         .build()?
//!         .connect()
//!         .await?;
//!
//!     for ds in session.list_datastores(None).await? {
//!         println!("{}: {:?} free", ds.name, ds.free_space);
//!     }
//!
//!     session.logout().await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use vsprobe_types::{Counter, DatastoreSummary, EntityRef, HostSummary, VmSummary};

use crate::{AdapterError, Session};

const SESSION_HEADER: &str = "vmware-api-session-id";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Unauthenticated handle on a vCenter server.
#[derive(Debug, Clone)]
pub struct VsphereAdapter {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl VsphereAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> VsphereAdapterBuilder {
        VsphereAdapterBuilder::default()
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authenticate and open a session.
    pub async fn connect(&self) -> Result<VsphereSession, AdapterError> {
        let url = format!("{}/api/session", self.endpoint);
        debug!(%url, user = %self.username, "creating vCenter session");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let response = check_status(response, "session")?;
        let token: String = parse_body(response).await?;

        Ok(VsphereSession {
            client: self.client.clone(),
            description: format!("vcenter: {}", self.endpoint),
            endpoint: self.endpoint.clone(),
            token,
        })
    }
}

/// Builder for VsphereAdapter.
#[derive(Debug, Default)]
pub struct VsphereAdapterBuilder {
    endpoint: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl VsphereAdapterBuilder {
    /// Set the vCenter host name or base URL. A bare host name gets an
    /// `https://` scheme.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the username and password for authentication.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout (default: [`DEFAULT_TIMEOUT`]).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Skip TLS certificate verification. vCenter ships with a self-signed
    /// certificate by default.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<VsphereAdapter, AdapterError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| AdapterError::Connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(VsphereAdapter {
            client,
            endpoint: normalize_endpoint(self.endpoint.as_deref().unwrap_or("localhost")),
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// An authenticated vCenter session.
#[derive(Debug, Clone)]
pub struct VsphereSession {
    client: Client,
    endpoint: String,
    token: String,
    description: String,
}

impl VsphereSession {
    /// Terminate the session on the server.
    pub async fn logout(&self) -> Result<(), AdapterError> {
        let url = format!("{}/api/session", self.endpoint);
        let response = self.authed(self.client.delete(&url)).send().await?;
        check_status(response, "session")?;
        Ok(())
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(SESSION_HEADER, &self.token)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AdapterError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!(%url, ?query, "GET");

        let response = self
            .authed(self.client.get(&url))
            .query(query)
            .send()
            .await?;

        let response = check_status(response, path)?;
        parse_body(response).await
    }
}

#[async_trait]
impl Session for VsphereSession {
    async fn list_datastores(
        &self,
        tag: Option<&str>,
    ) -> Result<Vec<DatastoreSummary>, AdapterError> {
        let datastores: Vec<DatastoreInfo> = self.get_json("/api/vcenter/datastore", &[]).await?;

        Ok(datastores
            .into_iter()
            .filter(|ds| tag.map_or(true, |t| ds.name.contains(t)))
            .map(DatastoreSummary::from)
            .collect())
    }

    async fn list_hosts(&self, name: Option<&str>) -> Result<Vec<HostSummary>, AdapterError> {
        let query: Vec<(&str, &str)> = name.map(|n| ("names", n)).into_iter().collect();
        let hosts: Vec<HostInfo> = self.get_json("/api/vcenter/host", &query).await?;

        // The server filter is authoritative, but keep the exact-match
        // contract even if a proxy drops the query string.
        Ok(hosts
            .into_iter()
            .filter(|h| name.map_or(true, |n| h.name == n))
            .map(HostSummary::from)
            .collect())
    }

    async fn list_powered_on_vms(&self) -> Result<Vec<VmSummary>, AdapterError> {
        let vms: Vec<VmInfo> = self
            .get_json("/api/vcenter/vm", &[("power_states", "POWERED_ON")])
            .await?;
        Ok(vms.into_iter().map(VmSummary::from).collect())
    }

    async fn get_statistic(
        &self,
        entity: &EntityRef,
        counter: Counter,
    ) -> Result<Option<f64>, AdapterError> {
        let resource = entity.to_string();
        let page: DataPointPage = self
            .get_json(
                "/api/stats/data/dp",
                &[("rsrcs", resource.as_str()), ("cid", counter.key())],
            )
            .await?;
        Ok(page.latest())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

fn check_status(response: Response, what: &str) -> Result<Response, AdapterError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AdapterError::Auth("Invalid credentials".to_string()));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(AdapterError::Http(format!("'{}' not found", what)));
    }

    if !status.is_success() {
        return Err(AdapterError::Http(format!("API returned status {}", status)));
    }

    Ok(response)
}

async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, AdapterError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AdapterError::Parse(e.to_string()))
}

fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

/// Datastore summary from `GET /api/vcenter/datastore`.
#[derive(Debug, Deserialize)]
struct DatastoreInfo {
    datastore: String,
    name: String,
    #[serde(default)]
    capacity: Option<u64>,
    #[serde(default)]
    free_space: Option<u64>,
    // Absent from the stock list response.
    #[serde(default)]
    uncommitted: Option<u64>,
}

impl From<DatastoreInfo> for DatastoreSummary {
    fn from(info: DatastoreInfo) -> Self {
        DatastoreSummary {
            id: info.datastore,
            name: info.name,
            capacity: info.capacity,
            free_space: info.free_space,
            uncommitted: info.uncommitted,
        }
    }
}

/// Host summary from `GET /api/vcenter/host`.
#[derive(Debug, Deserialize)]
struct HostInfo {
    host: String,
    name: String,
}

impl From<HostInfo> for HostSummary {
    fn from(info: HostInfo) -> Self {
        HostSummary {
            id: info.host,
            name: info.name,
        }
    }
}

/// VM summary from `GET /api/vcenter/vm`.
#[derive(Debug, Deserialize)]
struct VmInfo {
    vm: String,
    name: String,
}

impl From<VmInfo> for VmSummary {
    fn from(info: VmInfo) -> Self {
        VmSummary {
            id: info.vm,
            name: info.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DataPointPage {
    #[serde(default)]
    data_points: Vec<DataPoint>,
}

impl DataPointPage {
    fn latest(&self) -> Option<f64> {
        self.data_points
            .iter()
            .max_by_key(|dp| dp.ts)
            .map(|dp| dp.val)
    }
}

#[derive(Debug, Deserialize)]
struct DataPoint {
    ts: i64,
    val: f64,
}
