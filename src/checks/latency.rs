//! Virtual disk latency of powered-on VMs.

use tracing::debug;
use vsprobe_adapters::Session;
use vsprobe_types::{Counter, EntityRef, MetricSample};

use crate::error::{InvalidMetric, ProbeError};

const MICROS_PER_MILLI: f64 = 1_000.0;

pub(super) async fn collect(session: &dyn Session) -> Result<Vec<MetricSample>, ProbeError> {
    let vms = session.list_powered_on_vms().await?;
    debug!(count = vms.len(), "listed powered-on VMs");

    let mut samples = Vec::with_capacity(vms.len());
    for vm in vms {
        let entity = EntityRef::vm(&vm.id);
        let read = session.get_statistic(&entity, Counter::DiskReadLatency).await?;
        let write = session.get_statistic(&entity, Counter::DiskWriteLatency).await?;
        debug!(vm = %vm.name, ?read, ?write, "virtual disk latency (us)");

        let worst = match (read, write) {
            (Some(r), Some(w)) => r.max(w),
            (Some(r), None) => r,
            (None, Some(w)) => w,
            (None, None) => {
                return Err(
                    InvalidMetric::new(&vm.name, "no virtual disk latency data points").into(),
                )
            }
        };

        samples.push(MetricSample::new(vm.name, worst / MICROS_PER_MILLI));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockSession;
    use super::*;

    #[test]
    fn test_worst_of_read_and_write_in_millis() {
        let session = MockSession::new()
            .vm("vm-1", "web01")
            .stat("vm-1", Counter::DiskReadLatency, 1500.0)
            .stat("vm-1", Counter::DiskWriteLatency, 22500.0)
            .vm("vm-2", "db01")
            .stat("vm-2", Counter::DiskReadLatency, 800.0);

        let samples = tokio_test::block_on(collect(&session)).unwrap();
        assert_eq!(
            samples,
            vec![
                MetricSample::new("web01", 22.5),
                MetricSample::new("db01", 0.8),
            ]
        );
    }

    #[test]
    fn test_vm_without_counters_is_invalid() {
        let session = MockSession::new().vm("vm-1", "web01");
        let err = tokio_test::block_on(collect(&session)).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidMetric(ref m) if m.subject == "web01"));
    }
}
