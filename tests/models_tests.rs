// Snapshot model tests: derived fields, formatting, wire shape

use chrono::{TimeZone, Utc};
use hostwatch::models::*;

#[test]
fn memory_used_plus_available_equals_total() {
    let m = MemoryStats::from_counts(16_000, 1_200, 4_000, 1_000, DataSource::Live, 0);
    assert_eq!(m.used, 14_800);
    assert_eq!(m.used + m.available, m.total);
    assert!((m.percentage - 92.5).abs() < 1e-9);
    assert!((m.swap_percentage - 25.0).abs() < 1e-9);
}

#[test]
fn memory_available_above_total_is_clamped() {
    let m = MemoryStats::from_counts(1_000, 5_000, 0, 10, DataSource::Live, 0);
    assert_eq!(m.available, 1_000);
    assert_eq!(m.used, 0);
    assert_eq!(m.percentage, 0.0);
    assert_eq!(m.swap_used, 0);
    assert_eq!(m.swap_percentage, 0.0);
}

#[test]
fn disk_used_plus_free_equals_total() {
    let d = DiskStats::from_counts("/", 500, 100, 7, 9, DataSource::Synthetic, 0);
    assert_eq!(d.used, 400);
    assert_eq!(d.used + d.free, d.total);
    assert!((d.percentage - 80.0).abs() < 1e-9);
    assert_eq!(d.mount, "/");
}

#[test]
fn percent_of_zero_total_is_zero() {
    assert_eq!(percent_of(10, 0), 0.0);
    assert_eq!(percent_of(0, 10), 0.0);
    assert_eq!(percent_of(20, 10), 100.0);
}

#[test]
fn process_list_sorted_truncated_and_clamped() {
    let entries = (0..15)
        .map(|i| ProcessEntry {
            pid: i,
            name: format!("p{}", i),
            cpu_percent: if i == 3 { 250.0 } else { i as f64 },
            memory_percent: -1.0,
            status: "running".into(),
        })
        .collect();
    let list = ProcessList::top(entries, DataSource::Live, 0);
    assert_eq!(list.processes.len(), MAX_PROCESSES);
    assert_eq!(list.processes[0].pid, 3);
    assert_eq!(list.processes[0].cpu_percent, 100.0);
    assert!(list.processes.iter().all(|p| p.memory_percent == 0.0));
    assert!(
        list.processes
            .windows(2)
            .all(|w| w[0].cpu_percent >= w[1].cpu_percent)
    );
}

#[test]
fn format_uptime_variants() {
    assert_eq!(format_uptime(0), "0m");
    assert_eq!(format_uptime(59), "0m");
    assert_eq!(format_uptime(3_660), "1h 1m");
    assert_eq!(format_uptime(3 * 86_400 + 4 * 3_600 + 5 * 60), "3d 4h 5m");
    assert_eq!(format_uptime(86_400), "1d 0h 0m");
}

#[test]
fn system_info_uptime_from_boot() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let boot = (now.timestamp() - 2 * 86_400 - 90) as u64;
    let info = SystemInfo::from_boot(boot, now, DataSource::Live);
    assert_eq!(info.uptime_seconds, 2 * 86_400 + 90);
    assert_eq!(info.uptime_formatted, "2d 0h 1m");
    assert_eq!(info.boot_timestamp, boot);
    assert_eq!(info.boot_time.len(), "YYYY-MM-DD HH:MM:SS".len());
    assert_eq!(info.captured_at, now.timestamp_millis() as u64);
}

#[test]
fn system_info_boot_in_future_gives_zero_uptime() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let info = SystemInfo::from_boot(now.timestamp() as u64 + 100, now, DataSource::Live);
    assert_eq!(info.uptime_seconds, 0);
    assert_eq!(info.uptime_formatted, "0m");
}

#[test]
fn metric_kind_parses_path_segments_and_aliases() {
    for kind in MetricKind::ALL {
        assert_eq!(kind.as_str().parse::<MetricKind>(), Ok(kind));
    }
    assert_eq!("memory".parse::<MetricKind>(), Ok(MetricKind::Memory));
    assert_eq!("system_info".parse::<MetricKind>(), Ok(MetricKind::SystemInfo));
    assert_eq!("CPU".parse::<MetricKind>(), Ok(MetricKind::Cpu));
    assert!("gpu".parse::<MetricKind>().is_err());
}

#[test]
fn alert_kind_and_severity_round_trip_strings() {
    for kind in AlertKind::ALL {
        assert_eq!(kind.as_str().parse::<AlertKind>(), Ok(kind));
    }
    assert_eq!("critical".parse::<Severity>(), Ok(Severity::Critical));
    assert!("fatal".parse::<Severity>().is_err());
    assert!(Severity::Critical > Severity::Warning);
    assert!(Severity::Warning > Severity::Info);
}

#[test]
fn alert_view_wire_shape() {
    let alert = Alert {
        id: 7,
        kind: AlertKind::Memory,
        message: "High memory usage: 92.5%".into(),
        severity: Severity::Critical,
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        resolved: false,
        resolved_at: None,
    };
    let json = serde_json::to_value(AlertView::from(&alert)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 7,
            "type": "memory",
            "message": "High memory usage: 92.5%",
            "severity": "critical",
            "created_at": "2024-01-02 03:04:05",
        })
    );
}

#[test]
fn alert_record_view_includes_resolution() {
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let alert = Alert {
        id: 1,
        kind: AlertKind::Disk,
        message: "Low disk space: 96.0% used".into(),
        severity: Severity::Critical,
        created_at: created,
        resolved: true,
        resolved_at: Some(created + chrono::Duration::minutes(10)),
    };
    let view = AlertRecordView::from(&alert);
    assert!(view.resolved);
    assert_eq!(view.resolved_at.as_deref(), Some("2024-01-02 03:14:05"));
}

#[test]
fn snapshot_serializes_as_inner_value() {
    let snapshot = MetricSnapshot::Disk(DiskStats::from_counts(
        "/data",
        100,
        25,
        0,
        0,
        DataSource::Live,
        42,
    ));
    assert_eq!(snapshot.kind(), MetricKind::Disk);
    assert_eq!(snapshot.captured_at(), 42);
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["mount"], "/data");
    assert_eq!(json["used"], 75);
    assert_eq!(json["source"], "live");
}

#[test]
fn process_list_serializes_as_bare_array() {
    let entry = ProcessEntry {
        pid: 1,
        name: "init".into(),
        cpu_percent: 0.5,
        memory_percent: 0.1,
        status: "sleeping".into(),
    };
    let list = ProcessList::top(vec![entry], DataSource::Synthetic, 9);
    let json = serde_json::to_value(&list).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["name"], "init");

    let snapshot = serde_json::to_value(MetricSnapshot::Processes(list)).unwrap();
    assert!(snapshot.is_array());
}
