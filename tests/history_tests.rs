// History ring buffer tests

use hostwatch::history::{HistoryBuffer, HistoryPoint};

fn point(timestamp: u64) -> HistoryPoint {
    HistoryPoint {
        timestamp,
        cpu: timestamp as f64,
        ram: 50.0,
        disk: 60.0,
        upload: 1.0,
        download: 2.0,
    }
}

#[test]
fn history_keeps_at_most_capacity_oldest_evicted() {
    let buffer = HistoryBuffer::new(3);
    for ts in 1..=5 {
        buffer.push(point(ts));
    }
    assert_eq!(buffer.len(), 3);
    let timestamps: Vec<_> = buffer.points().iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, [3, 4, 5]);
}

#[test]
fn history_zero_capacity_is_raised_to_one() {
    let buffer = HistoryBuffer::new(0);
    assert_eq!(buffer.capacity(), 1);
    assert!(buffer.is_empty());
    buffer.push(point(1));
    buffer.push(point(2));
    assert_eq!(buffer.points(), [point(2)]);
}

#[test]
fn history_series_is_chart_ready_oldest_first() {
    let buffer = HistoryBuffer::new(10);
    buffer.push(point(10));
    buffer.push(point(20));

    let series = buffer.series();
    assert_eq!(series.cpu.len(), 2);
    assert_eq!(series.cpu[0].timestamp, 10);
    assert_eq!(series.cpu[1].value, 20.0);
    assert_eq!(series.ram[0].value, 50.0);
    assert_eq!(series.disk[1].value, 60.0);
    assert_eq!(series.network[1].upload, 1.0);
    assert_eq!(series.network[1].download, 2.0);

    let json = serde_json::to_value(&series).unwrap();
    assert_eq!(json["cpu"][0]["timestamp"], 10);
    assert_eq!(json["network"][0]["download"], 2.0);
}

#[test]
fn history_empty_series() {
    let series = HistoryBuffer::new(5).series();
    assert!(series.cpu.is_empty());
    assert!(series.network.is_empty());
}
