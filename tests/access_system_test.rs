use seat_access::clients::ClientError;
use seat_access::feedback::AlertKind;
use seat_access::framework::mock::{Frame, RecordingActuator, RecordingDisplay, ScriptedReader, ScriptedScan};
use seat_access::lifecycle::{AccessConfig, AccessSystem};
use seat_access::model::{AuthorizedEntry, Identity, ResourceIndex, ResourceStatus};
use std::time::Duration;

fn tag_a() -> Identity {
    "13 A3 50 11".parse().unwrap()
}

fn tag_b() -> Identity {
    "03 32 C0 0D".parse().unwrap()
}

fn tag_c() -> Identity {
    "DE AD BE EF".parse().unwrap()
}

/// Full end-to-end run of the reference scan sequence through the real controller task.
#[tokio::test(start_paused = true)]
async fn test_reference_sequence_through_system() {
    let config = AccessConfig::default();
    let reader = ScriptedReader::new([
        ScriptedScan::Tag(tag_a()),
        ScriptedScan::Tag(tag_b()),
        ScriptedScan::Tag(tag_a()),
        ScriptedScan::Tag(tag_c()),
    ]);
    let reader_handle = reader.handle();
    let actuator = RecordingActuator::new(2);
    let outputs = actuator.handle();

    let system = AccessSystem::start(&config, reader, actuator, RecordingDisplay::new())
        .expect("Failed to start system");

    // Virtual time: startup + 4 cycles fit well inside this
    tokio::time::sleep(Duration::from_secs(8)).await;
    assert_eq!(reader_handle.remaining(), 0);
    assert_eq!(reader_handle.sessions_ended(), 4);

    let snapshot = system.client.snapshot().await.expect("Failed to get snapshot");
    assert_eq!(snapshot.scans, 4);
    assert_eq!(
        snapshot.resources,
        vec![ResourceStatus::Free, ResourceStatus::Occupied(tag_b())]
    );
    assert_eq!(outputs.states(), vec![false, true]);
    assert_eq!(
        snapshot.log,
        vec![
            "System ready",
            "Seat 1 assigned",
            "Seat 2 assigned",
            "User has left Seat 1",
            "Access denied",
        ]
    );

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test(start_paused = true)]
async fn test_alert_visible_then_expires() {
    let config = AccessConfig::default();
    let reader = ScriptedReader::new([ScriptedScan::Tag(tag_c())]);
    let display = RecordingDisplay::new();
    let frames = display.handle();

    let system = AccessSystem::start(&config, reader, RecordingActuator::new(2), display).unwrap();

    // Startup self test (2 × 500 ms), first poll, then the scan
    tokio::time::sleep(Duration::from_millis(1500)).await;
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.alert.map(|a| a.kind), Some(AlertKind::Unauthorized));
    assert!(frames.frames().iter().any(|f| matches!(
        f,
        Frame::Alert { line1, .. } if line1 == "UNAUTHORIZED"
    )));

    // Well past the alert duration
    tokio::time::sleep(Duration::from_secs(5)).await;
    let snapshot = system.client.snapshot().await.unwrap();
    assert!(snapshot.alert.is_none());
    assert!(matches!(frames.last().unwrap(), Frame::Status { .. }));

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_status_requests() {
    let config = AccessConfig::default();
    let reader = ScriptedReader::new([ScriptedScan::Tag(tag_b())]);
    let system =
        AccessSystem::start(&config, reader, RecordingActuator::new(2), RecordingDisplay::new()).unwrap();

    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(
        system.client.status(ResourceIndex(1)).await,
        Ok(ResourceStatus::Occupied(tag_b()))
    );
    assert_eq!(system.client.status(ResourceIndex(0)).await, Ok(ResourceStatus::Free));
    assert_eq!(
        system.client.status(ResourceIndex(7)).await,
        Err(ClientError::UnknownResource(ResourceIndex(7)))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_conflict_on_shared_seat() {
    let config = AccessConfig {
        authorized: vec![
            AuthorizedEntry::new(tag_a(), ResourceIndex(0)),
            AuthorizedEntry::new(tag_b(), ResourceIndex(0)),
        ],
        ..AccessConfig::default()
    };
    let reader = ScriptedReader::new([ScriptedScan::Tag(tag_a()), ScriptedScan::Tag(tag_b())]);
    let actuator = RecordingActuator::new(2);
    let outputs = actuator.handle();
    let system = AccessSystem::start(&config, reader, actuator, RecordingDisplay::new()).unwrap();

    tokio::time::sleep(Duration::from_secs(4)).await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.resources[0], ResourceStatus::Occupied(tag_a()));
    assert_eq!(snapshot.alert.map(|a| a.kind), Some(AlertKind::AlreadyOccupied));
    assert_eq!(outputs.states(), vec![true, false]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_start() {
    let config = AccessConfig {
        authorized: vec![AuthorizedEntry::new(tag_a(), ResourceIndex(5))],
        ..AccessConfig::default()
    };
    let result = AccessSystem::start(
        &config,
        ScriptedReader::new(Vec::<ScriptedScan>::new()),
        RecordingActuator::new(2),
        RecordingDisplay::new(),
    );
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_every_client() {
    let system = AccessSystem::start(
        &AccessConfig::default(),
        ScriptedReader::new(Vec::<ScriptedScan>::new()),
        RecordingActuator::new(2),
        RecordingDisplay::new(),
    )
    .unwrap();
    let extra = system.client.clone();

    // The extra clone keeps the controller alive; drop it in the background
    let shutdown = tokio::spawn(system.shutdown());
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(extra.snapshot().await.is_ok());
    drop(extra);

    shutdown.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_frequent_queries_do_not_starve_polling() {
    let config = AccessConfig::default();
    let reader = ScriptedReader::new([ScriptedScan::Tag(tag_a())]);
    let reader_handle = reader.handle();
    let system =
        AccessSystem::start(&config, reader, RecordingActuator::new(2), RecordingDisplay::new()).unwrap();

    // Query twice per poll interval for 5 s
    let mut last = None;
    for _ in 0..500 {
        last = Some(system.client.snapshot().await.unwrap());
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(reader_handle.remaining(), 0);
    let snapshot = last.unwrap();
    assert_eq!(snapshot.scans, 1);
    assert_eq!(snapshot.resources[0], ResourceStatus::Occupied(tag_a()));

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_halt_still_debounces_the_tag() {
    let config = AccessConfig::default();
    let reader = ScriptedReader::new([ScriptedScan::HaltFails(tag_a()), ScriptedScan::Tag(tag_a())]);
    let reader_handle = reader.handle();
    let system =
        AccessSystem::start(&config, reader, RecordingActuator::new(2), RecordingDisplay::new()).unwrap();

    // Self test ends at 1000 ms, the first scan is dispatched right after;
    // the tag left in the field must not be read again within the debounce
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(reader_handle.remaining(), 1);
    assert_eq!(reader_handle.sessions_ended(), 1);

    // After the debounce the second presentation releases the seat
    tokio::time::sleep(Duration::from_secs(2)).await;
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.scans, 2);
    assert_eq!(snapshot.resources[0], ResourceStatus::Free);
    assert_eq!(
        &snapshot.log[1..],
        ["Seat 1 assigned", "User has left Seat 1"]
    );

    system.shutdown().await.unwrap();
}
