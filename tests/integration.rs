// SPDX-License-Identifier: MPL-2.0
use std::time::Duration;
use tempfile::tempdir;
use toast_queue::config::{self, QueueConfig};
use toast_queue::{Notification, NotificationQueue, SharedQueue, Variant};
use tokio::time::Instant;

#[test]
fn add_dismiss_lifecycle_scenario() {
    let mut queue = NotificationQueue::new();
    let mut surface = queue.subscribe();

    // First toast with defaults.
    let k1 = queue.add(Notification::new("Saved")).unwrap();
    {
        let snapshot = surface.borrow_and_update();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].key(), k1);
        assert_eq!(snapshot[0].title(), "Saved");
    }

    // Sticky error toast appended behind it.
    let k2 = queue
        .add(Notification::error("Failed").never_expires())
        .unwrap();
    assert_ne!(k1, k2);
    {
        let snapshot = surface.borrow_and_update();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].key(), k1);
        assert_eq!(snapshot[1].key(), k2);
        assert_eq!(snapshot[1].variant(), Variant::Error);
    }

    queue.dismiss(k1);
    {
        let snapshot = surface.borrow_and_update();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].key(), k2);
    }

    // Stale key: no change, no error.
    queue.dismiss(k1);
    assert!(!surface.has_changed().unwrap());

    queue.dismiss(k2);
    assert!(surface.borrow_and_update().is_empty());
}

#[tokio::test(start_paused = true)]
async fn shared_queue_expires_after_five_seconds_by_default() {
    let shared = SharedQueue::spawn(NotificationQueue::new());
    let mut surface = shared.subscribe();

    let started = Instant::now();
    shared.add(Notification::new("Saved")).unwrap();
    surface.borrow_and_update();

    surface.changed().await.unwrap();
    assert!(surface.borrow_and_update().is_empty());
    assert_eq!(started.elapsed(), Duration::from_millis(5000));
}

#[tokio::test(start_paused = true)]
async fn hover_pause_and_immediate_resume_keeps_total_wall_time() {
    let shared = SharedQueue::spawn(NotificationQueue::new());
    let mut surface = shared.subscribe();

    let started = Instant::now();
    let key = shared
        .add(Notification::new("Read me").expire_after(Duration::from_millis(5000)))
        .unwrap();
    surface.borrow_and_update();

    // Hover at the 2000 ms mark and leave again immediately: the
    // remaining 3000 ms count from the resume, so expiry still lands at
    // 5000 ms total wall time.
    tokio::time::advance(Duration::from_millis(2000)).await;
    shared.pause(key);
    shared.resume(key);

    surface.changed().await.unwrap();
    assert!(surface.borrow_and_update().is_empty());
    assert_eq!(started.elapsed(), Duration::from_millis(5000));
}

#[tokio::test(start_paused = true)]
async fn hover_pause_delays_expiry_by_the_hover_duration() {
    let shared = SharedQueue::spawn(NotificationQueue::new());
    let mut surface = shared.subscribe();

    let started = Instant::now();
    let key = shared
        .add(Notification::new("Read me").expire_after(Duration::from_millis(5000)))
        .unwrap();
    surface.borrow_and_update();

    tokio::time::advance(Duration::from_millis(2000)).await;
    shared.pause(key);
    tokio::time::advance(Duration::from_millis(4000)).await;
    shared.resume(key);

    surface.changed().await.unwrap();
    assert!(surface.borrow_and_update().is_empty());
    // 2000 running + 4000 hovering + remaining 3000.
    assert_eq!(started.elapsed(), Duration::from_millis(9000));
}

#[tokio::test(start_paused = true)]
async fn configured_default_expiry_applies_after_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let written = QueueConfig {
        default_expire_ms: Some(1234),
        pause_on_hover: Some(true),
    };
    config::save_to_path(&written, &path).expect("Failed to save config");
    let loaded = config::load_from_path(&path).expect("Failed to load config");

    let mut queue = NotificationQueue::with_config(&loaded);
    queue.add(Notification::new("Configured")).unwrap();

    let deadline = queue.next_deadline().expect("timer should be running");
    assert_eq!(deadline, Instant::now() + Duration::from_millis(1234));
}
