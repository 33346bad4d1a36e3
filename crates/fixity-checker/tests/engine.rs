mod common;

use std::collections::BTreeSet;
use std::time::Duration;

use common::{MemoryStorage, seed, sha256_hex, sha512_hex};
use fixity_checker::{Checker, RunOptions};
use fixity_inventory::{Call, InstanceStatus, MemoryInventory, NewCheck};
use fixity_verify::DigestAlgorithm;

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

#[tokio::test]
async fn matching_digest_is_reported_ok() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "A", "a.bin", EMPTY_SHA256);
    storage.insert("a.bin", b"");
    let options = RunOptions::default().algorithm(DigestAlgorithm::Sha256);

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.ok, 1);
    assert!(summary.is_clean());
    assert_eq!(inventory.calls(), vec![
        Call::ListObjectInstances,
        Call::StorageLocation("A".into()),
        Call::Object("o-A".into()),
        Call::UpdateObjectInstance {
            id:     "A".into(),
            status: InstanceStatus::Ok,
        },
        Call::CreateObjectInstanceCheck(NewCheck::passed("A")),
    ]);
    assert_eq!(inventory.checks()[0].message, "");
}

#[tokio::test]
async fn open_failure_is_reported_without_hashing() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "B", "/archive/b.bin", &sha512_hex(b"b"));
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.access_failures, 1);
    assert_eq!(inventory.instance("B").unwrap().status, InstanceStatus::Error);

    let checks = inventory.checks();
    assert_eq!(checks.len(), 1);
    assert!(checks[0].error);
    assert!(checks[0].message.contains("/archive/b.bin"));
    assert_eq!(storage.opened(), 0);
    assert_eq!(storage.reads(), 0);
}

#[tokio::test]
async fn mismatch_is_reported_and_run_continues() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "C", "c.bin", "abc123");
    seed(&inventory, "D", "d.bin", &sha512_hex(b"dee"));
    storage.insert("c.bin", b"see");
    storage.insert("d.bin", b"dee");
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.mismatches, 1);
    assert_eq!(summary.ok, 1);
    assert_eq!(inventory.instance("C").unwrap().status, InstanceStatus::Error);
    assert_eq!(inventory.instance("D").unwrap().status, InstanceStatus::Ok);

    let checks = inventory.checks();
    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0].instance_id, "C");
    assert!(checks[0].error);
    assert!(checks[0].message.contains("c.bin"));
    assert!(checks[0].message.contains("abc123"));
    assert_eq!(checks[1], NewCheck::passed("D"));
}

#[tokio::test]
async fn enumeration_failure_ends_run_quietly() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "A", "a.bin", EMPTY_SHA256);
    inventory.fail_listing();
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert!(summary.enumeration_failed);
    assert_eq!(summary.processed, 0);
    assert_eq!(inventory.calls(), vec![Call::ListObjectInstances]);
    assert!(inventory.checks().is_empty());
}

#[tokio::test]
async fn fault_in_the_middle_does_not_stop_the_batch() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    for i in 0..5 {
        let path = format!("obj-{i}.bin");
        let data = format!("payload {i}");
        seed(&inventory, &format!("i{i}"), &path, &sha512_hex(data.as_bytes()));
        if i != 2 {
            storage.insert(&path, data.as_bytes());
        }
    }
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.enumerated, 5);
    assert_eq!(summary.processed, 5);
    assert_eq!(summary.ok, 4);
    assert_eq!(summary.failed, 1);

    let checks = inventory.checks();
    let ids: Vec<_> = checks.iter().map(|check| check.instance_id.as_str()).collect();
    assert_eq!(ids, ["i0", "i1", "i2", "i3", "i4"]);
    assert!(checks[2].error);
    assert!(checks.iter().filter(|check| check.error).count() == 1);
}

#[tokio::test]
async fn every_opened_stream_is_closed_once() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "ok", "ok.bin", &sha512_hex(b"fine"));
    seed(&inventory, "bad", "bad.bin", &sha512_hex(b"expected"));
    seed(&inventory, "broken", "broken.bin", &sha512_hex(b"whole"));
    seed(&inventory, "gone", "gone.bin", &sha512_hex(b"gone"));
    storage.insert("ok.bin", b"fine");
    storage.insert("bad.bin", b"tampered");
    storage.insert_failing("broken.bin", b"who");
    let options = RunOptions::default().buffer_size(2);

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.processed, 4);
    assert_eq!(storage.opened(), 3);
    assert_eq!(storage.closed(), 3);
    assert_eq!(inventory.checks().len(), 4);
}

#[tokio::test]
async fn read_failure_mid_stream_is_an_access_failure() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "E", "vfs://mem/e.bin", &sha512_hex(b"entire file"));
    storage.insert_failing("vfs://mem/e.bin", b"entire");
    let options = RunOptions::default().buffer_size(4);

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.access_failures, 1);
    assert!(storage.reads() > 1);
    assert_eq!(storage.closed(), 1);
    let check = &inventory.checks()[0];
    assert!(check.error);
    assert!(check.message.contains("vfs://mem/e.bin"));
    assert!(check.message.contains("device read error"));
}

#[tokio::test]
async fn resolution_failure_is_still_reported() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    common::seed_with_connection(&inventory, "R", "r.bin", &sha512_hex(b"r"), "not json");
    storage.insert("r.bin", b"r");
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.resolution_failures, 1);
    assert_eq!(storage.opened(), 0);
    assert_eq!(inventory.instance("R").unwrap().status, InstanceStatus::Error);
    let check = &inventory.checks()[0];
    assert!(check.error);
    assert!(check.message.contains("r.bin"));
}

#[tokio::test]
async fn missing_object_is_a_resolution_failure() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    inventory.insert_instance(
        fixity_inventory::ObjectInstance {
            id: "orphan".into(),
            object_id: "nobody".into(),
            path: "orphan.bin".into(),
            ..Default::default()
        },
        fixity_inventory::StorageLocationDescriptor {
            connection: common::CONNECTION.into(),
            ..Default::default()
        },
    );
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.resolution_failures, 1);
    assert_eq!(inventory.checks().len(), 1);
}

#[tokio::test]
async fn failed_status_write_keeps_audit_record() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "A", "a.bin", &sha512_hex(b"a"));
    seed(&inventory, "B", "b.bin", &sha512_hex(b"b"));
    storage.insert("a.bin", b"a");
    storage.insert("b.bin", b"b");
    inventory.fail_update_for("A");
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.report_failures, 1);
    assert_eq!(summary.ok, 2);
    assert!(!summary.is_clean());
    assert_eq!(inventory.checks(), vec![NewCheck::passed("A"), NewCheck::passed("B")]);
    assert_eq!(inventory.instance("A").unwrap().status, InstanceStatus::Unknown);
    assert_eq!(inventory.instance("B").unwrap().status, InstanceStatus::Ok);
}

#[tokio::test]
async fn failed_audit_write_keeps_status_update() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "A", "a.bin", &sha512_hex(b"a"));
    storage.insert("a.bin", b"a");
    inventory.fail_check_for("A");
    let options = RunOptions::default();

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.report_failures, 1);
    assert!(inventory.checks().is_empty());
    assert_eq!(inventory.instance("A").unwrap().status, InstanceStatus::Ok);
}

#[tokio::test]
async fn concurrent_run_reports_every_instance_once() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    for i in 0..20 {
        let path = format!("c{i}.bin");
        let data = vec![i as u8; 1000 + i];
        let expected = if i % 5 == 0 { sha256_hex(&data) } else { sha512_hex(&data) };
        seed(&inventory, &format!("c{i}"), &path, &expected);
        storage.insert(&path, &data);
    }
    let options = RunOptions::default().concurrency(4).buffer_size(64);

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.processed, 20);
    assert_eq!(summary.ok, 16);
    assert_eq!(summary.mismatches, 4);

    let checks = inventory.checks();
    assert_eq!(checks.len(), 20);
    let ids: BTreeSet<_> = checks.iter().map(|check| check.instance_id.clone()).collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(storage.opened(), storage.closed());
}

#[tokio::test]
async fn stalled_read_times_out() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "S", "slow.bin", &sha512_hex(b""));
    storage.insert_stalled("slow.bin");
    let options = RunOptions::default().read_timeout(Duration::from_millis(50));

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.access_failures, 1);
    assert_eq!(storage.closed(), 1);
    let check = &inventory.checks()[0];
    assert!(check.message.contains("slow.bin"));
    assert!(check.message.contains("timed out"));
}

#[tokio::test]
async fn expired_run_deadline_skips_unstarted_instances() {
    let inventory = MemoryInventory::new();
    let storage = MemoryStorage::new();
    seed(&inventory, "A", "a.bin", &sha512_hex(b"a"));
    seed(&inventory, "B", "b.bin", &sha512_hex(b"b"));
    let options = RunOptions::default().run_timeout(Some(Duration::ZERO));

    let summary = Checker::new(&inventory, &storage, &options).run().await;

    assert_eq!(summary.enumerated, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.processed, 0);
    assert!(inventory.checks().is_empty());
}
