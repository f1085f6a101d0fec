//! End-to-end library flows against the real repositories and session gate.

use adcraft_application::{LibraryController, LibraryNotice, NoticeCallback};
use adcraft_core::creative::{CreativeForm, CreativeKind};
use adcraft_core::generation::{GenerationError, TextGenerator};
use adcraft_core::library::LibraryState;
use adcraft_core::session::UserIdentity;
use adcraft_infrastructure::{
    FileCreativeRepository, InMemoryCreativeRepository, LocalSessionGate, RestCreativeRepository,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Echoes the first line of the prompt so tests can tell outputs apart.
struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    fn model(&self) -> &str {
        "echo"
    }

    async fn generate(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        Ok(prompt.lines().next().unwrap_or_default().to_string())
    }
}

fn form(product: &str) -> CreativeForm {
    CreativeForm {
        industry: "Fitness".to_string(),
        product: product.to_string(),
        target_audience: "Runners".to_string(),
        tone: "energetic".to_string(),
        platform: "Instagram".to_string(),
        ..Default::default()
    }
}

async fn eventually(
    controller: &LibraryController,
    check: impl Fn(&LibraryState, Option<&str>) -> bool,
) {
    for _ in 0..200 {
        let state = controller.snapshot().await;
        let owner = controller.owner().await;
        if check(&state, owner.as_deref()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

#[tokio::test]
async fn file_backed_library_survives_new_controller() {
    let temp_dir = TempDir::new().unwrap();
    let user = UserIdentity::new("dana@example.com");

    let first = LibraryController::new(
        Arc::new(FileCreativeRepository::new(temp_dir.path())),
        Arc::new(EchoGenerator),
    );
    let copy = first
        .generate(Some(&user), CreativeKind::Copy, &form("Trail Shoes"))
        .await
        .unwrap();
    let campaign = first
        .generate(Some(&user), CreativeKind::Campaign, &form("Trail Shoes"))
        .await
        .unwrap();
    assert!(copy.record.confirmed && campaign.record.confirmed);

    let second = LibraryController::new(
        Arc::new(FileCreativeRepository::new(temp_dir.path())),
        Arc::new(EchoGenerator),
    );
    second.load(Some(&user)).await.unwrap();

    let records = second.records().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Campaign Strategy for Trail Shoes");
    assert_eq!(records[1].title, "Ad Copy for Trail Shoes");
    assert_eq!(records[1].tone, "energetic");
    assert_eq!(records[1].platform, "Instagram");
}

#[tokio::test]
async fn in_memory_library_is_scoped_per_user() {
    let repository = Arc::new(InMemoryCreativeRepository::new());
    let controller = LibraryController::new(repository.clone(), Arc::new(EchoGenerator));
    let erin = UserIdentity::new("erin");
    let finn = UserIdentity::new("finn");

    controller
        .generate(Some(&erin), CreativeKind::Visual, &form("Yoga Mat"))
        .await
        .unwrap();
    controller
        .generate(Some(&finn), CreativeKind::Copy, &form("Kettlebell"))
        .await
        .unwrap();

    assert_eq!(repository.len().await, 2);

    let records = controller.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].owner_id, "finn");

    controller.load(Some(&erin)).await.unwrap();
    let records = controller.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Visual Concepts for Yoga Mat");
}

#[tokio::test]
async fn session_watcher_follows_sign_in_switch_and_sign_out() {
    let repository = Arc::new(InMemoryCreativeRepository::new());
    let notices = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notices);
    let callback: NoticeCallback = Arc::new(move |notice| sink.lock().unwrap().push(notice));

    let seed = LibraryController::new(repository.clone(), Arc::new(EchoGenerator));
    let gina = UserIdentity::new("gina");
    seed.generate(Some(&gina), CreativeKind::Copy, &form("Water Bottle"))
        .await
        .unwrap();

    let controller = Arc::new(
        LibraryController::new(repository, Arc::new(EchoGenerator)).with_notice_callback(callback),
    );
    let gate = LocalSessionGate::new();
    let watcher = controller.watch_session(&gate);

    gate.sign_in(gina.clone()).unwrap();
    eventually(&controller, |state, _| state.len() == 1).await;

    gate.sign_in(UserIdentity::new("hank")).unwrap();
    eventually(&controller, |_, owner| owner == Some("hank")).await;
    assert!(controller.records().await.is_empty());

    gate.sign_out().unwrap();
    eventually(&controller, |_, owner| owner.is_none()).await;
    assert!(controller.records().await.is_empty());

    let resets = notices
        .lock()
        .unwrap()
        .iter()
        .filter(|notice| **notice == LibraryNotice::Reset)
        .count();
    assert!(resets >= 3);

    drop(gate);
    tokio::time::timeout(Duration::from_secs(1), watcher)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn watcher_loads_user_already_signed_in() {
    let temp_dir = TempDir::new().unwrap();
    let repository = Arc::new(FileCreativeRepository::new(temp_dir.path().join("creatives")));
    let ivy = UserIdentity::new("ivy");
    LibraryController::new(repository.clone(), Arc::new(EchoGenerator))
        .generate(Some(&ivy), CreativeKind::Campaign, &form("Protein Bar"))
        .await
        .unwrap();

    let gate = LocalSessionGate::with_persistence(temp_dir.path().join("session.toml")).unwrap();
    gate.sign_in(ivy).unwrap();

    let controller = Arc::new(LibraryController::new(repository, Arc::new(EchoGenerator)));
    let _watcher = controller.watch_session(&gate);

    eventually(&controller, |state, _| state.len() == 1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_generates_are_all_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let user = UserIdentity::new("jules");
    let controller = Arc::new(LibraryController::new(
        Arc::new(FileCreativeRepository::new(temp_dir.path())),
        Arc::new(EchoGenerator),
    ));

    let tasks: Vec<_> = (0..12)
        .map(|i| {
            let controller = Arc::clone(&controller);
            let user = user.clone();
            tokio::spawn(async move {
                controller
                    .generate(Some(&user), CreativeKind::Copy, &form(&format!("Bottle {i}")))
                    .await
            })
        })
        .collect();
    for task in tasks {
        let outcome = task.await.unwrap().unwrap();
        assert!(outcome.listed && outcome.record.confirmed);
    }

    let state = controller.snapshot().await;
    assert_eq!(state.len(), 12);
    assert!(!state.is_generating);

    let reloaded = LibraryController::new(
        Arc::new(FileCreativeRepository::new(temp_dir.path())),
        Arc::new(EchoGenerator),
    );
    reloaded.load(Some(&user)).await.unwrap();
    assert_eq!(reloaded.records().await.len(), 12);
}

#[tokio::test]
async fn unanswered_rest_store_does_not_leave_generation_running() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let notices = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notices);
    let callback: NoticeCallback = Arc::new(move |notice| sink.lock().unwrap().push(notice));
    let repository = RestCreativeRepository::new(format!("http://{addr}"), "creatives", "k")
        .with_timeout(Duration::from_millis(200));
    let controller =
        LibraryController::new(Arc::new(repository), Arc::new(EchoGenerator)).with_notice_callback(callback);

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        controller.generate(Some(&UserIdentity::new("kai")), CreativeKind::Visual, &form("Tent")),
    )
    .await
    .expect("generate should finish once the store times out")
    .unwrap();

    assert!(!outcome.record.confirmed);
    assert!(!controller.is_generating().await);
    assert!(
        notices
            .lock()
            .unwrap()
            .iter()
            .any(|notice| matches!(notice, LibraryNotice::PersistenceFailed { .. }))
    );
}
