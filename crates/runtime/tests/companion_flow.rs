use std::sync::Arc;
use std::time::Duration;

use companion_runtime::{
    Companion, ErrorKind, InMemoryPage, InMemorySelection, InMemoryStore, KeyValueStore,
    KnownPage, PageSnapshot, PageStorage, PendingAction, PopupCommand, PopupEffect, Request,
    Response, StatusLevel,
};
use flame_core::{Catalog, LineKind, Pick, Stat, StatVector};
use serde_json::json;

type TestCompanion =
    Companion<Arc<InMemoryStore>, Arc<InMemoryPage>, Arc<InMemorySelection>, Arc<InMemorySelection>>;

fn board_catalog() -> Catalog {
    Catalog::canonical(|line| match line {
        LineKind::Str | LineKind::Dex | LineKind::Int | LineKind::Luk => vec![11, 22, 33],
        LineKind::ArmorAtt | LineKind::ArmorMatt | LineKind::AllStatsPercent => vec![1, 2, 3],
        _ => vec![6, 12, 18],
    })
}

async fn companion() -> TestCompanion {
    let page = Arc::new(InMemoryPage::with_entries(PageSnapshot::from([(
        "equips".to_string(),
        "{}".to_string(),
    )])));
    let board = Arc::new(InMemorySelection::new(board_catalog()));

    let mut companion = Companion::builder(Arc::new(InMemoryStore::new()), page, board.clone(), board)
        .apply_pause(Duration::from_millis(10))
        .build();
    companion.init().await.expect("companion init");
    companion
}

#[tokio::test(start_paused = true)]
async fn flame_solver_request_applies_first_solution() {
    let mut companion = companion().await;

    let request: Request = serde_json::from_value(json!({
        "action": "flameSolver",
        "data": { "STR": 28, "DEX": 6, "ATT": 2 }
    }))
    .unwrap();
    let response = companion.handle(request).await;

    let Response::Solved { solution } = response else {
        panic!("expected a solution, got {response:?}");
    };
    assert_eq!(
        solution.total(),
        StatVector::default()
            .with(Stat::Str, 28)
            .with(Stat::Dex, 6)
            .with(Stat::Att, 2)
    );
    assert_eq!(companion.flames().sink().current().unwrap(), solution.picks());
    assert_eq!(
        companion.status().latest().map(|m| m.level),
        Some(StatusLevel::Success)
    );
}

#[tokio::test(start_paused = true)]
async fn zero_and_unreachable_targets_do_not_touch_the_board() {
    let mut companion = companion().await;

    let response = companion
        .handle(Request::FlameSolver { data: StatVector::ZERO })
        .await;
    assert!(matches!(response, Response::Failed { .. }));

    let response = companion
        .handle(Request::FlameSolver {
            data: StatVector::default().with(Stat::Str, 5),
        })
        .await;
    assert_eq!(response, Response::NoSolution);

    assert!(companion.flames().sink().history().unwrap().is_empty());
    assert!(
        companion
            .status()
            .iter()
            .all(|m| m.level == StatusLevel::Error)
    );
}

#[tokio::test]
async fn local_storage_requests_read_and_replace_the_page() {
    let mut companion = companion().await;

    let Response::LocalStorage { data } = companion.handle(Request::GetLocalStorage).await else {
        panic!("expected page entries");
    };
    assert!(data.contains_key("equips"));

    let replacement = PageSnapshot::from([("job".to_string(), "kanna".to_string())]);
    let response = companion
        .handle(Request::SetLocalStorage { data: replacement.clone() })
        .await;
    assert_eq!(response, Response::Ok);
    assert_eq!(companion.characters().page().entries().unwrap(), replacement);

    companion
        .handle(Request::ToggleFlamesHeight { enable: true })
        .await;
    assert!(companion.flames_expanded());
}

#[tokio::test]
async fn destructive_popup_commands_wait_for_confirm() {
    let mut companion = companion().await;
    companion.save_character("Hero").await.unwrap();

    assert_eq!(
        companion.popup(PopupCommand::Open(KnownPage::Flames)).await.unwrap(),
        PopupEffect::OpenUrl("https://www.whackybeanz.com/calc/equips/flames")
    );

    assert_eq!(
        companion.popup(PopupCommand::ResetAll).await.unwrap(),
        PopupEffect::Armed(PendingAction::ResetAll)
    );
    assert_eq!(companion.characters().characters().len(), 1);

    assert_eq!(
        companion.popup(PopupCommand::Cancel).await.unwrap(),
        PopupEffect::Cancelled(PendingAction::ResetAll)
    );
    assert_eq!(
        companion.status().latest().map(|m| m.text.as_str()),
        Some("Reset cancelled.")
    );

    companion.popup(PopupCommand::ResetAll).await.unwrap();
    assert_eq!(
        companion.popup(PopupCommand::Confirm).await.unwrap(),
        PopupEffect::Executed(PendingAction::ResetAll)
    );
    assert!(companion.characters().characters().is_empty());
    assert!(companion.characters().store().dump().unwrap().is_empty());

    assert_eq!(
        companion.popup(PopupCommand::Confirm).await.unwrap(),
        PopupEffect::NothingPending
    );
}

#[tokio::test]
async fn clear_page_empties_snapshot_and_reloads() {
    let mut companion = companion().await;

    companion.popup(PopupCommand::ClearPage).await.unwrap();
    assert!(!companion.characters().page().entries().unwrap().is_empty());

    companion.popup(PopupCommand::Confirm).await.unwrap();
    assert!(companion.characters().page().entries().unwrap().is_empty());
    assert_eq!(companion.characters().page().reload_count(), 1);
}

#[tokio::test]
async fn save_buttons_auto_update_the_current_character() {
    let mut companion = companion().await;

    assert!(companion.on_button_click("Save to Hat").await.unwrap().is_none());

    let hero = companion.save_character("Hero").await.unwrap();
    companion
        .characters()
        .page()
        .set_item("equips", "{\"hat\":\"arcane\"}")
        .unwrap();

    assert!(companion.on_button_click("Cancel").await.unwrap().is_none());
    let updated = companion
        .on_button_click(" Save to Hat ")
        .await
        .unwrap()
        .expect("current character is updated");

    assert_eq!(updated.id, hero.id);
    assert_eq!(
        updated.data.get("equips").map(String::as_str),
        Some("{\"hat\":\"arcane\"}")
    );
    assert_eq!(
        companion.status().latest().map(|m| m.text.as_str()),
        Some("Auto-saved equipment data to \"Hero\"")
    );
}

#[tokio::test]
async fn failures_become_error_statuses() {
    let mut companion = companion().await;
    companion.save_character("Hero").await.unwrap();

    let err = companion.save_character("HERO").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateName);
    let latest = companion.status().latest().unwrap();
    assert_eq!(latest.level, StatusLevel::Error);
    assert_eq!(latest.text, "A character with this name already exists.");

    let err = companion.import("{ not json").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImportFormat);
    assert_eq!(companion.characters().characters().len(), 1);
}

#[tokio::test]
async fn restore_backup_reloads_characters() {
    let mut companion = companion().await;
    companion.save_character("Old").await.unwrap();

    let backup = json!({
        "whackybeanz-characters": [{
            "id": "char_1_backup000",
            "name": "Restored",
            "dateSaved": "2024-05-01T12:00:00.000Z",
            "data": { "job": "hero" }
        }],
        "whackybeanz-current-character": "char_1_backup000"
    });
    companion.restore_backup(&backup.to_string()).await.unwrap();

    let names: Vec<&str> = companion
        .characters()
        .characters()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Restored"]);
    assert_eq!(
        companion.characters().current().map(|c| c.name.as_str()),
        Some("Restored")
    );
    assert_eq!(
        companion
            .characters()
            .store()
            .get_one("whackybeanz-current-character")
            .await
            .unwrap(),
        Some(json!("char_1_backup000"))
    );
}

#[tokio::test(start_paused = true)]
async fn selecting_a_new_solution_replaces_board_state() {
    let mut companion = companion().await;

    companion
        .solve(&StatVector::default().with(Stat::Luk, 33))
        .await
        .unwrap();
    assert_eq!(
        companion.flames().sink().current().unwrap(),
        vec![Pick::new(LineKind::Luk, 33)]
    );

    companion
        .solve(&StatVector::default().with(Stat::Matt, 3))
        .await
        .unwrap();
    assert_eq!(
        companion.flames().sink().current().unwrap(),
        vec![Pick::new(LineKind::ArmorMatt, 3)]
    );
}
