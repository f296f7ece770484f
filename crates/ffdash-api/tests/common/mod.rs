//! Shared helpers for the API end-to-end tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ffdash_api::{create_router, AppState};
use ffdash_core::Store;
use rust_xlsxwriter::{Workbook, Worksheet};
use tokio::net::TcpListener;

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub store: Arc<Store>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start a server around an empty store
    pub async fn start() -> Self {
        let store = Arc::new(Store::open_in_memory().expect("Failed to open store"));
        Self::start_with_state(AppState::new(store)).await
    }

    /// Start a server with custom state
    pub async fn start_with_state(state: AppState) -> Self {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");

        let store = state.store_arc();
        let router = create_router(state);
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client");

        Self {
            addr,
            client,
            store,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET a path and decode the JSON body, asserting 200
    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed");
        assert_eq!(response.status(), 200, "GET {}", path);
        response.json().await.expect("invalid JSON")
    }

    /// POST a workbook as the `excelFile` multipart field
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("excelFile", part);
        self.client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await
            .expect("upload failed")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// =============================================================================
// Workbook fixtures
// =============================================================================

/// One team's side of a game: year, week, team, opponent, points,
/// opp_points, result, season_type, coach, opp_coach, pair
pub type Game = (
    i64,
    i64,
    &'static str,
    &'static str,
    f64,
    f64,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

pub const WEEKLY_HEADERS: [&str; 11] = [
    "Year",
    "Week",
    "Team",
    "Opponent",
    "Points",
    "Opp_Points",
    "Result",
    "Season_Type",
    "Coach",
    "Opp_Coach",
    "Pair",
];

/// X beats Y 100-90 in week 1 of 2023, both sides
pub const X_BEATS_Y: [Game; 2] = [
    (2023, 1, "A", "B", 100.0, 90.0, "W", "Regular", "X", "Y", "AB1"),
    (2023, 1, "B", "A", 90.0, 100.0, "L", "Regular", "Y", "X", "AB1"),
];

/// A few seasons of games, including a playoff game and a tie
pub const LEAGUE: [Game; 10] = [
    (2022, 1, "A", "B", 120.5, 99.5, "W", "Regular", "X", "Y", "22-1-AB"),
    (2022, 1, "B", "A", 99.5, 120.5, "L", "Regular", "Y", "X", "22-1-AB"),
    (2022, 2, "A", "C", 80.0, 80.0, "T", "Regular", "X", "Z", "22-2-AC"),
    (2022, 2, "C", "A", 80.0, 80.0, "T", "Regular", "Z", "X", "22-2-AC"),
    (2023, 2, "B", "C", 101.0, 99.0, "W", "Regular", "Y", "Z", "23-2-BC"),
    (2023, 2, "C", "B", 99.0, 101.0, "L", "Regular", "Z", "Y", "23-2-BC"),
    (2023, 1, "A", "C", 110.0, 70.0, "W", "Regular", "X", "Z", "23-1-AC"),
    (2023, 1, "C", "A", 70.0, 110.0, "L", "Regular", "Z", "X", "23-1-AC"),
    (2023, 15, "A", "B", 60.0, 150.0, "L", "Playoff", "X", "Y", "23-15-AB"),
    (2023, 15, "B", "A", 150.0, 60.0, "W", "Playoff", "Y", "X", "23-15-AB"),
];

fn write_row(sheet: &mut Worksheet, row: u32, game: &Game) {
    let (year, week, team, opponent, points, opp_points, result, season, coach, opp_coach, pair) =
        *game;
    sheet.write_number(row, 0, year as f64).unwrap();
    sheet.write_number(row, 1, week as f64).unwrap();
    sheet.write_string(row, 2, team).unwrap();
    sheet.write_string(row, 3, opponent).unwrap();
    sheet.write_number(row, 4, points).unwrap();
    sheet.write_number(row, 5, opp_points).unwrap();
    sheet.write_string(row, 6, result).unwrap();
    sheet.write_string(row, 7, season).unwrap();
    sheet.write_string(row, 8, coach).unwrap();
    sheet.write_string(row, 9, opp_coach).unwrap();
    sheet.write_string(row, 10, pair).unwrap();
}

/// Build an xlsx workbook in memory
///
/// `headers` lets a test use the lowercase spellings; `lookup` adds a
/// `coach_lookup` sheet when present.
pub fn workbook_bytes(
    headers: &[&str; 11],
    games: &[Game],
    lookup: Option<&[(&str, &str)]>,
) -> Vec<u8> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("weekly_results").unwrap();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (i, game) in games.iter().enumerate() {
            write_row(sheet, i as u32 + 1, game);
        }
    }
    if let Some(lookup) = lookup {
        let sheet = workbook.add_worksheet();
        sheet.set_name("coach_lookup").unwrap();
        sheet.write_string(0, 0, "Roster_Name").unwrap();
        sheet.write_string(0, 1, "Canonical_Coach").unwrap();
        for (i, (roster, coach)) in lookup.iter().enumerate() {
            sheet.write_string(i as u32 + 1, 0, *roster).unwrap();
            sheet.write_string(i as u32 + 1, 1, *coach).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}
