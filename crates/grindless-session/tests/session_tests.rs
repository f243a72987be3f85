// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap, sign-in and logout behavior against a mock API and an
//! in-memory store.

use std::sync::Arc;
use std::time::Duration;

use grindless_core::{AccountInfo, ApiResponse, GrindlessError};
use grindless_session::cache::{BILLING_KEY, LAST_UPDATED_KEY, PROFILE_KEY};
use grindless_session::token::ACCESS_TOKEN_KEY;
use grindless_session::{
    BootstrapOutcome, CachedSession, CallbackOutcome, Destination, FRESHNESS_WINDOW_MS, Session, SessionState,
};
use grindless_storage::MemoryStore;
use grindless_test_utils::fixtures::{ok_account_info, sample_account, sample_billing};
use grindless_test_utils::{FailingStore, ManualClock, MockApi, Reply};
use tracing_test::traced_test;

const NOW: i64 = 1_750_000_000_000;

struct Fixture {
    store: Arc<MemoryStore>,
    api: MockApi,
    clock: ManualClock,
    session: Session,
}

fn fixture_with(store: MemoryStore, api: MockApi) -> Fixture {
    let store = Arc::new(store);
    let clock = ManualClock::at(NOW);
    let session = Session::new(store.clone(), Arc::new(api.clone()), Arc::new(clock.clone()));
    Fixture {
        store,
        api,
        clock,
        session,
    }
}

fn fixture(store: MemoryStore) -> Fixture {
    fixture_with(store, MockApi::new())
}

/// Store holding a token and a cache written `age_ms` before [`NOW`].
fn seeded_store(age_ms: i64) -> MemoryStore {
    MemoryStore::with_entries([
        (ACCESS_TOKEN_KEY.to_string(), "tok-1".to_string()),
        (
            PROFILE_KEY.to_string(),
            serde_json::to_string(&sample_account(1)).unwrap(),
        ),
        (
            BILLING_KEY.to_string(),
            serde_json::to_string(&sample_billing(40)).unwrap(),
        ),
        (LAST_UPDATED_KEY.to_string(), (NOW - age_ms).to_string()),
    ])
}

async fn assert_signed_out(f: &Fixture) {
    let state = f.session.context().snapshot();
    assert!(!state.authenticated);
    assert!(state.access_token.is_none());
    assert!(state.profile.is_none());
    assert!(state.billing.is_none());
    assert!(f.store.is_empty().await, "store: {:?}", f.store.snapshot().await);
}

// --- bootstrap ---

#[tokio::test]
async fn fresh_cache_skips_network() {
    let f = fixture(seeded_store(60_000));

    let outcome = f.session.bootstrap().await;

    assert_eq!(outcome, BootstrapOutcome::CacheHit);
    assert_eq!(f.api.total_calls(), 0);
    let state = f.session.context().snapshot();
    assert!(state.authenticated && state.checked);
    assert_eq!(state.access_token.as_deref(), Some("tok-1"));
    assert_eq!(state.profile, Some(sample_account(1)));
    assert_eq!(state.credits(), Some(40));
}

#[tokio::test]
async fn stale_cache_with_token_refreshes_once() {
    let f = fixture(seeded_store(FRESHNESS_WINDOW_MS));
    f.api.push_my_info(ok_account_info(2, 75)).await;

    let outcome = f.session.bootstrap().await;

    assert_eq!(outcome, BootstrapOutcome::Refreshed);
    assert_eq!(f.api.my_info_calls(), 1);
    assert_eq!(f.api.seen_tokens().await, vec!["tok-1"]);

    let state = f.session.context().snapshot();
    assert!(state.authenticated && state.checked);
    assert_eq!(state.profile.as_ref().map(|a| a.id), Some(2));

    let cached = f.session.cache().read().await.unwrap();
    assert_eq!(cached.account, Some(sample_account(2)));
    assert_eq!(cached.billing.map(|b| b.credits), Some(75));
    assert_eq!(cached.last_updated, Some(NOW));
}

#[tokio::test]
async fn partial_cache_with_token_refreshes() {
    let store = seeded_store(10);
    store_remove(&store, BILLING_KEY).await;
    let f = fixture(store);
    f.api.push_my_info(ok_account_info(1, 10)).await;

    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::Refreshed);
    assert_eq!(f.api.my_info_calls(), 1);
}

async fn store_remove(store: &MemoryStore, key: &str) {
    use grindless_core::KeyValueStore;
    store.remove(key).await.unwrap();
}

#[tokio::test]
async fn future_timestamp_is_not_trusted() {
    let f = fixture(seeded_store(-1_000));
    f.api.push_my_info(ok_account_info(1, 10)).await;

    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::Refreshed);
    assert_eq!(f.api.my_info_calls(), 1);
}

#[tokio::test]
#[traced_test]
async fn error_envelope_clears_session() {
    let f = fixture(seeded_store(FRESHNESS_WINDOW_MS * 2));
    f.api
        .push_my_info(ApiResponse::<AccountInfo>::error("Invalid token"))
        .await;

    let outcome = f.session.bootstrap().await;

    assert_eq!(
        outcome,
        BootstrapOutcome::Rejected {
            reason: "Invalid token".into()
        }
    );
    assert!(f.session.context().is_checked());
    assert_signed_out(&f).await;
    assert!(logs_contain("stored session rejected"));
}

#[tokio::test]
async fn transport_error_clears_session() {
    let f = fixture(seeded_store(FRESHNESS_WINDOW_MS * 2));
    f.api
        .push_my_info(Reply::TransportError("connection refused".into()))
        .await;

    let outcome = f.session.bootstrap().await;

    assert!(matches!(outcome, BootstrapOutcome::Rejected { .. }));
    assert_eq!(f.api.my_info_calls(), 1);
    assert_signed_out(&f).await;
}

#[tokio::test]
async fn malformed_payloads_clear_session() {
    let malformed = [
        ApiResponse {
            success: grindless_core::Success::Ok,
            message: Some("ok".into()),
            data: None,
        },
        ApiResponse::ok(
            "ok",
            AccountInfo {
                account: Some(sample_account(1)),
                billing: None,
            },
        ),
        ApiResponse::ok(
            "ok",
            AccountInfo {
                account: None,
                billing: Some(sample_billing(1)),
            },
        ),
        ok_account_info(0, 10),
        ok_account_info(-4, 10),
    ];

    for payload in malformed {
        let f = fixture(seeded_store(FRESHNESS_WINDOW_MS * 2));
        f.api.push_my_info(payload.clone()).await;

        let outcome = f.session.bootstrap().await;

        assert!(
            matches!(outcome, BootstrapOutcome::Rejected { .. }),
            "payload {payload:?} gave {outcome:?}"
        );
        assert_eq!(f.api.my_info_calls(), 1);
        assert!(f.session.context().is_checked());
        assert_signed_out(&f).await;
    }
}

#[tokio::test]
async fn malformed_response_error_clears_session() {
    let f = fixture(seeded_store(FRESHNESS_WINDOW_MS * 2));
    f.api.push_my_info(Reply::Malformed("not json".into())).await;

    assert!(matches!(
        f.session.bootstrap().await,
        BootstrapOutcome::Rejected { .. }
    ));
    assert_signed_out(&f).await;
}

#[tokio::test]
async fn no_token_no_cache_is_anonymous() {
    let f = fixture(MemoryStore::new());

    let outcome = f.session.bootstrap().await;

    assert_eq!(outcome, BootstrapOutcome::Anonymous);
    assert_eq!(f.api.total_calls(), 0);
    assert_eq!(
        f.session.context().snapshot(),
        SessionState {
            checked: true,
            ..SessionState::default()
        }
    );
}

#[tokio::test]
async fn fresh_cache_without_token_restores_profile() {
    let store = seeded_store(1_000);
    store_remove(&store, ACCESS_TOKEN_KEY).await;
    let f = fixture(store);

    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::CacheHit);
    assert_eq!(f.api.total_calls(), 0);
    let state = f.session.context().snapshot();
    assert!(state.authenticated);
    assert!(state.checked);
    assert_eq!(state.access_token, None);
    assert_eq!(state.profile.map(|a| a.id), Some(1));
}

#[tokio::test]
async fn empty_token_is_anonymous() {
    let f = fixture(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "")]));
    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::Anonymous);
    assert_eq!(f.api.total_calls(), 0);
}

#[tokio::test]
async fn bootstrap_runs_once() {
    let f = fixture(seeded_store(FRESHNESS_WINDOW_MS * 2));
    f.api.push_my_info(ok_account_info(1, 10)).await;

    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::Refreshed);
    f.clock.advance(FRESHNESS_WINDOW_MS * 10);
    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::Refreshed);
    assert_eq!(f.api.my_info_calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bootstraps_share_one_call() {
    let api = MockApi::new().with_latency(Duration::from_millis(50));
    let f = fixture_with(seeded_store(FRESHNESS_WINDOW_MS * 2), api);
    f.api.push_my_info(ok_account_info(1, 10)).await;
    f.api.push_my_info(ok_account_info(1, 10)).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = f.session.clone();
            tokio::spawn(async move { session.bootstrap().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), BootstrapOutcome::Refreshed);
    }
    assert_eq!(f.api.my_info_calls(), 1);
}

#[tokio::test]
async fn subscribers_observe_checked() {
    let f = fixture(MemoryStore::new());
    let mut rx = f.session.context().subscribe();

    f.session.bootstrap().await;

    rx.changed().await.unwrap();
    assert!(rx.borrow().checked);
}

#[tokio::test]
#[traced_test]
async fn storage_failure_degrades_to_anonymous() {
    let api = MockApi::new();
    let session = Session::new(
        Arc::new(FailingStore),
        Arc::new(api.clone()),
        Arc::new(ManualClock::at(NOW)),
    );

    assert_eq!(session.bootstrap().await, BootstrapOutcome::Anonymous);
    assert!(session.context().is_checked());
    assert_eq!(api.total_calls(), 0);
    assert!(logs_contain("failed to read access token"));
}

// --- sign-in ---

#[tokio::test]
async fn google_login_stores_token() {
    let f = fixture(seeded_store(1_000));
    f.api
        .push_exchange(ApiResponse::ok("Logged in", "tok-new".to_string()))
        .await;

    let outcome = f.session.complete_google_login("4/0Abc").await;

    assert!(matches!(outcome, CallbackOutcome::SignedIn));
    assert_eq!(outcome.destination(), Destination::Launchpad);
    assert_eq!(
        f.session.tokens().get().await.unwrap().as_deref(),
        Some("tok-new")
    );
    assert_eq!(f.session.context().access_token().as_deref(), Some("tok-new"));
    // Cached profile belongs to the previous token.
    assert_eq!(f.session.cache().read().await.unwrap(), CachedSession::default());
}

#[tokio::test]
async fn empty_code_makes_no_call() {
    let f = fixture(MemoryStore::new());

    let outcome = f.session.complete_google_login("  ").await;

    assert!(matches!(outcome, CallbackOutcome::NoCode));
    assert_eq!(outcome.destination(), Destination::Launchpad);
    assert_eq!(f.api.exchange_calls(), 0);
}

#[tokio::test]
async fn rejected_exchange_goes_to_landing() {
    let f = fixture(MemoryStore::new());
    f.api
        .push_exchange(ApiResponse::<String>::error("Invalid code"))
        .await;

    let outcome = f.session.complete_google_login("bad").await;

    assert_eq!(outcome.destination(), Destination::Landing);
    match outcome {
        CallbackOutcome::Failed(GrindlessError::Rejected { message }) => {
            assert_eq!(message, "Invalid code")
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(f.store.is_empty().await);
}

#[tokio::test]
async fn transport_failure_goes_to_landing() {
    let f = fixture(MemoryStore::new());
    f.api
        .push_exchange(Reply::TransportError("timeout".into()))
        .await;

    let outcome = f.session.complete_google_login("code").await;

    assert!(matches!(outcome, CallbackOutcome::Failed(ref e) if e.is_transport()));
    assert_eq!(outcome.destination(), Destination::Landing);
}

#[tokio::test]
async fn missing_token_is_malformed() {
    let f = fixture(MemoryStore::new());
    f.api
        .push_exchange(ApiResponse::<String> {
            success: grindless_core::Success::Ok,
            message: Some("ok".into()),
            data: None,
        })
        .await;

    let outcome = f.session.complete_google_login("code").await;
    assert!(matches!(
        outcome,
        CallbackOutcome::Failed(GrindlessError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn empty_token_is_not_stored() {
    let f = fixture(MemoryStore::new());
    f.api.push_exchange(ApiResponse::ok("ok", String::new())).await;

    let outcome = f.session.complete_google_login("code").await;

    assert!(matches!(outcome, CallbackOutcome::EmptyToken));
    assert_eq!(outcome.destination(), Destination::Launchpad);
    assert!(f.store.is_empty().await);
}

// --- logout ---

#[tokio::test]
async fn logout_after_cache_hit_clears_everything() {
    let f = fixture(seeded_store(1_000));
    assert_eq!(f.session.bootstrap().await, BootstrapOutcome::CacheHit);

    let destination = f.session.logout().await.unwrap();

    assert_eq!(destination, Destination::Landing);
    assert_signed_out(&f).await;
    assert!(f.session.context().is_checked());
}

#[tokio::test]
async fn logout_without_session_is_fine() {
    let f = fixture(MemoryStore::new());
    assert_eq!(f.session.logout().await.unwrap(), Destination::Landing);
    assert_signed_out(&f).await;
}

#[tokio::test]
async fn logout_leaves_unrelated_keys() {
    let store = seeded_store(1_000);
    {
        use grindless_core::KeyValueStore;
        store.set("theme", "dark").await.unwrap();
    }
    let f = fixture(store);

    f.session.logout().await.unwrap();

    let left = f.store.snapshot().await;
    assert_eq!(left.len(), 1);
    assert_eq!(left.get("theme").map(String::as_str), Some("dark"));
}

#[tokio::test]
async fn logout_resets_state_even_when_storage_fails() {
    let session = Session::new(
        Arc::new(FailingStore),
        Arc::new(MockApi::new()),
        Arc::new(ManualClock::at(NOW)),
    );
    session.context().update(|s| {
        s.authenticated = true;
        s.access_token = Some("t".into());
    });

    assert!(session.logout().await.is_err());
    let state = session.context().snapshot();
    assert!(!state.authenticated);
    assert!(state.access_token.is_none());
}
