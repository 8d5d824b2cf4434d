//! Integration tests driving the peer clients against stub HTTP peers.

use std::collections::HashSet;
use std::sync::Arc;

use time::macros::datetime;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use poker_clubs_back::{
    config::Settings,
    dao::{
        memory::InMemoryDirectory,
        models::{GameRecord, GameServer, PlayerRecord, PlayerStatus, PlayerUpdateKind},
    },
    peers::{
        botrunner::BotRunnerClient,
        build_http_client,
        game_server::GameServerClient,
        locator::PeerLocator,
        scheduler::SchedulerClient,
        timer::{TimerClient, TimerPurpose},
    },
};

fn enabled_settings() -> Settings {
    Settings {
        notify_peers: true,
        ..Settings::default()
    }
}

fn game_record() -> GameRecord {
    GameRecord {
        id: 1,
        game_code: "CG-AB12".to_string(),
    }
}

fn game_client(directory: Arc<InMemoryDirectory>, settings: &Settings) -> GameServerClient {
    let http = build_http_client().unwrap();
    GameServerClient::new(http, PeerLocator::new(directory), settings)
}

#[tokio::test]
async fn new_game_announcement_returns_table_status() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/new-game"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"tableStatus": "OPEN"})),
        )
        .mount(&peer)
        .await;

    let client = game_client(Arc::new(InMemoryDirectory::default()), &enabled_settings());
    let server = GameServer {
        id: 1,
        url: peer.uri(),
    };

    let status = client
        .announce_new_game(&game_record(), &server, false)
        .await
        .unwrap();
    assert_eq!(status.as_deref(), Some("OPEN"));

    let requests = peer.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["gameId"], 1);
    assert_eq!(body["gameCode"], "CG-AB12");
    assert_eq!(body["isRestart"], false);
}

#[tokio::test]
async fn new_game_announcement_surfaces_http_status() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/new-game"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&peer)
        .await;

    let client = game_client(Arc::new(InMemoryDirectory::default()), &enabled_settings());
    let server = GameServer {
        id: 1,
        url: peer.uri(),
    };

    let err = client
        .announce_new_game(&game_record(), &server, false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"), "error was: {err}");
}

#[tokio::test]
async fn disabled_gate_makes_every_call_a_silent_success() {
    let peer = MockServer::start().await;

    let directory = Arc::new(InMemoryDirectory::default());
    directory.assign_server(
        1,
        GameServer {
            id: 1,
            url: peer.uri(),
        },
    );

    let settings = Settings {
        notify_peers: false,
        timer_url: peer.uri(),
        scheduler_url: peer.uri(),
        botrunner_url: peer.uri(),
        ..Settings::default()
    };
    let http = build_http_client().unwrap();
    let game = GameServerClient::new(
        http.clone(),
        PeerLocator::new(directory.clone()),
        &settings,
    );
    let timer = TimerClient::new(http.clone(), &settings);
    let scheduler = SchedulerClient::new(http.clone(), &settings);
    let botrunner = BotRunnerClient::new(http, &settings);

    let server = GameServer {
        id: 1,
        url: peer.uri(),
    };
    let ack = game
        .announce_new_game(&game_record(), &server, false)
        .await
        .unwrap();
    assert_eq!(ack, None);
    game.resume_game(1).await;
    game.end_game(1).await;
    assert_eq!(game.current_hand_log(1).await.unwrap(), None);
    timer
        .start(
            1,
            2,
            TimerPurpose::BuyinTimeout,
            datetime!(2024-05-01 00:00 UTC),
        )
        .await
        .unwrap();
    timer.cancel(1, 2, TimerPurpose::BuyinTimeout).await.unwrap();
    scheduler.schedule_post_processing(42).await.unwrap();
    botrunner.fill_seats("club", 1, "CG-AB12", false).await.unwrap();
    botrunner.register_tournament(5, 9).await;
    botrunner.end_tournament(5).await;

    assert!(peer.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn resume_game_swallows_peer_failures() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resume-game"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&peer)
        .await;

    let directory = Arc::new(InMemoryDirectory::default());
    directory.assign_server(
        1,
        GameServer {
            id: 1,
            url: peer.uri(),
        },
    );

    let client = game_client(directory, &enabled_settings());
    client.resume_game(1).await;

    let requests = peer.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn resume_game_skips_silently_when_no_peer_is_assigned() {
    let peer = MockServer::start().await;

    let client = game_client(Arc::new(InMemoryDirectory::default()), &enabled_settings());
    client.resume_game(1).await;

    assert!(peer.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn player_status_change_posts_tagged_payload() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/player-update"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&peer)
        .await;

    let directory = Arc::new(InMemoryDirectory::default());
    directory.assign_server(
        1,
        GameServer {
            id: 1,
            url: peer.uri(),
        },
    );

    let player = PlayerRecord {
        id: 17,
        uuid: Uuid::new_v4(),
        name: "lily".to_string(),
    };
    let client = game_client(directory, &enabled_settings());
    client
        .notify_player_status_changed(
            &game_record(),
            &player,
            PlayerStatus::Playing,
            PlayerUpdateKind::NewBuyin,
            350.0,
            4,
        )
        .await;

    let requests = peer.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["type"], "PlayerUpdate");
    assert_eq!(body["gameId"], 1);
    assert_eq!(body["playerId"], 17);
    assert_eq!(body["playerUuid"], player.uuid.to_string());
    assert_eq!(body["seatNo"], 4);
    assert_eq!(body["status"], "PLAYING");
    assert_eq!(body["newUpdate"], "NEW_BUYIN");
}

#[tokio::test]
async fn player_config_update_propagates_failure() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/player-config-update"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&peer)
        .await;

    let directory = Arc::new(InMemoryDirectory::default());
    directory.assign_server(
        1,
        GameServer {
            id: 1,
            url: peer.uri(),
        },
    );

    let client = game_client(directory, &enabled_settings());
    let update = serde_json::json!({"gameId": 1, "playerId": 17, "muckLosingHand": true});
    let err = client
        .notify_player_config_update(1, &update)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"), "error was: {err}");
}

#[tokio::test]
async fn current_hand_log_requires_an_assigned_peer() {
    let client = game_client(Arc::new(InMemoryDirectory::default()), &enabled_settings());

    let err = client.current_hand_log(1).await.unwrap_err();
    assert!(
        err.to_string().contains("no game server assigned"),
        "error was: {err}"
    );
}

#[tokio::test]
async fn current_hand_log_returns_peer_payload() {
    let peer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current-hand-log"))
        .and(query_param("game-id", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"handNum": 42})),
        )
        .mount(&peer)
        .await;

    let directory = Arc::new(InMemoryDirectory::default());
    directory.assign_server(
        1,
        GameServer {
            id: 1,
            url: peer.uri(),
        },
    );

    let client = game_client(directory, &enabled_settings());
    let log = client.current_hand_log(1).await.unwrap();
    assert_eq!(log, Some(serde_json::json!({"handNum": 42})));
}

#[tokio::test]
async fn timer_start_sends_epoch_seconds() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-timer"))
        .and(query_param("game-id", "1"))
        .and(query_param("player-id", "2"))
        .and(query_param("purpose", "BUYIN_TIMEOUT"))
        .and(query_param("timeout-at", "1714521600"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        timer_url: peer.uri(),
        ..Settings::default()
    };
    let timer = TimerClient::new(build_http_client().unwrap(), &settings);

    timer
        .start(
            1,
            2,
            TimerPurpose::BuyinTimeout,
            datetime!(2024-05-01 00:00 UTC),
        )
        .await
        .unwrap();

    assert_eq!(peer.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn repeated_start_with_same_key_targets_one_logical_timer() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-timer"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        timer_url: peer.uri(),
        ..Settings::default()
    };
    let timer = TimerClient::new(build_http_client().unwrap(), &settings);

    let expires_at = datetime!(2024-05-01 00:00 UTC);
    timer
        .start(1, 2, TimerPurpose::BuyinTimeout, expires_at)
        .await
        .unwrap();
    timer
        .start(1, 2, TimerPurpose::BuyinTimeout, expires_at)
        .await
        .unwrap();

    // The peer upserts on (game-id, player-id, purpose): two calls, one key.
    let requests = peer.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let distinct_keys: HashSet<String> = requests
        .iter()
        .map(|request| {
            let mut pairs: Vec<(String, String)> = request
                .url
                .query_pairs()
                .filter(|(name, _)| name != "timeout-at")
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect();
            pairs.sort();
            format!("{pairs:?}")
        })
        .collect();
    assert_eq!(distinct_keys.len(), 1);
}

#[tokio::test]
async fn timer_cancel_propagates_peer_failure() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancel-timer"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        timer_url: peer.uri(),
        ..Settings::default()
    };
    let timer = TimerClient::new(build_http_client().unwrap(), &settings);

    let err = timer
        .cancel(1, 2, TimerPurpose::BreakTimeout)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"), "error was: {err}");
}

#[tokio::test]
async fn payload_timer_wraps_payload_as_string() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-timer"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        timer_url: peer.uri(),
        ..Settings::default()
    };
    let timer = TimerClient::new(build_http_client().unwrap(), &settings);

    let payload = serde_json::json!({"purpose": "TOURNAMENT_LEVEL", "tournamentId": 3});
    timer
        .start_with_payload(&payload, datetime!(2024-05-01 00:00 UTC))
        .await
        .unwrap();

    let requests = peer.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let inner: serde_json::Value =
        serde_json::from_str(body["payload"].as_str().unwrap()).unwrap();
    assert_eq!(inner, payload);
}

#[tokio::test]
async fn scheduler_schedules_post_processing() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/schedule-game-post-process"))
        .and(query_param("game-id", "42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        scheduler_url: peer.uri(),
        ..Settings::default()
    };
    let scheduler = SchedulerClient::new(build_http_client().unwrap(), &settings);

    scheduler.schedule_post_processing(42).await.unwrap();
    assert_eq!(peer.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn scheduler_failure_propagates_to_the_caller() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/schedule-game-post-process"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        scheduler_url: peer.uri(),
        ..Settings::default()
    };
    let scheduler = SchedulerClient::new(build_http_client().unwrap(), &settings);

    let err = scheduler.schedule_post_processing(42).await.unwrap_err();
    assert!(err.to_string().contains("503"), "error was: {err}");
}

#[tokio::test]
async fn fill_seats_carries_the_demo_flag() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/join-human-game"))
        .and(query_param("club-code", "C-7"))
        .and(query_param("game-id", "1"))
        .and(query_param("game-code", "CG-AB12"))
        .and(query_param("demo-game", "1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        botrunner_url: peer.uri(),
        ..Settings::default()
    };
    let botrunner = BotRunnerClient::new(build_http_client().unwrap(), &settings);

    botrunner.fill_seats("C-7", 1, "CG-AB12", true).await.unwrap();
    assert_eq!(peer.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn tournament_bot_calls_are_advisory() {
    let peer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&peer)
        .await;

    let settings = Settings {
        notify_peers: true,
        botrunner_url: peer.uri(),
        ..Settings::default()
    };
    let botrunner = BotRunnerClient::new(build_http_client().unwrap(), &settings);

    // Neither call returns an error to the caller.
    botrunner.register_tournament(5, 9).await;
    botrunner.end_tournament(5).await;

    let requests = peer.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["tournamentId"], 5);
    assert_eq!(body["botCount"], 9);
}
