
use game_core::FeedbackPolicy;
use game_server::render::CLEAR;
use game_server::session::SessionReply;
use test_helpers::*;

const BLANK_ROW: &str = "[ ][ ][ ][ ][ ]\n";

/// What a terminal shows once every frame of `reply` has been drawn
fn final_screen(reply: &SessionReply) -> String {
    let joined = reply.frames.concat();
    match joined.rfind(CLEAR) {
        Some(index) => joined[index + CLEAR.len()..].to_string(),
        None => joined,
    }
}

#[tokio::test]
async fn test_begin_draws_empty_board() {
    let setup = TestGameServerSetup::new().await;
    let (session, reply) = setup.begin(PLAYER).await;

    assert!(!reply.closed);
    assert!(!session.is_closed());
    assert_eq!(session.player_key(), PLAYER);
    assert_eq!(reply.frames.len(), 1);
    assert!(reply.frames[0].starts_with(CLEAR));
    assert_eq!(reply.frames[0].matches(BLANK_ROW).count(), 6);
}

#[tokio::test]
async fn test_rejected_guess_warns_under_board() {
    let setup = TestGameServerSetup::new().await;
    let replies = setup.play_session(PLAYER, &["qwert", "toolong"]).await;

    let invalid = &replies[0];
    assert!(!invalid.closed);
    assert_eq!(invalid.frames.len(), 1);

    let screen = final_screen(invalid);
    assert_eq!(screen.matches(BLANK_ROW).count(), 6);
    assert!(screen.ends_with("\x1b[31minvalid word \"qwert\"\x1b[0m\n"));

    assert!(final_screen(&replies[1]).contains("word must be 5 letters"));
}

#[tokio::test]
async fn test_winning_session_shows_statistics_and_closes() {
    let setup = TestGameServerSetup::new().await;
    let (mut session, _) = setup.begin(PLAYER).await;

    let reply = session.handle_line("teeth", fixed_now()).await.unwrap();
    assert!(!reply.closed);
    assert_eq!(reply.frames[0].matches(BLANK_ROW).count(), 5);

    let reply = session.handle_line("  WATER ", fixed_now()).await.unwrap();
    assert!(reply.closed);
    assert!(session.is_closed());
    assert_eq!(reply.frames.len(), 1);

    let screen = final_screen(&reply);
    assert!(screen.contains("\x1b[32m[w]\x1b[0m"));
    assert!(screen.contains("\x1b[32mWinner!\x1b[0m\n"));
    assert!(screen.find("Winner!") < screen.find("Statistics"));
    assert!(screen.contains("played..................1\n"));
    assert!(screen.contains("win %...................100\n"));
    assert!(screen.contains("current streak..........1\n"));
    assert!(screen.contains("    2...................1\n"));
    assert!(screen.ends_with("Next Wordle in 12 hours 0 mins\n"));

    // The finishing guess is stamped with the session clock
    assert_eq!(session.game().finished_at(), Some(fixed_now()));

    // Nothing more is accepted once closed
    let after = session.handle_line("crane", fixed_now()).await.unwrap();
    assert!(after.closed);
    assert!(after.frames.is_empty());
    assert_eq!(session.game().guesses().len(), 2);
}

#[tokio::test]
async fn test_losing_session_reveals_answer() {
    let setup = TestGameServerSetup::new().await;
    let misses = ["teeth", "salad", "grape", "chili", "crane", "slate"];
    let replies = setup.play_session(PLAYER, &misses).await;

    assert!(replies[..5].iter().all(|reply| !reply.closed));

    let last = &replies[5];
    assert!(last.closed);
    assert_eq!(last.frames.len(), 1);

    let screen = final_screen(last);
    assert!(!screen.contains(BLANK_ROW));
    assert!(screen.contains(&format!("\x1b[31m{}\x1b[0m\n", ANSWER)));
    assert!(screen.find(ANSWER) < screen.find("Statistics"));
    assert!(screen.contains("played..................1\n"));
    assert!(screen.contains("win %...................0\n"));
    assert!(screen.contains("max streak..............0\n"));
}

#[tokio::test]
async fn test_reconnect_after_finishing_shows_result_only() {
    let setup = TestGameServerSetup::new().await;
    setup.play_session(PLAYER, &["teeth", ANSWER]).await;

    let (session, reply) = setup.begin(PLAYER).await;
    assert!(reply.closed);
    assert!(session.is_closed());
    assert_eq!(reply.frames.len(), 1);
    let screen = final_screen(&reply);
    assert!(!screen.contains("Winner!"));
    assert!(screen.contains("played..................1\n"));
    assert_eq!(session.game().guesses().len(), 2);
}

#[tokio::test]
async fn test_reconnect_mid_game_resumes_board() {
    let setup = TestGameServerSetup::new().await;
    setup.play_session(PLAYER, &["crane", "slate"]).await;

    let (mut session, reply) = setup.begin(PLAYER).await;
    assert!(!reply.closed);
    assert_eq!(reply.frames[0].matches(BLANK_ROW).count(), 4);

    let reply = session.handle_line(ANSWER, fixed_now()).await.unwrap();
    assert!(reply.closed);
    assert!(final_screen(&reply).contains("    3...................1\n"));
    assert_eq!(setup.repository.count_games(PLAYER).await.unwrap(), 1);
}

#[tokio::test]
async fn test_counted_policy_changes_board() {
    // "treat" has two t's; "water" has one
    let membership = TestGameServerSetup::new().await;
    let replies = membership.play_session(PLAYER, &["treat"]).await;
    assert_eq!(replies[0].frames[0].matches("\x1b[33m[t]").count(), 2);

    let counted = TestGameServerSetup::with_policy(FeedbackPolicy::Counted).await;
    let replies = counted.play_session(PLAYER, &["treat"]).await;
    assert_eq!(replies[0].frames[0].matches("\x1b[33m[t]").count(), 1);
}
