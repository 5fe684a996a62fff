//! Forwarding driven by TOML bridge configuration.

use crate::in_memory::helpers::{Bridge, TestResult, player, text_channel};
use rstest::rstest;
use switchboard::forwarding::{
    domain::{ForwardPayload, ForwardRequest},
    services::{ForwardOutcome, NoOpReason},
};

const DOCUMENT: &str = r#"
    [channels.global]
    destinations = [1]
    ignores = { player_names = ["Herobrine"] }

    [channels.global.chat]
    template = "<%player_name%> %message%"

    [channels.global.join]
    template = "+ %player_display_name%"
    first_join_template = "Welcome %player_display_name%!"

    [channels.global.death]
    enabled = false

    [channels.global.server_switch]
    template = "%player_name%: %from_server% -> %to_server%"

    [channels.global.award.template]
    content = "%player_name% earned %award_title%"
    webhook_username = "%player_display_name% (awards)"
"#;

fn bridge() -> TestResult<Bridge> {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([text_channel(1, 10)])?;
    Ok(bridge)
}

#[rstest]
#[case(ForwardPayload::Chat { message: "hi".to_owned() }, "<Steve> hi")]
#[case(ForwardPayload::Join { message: None, first_join: false }, "+ Steve")]
#[case(ForwardPayload::Join { message: None, first_join: true }, "Welcome Steve!")]
#[case(
    ForwardPayload::ServerSwitch { from: "lobby".to_owned(), to: "survival".to_owned() },
    "Steve: lobby -> survival"
)]
#[tokio::test(flavor = "multi_thread")]
async fn configured_templates_render(
    #[case] payload: ForwardPayload,
    #[case] expected: &str,
) -> TestResult {
    let bridge = bridge()?;

    let report = bridge
        .pipeline
        .process(&ForwardRequest::new(payload).with_player(player("Steve")))
        .await;

    assert_eq!(report.delivered_count(), 1);
    assert_eq!(bridge.sent_to(1)?, vec![expected.to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_templates_set_webhook_identity() -> TestResult {
    let bridge = bridge()?;
    let request = ForwardRequest::new(ForwardPayload::Award {
        title: "Monster Hunter".to_owned(),
        message: None,
    })
    .with_player(player("Steve").with_display_name("Steve the Brave"));

    bridge.pipeline.process(&request).await;

    let sent = bridge.sender.sent()?;
    let (_, message) = sent.first().ok_or("award should be sent")?;
    assert_eq!(message.content(), "Steve earned Monster Hunter");
    assert_eq!(
        message.webhook_username(),
        Some("Steve the Brave (awards)")
    );
    assert_eq!(message.webhook_avatar_url(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_kinds_are_skipped() -> TestResult {
    let bridge = bridge()?;
    let request = ForwardRequest::new(ForwardPayload::Death {
        message: "Steve fell".to_owned(),
    })
    .with_player(player("Steve"));

    let report = bridge.pipeline.process(&request).await;

    let outcome = report
        .channels()
        .first()
        .map(|forward| forward.result.clone())
        .ok_or("global should be reported")??;
    assert_eq!(outcome, ForwardOutcome::Skipped(NoOpReason::Disabled));
    assert!(bridge.sent_to(1)?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ignored_names_match_case_insensitively() -> TestResult {
    let bridge = bridge()?;
    let request = ForwardRequest::new(ForwardPayload::Chat {
        message: "boo".to_owned(),
    })
    .with_player(player("HEROBRINE"));

    let report = bridge.pipeline.process(&request).await;

    assert_eq!(report.delivered_count(), 0);
    assert!(bridge.sent_to(1)?.is_empty());
    Ok(())
}
