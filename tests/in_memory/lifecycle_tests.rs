//! Server lifecycle and player-less forwards.

use crate::in_memory::helpers::{Bridge, TestResult, player, text_channel};
use rstest::rstest;
use switchboard::forwarding::{
    domain::{ForwardPayload, ForwardRequest, GameChannelName, MessageKind},
    services::NoOpReason,
};

const DOCUMENT: &str = r#"
    [channels.global]
    destinations = [1]

    [channels.global.start]
    template = "Server up in %game_channel%"
"#;

#[rstest]
#[case(ForwardPayload::Start, "Server up in global")]
#[case(ForwardPayload::Stop, ":octagonal_sign: **Server has stopped**")]
#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_forwards_need_no_player(
    #[case] payload: ForwardPayload,
    #[case] expected: &str,
) -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([text_channel(1, 10)])?;

    let report = bridge.pipeline.process(&ForwardRequest::new(payload)).await;

    assert_eq!(report.delivered_count(), 1);
    assert_eq!(bridge.sent_to(1)?, vec![expected.to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_game_channel_is_a_no_op() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([text_channel(1, 10)])?;
    let request = ForwardRequest::new(ForwardPayload::Chat {
        message: "hi".to_owned(),
    })
    .with_player(player("Steve"))
    .in_channel(GameChannelName::new("trade")?);

    let report = bridge.pipeline.process(&request).await;

    assert_eq!(report.kind(), MessageKind::Chat);
    assert_eq!(report.skip_reason(), Some(NoOpReason::ChannelNotConfigured));
    assert!(bridge.sent_to(1)?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_configuration_forwards_nothing() -> TestResult {
    let bridge = Bridge::from_toml("")?;

    let report = bridge.pipeline.process(&ForwardRequest::new(ForwardPayload::Start)).await;

    assert_eq!(report.skip_reason(), Some(NoOpReason::NoChannelsConfigured));
    Ok(())
}
