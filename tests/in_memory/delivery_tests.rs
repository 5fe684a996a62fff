//! Delivery across several destination channels.

use crate::in_memory::helpers::{Bridge, TestResult, player, text_channel};
use rstest::rstest;
use switchboard::forwarding::{
    domain::{ForwardPayload, ForwardRequest},
    ports::SendError,
    services::ForwardOutcome,
};
use switchboard::platform::{ChannelId, ChannelPermission, DestinationChannel, GuildId};

const DOCUMENT: &str = r"
    [channels.global]
    destinations = [1, 2, 3]
";

fn chat(message: &str) -> ForwardRequest {
    ForwardRequest::new(ForwardPayload::Chat {
        message: message.to_owned(),
    })
    .with_player(player("Steve"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_channel_is_reported_and_isolated() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([text_channel(1, 10), text_channel(2, 10), text_channel(3, 10)])?;
    bridge
        .sender
        .fail_channel(ChannelId::new(2), SendError::Rejected("slow mode".to_owned()))?;

    let report = bridge.pipeline.process(&chat("hello")).await;

    assert_eq!(report.delivered_count(), 2);
    assert_eq!(bridge.sent_to(1)?, vec!["**Steve** » hello".to_owned()]);
    assert!(bridge.sent_to(2)?.is_empty());
    assert_eq!(bridge.sent_to(3)?, vec!["**Steve** » hello".to_owned()]);
    let reports = bridge.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports.first().is_some_and(|line| line.contains("slow mode")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_permissions_skip_without_reporting() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    let thread = DestinationChannel::new(ChannelId::new(3), GuildId::new(10), "relay-thread")
        .in_thread(ChannelId::new(1))
        .with_permissions([ChannelPermission::ViewChannel, ChannelPermission::SendMessages]);
    let hidden = DestinationChannel::new(ChannelId::new(2), GuildId::new(10), "hidden");
    bridge.register([text_channel(1, 10), hidden, thread])?;

    let report = bridge.pipeline.process(&chat("hello")).await;

    assert_eq!(report.delivered_count(), 1);
    assert!(bridge.reporter.reports().is_empty());
    assert!(bridge.sent_to(2)?.is_empty());
    assert!(bridge.sent_to(3)?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nothing_delivered_is_undelivered() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([DestinationChannel::new(
        ChannelId::new(1),
        GuildId::new(10),
        "hidden",
    )])?;

    let report = bridge.pipeline.process(&chat("hello")).await;

    let outcome = report
        .channels()
        .first()
        .map(|forward| forward.result.clone())
        .ok_or("global should be reported")??;
    assert_eq!(outcome, ForwardOutcome::Undelivered);
    assert!(bridge.bus.delivered()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delivered_event_lists_only_successful_sends() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([text_channel(1, 10), text_channel(2, 10), text_channel(3, 10)])?;
    bridge
        .sender
        .fail_channel(ChannelId::new(3), SendError::Rejected("gone".to_owned()))?;
    let mut events = bridge.bus.subscribe();

    bridge.pipeline.process(&chat("hello")).await;

    let event = events.try_recv()?;
    let channels: Vec<_> = event
        .cluster()
        .messages()
        .iter()
        .map(|message| message.channel_id().get())
        .collect();
    assert_eq!(channels.len(), 2);
    assert!(!channels.contains(&3));
    assert_eq!(event.guild_id(), Some(GuildId::new(10)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn broken_event_bus_does_not_undo_delivery() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    bridge.register([text_channel(1, 10)])?;
    bridge.bus.fail_delivered(true);

    let report = bridge.pipeline.process(&chat("hello")).await;

    let outcome = report
        .channels()
        .first()
        .map(|forward| forward.result.clone())
        .ok_or("global should be reported")??;
    let ForwardOutcome::Delivered(cluster) = outcome else {
        return Err(format!("expected a delivery, got {outcome:?}").into());
    };
    assert_eq!(cluster.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_failures_leave_one_delivery_in_the_cluster() -> TestResult {
    let bridge = Bridge::from_toml(DOCUMENT)?;
    let hidden = DestinationChannel::new(ChannelId::new(1), GuildId::new(10), "hidden")
        .with_permissions([ChannelPermission::ViewChannel]);
    bridge.register([hidden, text_channel(2, 10), text_channel(3, 10)])?;
    bridge.sender.fail_channel(
        ChannelId::new(2),
        SendError::transport(std::io::Error::other("connection reset")),
    )?;

    let report = bridge.pipeline.process(&chat("hello")).await;

    let delivered = bridge.bus.delivered()?;
    let [event] = delivered.as_slice() else {
        return Err(format!("expected one delivered event, got {}", delivered.len()).into());
    };
    let channels: Vec<_> = event
        .cluster()
        .messages()
        .iter()
        .map(|message| message.channel_id())
        .collect();
    assert_eq!(channels, vec![ChannelId::new(3)]);
    assert_eq!(report.delivered_count(), 1);
    assert_eq!(report.failures().count(), 0);
    assert_eq!(bridge.reporter.reports().len(), 1);
    Ok(())
}
