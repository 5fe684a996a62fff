//! Then steps for delivery isolation BDD scenarios.

use super::world::DeliveryWorld;
use rstest_bdd_macros::then;
use switchboard::mention::domain::ZERO_WIDTH_SPACE;
use switchboard::platform::ChannelId;

fn sent_to(world: &DeliveryWorld, id: u64) -> Result<Vec<String>, eyre::Report> {
    world
        .sender
        .sent_to(ChannelId::new(id))
        .map_err(|err| eyre::eyre!("read sent messages: {err}"))
}

#[then(r#"channel {id:u64} received "{content}""#)]
fn channel_received(world: &DeliveryWorld, id: u64, content: String) -> Result<(), eyre::Report> {
    let sent = sent_to(world, id)?;
    if sent != vec![content.clone()] {
        return Err(eyre::eyre!(
            "expected channel {id} to receive '{content}', got {sent:?}"
        ));
    }
    Ok(())
}

#[then("channel {id:u64} received nothing")]
fn channel_received_nothing(world: &DeliveryWorld, id: u64) -> Result<(), eyre::Report> {
    let sent = sent_to(world, id)?;
    if !sent.is_empty() {
        return Err(eyre::eyre!("expected channel {id} to stay empty, got {sent:?}"));
    }
    Ok(())
}

#[then("channel {id:u64} received a defused mass mention")]
fn channel_received_defused(world: &DeliveryWorld, id: u64) -> Result<(), eyre::Report> {
    let sent = sent_to(world, id)?;
    let defused = format!("@{ZERO_WIDTH_SPACE}everyone");
    let Some(content) = sent.first() else {
        return Err(eyre::eyre!("expected channel {id} to receive a message"));
    };
    if !content.contains(&defused) || content.contains("@everyone") {
        return Err(eyre::eyre!("expected a defused mention, got '{content}'"));
    }
    Ok(())
}

#[then("{count:usize} delivery failure was reported")]
fn failure_reported(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    failures_reported(world, count)
}

#[then("{count:usize} delivery failures were reported")]
fn failures_reported(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    let reported = world.reporter.count();
    if reported != count {
        return Err(eyre::eyre!("expected {count} reported failures, got {reported}"));
    }
    Ok(())
}

#[then("the delivered event lists {count:usize} messages")]
fn delivered_event_lists(world: &DeliveryWorld, count: usize) -> Result<(), eyre::Report> {
    let delivered = world
        .bus
        .delivered()
        .map_err(|err| eyre::eyre!("read delivered events: {err}"))?;
    let [event] = delivered.as_slice() else {
        return Err(eyre::eyre!(
            "expected one delivered event, got {}",
            delivered.len()
        ));
    };
    if event.cluster().len() != count {
        return Err(eyre::eyre!(
            "expected {count} delivered messages, got {}",
            event.cluster().len()
        ));
    }
    Ok(())
}

#[then("no delivered event was published")]
fn no_delivered_event(world: &DeliveryWorld) -> Result<(), eyre::Report> {
    let delivered = world
        .bus
        .delivered()
        .map_err(|err| eyre::eyre!("read delivered events: {err}"))?;
    if !delivered.is_empty() {
        return Err(eyre::eyre!("expected no delivered event, got {}", delivered.len()));
    }
    Ok(())
}
