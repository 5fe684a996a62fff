//! Given steps for delivery isolation BDD scenarios.

use super::world::{DeliveryWorld, channel};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchboard::forwarding::{
    domain::{ChannelConfig, GameChannelName},
    ports::SendError,
};
use switchboard::platform::{ChannelId, ChannelPermission};

const POSTING: [ChannelPermission; 2] =
    [ChannelPermission::ViewChannel, ChannelPermission::SendMessages];

#[given(r#"a game channel "{name}" forwarding to channels {first:u64}, {second:u64} and {third:u64}"#)]
fn a_game_channel(
    world: &mut DeliveryWorld,
    name: String,
    first: u64,
    second: u64,
    third: u64,
) -> Result<(), eyre::Report> {
    let game_channel = GameChannelName::new(name).wrap_err("game channel name")?;
    let ids = [first, second, third];
    for id in ids {
        world
            .resolver
            .register(channel(id, &POSTING))
            .wrap_err("register destination channel")?;
    }
    world
        .configs
        .push(ChannelConfig::new(game_channel).with_destinations(ids.map(ChannelId::new)));
    Ok(())
}

#[given("channel {id:u64} rejects every message")]
fn channel_rejects(world: &mut DeliveryWorld, id: u64) -> Result<(), eyre::Report> {
    world
        .sender
        .fail_channel(ChannelId::new(id), SendError::Rejected("missing access".to_owned()))
        .wrap_err("configure failing channel")
}

#[given("the bot cannot post in channel {id:u64}")]
fn bot_cannot_post(world: &mut DeliveryWorld, id: u64) -> Result<(), eyre::Report> {
    world
        .resolver
        .register(channel(id, &[ChannelPermission::ViewChannel]))
        .wrap_err("replace destination channel")
}

#[given("a subscriber cancels every forward")]
fn subscriber_cancels(world: &mut DeliveryWorld) -> Result<(), eyre::Report> {
    world
        .bus
        .on_post_process(|event| event.cancel())
        .wrap_err("register cancelling subscriber")
}

#[given("a subscriber keeps only channel {id:u64}")]
fn subscriber_narrows(world: &mut DeliveryWorld, id: u64) -> Result<(), eyre::Report> {
    let keep = ChannelId::new(id);
    world
        .bus
        .on_post_process(move |event| {
            event
                .destinations_mut()
                .retain(|destination| destination.id() == keep);
        })
        .wrap_err("register narrowing subscriber")
}
