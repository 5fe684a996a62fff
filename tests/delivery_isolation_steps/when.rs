//! When steps for delivery isolation BDD scenarios.

use super::world::{DeliveryWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use switchboard::forwarding::domain::{
    ForwardPayload, ForwardRequest, GameChannelName, Player, PlayerId,
};

#[when(r#""{player}" says "{message}" in "{game_channel}""#)]
fn player_says(
    world: &mut DeliveryWorld,
    player: String,
    message: String,
    game_channel: String,
) -> Result<(), eyre::Report> {
    let request = ForwardRequest::new(ForwardPayload::Chat { message })
        .with_player(Player::new(PlayerId::new(), player))
        .in_channel(GameChannelName::new(game_channel).wrap_err("game channel name")?);
    let pipeline = world.pipeline();
    world.last_report = Some(run_async(pipeline.process(&request)));
    Ok(())
}
