//! The single watering operation shared by every input adapter.
//!
//! Clicking inside the player zone and pressing the water key both end up in
//! [`water_nearby`]: face the nearest eligible flower, play the watering
//! animation, zoom the camera, activate every dormant flower in the zone and
//! update the score.

use glam::Vec3;

use crate::events::garden::WateringEvent;
use crate::resources::camera::CameraRig;
use crate::resources::player::PlayerAvatar;
use crate::resources::score::WateringScore;
use crate::systems::flowers::Garden;

/// Water every dormant flower within the player zone.
///
/// Returns `None` and changes nothing when no flower is eligible. The avatar
/// latch is idempotent, so watering again mid-animation activates newly
/// reached flowers and restarts the zoom without extending the animation.
pub fn water_nearby(
    player: &mut PlayerAvatar,
    camera: &mut CameraRig,
    garden: &mut Garden,
    score: &mut WateringScore,
    now: f32,
) -> Option<WateringEvent> {
    let nearby = garden.query_nearby(player.position, player.settings.zone_radius);
    let nearest = nearby.first().and_then(|e| garden.snapshot(*e))?;

    player.trigger_water(Some(nearest.position));
    camera.resume_follow();
    camera.trigger_zoom_in(now);

    let activated = nearby.iter().filter(|e| garden.activate(**e, now)).count() as u32;
    score.record(activated);

    Some(WateringEvent {
        center: player.position,
        activated,
    })
}

/// Whether `point` lies inside the player zone on the XZ plane.
pub fn in_player_zone(player: &PlayerAvatar, point: Vec3) -> bool {
    let dx = point.x - player.position.x;
    let dz = point.z - player.position.z;
    dx * dx + dz * dz <= player.settings.zone_radius * player.settings.zone_radius
}
