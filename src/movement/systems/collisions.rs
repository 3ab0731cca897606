//! Movement domain: contact sampling against level geometry.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    ContactPoint, ContactSample, ControllerDisabled, GameLayer, Ground, MovementTuning, Player,
};

/// Fractions of the spike threshold at which side rays are cast, so small
/// ledges always produce at least two wall points.
const SPIKE_RAY_FRACTIONS: [f32; 5] = [0.25, 0.5, 0.75, 1.0, 1.5];

/// Fill each player's contact buckets from short rays around the collider.
pub(crate) fn sample_contacts(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    ground: Query<(), With<Ground>>,
    mut query: Query<(&Position, &mut ContactSample), (With<Player>, Without<ControllerDisabled>)>,
) {
    // Only level geometry; sensors and projectiles never count as contacts.
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);
    let half = tuning.half_extents();
    let reach = tuning.contact_reach;

    for (position, mut contacts) in &mut query {
        let center = position.0;
        let bottom = center.y - half.y;
        let top = center.y + half.y;
        let mut points = Vec::new();

        let mut cast = |origin: Vec2, direction: Dir2, distance: f32| {
            if let Some(hit) = spatial_query.cast_ray(origin, direction, distance, true, &filter) {
                points.push(ContactPoint {
                    point: origin + *direction * hit.distance,
                    normal: hit.normal,
                    ground_layer: ground.contains(hit.entity),
                });
            }
        };

        // Feet: both corners and the middle, starting just inside the collider.
        for x in [-half.x + 1.0, 0.0, half.x - 1.0] {
            cast(Vec2::new(center.x + x, bottom + 1.0), Dir2::NEG_Y, 1.0 + reach);
        }

        // Sides: dense near the feet for ledge detection, sparse above.
        let mut heights = vec![bottom + 0.5];
        heights.extend(
            SPIKE_RAY_FRACTIONS
                .iter()
                .map(|f| bottom + tuning.spike_threshold * f)
                .filter(|y| *y < top),
        );
        heights.push(center.y);
        heights.push(top - 2.0);

        for y in heights {
            let origin = Vec2::new(center.x, y);
            cast(origin, Dir2::NEG_X, half.x + reach);
            cast(origin, Dir2::X, half.x + reach);
        }

        contacts.collect(points, bottom, tuning.bottom_contact_tolerance);
    }
}
