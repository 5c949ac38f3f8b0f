//! Flow resistance of porous-walled channels.

use std::f64::consts::PI;

/// Resistance of a cylindrical channel with porous walls.
///
/// Assumes constant wall permeability and constant wall velocity, so the
/// axial flow decreases linearly from `inflow` at the entrance. The result
/// is the Poiseuille resistance `8 μ L / (π r⁴)` scaled by the mean flow
/// fraction `1 - 2 π r L v_w / (2 Q_in)`.
///
/// * `mu` - dynamic viscosity of the fluid
/// * `length` - channel length
/// * `channel_radius` - lumen radius
/// * `inflow` - volumetric flow entering the channel, `Q_in`
/// * `wall_velocity` - outward fluid velocity through the wall, `v_w`
pub fn channel_resistance(
    mu: f64,
    length: f64,
    channel_radius: f64,
    inflow: f64,
    wall_velocity: f64,
) -> f64 {
    let poiseuille = 8.0 * mu * length / (PI * channel_radius.powi(4));
    let wall_loss = 2.0 * PI * channel_radius * length * wall_velocity;
    poiseuille * (1.0 - wall_loss / (2.0 * inflow))
}
