// Impulse-based collision response with positional correction

use super::body::RigidBody;
use super::collision::Contact;
use super::config::CorrectionSettings;

/// Resolve one contact between `a` and `b`
///
/// Applies a restitution impulse along the contact normal, then nudges the
/// bodies apart by a fraction of the penetration beyond `slop`. The nudge
/// writes positions directly and does not conserve momentum; it only keeps
/// resting bodies from sinking into each other.
///
/// Returns `false` when nothing was done (both static, or already separating).
pub fn resolve_contact(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    correction: &CorrectionSettings,
) -> bool {
    if a.is_static() && b.is_static() {
        return false;
    }

    let inv_mass_sum = a.inv_mass() + b.inv_mass();
    if inv_mass_sum <= 0.0 {
        return false;
    }

    let relative_velocity = b.velocity - a.velocity;
    let normal_velocity = relative_velocity.dot(contact.normal);

    if normal_velocity > 0.0 {
        return false;
    }

    let restitution = a.restitution.min(b.restitution);
    let j = -(1.0 + restitution) * normal_velocity / inv_mass_sum;
    let impulse = contact.normal * j;

    if a.is_dynamic() {
        a.apply_impulse(-impulse, contact.contact_point);
    }
    if b.is_dynamic() {
        b.apply_impulse(impulse, contact.contact_point);
    }

    let depth = (contact.penetration - correction.slop).max(0.0);
    let push = contact.normal * (depth * correction.percent / inv_mass_sum);

    if a.is_dynamic() {
        a.position -= push * a.inv_mass();
    }
    if b.is_dynamic() {
        b.position += push * b.inv_mass();
    }

    true
}
