use foundation::math::Vec2;

/// Hover tilt angles (degrees) for a card under the pointer.
///
/// Zero at the center; the card leans toward the pointer, capped at
/// `max_deg` on each axis at the edges.
pub fn tilt_angles(local: Vec2, size: Vec2, max_deg: f64) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::zero();
    }
    let nx = ((local.x / size.x) * 2.0 - 1.0).clamp(-1.0, 1.0);
    let ny = ((local.y / size.y) * 2.0 - 1.0).clamp(-1.0, 1.0);

    // Pointer below center tips the top edge back (negative x rotation).
    Vec2::new(-ny * max_deg, nx * max_deg)
}
