//! Rectangle-vs-platform collision resolution.
//!
//! Movement is resolved one axis at a time: apply the horizontal velocity
//! and push out of whatever the mover now overlaps, then do the same for the
//! vertical velocity using the corrected x position.
//!
//! When several platforms overlap the mover at once, the one that pushes
//! the mover back the furthest along the direction of travel wins, so a
//! single clamp clears all of them.
//!
//! Enemies use the coarser point-probe variant, `resolve_points`, which tests
//! the four edge midpoints instead of the whole rectangle.

use crate::entities::Rect;

/// Which side of the mover touched a platform during a vertical pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalContact {
    /// Moving down onto a platform's top surface.
    Landed,
    /// Moving up into a platform's underside.
    Bumped,
    /// Overlapping with no vertical velocity; nothing to push against.
    Resting,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisResolution<C> {
    pub rect: Rect,
    pub velocity: f32,
    pub contact: Option<C>,
}

/// Apply `vx` to `mover` and push its leading edge out of any platform it
/// now overlaps.  Horizontal contact never changes the velocity.
pub fn resolve_horizontal(mover: Rect, vx: f32, platforms: &[Rect]) -> AxisResolution<()> {
    let moved = mover.offset(vx, 0.0);
    let overlapping = platforms.iter().filter(|p| moved.overlaps(p));

    let clamp = if vx > 0.0 {
        overlapping.map(|p| p.left()).reduce(f32::min)
    } else if vx < 0.0 {
        overlapping.map(|p| p.right()).reduce(f32::max)
    } else {
        None
    };

    let mut rect = moved;
    match clamp {
        Some(edge) if vx > 0.0 => rect.set_right(edge),
        Some(edge) => rect.set_left(edge),
        None => {}
    }

    AxisResolution {
        rect,
        velocity: vx,
        contact: clamp.map(|_| ()),
    }
}

/// Apply `vy` to `mover` and push it out of any platform it now overlaps.
/// Any contact zeroes the vertical velocity.
pub fn resolve_vertical(mover: Rect, vy: f32, platforms: &[Rect]) -> AxisResolution<VerticalContact> {
    let moved = mover.offset(0.0, vy);
    let overlapping: Vec<&Rect> = platforms.iter().filter(|p| moved.overlaps(p)).collect();

    if overlapping.is_empty() {
        return AxisResolution { rect: moved, velocity: vy, contact: None };
    }

    let mut rect = moved;
    let contact = if vy > 0.0 {
        let top = overlapping.iter().map(|p| p.top()).fold(f32::INFINITY, f32::min);
        rect.set_bottom(top);
        VerticalContact::Landed
    } else if vy < 0.0 {
        let bottom = overlapping.iter().map(|p| p.bottom()).fold(f32::NEG_INFINITY, f32::max);
        rect.set_top(bottom);
        VerticalContact::Bumped
    } else {
        VerticalContact::Resting
    };

    AxisResolution {
        rect,
        velocity: 0.0,
        contact: Some(contact),
    }
}

// ── Point probes ──────────────────────────────────────────────────────────────

/// Which edge-midpoint probes hit a platform during `resolve_points`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointContacts {
    pub bottom: bool,
    pub top: bool,
    pub left: bool,
    pub right: bool,
}

/// Probe the mover's edge midpoints against each platform in registry order
/// and snap the probed edge to the platform's opposite edge.
///
/// Coarser than the full-rectangle passes: a platform thinner than the
/// distance moved in one tick can be skipped entirely.
pub fn resolve_points(mover: Rect, platforms: &[Rect]) -> (Rect, PointContacts) {
    let mut rect = mover;
    let mut contacts = PointContacts::default();

    for platform in platforms {
        if platform.contains_point(rect.mid_bottom()) {
            rect.set_bottom(platform.top());
            contacts.bottom = true;
        }
        if platform.contains_point(rect.mid_top()) {
            rect.set_top(platform.bottom());
            contacts.top = true;
        }
        if platform.contains_point(rect.mid_right()) {
            rect.set_right(platform.left());
            contacts.right = true;
        }
        if platform.contains_point(rect.mid_left()) {
            rect.set_left(platform.right());
            contacts.left = true;
        }
    }

    (rect, contacts)
}
