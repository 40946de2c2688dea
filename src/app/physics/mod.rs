mod forces;

use eframe::egui::Vec2;

use super::{LayoutPhase, RenderGraph};
use forces::{accumulate_attraction, accumulate_repulsion, ideal_spacing};

/// Steps before the layout freezes (~4 s at 60 steps/s). The simulation stops
/// here whether or not it has converged: a fixed budget gives a bounded,
/// graph-size-independent settle cost, at the price of occasionally freezing
/// a still-oscillating layout. There is intentionally no kinetic-energy
/// convergence check.
pub(super) const FRAME_BUDGET: u32 = 240;

const TIME_STEP: f32 = 0.1;
const VELOCITY_DAMPING: f32 = 0.95;
const BOUNDARY_MARGIN: f32 = 50.0;

/// Advances the simulation by one step if the frame budget allows. Returns
/// true while stepping should continue, so the caller keeps scheduling
/// repaints; once `Settled` (or `Idle`) this never touches a position again
/// until an explicit restart.
pub(super) fn step_layout(cache: &mut RenderGraph, bounds: Vec2) -> bool {
    let frame = match cache.phase {
        LayoutPhase::Simulating(frame) if frame < FRAME_BUDGET => frame,
        LayoutPhase::Simulating(_) => {
            cache.phase = LayoutPhase::Settled;
            return false;
        }
        LayoutPhase::Idle | LayoutPhase::Settled => return false,
    };

    if cache.nodes.is_empty() {
        cache.phase = LayoutPhase::Settled;
        return false;
    }

    let spacing = ideal_spacing(bounds, cache.nodes.len());

    for node in &mut cache.nodes {
        node.velocity = Vec2::ZERO;
    }

    accumulate_repulsion(&mut cache.nodes, spacing);
    accumulate_attraction(&mut cache.nodes, &cache.edges, spacing);

    let limit = ((bounds * 0.5) - Vec2::splat(BOUNDARY_MARGIN)).max(Vec2::ZERO);
    for node in &mut cache.nodes {
        node.velocity *= VELOCITY_DAMPING;
        node.world_pos += node.velocity * TIME_STEP;
        node.world_pos = node.world_pos.clamp(-limit, limit);
    }

    let next_frame = frame + 1;
    if next_frame >= FRAME_BUDGET {
        cache.phase = LayoutPhase::Settled;
    } else {
        cache.phase = LayoutPhase::Simulating(next_frame);
    }

    true
}
