//! Light debug panel
//!
//! One slider per [`LightField`]. The panel only ever writes through
//! [`Lights::set`], so range clamping stays in one place.

use crate::gfx::scene::lights::{LightField, Lights};

/// Draws the light panel and applies any slider edits to `lights`
///
/// Returns true when at least one value changed this frame.
pub fn light_debug_panel(ui: &imgui::Ui, lights: &mut Lights) -> bool {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }

    let mut changed = false;
    ui.window("Lights")
        .size([300.0, 170.0], imgui::Condition::FirstUseEver)
        .position(
            [display_size[0] - 320.0, 20.0],
            imgui::Condition::FirstUseEver,
        )
        .resizable(true)
        .collapsible(true)
        .build(|| {
            for field in LightField::ALL {
                let range = field.range();
                let mut value = lights.get(field);
                if ui
                    .slider_config(field.label(), *range.start(), *range.end())
                    .display_format("%.3f")
                    .build(&mut value)
                {
                    changed |= apply_edit(lights, field, value);
                }
            }
        });
    changed
}

/// Snaps `value` onto the slider's step grid
pub fn snap_to_step(value: f32) -> f32 {
    (value / LightField::STEP).round() * LightField::STEP
}

/// Writes a slider value through the typed setter
///
/// Returns whether the stored value actually changed.
pub fn apply_edit(lights: &mut Lights, field: LightField, value: f32) -> bool {
    let before = lights.get(field);
    lights.set(field, snap_to_step(value));
    lights.get(field) != before
}
