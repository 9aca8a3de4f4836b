//! On-screen feedback: crosshair and fading readouts.
//!
//! The navigator produces an [`OverlayFrame`] from its state; painting it is a separate,
//! read-only step so hosts can draw with egui or anything else.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use super::timer::FadeWindow;

const CROSSHAIR_ARM: f32 = 8.0;
const CROSSHAIR_WIDTH: f32 = 2.0;
const READOUT_FONT_SIZE: f32 = 14.0;
const READOUT_MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosshairMode {
    Idle,
    MouseActive,
    /// Releasing the pivot key now toggles auto relocation
    PivotPending,
    PivotSuccess,
    PivotFailure,
    StateSaved,
    StateLoaded,
}

impl CrosshairMode {
    pub fn color(self) -> Color32 {
        match self {
            CrosshairMode::Idle => Color32::from_rgb(191, 191, 191),
            CrosshairMode::MouseActive => Color32::WHITE,
            CrosshairMode::PivotPending => Color32::from_rgb(255, 230, 25),
            CrosshairMode::PivotSuccess => Color32::from_rgb(25, 255, 13),
            CrosshairMode::PivotFailure => Color32::from_rgb(255, 25, 13),
            CrosshairMode::StateSaved => Color32::from_rgb(255, 40, 220),
            CrosshairMode::StateLoaded => Color32::from_rgb(60, 120, 255),
        }
    }
}

/// A transient numeric readout
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub label: &'static str,
    pub text: String,
    pub alpha: f32,
}

impl Readout {
    /// Readout for a value edited at `since`, or `None` once it has faded out
    pub fn fading(
        label: &'static str,
        text: String,
        window: FadeWindow,
        now: f64,
        since: Option<f64>,
    ) -> Option<Self> {
        let alpha = window.alpha(now, since?);
        (alpha > 0.0).then_some(Self { label, text, alpha })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    pub crosshair: Option<CrosshairMode>,
    pub readouts: Vec<Readout>,
    /// Something is still animating and the region should redraw again
    pub needs_redraw: bool,
}

impl OverlayFrame {
    pub fn is_empty(&self) -> bool {
        self.crosshair.is_none() && self.readouts.is_empty()
    }
}

/// Paint `frame` centred in `rect`
pub fn paint(frame: &OverlayFrame, painter: &Painter, rect: Rect) {
    let center = rect.center();

    if let Some(mode) = frame.crosshair {
        let shadow = Stroke::new(CROSSHAIR_WIDTH, Color32::from_black_alpha(204));
        let stroke = Stroke::new(CROSSHAIR_WIDTH, mode.color());
        for (offset, stroke) in [(Vec2::new(1.0, 1.0), shadow), (Vec2::ZERO, stroke)] {
            let c = center + offset;
            painter.line_segment(
                [c - Vec2::X * CROSSHAIR_ARM, c + Vec2::X * CROSSHAIR_ARM],
                stroke,
            );
            painter.line_segment(
                [c - Vec2::Y * CROSSHAIR_ARM, c + Vec2::Y * CROSSHAIR_ARM],
                stroke,
            );
        }
    }

    let line_height = READOUT_FONT_SIZE + 4.0;
    for (row, readout) in frame.readouts.iter().enumerate() {
        let pos = Pos2::new(
            rect.left() + READOUT_MARGIN,
            rect.bottom() - READOUT_MARGIN - row as f32 * line_height,
        );
        painter.text(
            pos,
            Align2::LEFT_BOTTOM,
            format!("{}: {}", readout.label, readout.text),
            FontId::monospace(READOUT_FONT_SIZE),
            Color32::WHITE.gamma_multiply(readout.alpha),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_fades_out() {
        let window = FadeWindow::READOUT;
        let visible = Readout::fading("Gear", "x4".into(), window, 11.2, Some(10.0)).unwrap();
        assert!(visible.alpha > 0.0 && visible.alpha < 1.0);
        assert!(Readout::fading("Gear", "x4".into(), window, 12.0, Some(10.0)).is_none());
        assert!(Readout::fading("Gear", "x4".into(), window, 12.0, None).is_none());
    }

    #[test]
    fn test_paint_emits_shapes() {
        let frame = OverlayFrame {
            crosshair: Some(CrosshairMode::MouseActive),
            readouts: vec![Readout {
                label: "FOV",
                text: "50.0 mm".into(),
                alpha: 0.5,
            }],
            needs_redraw: true,
        };
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            paint(&frame, &painter, ctx.content_rect());
        });
        assert!(output.shapes.len() >= 5, "got {} shapes", output.shapes.len());
    }

    #[test]
    fn test_modes_have_distinct_colors() {
        let modes = [
            CrosshairMode::Idle,
            CrosshairMode::MouseActive,
            CrosshairMode::PivotPending,
            CrosshairMode::PivotSuccess,
            CrosshairMode::PivotFailure,
            CrosshairMode::StateSaved,
            CrosshairMode::StateLoaded,
        ];
        for (i, a) in modes.iter().enumerate() {
            for b in &modes[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
