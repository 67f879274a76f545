use serde::{Deserialize, Serialize};

use crate::constants::FULL_TURN_DEGREES;
use crate::items::Item;
use crate::palette;

const DISPLAY_LABEL_MAX_CHARS: usize = 8;
const DISPLAY_LABEL_KEEP_CHARS: usize = 6;

/// An angular slice of the wheel. Angles are degrees measured from the fixed pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: i64,
    pub label: String,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub angular_width: f64,
}

impl Segment {
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Where a view anchors the segment's label.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Label shortened to fit inside a slice.
    pub fn display_label(&self) -> String {
        if self.label.chars().count() > DISPLAY_LABEL_MAX_CHARS {
            let head: String = self.label.chars().take(DISPLAY_LABEL_KEEP_CHARS).collect();
            format!("{}...", head)
        } else {
            self.label.clone()
        }
    }
}

/// Splits the circle into one equal slice per item, in item order.
///
/// Boundaries are computed as `k * 360 / n` rather than by accumulating widths, so adjacent
/// segments share identical boundary values and the last one ends at exactly 360.
pub fn build(items: &[Item]) -> Vec<Segment> {
    if items.is_empty() {
        return Vec::new();
    }

    let count = items.len() as f64;
    let width = FULL_TURN_DEGREES / count;
    let boundary = |k: usize| (k as f64 * FULL_TURN_DEGREES) / count;

    let segments: Vec<Segment> = items
        .iter()
        .enumerate()
        .map(|(k, item)| Segment {
            id: item.id,
            label: item.label.clone(),
            color: palette::color_for(item.color_index).to_string(),
            start_angle: boundary(k),
            end_angle: boundary(k + 1),
            angular_width: width,
        })
        .collect();

    log::debug!("Built {} wheel segments of {:.3} degrees", segments.len(), width);
    segments
}
