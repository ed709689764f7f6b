//! Physical sidewalk width at the centroid via right-triangle geometry.
//!
//! The mask row through the centroid is bracketed by its leftmost and
//! rightmost positive pixels (any positive label qualifies, matching the
//! merged label map this stage receives). The depth directly under the
//! centroid is treated as the perpendicular leg shared by two right
//! triangles whose hypotenuses are the edge-pixel depths; solving for the
//! lateral legs and averaging them yields the width in meters.
//!
//! An uncomputable width is a first-class outcome, not an error and never a
//! NaN: fewer than two edge pixels, a negative square-root argument or an
//! off-image centroid all yield [`WidthEstimate::Undetermined`] with the
//! reason attached. A legitimate zero width remains distinguishable.
use crate::error::{check_dims, EstimateError};
use crate::image::{DepthMap, LabelMask, Raster};
use crate::Centroid;
use serde::Serialize;

/// Why the width could not be determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UndeterminedReason {
    /// Fewer than two positive pixels in the centroid row.
    TooFewEdgePixels,
    /// An edge-pixel depth is shorter than the perpendicular depth, so the
    /// triangle has no real solution.
    DegenerateGeometry,
    /// The rounded centroid falls outside the image.
    CentroidOutOfBounds,
}

impl std::fmt::Display for UndeterminedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UndeterminedReason::TooFewEdgePixels => "too few edge pixels in the centroid row",
            UndeterminedReason::DegenerateGeometry => "edge depth shorter than centroid depth",
            UndeterminedReason::CentroidOutOfBounds => "centroid outside the image",
        };
        f.write_str(text)
    }
}

/// Tagged width result: meters, or an explicit undetermined marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidthEstimate {
    Meters(f32),
    Undetermined(UndeterminedReason),
}

impl WidthEstimate {
    /// The width in meters, if determined.
    pub fn meters(&self) -> Option<f32> {
        match self {
            WidthEstimate::Meters(m) => Some(*m),
            WidthEstimate::Undetermined(_) => None,
        }
    }
}

impl std::fmt::Display for WidthEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthEstimate::Meters(m) => write!(f, "{m:.2} m"),
            WidthEstimate::Undetermined(reason) => write!(f, "undetermined ({reason})"),
        }
    }
}

/// Estimate the sidewalk width (meters) at the given centroid.
pub fn estimate_width(
    mask: &LabelMask,
    depth: &DepthMap,
    centroid: Centroid,
) -> Result<WidthEstimate, EstimateError> {
    check_dims(mask, depth)?;

    let cx = centroid.x as isize;
    let cy = centroid.y as isize;
    if cx < 0 || cy < 0 || cx >= mask.w as isize || cy >= mask.h as isize {
        return Ok(WidthEstimate::Undetermined(
            UndeterminedReason::CentroidOutOfBounds,
        ));
    }
    let (cx, cy) = (cx as usize, cy as usize);

    let row = mask.row(cy);
    let leftmost = row.iter().position(|&v| v > 0);
    let rightmost = row.iter().rposition(|&v| v > 0);
    let (leftmost, rightmost) = match (leftmost, rightmost) {
        (Some(l), Some(r)) if l != r => (l, r),
        _ => {
            return Ok(WidthEstimate::Undetermined(
                UndeterminedReason::TooFewEdgePixels,
            ))
        }
    };

    let side = depth.get(cx, cy);
    let mut legs = [0.0f32; 2];
    for (leg, col) in legs.iter_mut().zip([leftmost, rightmost]) {
        let hyp = depth.get(col, cy);
        let arg = hyp * hyp - side * side;
        if arg < 0.0 {
            return Ok(WidthEstimate::Undetermined(
                UndeterminedReason::DegenerateGeometry,
            ));
        }
        *leg = arg.sqrt();
    }

    Ok(WidthEstimate::Meters(0.5 * (legs[0] + legs[1])))
}
