use tracing::debug;

/// The portion of the input left out when the image height is capped
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Truncation {
    /// Number of input bytes the image covers
    pub shown: u64,
    /// Number of input bytes available
    pub total: u64,
}

/// The image height chosen for an input of a given size
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct HeightPlan {
    /// The height to render
    pub height: u32,
    /// The height needed to cover the whole input
    pub full_height: u64,
    /// Set if the input does not fit in `max_height` rows
    pub truncated: Option<Truncation>,
}

/// Chooses the image height for `total_bytes` of input
///
/// `stride` is the number of input bytes consumed per destination pixel (see
/// [`super::ScanParams::stride`]). The height needed to show all of the input is compared
/// against `max_height`: larger inputs are truncated to `max_height` rows, and smaller
/// inputs use their full height when `autoscale` is set or keep `max_height` otherwise.
/// The full height is never less than one row.
#[must_use]
pub fn plan_height(
    total_bytes: u64,
    width: u32,
    stride: u64,
    max_height: u32,
    autoscale: bool,
) -> HeightPlan {
    let width = u64::from(width.max(1));
    let full_height = (total_bytes / stride.max(1)).div_ceil(width).max(1);
    debug!("Full height for {total_bytes} bytes: {full_height}");

    if full_height > u64::from(max_height) {
        let shown = width
            .saturating_mul(u64::from(max_height))
            .saturating_mul(stride);
        return HeightPlan {
            height: max_height,
            full_height,
            truncated: Some(Truncation {
                shown,
                total: total_bytes,
            }),
        };
    }

    let height = if autoscale {
        // fits, since full_height <= max_height
        u32::try_from(full_height).unwrap_or(max_height)
    } else {
        max_height
    };
    HeightPlan {
        height,
        full_height,
        truncated: None,
    }
}
