//! Classifier stage: the drawing role of each module position.
//!
//! The role is a pure function of the position, the matrix side and the logo
//! zone radius. It never looks at the module value.
//!
//! ```text
//!  ┌───────┬───────────┬───────┐
//!  │ F     │           │     F │   F = 7×7 finder blocks
//!  │       │           │       │
//!  ├───────┘  ┌─────┐  └───────┤
//!  │          │  L  │          │   L = logo zone, half-side logo_radius
//!  │          └─────┘          │
//!  ├───────┐                   │   everything else = data
//!  │ F     │                   │
//!  └───────┴───────────────────┘
//! ```
//!
//! With the default half-side of 6 the zone reaches a finder block only for
//! sides up to 25 (versions 1 and 2). From [`MIN_CLEAR_SIDE`] upward it never
//! does, and every verification URL encodes at that size or larger. Smaller
//! matrices still render: the finder role wins on the shared modules.

/// Side of a finder pattern block, in modules.
pub const FINDER_SIZE: usize = 7;

/// Smallest matrix side (version 3) where the default logo zone is clear of
/// all finder blocks.
pub const MIN_CLEAR_SIDE: usize = 29;

/// Drawing role of a module position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Inside one of the three finder blocks.
    ///
    /// `ring` is the Chebyshev distance from the block centre (0..=3).
    Finder { ring: u8 },
    /// Inside the centred logo zone; never drawn.
    Logo,
    /// Ordinary data/timing/format module.
    Data,
    /// Outside the module grid (the white margin).
    Quiet,
}

/// Top-left origins `(row, col)` of the three finder blocks.
pub fn finder_origins(size: usize) -> [(usize, usize); 3] {
    let far = size.saturating_sub(FINDER_SIZE);
    [(0, 0), (0, far), (far, 0)]
}

/// Ring index of `(row, col)` if it lies inside a finder block.
pub fn finder_ring(row: usize, col: usize, size: usize) -> Option<u8> {
    finder_origins(size).into_iter().find_map(|(r0, c0)| {
        let inside = (r0..r0 + FINDER_SIZE).contains(&row) && (c0..c0 + FINDER_SIZE).contains(&col);
        inside.then(|| {
            let local_r = (row - r0) as i32;
            let local_c = (col - c0) as i32;
            (local_r - 3).abs().max((local_c - 3).abs()) as u8
        })
    })
}

/// Whether `(row, col)` lies in the logo zone around `(size/2, size/2)`.
pub fn in_logo_zone(row: usize, col: usize, size: usize, logo_radius: u32) -> bool {
    let center = (size / 2) as i64;
    let radius = logo_radius as i64;
    (row as i64 - center).abs() <= radius && (col as i64 - center).abs() <= radius
}

/// Whether the logo zone touches any finder block for this matrix side.
///
/// Finder takes precedence in [`classify`], so an overlap never paints over a
/// finder module, but it does mean the zone reaches the corner markers.
pub fn logo_zone_overlaps_finders(size: usize, logo_radius: u32) -> bool {
    let center = size / 2;
    let lo = center.saturating_sub(logo_radius as usize);
    let hi = (center + logo_radius as usize).min(size.saturating_sub(1));
    (lo..=hi).any(|r| (lo..=hi).any(|c| finder_ring(r, c, size).is_some()))
}

/// Classify a module position. Finder wins over logo.
pub fn classify(row: usize, col: usize, size: usize, logo_radius: u32) -> Role {
    if row >= size || col >= size {
        return Role::Quiet;
    }
    if let Some(ring) = finder_ring(row, col, size) {
        return Role::Finder { ring };
    }
    if in_logo_zone(row, col, size, logo_radius) {
        return Role::Logo;
    }
    Role::Data
}
