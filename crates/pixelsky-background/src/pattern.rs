//! Bitmap patterns for background shapes.

/// Side of one cloud block in pixels.
pub const CLOUD_BLOCK_SIZE: u32 = 4;

/// Cloud silhouette, 8 blocks wide and 5 blocks tall.
pub const CLOUD_PATTERN: [[u8; 8]; 5] = [
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 0],
];

/// Offsets (in units of the mark size) of the five squares of a mark.
pub const PLUS_OFFSETS: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];
