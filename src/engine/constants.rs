// Constants for the algorithm engines and their drivers

/// Smallest and largest array the sort/heap drivers will animate
pub const MIN_ARRAY_SIZE: usize = 5;
pub const MAX_ARRAY_SIZE: usize = 100;

/// Default element count for a generated array
pub const DEFAULT_ARRAY_SIZE: usize = 30;

/// Random array elements are drawn from this inclusive range
pub const MIN_ELEMENT: i32 = 10;
pub const MAX_ELEMENT: i32 = 350;

/// Speed setting bounds; delay between steps is linear in 1/speed
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 200;
pub const DEFAULT_SPEED: u32 = 50;

/// Numerator for the pacing delay: delay_ms = DELAY_NUMERATOR_MS / speed
pub const DELAY_NUMERATOR_MS: u64 = 2_000;

/// Graph generation bounds
pub const MIN_NODE_COUNT: usize = 3;
pub const MAX_NODE_COUNT: usize = 26;
pub const DEFAULT_NODE_COUNT: usize = 8;

/// Random edge weights are drawn from this inclusive range
pub const MIN_EDGE_WEIGHT: u32 = 1;
pub const MAX_EDGE_WEIGHT: u32 = 20;

/// Matrices stay human-observable; the step history is O(m * n * p)
pub const MAX_MATRIX_DIM: usize = 20;
pub const DEFAULT_MATRIX_DIM: usize = 3;
