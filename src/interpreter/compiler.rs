/// Lowering entry point and the per-function builder.
pub mod core;

/// Forward-reference labels and jump patching.
pub mod labels;

/// Statement lowering.
pub mod statement;

/// Expression lowering and call classification.
pub mod expression;
