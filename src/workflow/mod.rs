pub mod migration_flow;
pub mod tile_visibility_flow;

pub use migration_flow::{MigrationFlow, MigrationResult};
pub use tile_visibility_flow::{ScreenshotPaths, TileVisibilityFlow, VerificationOutcome};
