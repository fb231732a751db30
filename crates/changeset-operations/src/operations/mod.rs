mod plan;
mod prerelease;
mod preview;
mod publish;
mod version;

pub use plan::{ReleasePlan, plan_releases};
pub use prerelease::next_prerelease;
pub use preview::preview_changelog;
pub use publish::{PublishDecision, PublishReason, publish_decision};
pub use version::{VersionOperation, VersionOutcome};
