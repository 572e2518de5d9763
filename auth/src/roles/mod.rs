pub mod reconciler;

pub use reconciler::reconcile;
pub use reconciler::RoleDiff;
