pub use self::builders::*;
pub use self::mock_notifier::*;
pub use self::project::*;

pub mod builders;
mod mock_notifier;
mod project;
