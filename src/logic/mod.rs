pub mod catalog_index;
pub mod checkout;
pub mod price_resolver;
pub mod session;

pub use catalog_index::*;
pub use checkout::*;
pub use price_resolver::*;
pub use session::ConfiguratorSession;

pub(crate) use session::find_conflicts;
