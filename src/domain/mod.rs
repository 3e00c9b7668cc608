mod amount;
mod ledger;
mod policy;
mod record;

pub use amount::*;
pub use ledger::*;
pub use policy::*;
pub use record::*;
