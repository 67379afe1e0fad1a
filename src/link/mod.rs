//! Deferred linking between annotations
//!
//! Payload records reference each other by identifier, usually before the
//! referenced record exists. A record that cannot link yet leaves a
//! [`LinkAction`] in the [`LinkRegistry`] under the target's [`LinkKey`];
//! when the target is built it drains its key and every action is applied
//! to the [`LinkTable`], linking both records to each other.

mod key;
mod registry;
mod table;

pub use key::LinkKey;
pub use registry::{LinkAction, LinkRegistry, LinkSlot, UnresolvedLink, WordLink};
pub use table::LinkTable;
