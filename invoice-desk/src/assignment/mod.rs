//! Copy unpacking and person assignment
//!
//! Multi-copy line items are unpacked into unit copies, which the ledger
//! partitions across the people of the invoice plus an unassigned bucket.

mod ledger;
mod unpacker;

pub use ledger::{AssignmentError, AssignmentLedger, PersonBucket, UNASSIGNED_KEY};
pub use unpacker::{should_split, unpack_item, unpack_items};
