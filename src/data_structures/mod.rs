//! Data structures for the Mauka cuckoo filter library.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit error propagation instead of panics on user input
//! - Cache-aware, contiguous storage

pub mod lani_cuckoo_filter;

pub use lani_cuckoo_filter::{
    InsertStatus, LaniCuckooFilter, LaniCuckooFilterConfig, LaniCuckooFilterError,
    LaniCuckooFilterInfo,
};
