//! # cubesort
//!
//! cubesort sorts an integer sequence spread across a power-of-two group of
//! message-passing worker ranks arranged as a logical hypercube. Each rank
//! owns an equal-sized partition; after the sort every partition is
//! non-decreasing and the concatenation of the partitions in rank order is
//! the sorted sequence.
//!
//! The engine is a distributed bitonic merge sort. An alternating-direction
//! seed sort makes every adjacent pair of partitions bitonic, then log2(P)
//! stages of partner exchange walk the butterfly network: at each step a rank
//! trades tagged batches with the rank at `rank XOR 2^step`, keeping the
//! element-wise mins or maxes as its chunk's direction demands. Batches are
//! pipelined, so a message still in flight never blocks work on one that has
//! already arrived. Each stage ends with an in-place linear-time elbow merge
//! that turns the locally-bitonic partition back into a sorted one.
//!
//! ## Usage
//!
//! Wire up a [`comm::ProcessGroup`], move one endpoint onto each worker
//! thread, and have every rank call [`distributed_bitonic_sort`] together:
//!
//! ```ignore
//! use cubesort::comm::ProcessGroup;
//! use cubesort::distributed_bitonic_sort;
//!
//! let endpoints = ProcessGroup::new(4).into_endpoints();
//!
//! crossbeam::thread::scope(|s| {
//!     for (endpoint, mut local) in endpoints.into_iter().zip(partitions) {
//!         s.spawn(move |_| {
//!             let mut recv = local.clone();
//!             let timings =
//!                 distributed_bitonic_sort(&endpoint, &mut local, &mut recv, 64, 0);
//!             // local is now this rank's slice of the sorted sequence
//!         });
//!     }
//! })
//! .unwrap();
//! ```
//!
//! Partition lengths, the batch size, and the group size must all be powers
//! of two, with the batch size dividing the partition length. The sort runs
//! to completion or takes the whole group down; there is no partial result.
//!
//! ## License
//!
//! Licensed under either of the Apache License, Version 2.0 or the MIT
//! license, at your option.

mod direction;
mod hypercube_sort;
mod timings;
mod validate;

pub mod comm;

#[cfg(not(any(test, feature = "bench")))]
mod sorts;
#[cfg(any(test, feature = "bench"))]
pub mod sorts;

#[cfg(any(test, feature = "bench"))]
pub mod test_utils;

pub use direction::Direction;
pub use hypercube_sort::distributed_bitonic_sort;
pub use timings::SortTimings;
pub use validate::{validate_global_order, ValidationError};
