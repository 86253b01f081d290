pub mod elbow_merge;
pub mod pairwise_exchange;
pub mod seed_sort;
