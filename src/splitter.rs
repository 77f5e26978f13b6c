//! Splitter
//!
//! Ranking of candidate features at a tree node. Gains may be evaluated in
//! parallel, one independent slot per feature, but the selection of the best
//! feature is always a sequential scan so the tree shape stays reproducible.
use crate::constants::GAIN_SENTINEL;
use crate::data::{FeatureSet, Row};
use crate::entropy::information_gain;
use rayon::prelude::*;
use rayon::ThreadPool;

/// Feature chosen for a split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitInfo {
    pub split_feature: usize,
    pub split_gain: f64,
}

pub trait Splitter {
    /// Score of partitioning `rows` on `feature`, higher is better.
    fn feature_score(&self, rows: &[&Row], feature: usize, base_entropy: f64) -> f64;

    /// Whether scores may be computed on the thread pool.
    fn get_parallel(&self) -> bool;

    /// Score every feature of `features`, in the same order.
    fn feature_scores(&self, rows: &[&Row], features: &FeatureSet, base_entropy: f64, pool: &ThreadPool) -> Vec<f64>
    where
        Self: Sync,
    {
        if self.get_parallel() && pool.current_num_threads() > 1 && features.len() > 1 {
            pool.install(|| {
                features
                    .as_slice()
                    .par_iter()
                    .map(|&f| self.feature_score(rows, f, base_entropy))
                    .collect()
            })
        } else {
            features
                .iter()
                .map(|f| self.feature_score(rows, f, base_entropy))
                .collect()
        }
    }
}

/// Pick the best feature from per-feature scores, `scores[i]` belonging to
/// the i-th feature of `features`.
///
/// Only a strictly greater score replaces the running best, so among equal
/// scores the feature listed first in `features` wins. Returns `None` when no
/// feature improves on the sentinel, including when `features` is empty.
pub fn select_best_split(features: &FeatureSet, scores: &[f64]) -> Option<SplitInfo> {
    let mut best: Option<SplitInfo> = None;
    let mut best_gain = GAIN_SENTINEL;
    for (feature, &gain) in features.iter().zip(scores) {
        if gain > best_gain {
            best_gain = gain;
            best = Some(SplitInfo {
                split_feature: feature,
                split_gain: gain,
            });
        }
    }
    best
}

/// ID3 splitter ranking features by information gain.
#[derive(Debug, Clone, Copy, Default)]
pub struct InformationGainSplitter {
    pub parallel: bool,
}

impl InformationGainSplitter {
    pub fn new(parallel: bool) -> Self {
        InformationGainSplitter { parallel }
    }
}

impl Splitter for InformationGainSplitter {
    fn feature_score(&self, rows: &[&Row], feature: usize, base_entropy: f64) -> f64 {
        information_gain(rows, feature, base_entropy)
    }

    fn get_parallel(&self) -> bool {
        self.parallel
    }
}
