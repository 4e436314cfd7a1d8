//! the sampling baseline: filter a dataset prefix, pad from the tail, rank by distance
//!
//! results are approximate on purpose. only the first
//! `floor(n * sample_proportion)` points are ever considered, and a query
//! with fewer than `k` qualifying points is topped up with ids counting down
//! from `n - 1`, whether or not those points satisfy the predicate or are
//! already present.

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::info;

use crate::config::{EvaluatorConfig, POINT_ATTRIBUTES};
use crate::data_handling::dataset::VectorDataset;
use crate::data_handling::knn_file::KnnResults;
use crate::distance::feature_distance;
use crate::error::{Error, Result};
use crate::query::predicate::{Predicate, PredicateKind, Query};

pub struct Baseline<'a> {
    dataset: &'a VectorDataset<f32>,
    config: &'a EvaluatorConfig,
    sample_size: usize,
}

/// answer for a single query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    pub ids: Vec<u32>,
    /// how many of the candidates came from tail padding
    pub padded: usize,
}

/// tallies over one evaluation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineStats {
    /// queries per kind: vector only, equality, range, both, unknown
    pub kinds: [usize; 5],
    pub padded_queries: usize,
    pub padding_ids: usize,
}

impl BaselineStats {
    fn record(&mut self, kind: PredicateKind, padded: usize) {
        self.kinds[kind.slot()] += 1;
        if padded > 0 {
            self.padded_queries += 1;
            self.padding_ids += padded;
        }
    }

    pub fn queries(&self) -> usize {
        self.kinds.iter().sum()
    }

    pub fn log(&self) {
        info!(
            vector_only = self.kinds[0],
            equality = self.kinds[1],
            range = self.kinds[2],
            equality_and_range = self.kinds[3],
            unknown = self.kinds[4],
            "query kinds"
        );
        info!(
            "{} of {} queries needed padding ({} padding ids)",
            self.padded_queries,
            self.queries(),
            self.padding_ids
        );
    }
}

impl<'a> Baseline<'a> {
    pub fn new(dataset: &'a VectorDataset<f32>, config: &'a EvaluatorConfig) -> Result<Baseline<'a>> {
        config.validate()?;
        if dataset.n == 0 {
            return Err(Error::EmptyDataset);
        }
        if u32::try_from(dataset.n).is_err() {
            return Err(Error::InvalidConfig(format!(
                "{} points cannot be addressed with u32 ids",
                dataset.n
            )));
        }
        if dataset.dim != config.data_dimensions {
            return Err(Error::InvalidConfig(format!(
                "dataset has {} dimensions, expected {}",
                dataset.dim, config.data_dimensions
            )));
        }

        Ok(Baseline {
            dataset,
            config,
            sample_size: config.sample_size(dataset.n),
        })
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// ids in the sampled prefix that satisfy the predicate, in id order
    pub fn candidates(&self, predicate: &Predicate) -> Vec<u32> {
        (0..self.sample_size)
            .filter(|&j| predicate.matches(&self.dataset.point(j)))
            .map(|j| j as u32)
            .collect()
    }

    /// tops `candidates` up to `k` with ids counting down from the last point,
    /// wrapping to the end again if the dataset runs out; returns how many were added
    pub fn pad(&self, candidates: &mut Vec<u32>) -> usize {
        let missing = self.config.k.saturating_sub(candidates.len());
        let n = self.dataset.n as u32;
        candidates.extend((0..n).rev().cycle().take(missing));
        missing
    }

    /// orders candidates by distance to `features`, keeping the first `k`
    ///
    /// the sort is stable so equal distances keep candidate order; NaN sorts last
    pub fn rank(&self, candidates: &[u32], features: &[f32]) -> Vec<u32> {
        debug_assert_eq!(
            features.len(),
            self.dataset.dim - POINT_ATTRIBUTES,
            "query features do not match the dataset"
        );
        candidates
            .iter()
            .map(|&id| {
                let point = self.dataset.point(id as usize);
                (id, feature_distance(point.features(), features))
            })
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
            .take(self.config.k)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn search(&self, query: &Query) -> QueryAnswer {
        let mut candidates = self.candidates(&query.predicate);
        let padded = self.pad(&mut candidates);
        QueryAnswer {
            ids: self.rank(&candidates, query.features),
            padded,
        }
    }

    /// answers every row of `queries`, in order
    pub fn run(&self, queries: &VectorDataset<f32>) -> Result<(KnnResults, BaselineStats)> {
        if queries.n > 0 && queries.dim != self.config.query_dimensions() {
            return Err(Error::InvalidConfig(format!(
                "queries have {} dimensions, expected {}",
                queries.dim,
                self.config.query_dimensions()
            )));
        }

        info!(
            k = self.config.k,
            sample_proportion = self.config.sample_proportion,
            sample_size = self.sample_size,
            parallel = self.config.parallel,
            "running sampling baseline over {} queries",
            queries.n
        );

        let pb = self.progress_bar(queries.n);
        let answer = |i: usize| {
            let query = Query::parse(queries.get(i));
            (query.predicate.kind, self.search(&query))
        };

        let answers: Vec<(PredicateKind, QueryAnswer)> = if self.config.parallel {
            (0..queries.n)
                .into_par_iter()
                .progress_with(pb.clone())
                .map(answer)
                .collect()
        } else {
            (0..queries.n).progress_with(pb.clone()).map(answer).collect()
        };
        pb.finish_and_clear();

        let mut stats = BaselineStats::default();
        let mut ids = Vec::with_capacity(queries.n * self.config.k);
        for (kind, answer) in answers {
            stats.record(kind, answer.padded);
            ids.extend(answer.ids);
        }

        Ok((KnnResults::new(queries.n, self.config.k, ids), stats))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{msg} {wide_bar:.green/gray} {pos}/{len} [{elapsed_precise}]({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb.set_message("Answering queries");
        pb
    }
}
