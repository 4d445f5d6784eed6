//! Statistical utilities for the datagames workspace.
//!
//! This crate provides the numeric building blocks used by the games:
//!
//! - **Descriptive statistics**: mean, median, variance and spread of a sample set
//! - **Density histograms**: equal-width binning normalised to unit area, used to
//!   draw sample sets and to overlay probability densities on them
//! - **Linear regression**: ordinary least squares with the coefficient of
//!   determination (R²)
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`histogram`]: Equal-width density histograms
//! - [`regression`]: Ordinary least-squares line fitting
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use datagames_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Building a density histogram
//!
//! ```
//! use datagames_stats::histogram::DensityHistogram;
//!
//! let values = [0.5, 1.5, 1.5, 2.5];
//! let histogram = DensityHistogram::new(&values, 3);
//! assert_eq!(histogram.bins.len(), 3);
//! ```
//!
//! ## Fitting a line
//!
//! ```
//! use datagames_stats::regression::LinearFit;
//!
//! let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! assert!((fit.intercept - 1.0).abs() < 1e-12);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod regression;
