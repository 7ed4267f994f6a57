//! FlagGlobe - a country information aggregator.
//!
//! # Overview
//!
//! FlagGlobe combines two upstream data sources into one consolidated view of
//! a country: structured facts from REST Countries and ranked article
//! snippets from Wikipedia's search API. It supports single-country lookup,
//! two-country side-by-side comparison, and a static trivia quiz.
//!
//! # Partial-failure contract
//!
//! The facts lookup is essential; the encyclopedia search is supplementary.
//! A facts failure short-circuits the query and is reported in the result,
//! while an encyclopedia failure silently degrades to an empty article list.
//! Nothing is cached or persisted; every query is built from scratch.
//!
//! # Modules
//!
//! - [`model`]: Country records, article references, and the aggregate result
//! - [`data_sources`]: REST Countries and Wikipedia clients
//! - [`aggregation`]: Per-query orchestration and the partial-failure contract
//! - [`quiz`]: Static trivia fixture and scoring
//! - [`api`]: HTTP API handlers

pub mod aggregation;
pub mod api;
pub mod data_sources;
pub mod model;
pub mod quiz;
