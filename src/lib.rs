//! Givebox - Donation Collection and Payment Processing
//!
//! This crate implements the donation workflow for a web content-management
//! deployment: validating a donation submission, resolving the charge amount
//! from tiered donation types and promo codes, persisting donor and donation
//! records, and dispatching one-time and recurring charges through a
//! pluggable payment gateway backend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
