// ============================================================================
// Order Service
// ============================================================================
//
// - domain:  order placement and the product catalog
// - clients: inventory service client
// - store:   order persistence
// - web:     HTTP boundary and the failure → response translator
// - metrics: Prometheus metrics
// - config:  YAML configuration
//
// ============================================================================

pub mod clients;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod store;
pub mod web;
