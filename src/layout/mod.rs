pub(crate) mod metrics;
