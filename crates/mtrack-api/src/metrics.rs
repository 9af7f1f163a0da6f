//! Prometheus counters exposed on `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    /// Tolerance evaluations by outcome
    pub evaluations: IntCounterVec,
    /// Form validations by form and verdict
    pub validations: IntCounterVec,
    /// Submission attempts by kind and result
    pub submissions: IntCounterVec,
    /// Report builds by completeness
    pub reports: IntCounterVec,
}

fn counter(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> Result<IntCounterVec, prometheus::Error> {
    let counter = IntCounterVec::new(Opts::new(name, help).namespace("mtrack"), labels)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        Ok(Self {
            evaluations: counter(&registry, "tolerance_evaluations_total", "Tolerance evaluations", &["outcome"])?,
            validations: counter(&registry, "validations_total", "Form validations", &["form", "verdict"])?,
            submissions: counter(&registry, "submissions_total", "Submission attempts", &["kind", "result"])?,
            reports: counter(&registry, "reports_total", "Report builds", &["complete"])?,
            registry,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
