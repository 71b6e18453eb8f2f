// Pipelines: orchestration over the counting core.

pub mod batch;
