//! Property tests for the discovery engine.

mod pc_properties;
