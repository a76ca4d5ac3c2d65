//! Cross-crate scenario tests: each module exercises one end-to-end
//! scenario from the component specs, wiring real crates together rather
//! than a single crate's own unit fixtures.

#[cfg(test)]
mod codec_scenarios;
#[cfg(test)]
mod put_memory_scenario;
#[cfg(test)]
mod splitter_scenario;
#[cfg(test)]
mod stream_scenarios;
