//! Real-world scenario benchmarks: complete beds and the output bus.

mod beds;
mod bus;

pub use beds::bench_beds;
pub use bus::bench_bus;
