pub mod acquirer;
pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod sink;
pub mod table;
