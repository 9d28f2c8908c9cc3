pub mod consts;
pub mod degrade;
pub mod error;
pub mod frame;
pub mod io;
pub mod metrics;
pub mod optimize;
pub mod pipeline;
pub mod psf;
