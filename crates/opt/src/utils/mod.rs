mod misc;

pub use misc::*;

/// Environment variable holding the log filter of optbox optimizers (default `info`)
pub const OPTBOX_LOG: &str = "OPTBOX_LOG";
