// Library surface for the terminal front end, headless tests and reuse.
// Rendering stays in the binary; nothing here touches the terminal except
// the crossterm event source in `runtime`.
pub mod app_dirs;
pub mod classify;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod source;
pub mod time_series;
pub mod util;

pub use classify::UnitStatus;
pub use error::ClackError;
pub use evaluator::Evaluator;
pub use metrics::Metrics;
pub use session::{Mode, Phase, SessionConfig, TargetText};
