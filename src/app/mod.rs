pub mod dispatch;
pub mod status;

pub use dispatch::{EXIT_CONFIG_ERROR, EXIT_OK, default_collaborators, launch, run_to_exit};
