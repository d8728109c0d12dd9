pub mod pid_marker;
pub mod signals;

pub use pid_marker::PidMarker;
