// Core data models for Paper Desk
// These structs mirror the payloads served by the journal API

pub mod loose;
pub mod locale;
pub mod stage;
pub mod paper;
pub mod review;
pub mod withdrawal;
pub mod profile;

pub use locale::*;
pub use stage::*;
pub use paper::*;
pub use review::*;
pub use withdrawal::*;
pub use profile::*;
