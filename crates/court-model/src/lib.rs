//! CourtVision Data Model
//!
//! Defines the core data contracts for shot analysis:
//! - **Positions:** Per-frame ball observations from the tracker
//! - **Court:** Normalized court geometry, hoop location, and calibration
//! - **Shots:** Classified shot events and court zones
//! - **Stats:** Per-zone and overall shooting statistics
//! - **Session:** On-disk session directories and analysis reports
//!
//! Court coordinates are normalized to the `[0.0, 100.0]` range on both
//! axes, independent of camera perspective. The hoop end of the court sits
//! near `y = 0`.

pub mod court;
pub mod position;
pub mod session;
pub mod shot;
pub mod stats;

pub use court::*;
pub use position::*;
pub use session::*;
pub use shot::*;
pub use stats::*;
