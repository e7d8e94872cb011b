// ============ Modal Forms ============

pub mod driver_application;
pub mod user_edit;
pub mod vehicle_edit;

pub use driver_application::{DriverApplication, DriverApplicationForm, DriverFiles, Step};
pub use user_edit::{SaveOutcome, UserEditForm};
pub use vehicle_edit::VehicleEditForm;

/// Submit-button state shared by the edit modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Ready,
    Saving,
    Blocked,
}
